use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eventra_shared::models::{Seat, SeatStatus};
use eventra_shared::{Id, Money};
use tracing::debug;

pub const CHECKOUT_LABEL: &str = "Pay Now";
pub const PROCESSING_LABEL: &str = "Processing Payment...";

/// A rendered seat plus its visual selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatCell {
    pub seat: Seat,
    pub selected: bool,
}

impl SeatCell {
    pub fn is_available(&self) -> bool {
        self.seat.status == SeatStatus::Available
    }

    /// Status shown on the cell; selection overrides the backend status.
    pub fn display_status(&self) -> SeatStatus {
        if self.selected {
            SeatStatus::Selected
        } else {
            self.seat.status
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleResult {
    Selected,
    Deselected,
    /// Booked or locked seats never enter the selection.
    Unavailable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub count: usize,
    pub total: Money,
    /// Row+number of each selected seat in selection order, `", "`-separated.
    pub labels: String,
}

impl SelectionSummary {
    pub fn total_display(&self) -> String {
        self.total.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutControl {
    pub enabled: bool,
    pub label: &'static str,
}

/// Seat map state for one event page.
///
/// Only the membership set and the processing flag are stored; the summary
/// and the checkout control are recomputed on every read so the displayed
/// total can never drift from the selection.
#[derive(Debug, Clone, Default)]
pub struct SeatBoard {
    /// Backend order; a repeated id replaces the earlier entry in place.
    cells: Vec<SeatCell>,
    index: HashMap<Id, usize>,
    order: Vec<Id>,
    processing: bool,
}

impl SeatBoard {
    pub fn new(seats: Vec<Seat>) -> Self {
        let mut cells: Vec<SeatCell> = Vec::with_capacity(seats.len());
        let mut index = HashMap::with_capacity(seats.len());
        for seat in seats {
            let cell = SeatCell {
                seat,
                selected: false,
            };
            match index.get(&cell.seat.id) {
                Some(&at) => cells[at] = cell,
                None => {
                    index.insert(cell.seat.id.clone(), cells.len());
                    cells.push(cell);
                }
            }
        }
        Self {
            cells,
            index,
            order: Vec::new(),
            processing: false,
        }
    }

    pub fn cell(&self, seat_id: &Id) -> Option<&SeatCell> {
        self.index.get(seat_id).map(|&at| &self.cells[at])
    }

    fn cell_mut(&mut self, seat_id: &Id) -> Option<&mut SeatCell> {
        let at = *self.index.get(seat_id)?;
        self.cells.get_mut(at)
    }

    /// Every seat on the board, in the order the backend listed them.
    pub fn cells(&self) -> impl Iterator<Item = &SeatCell> {
        self.cells.iter()
    }

    pub fn is_selected(&self, seat_id: &Id) -> bool {
        self.cell(seat_id).map_or(false, |c| c.selected)
    }

    /// Flips membership of one seat and the `selected` flag on its cell only.
    pub fn toggle(&mut self, seat_id: &Id) -> ToggleResult {
        let Some(cell) = self.cell_mut(seat_id) else {
            return ToggleResult::Unknown;
        };

        if cell.selected {
            cell.selected = false;
            self.order.retain(|id| id != seat_id);
            debug!(seat_id = %seat_id, "Deselected seat");
            return ToggleResult::Deselected;
        }

        if !cell.is_available() {
            return ToggleResult::Unavailable;
        }

        cell.selected = true;
        self.order.push(seat_id.clone());
        debug!(seat_id = %seat_id, "Selected seat");
        ToggleResult::Selected
    }

    fn selected_cells(&self) -> impl Iterator<Item = &SeatCell> {
        self.order
            .iter()
            .filter_map(|id| self.cell(id))
            .filter(|cell| cell.selected)
    }

    pub fn summary(&self) -> SelectionSummary {
        let selected: Vec<&SeatCell> = self.selected_cells().collect();
        SelectionSummary {
            count: selected.len(),
            total: selected.iter().map(|c| c.seat.price).sum(),
            labels: selected
                .iter()
                .map(|c| c.seat.label())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Identifiers for a booking attempt, in selection order.
    pub fn selected_ids(&self) -> Vec<Id> {
        self.selected_cells().map(|c| c.seat.id.clone()).collect()
    }

    pub fn checkout(&self) -> CheckoutControl {
        CheckoutControl {
            enabled: !self.processing && self.selected_cells().next().is_some(),
            label: if self.processing {
                PROCESSING_LABEL
            } else {
                CHECKOUT_LABEL
            },
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Empties the selection after a completed booking.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.selected = false;
        }
        self.order.clear();
        self.processing = false;
    }
}

/// Board handle shared between the page's handlers and an in-flight booking.
///
/// The lock is only ever held for synchronous sections.
#[derive(Debug, Clone, Default)]
pub struct SharedBoard(Arc<Mutex<SeatBoard>>);

impl SharedBoard {
    pub fn new(board: SeatBoard) -> Self {
        Self(Arc::new(Mutex::new(board)))
    }

    pub fn lock(&self) -> MutexGuard<'_, SeatBoard> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
