use std::collections::BTreeMap;

use eventra_core::{CheckoutControl, SeatBoard, SelectionSummary};
use eventra_core::selection::SeatCell;

use super::{Action, Element};

/// Rows in lexicographic order, seats within a row by numeric seat number;
/// seats sharing a number keep board order.
pub fn rows<'a>(cells: impl IntoIterator<Item = &'a SeatCell>) -> Vec<(&'a str, Vec<&'a SeatCell>)> {
    let mut by_row: BTreeMap<&str, Vec<&SeatCell>> = BTreeMap::new();
    for cell in cells {
        by_row.entry(cell.seat.row.as_str()).or_default().push(cell);
    }
    by_row
        .into_iter()
        .map(|(row, mut seats)| {
            seats.sort_by_key(|c| c.seat.number);
            (row, seats)
        })
        .collect()
}

fn seat(cell: &SeatCell) -> Element {
    let seat = &cell.seat;
    let el = Element::new("div")
        .class(format!("seat {}", cell.display_status().as_str()))
        .attr("data-id", seat.id.as_str())
        .attr("data-price", seat.price.to_string())
        .attr("title", format!("{} - ${}", seat.label(), seat.price))
        .text(seat.number.to_string());
    // Selected seats stay clickable so they can be released.
    if cell.is_available() {
        el.on(Action::ToggleSeat {
            seat_id: seat.id.clone(),
        })
    } else {
        el
    }
}

pub fn seat_map(board: &SeatBoard) -> Element {
    Element::new("div").id("seatMap").children(rows(board.cells()).into_iter().map(|(row, seats)| {
        Element::new("div")
            .class("seat-row")
            .child(Element::new("span").class("row-label").text(row))
            .children(seats.into_iter().map(seat))
    }))
}

pub fn summary(summary: &SelectionSummary, checkout: CheckoutControl) -> Element {
    let labels = if summary.labels.is_empty() {
        String::new()
    } else {
        format!("({})", summary.labels)
    };
    let mut button = Element::new("button").id("bookBtn").class("btn-primary").text("Book Now");
    if checkout.enabled {
        button = button.on(Action::OpenCheckout);
    } else {
        button = button.attr("disabled", "disabled");
    }
    Element::new("div")
        .id("bookingSummary")
        .child(
            Element::new("p")
                .text("Selected: ")
                .child(Element::new("span").id("selectedCount").text(summary.count.to_string()))
                .child(Element::new("span").id("selectedSeatsList").text(labels)),
        )
        .child(
            Element::new("p")
                .text("Total: $")
                .child(Element::new("span").id("totalPrice").text(summary.total_display())),
        )
        .child(button)
}

/// Payment dialog opened from the summary; its submit runs the booking.
pub fn payment_modal(summary: &SelectionSummary, checkout: CheckoutControl) -> Element {
    let mut pay = Element::new("button")
        .attr("type", "submit")
        .class("btn-primary")
        .text(checkout.label);
    if checkout.enabled {
        pay = pay.on(Action::Pay);
    } else {
        pay = pay.attr("disabled", "disabled");
    }
    Element::new("div")
        .id("paymentModal")
        .child(
            Element::new("p")
                .text("Total: $")
                .child(Element::new("span").id("modalTotal").text(summary.total_display())),
        )
        .child(Element::new("form").id("paymentForm").child(pay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventra_shared::models::{Seat, SeatStatus};
    use eventra_shared::Id;

    fn seat(id: &str, row: &str, number: u32, status: SeatStatus) -> Seat {
        Seat {
            id: Id::from(id),
            row: row.to_string(),
            number,
            seat_type: None,
            price: "10".parse().unwrap(),
            status,
        }
    }

    #[test]
    fn test_unavailable_seats_have_no_handler() {
        let board = SeatBoard::new(vec![
            seat("1", "A", 1, SeatStatus::Available),
            seat("2", "A", 2, SeatStatus::Locked),
        ]);
        let map = seat_map(&board);
        assert_eq!(
            map.actions(),
            vec![&Action::ToggleSeat {
                seat_id: Id::from("1")
            }]
        );
        assert_eq!(map.by_class("locked").len(), 1);
    }

    #[test]
    fn test_selected_seat_class() {
        let mut board = SeatBoard::new(vec![seat("1", "A", 1, SeatStatus::Available)]);
        board.toggle(&Id::from("1"));
        let map = seat_map(&board);
        assert_eq!(map.by_class("selected").len(), 1);
        assert!(map.by_class("available").is_empty());
    }

    #[test]
    fn test_summary_disabled_when_empty() {
        let board = SeatBoard::new(vec![seat("1", "A", 1, SeatStatus::Available)]);
        let el = summary(&board.summary(), board.checkout());
        let button = el.by_id("bookBtn").unwrap();
        assert_eq!(button.get_attr("disabled"), Some("disabled"));
        assert!(button.action.is_none());
        assert_eq!(el.by_id("selectedSeatsList").unwrap().text_content(), "");
        assert_eq!(el.by_id("totalPrice").unwrap().text_content(), "0.00");
    }
}
