use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eventra_shared::models::{ConfirmRequest, ConfirmResponse, LockRequest, LockResponse};
use eventra_shared::Id;
use tracing::{debug, error, info};

use crate::gateway::AuthGateway;
use crate::payment::PaymentStep;
use crate::routes;
use crate::selection::SharedBoard;
use crate::transport::{ApiRequest, ApiResponse};
use crate::ui::Ui;
use crate::{CoreError, CoreResult};

pub const LOGIN_TO_BOOK: &str = "Please login to book tickets.";
pub const CONFIRM_FAILED_PREFIX: &str = "Payment/Confirmation Failed: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Locking,
    Locked,
    Paying,
    Confirmed,
    Failed,
}

impl Phase {
    fn can_advance_to(self, to: Phase) -> bool {
        matches!(
            (self, to),
            (Phase::Idle, Phase::Locking)
                | (Phase::Locking, Phase::Locked)
                | (Phase::Locking, Phase::Failed)
                | (Phase::Locked, Phase::Paying)
                | (Phase::Paying, Phase::Confirmed)
                | (Phase::Paying, Phase::Failed)
                | (Phase::Failed, Phase::Idle)
        )
    }
}

/// One checkout, from the click to either the ticket page or back to idle.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingAttempt {
    pub event_id: Id,
    pub seat_ids: Vec<Id>,
    pub booking_id: Option<Id>,
    phase: Phase,
}

impl BookingAttempt {
    pub fn new(event_id: Id, seat_ids: Vec<Id>) -> Self {
        Self {
            event_id,
            seat_ids,
            booking_id: None,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn advance(&mut self, to: Phase) -> CoreResult<()> {
        if !self.phase.can_advance_to(to) {
            return Err(CoreError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        debug!(event_id = %self.event_id, from = ?self.phase, to = ?to, "Booking phase change");
        self.phase = to;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Empty selection, nothing happened.
    NothingSelected,
    /// Another checkout on this board has not finished yet; nothing was sent.
    AlreadyInFlight,
    /// No session; the user was sent to the login page before any call.
    LoginRequired,
    LockRejected { message: String },
    ConfirmRejected { message: String },
    Confirmed { booking_id: Id, ticket_path: String },
    /// The gateway logged the user out mid-flow.
    SessionExpired,
    NetworkFailure,
    /// The page was torn down while the flow was suspended.
    Stale,
}

/// Generation counter owned by a page; bumping it invalidates every guard
/// taken before.
#[derive(Debug, Clone, Default)]
pub struct ViewEpoch(Arc<AtomicU64>);

impl ViewEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guard(&self) -> ViewGuard {
        ViewGuard {
            epoch: self.0.clone(),
            seen: self.0.load(Ordering::SeqCst),
        }
    }

    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct ViewGuard {
    epoch: Arc<AtomicU64>,
    seen: u64,
}

impl ViewGuard {
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.seen
    }
}

/// Orchestrates lock → payment → confirm for the seats selected on a board.
pub struct BookingFlow {
    gateway: Arc<AuthGateway>,
    payment: Arc<dyn PaymentStep>,
    ui: Arc<dyn Ui>,
}

impl BookingFlow {
    pub fn new(gateway: Arc<AuthGateway>, payment: Arc<dyn PaymentStep>, ui: Arc<dyn Ui>) -> Self {
        Self {
            gateway,
            payment,
            ui,
        }
    }

    /// Runs one checkout for `event_id` with the board's current selection.
    ///
    /// The board stays in processing from the lock request until the flow
    /// ends, so at most one attempt per board is in flight. Every failure is
    /// handled here; the outcome only reports what happened.
    pub async fn checkout(&self, event_id: &Id, board: &SharedBoard, guard: &ViewGuard) -> BookingOutcome {
        if board.lock().selected_ids().is_empty() {
            return BookingOutcome::NothingSelected;
        }

        if !self.gateway.session().is_authenticated() {
            return self.login_required();
        }

        let seat_ids = {
            let mut board = board.lock();
            if board.is_processing() {
                debug!(event_id = %event_id, "Checkout already in flight");
                return BookingOutcome::AlreadyInFlight;
            }
            let seat_ids = board.selected_ids();
            if seat_ids.is_empty() {
                return BookingOutcome::NothingSelected;
            }
            board.set_processing(true);
            seat_ids
        };

        let mut attempt = BookingAttempt::new(event_id.clone(), seat_ids);
        let outcome = match self.run(&mut attempt, board, guard).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(event_id = %event_id, phase = ?attempt.phase(), error = %e, "Booking flow aborted");
                BookingOutcome::NetworkFailure
            }
        };
        if outcome != BookingOutcome::Stale && guard.is_current() {
            board.lock().set_processing(false);
        }
        outcome
    }

    fn login_required(&self) -> BookingOutcome {
        self.ui.alert(LOGIN_TO_BOOK);
        self.ui.navigate(routes::PAGE_LOGIN);
        BookingOutcome::LoginRequired
    }

    async fn run(&self, attempt: &mut BookingAttempt, board: &SharedBoard, guard: &ViewGuard) -> CoreResult<BookingOutcome> {
        attempt.advance(Phase::Locking)?;
        let lock_request = ApiRequest::post(routes::BOOKINGS_LOCK).json(&LockRequest {
            event_id: attempt.event_id.clone(),
            seat_ids: attempt.seat_ids.clone(),
        })?;
        let response = self.gateway.auth_fetch(lock_request).await?;
        if !guard.is_current() {
            return Ok(self.stale(attempt));
        }

        if !response.is_success() {
            attempt.advance(Phase::Failed)?;
            let outcome = self.rejected(&response, |message| {
                self.ui.alert(&message);
                BookingOutcome::LockRejected { message }
            });
            attempt.advance(Phase::Idle)?;
            return Ok(outcome);
        }

        let lock: LockResponse = response.json()?;
        info!(event_id = %attempt.event_id, booking_id = %lock.booking_id, seats = attempt.seat_ids.len(), "Seats locked");
        attempt.booking_id = Some(lock.booking_id.clone());
        attempt.advance(Phase::Locked)?;

        attempt.advance(Phase::Paying)?;
        self.payment.settle(attempt).await?;
        if !guard.is_current() {
            return Ok(self.stale(attempt));
        }

        let confirm_request = ApiRequest::post(routes::BOOKINGS_CONFIRM).json(&ConfirmRequest {
            booking_id: lock.booking_id,
        })?;
        let response = self.gateway.auth_fetch(confirm_request).await?;
        if !guard.is_current() {
            return Ok(self.stale(attempt));
        }

        if !response.is_success() {
            attempt.advance(Phase::Failed)?;
            let outcome = self.rejected(&response, |message| {
                self.ui.alert(&format!("{}{}", CONFIRM_FAILED_PREFIX, message));
                BookingOutcome::ConfirmRejected { message }
            });
            attempt.advance(Phase::Idle)?;
            return Ok(outcome);
        }

        let confirmed: ConfirmResponse = response.json()?;
        attempt.advance(Phase::Confirmed)?;
        board.lock().clear();

        let ticket_path = routes::ticket(&confirmed.booking_id);
        info!(booking_id = %confirmed.booking_id, "Booking confirmed");
        self.ui.navigate(&ticket_path);
        Ok(BookingOutcome::Confirmed {
            booking_id: confirmed.booking_id,
            ticket_path,
        })
    }

    /// A non-success answer means the session is gone, or carries a backend
    /// message for the user.
    fn rejected(&self, response: &ApiResponse, surface: impl FnOnce(String) -> BookingOutcome) -> BookingOutcome {
        if !self.gateway.session().is_authenticated() {
            // The gateway redirects when it logs out itself, not when the
            // session was already gone before the call.
            if *response == ApiResponse::login_required() {
                info!("Session missing at checkout");
                return self.login_required();
            }
            info!(status = response.status, "Session ended during checkout");
            return BookingOutcome::SessionExpired;
        }
        surface(response.message().unwrap_or_default())
    }

    fn stale(&self, attempt: &BookingAttempt) -> BookingOutcome {
        debug!(event_id = %attempt.event_id, phase = ?attempt.phase(), "Ignoring completion for a closed page");
        BookingOutcome::Stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SeatBoard;
    use crate::session::{MemoryTokenStore, TokenStore};
    use crate::testing::{RecordingUi, ScriptedTransport};
    use crate::payment::SimulatedPayment;
    use eventra_shared::models::{Role, Seat, SeatStatus};
    use serde_json::json;
    use std::time::Duration;

    struct Harness {
        transport: Arc<ScriptedTransport>,
        store: Arc<MemoryTokenStore>,
        ui: Arc<RecordingUi>,
        flow: BookingFlow,
        board: SharedBoard,
        epoch: ViewEpoch,
    }

    fn seat(id: &str, row: &str, number: u32, price: &str) -> Seat {
        Seat {
            id: Id::from(id),
            row: row.to_string(),
            number,
            seat_type: None,
            price: price.parse().unwrap(),
            status: SeatStatus::Available,
        }
    }

    fn harness(logged_in: bool) -> Harness {
        let transport = Arc::new(ScriptedTransport::new());
        let store = Arc::new(MemoryTokenStore::new());
        if logged_in {
            store.set("access-1", Some("refresh-1"), Some(Role::Customer));
        }
        let ui = Arc::new(RecordingUi::default());
        let gateway = Arc::new(AuthGateway::new(transport.clone(), store.clone(), ui.clone()));
        let flow = BookingFlow::new(
            gateway,
            Arc::new(SimulatedPayment::new(Duration::from_millis(1500))),
            ui.clone(),
        );
        let board = SharedBoard::new(SeatBoard::new(vec![
            seat("A", "A", 1, "10"),
            seat("B", "A", 2, "15"),
        ]));
        Harness {
            transport,
            store,
            ui,
            flow,
            board,
            epoch: ViewEpoch::new(),
        }
    }

    fn select_both(h: &Harness) {
        let mut board = h.board.lock();
        board.toggle(&Id::from("A"));
        board.toggle(&Id::from("B"));
    }

    #[test]
    fn test_phase_transitions() {
        let mut attempt = BookingAttempt::new(Id::from("1"), vec![]);
        assert!(attempt.advance(Phase::Paying).is_err());
        attempt.advance(Phase::Locking).unwrap();
        attempt.advance(Phase::Failed).unwrap();
        attempt.advance(Phase::Idle).unwrap();
        attempt.advance(Phase::Locking).unwrap();
        attempt.advance(Phase::Locked).unwrap();
        attempt.advance(Phase::Paying).unwrap();
        attempt.advance(Phase::Confirmed).unwrap();
        assert!(matches!(
            attempt.advance(Phase::Idle),
            Err(CoreError::InvalidTransition { from: Phase::Confirmed, to: Phase::Idle })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lock_delay_confirm() {
        let h = harness(true);
        select_both(&h);
        h.transport
            .reply(201, json!({"msg": "Seats locked", "booking_id": "B1"}))
            .reply(200, json!({"msg": "Booking confirmed!", "booking_id": "B1"}));

        let started = tokio::time::Instant::now();
        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(
            outcome,
            BookingOutcome::Confirmed {
                booking_id: Id::from("B1"),
                ticket_path: "/api/bookings/ticket/B1".to_string()
            }
        );
        assert!(started.elapsed() >= Duration::from_millis(1500));

        let sent = h.transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].path, routes::BOOKINGS_LOCK);
        assert_eq!(sent[0].body, Some(json!({"event_id": 7, "seat_ids": ["A", "B"]})));
        assert_eq!(sent[1].path, routes::BOOKINGS_CONFIRM);
        assert_eq!(sent[1].body, Some(json!({"booking_id": "B1"})));

        assert_eq!(h.ui.locations(), vec!["/api/bookings/ticket/B1".to_string()]);
        assert_eq!(h.board.lock().summary().count, 0);
    }

    #[tokio::test]
    async fn test_empty_selection_is_noop() {
        let h = harness(true);
        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;
        assert_eq!(outcome, BookingOutcome::NothingSelected);
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_requires_login_before_locking() {
        let h = harness(false);
        select_both(&h);
        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(outcome, BookingOutcome::LoginRequired);
        assert!(h.transport.requests().is_empty());
        assert_eq!(h.ui.alerts(), vec![LOGIN_TO_BOOK.to_string()]);
        assert_eq!(h.ui.locations(), vec![routes::PAGE_LOGIN.to_string()]);
        assert_eq!(h.board.lock().summary().count, 2);
    }

    #[tokio::test]
    async fn test_lock_failure_keeps_selection() {
        let h = harness(true);
        select_both(&h);
        h.transport.reply(409, json!({"msg": "One or more seats are already booked"}));

        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(
            outcome,
            BookingOutcome::LockRejected {
                message: "One or more seats are already booked".to_string()
            }
        );
        assert_eq!(h.transport.requests().len(), 1);
        assert_eq!(h.ui.alerts(), vec!["One or more seats are already booked".to_string()]);
        let board = h.board.lock();
        assert_eq!(board.selected_ids(), vec![Id::from("A"), Id::from("B")]);
        assert!(board.checkout().enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_failure_reenables_checkout() {
        let h = harness(true);
        select_both(&h);
        h.transport
            .reply(201, json!({"booking_id": 11}))
            .reply(400, json!({"msg": "Booking expired"}));

        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(
            outcome,
            BookingOutcome::ConfirmRejected {
                message: "Booking expired".to_string()
            }
        );
        assert_eq!(h.ui.alerts(), vec!["Payment/Confirmation Failed: Booking expired".to_string()]);
        assert!(h.ui.locations().is_empty());
        let board = h.board.lock();
        assert!(!board.is_processing());
        assert!(board.checkout().enabled);
        assert_eq!(board.summary().count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_torn_down_page_ignores_completion() {
        let h = harness(true);
        select_both(&h);
        h.transport.reply(201, json!({"booking_id": "B1"}));

        let guard = h.epoch.guard();
        let event_id = Id::from("7");
        let flow = h.flow.checkout(&event_id, &h.board, &guard);
        let teardown = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            h.epoch.invalidate();
        };
        let (outcome, _) = tokio::join!(flow, teardown);

        assert_eq!(outcome, BookingOutcome::Stale);
        assert_eq!(h.transport.requests().len(), 1);
        assert!(h.ui.locations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_while_payment_pending() {
        let h = harness(true);
        {
            h.board.lock().toggle(&Id::from("A"));
        }
        h.transport
            .reply(201, json!({"booking_id": "B1"}))
            .reply(200, json!({"booking_id": "B1"}));

        let guard = h.epoch.guard();
        let event_id = Id::from("7");
        let flow = h.flow.checkout(&event_id, &h.board, &guard);
        let click = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let board = h.board.lock();
            assert!(board.is_processing());
            assert!(!board.checkout().enabled);
        };
        let (outcome, _) = tokio::join!(flow, click);

        assert!(matches!(outcome, BookingOutcome::Confirmed { .. }));
        assert_eq!(h.transport.requests()[0].body, Some(json!({"event_id": 7, "seat_ids": ["A"]})));
    }

    #[tokio::test]
    async fn test_expired_session_aborts_silently() {
        let h = harness(true);
        select_both(&h);
        h.transport
            .reply(401, json!({"msg": "Token has expired"}))
            .reply(401, json!({"msg": "Token has expired"}));

        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(outcome, BookingOutcome::SessionExpired);
        assert!(h.ui.alerts().is_empty());
        assert_eq!(h.ui.locations(), vec![routes::PAGE_LOGIN.to_string()]);
        assert!(!h.store.get().is_authenticated());
    }

    #[tokio::test]
    async fn test_network_failure_is_swallowed() {
        let h = harness(true);
        select_both(&h);
        h.transport.fail("connection reset");

        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(outcome, BookingOutcome::NetworkFailure);
        assert!(h.ui.alerts().is_empty());
        assert_eq!(h.board.lock().summary().count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_checkout_while_first_in_flight() {
        let h = harness(true);
        select_both(&h);
        h.transport
            .reply(201, json!({"booking_id": "B1"}))
            .reply(200, json!({"booking_id": "B1"}));

        let guard = h.epoch.guard();
        let event_id = Id::from("7");
        let first = h.flow.checkout(&event_id, &h.board, &guard);
        let second = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            h.flow.checkout(&Id::from("7"), &h.board, &guard).await
        };
        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, BookingOutcome::Confirmed { .. }));
        assert_eq!(second, BookingOutcome::AlreadyInFlight);
        assert_eq!(h.transport.requests().len(), 2);
        assert_eq!(h.ui.locations().len(), 1);
    }

    #[tokio::test]
    async fn test_processing_board_sends_nothing() {
        let h = harness(true);
        select_both(&h);
        h.board.lock().set_processing(true);

        let outcome = h.flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(outcome, BookingOutcome::AlreadyInFlight);
        assert!(h.transport.requests().is_empty());
        assert!(h.board.lock().is_processing());
    }

    #[tokio::test]
    async fn test_lock_rejection_releases_processing() {
        let h = harness(true);
        select_both(&h);
        h.transport
            .reply(409, json!({"msg": "Seat already taken"}))
            .reply(409, json!({"msg": "Seat already taken"}));

        let guard = h.epoch.guard();
        h.flow.checkout(&Id::from("7"), &h.board, &guard).await;
        let retry = h.flow.checkout(&Id::from("7"), &h.board, &guard).await;

        assert!(matches!(retry, BookingOutcome::LockRejected { .. }));
        assert_eq!(h.transport.requests().len(), 2);
        assert!(!h.board.lock().is_processing());
    }

    /// Reports a session on the first read only, as if another tab logged out
    /// right after the entry check.
    #[derive(Default)]
    struct VanishingSession {
        reads: std::sync::Mutex<u32>,
    }

    impl TokenStore for VanishingSession {
        fn get(&self) -> crate::session::Session {
            let mut reads = self.reads.lock().unwrap();
            *reads += 1;
            let mut session = crate::session::Session::default();
            if *reads == 1 {
                session.apply("access-1", None, Some(Role::Customer));
            }
            session
        }

        fn set(&self, _access_token: &str, _refresh_token: Option<&str>, _role: Option<Role>) {}

        fn clear(&self) {}
    }

    #[tokio::test]
    async fn test_session_gone_before_lock_goes_to_login() {
        let h = harness(true);
        select_both(&h);
        let gateway = Arc::new(AuthGateway::new(
            h.transport.clone(),
            Arc::new(VanishingSession::default()),
            h.ui.clone(),
        ));
        let flow = BookingFlow::new(
            gateway,
            Arc::new(SimulatedPayment::new(Duration::from_millis(1500))),
            h.ui.clone(),
        );

        let outcome = flow.checkout(&Id::from("7"), &h.board, &h.epoch.guard()).await;

        assert_eq!(outcome, BookingOutcome::LoginRequired);
        assert!(h.transport.requests().is_empty());
        assert_eq!(h.ui.alerts(), vec![LOGIN_TO_BOOK.to_string()]);
        assert_eq!(h.ui.locations(), vec![routes::PAGE_LOGIN.to_string()]);
        let board = h.board.lock();
        assert!(!board.is_processing());
        assert_eq!(board.summary().count, 2);
    }
}
