pub mod booking;
pub mod gateway;
pub mod payment;
pub mod routes;
pub mod selection;
pub mod session;
pub mod transport;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use booking::{BookingAttempt, BookingFlow, BookingOutcome, Phase, ViewEpoch, ViewGuard};
pub use gateway::AuthGateway;
pub use payment::{PaymentStep, SimulatedPayment};
pub use selection::{CheckoutControl, SeatBoard, SelectionSummary, SharedBoard, ToggleResult};
pub use session::{MemoryTokenStore, Session, TokenStore};
pub use transport::{ApiRequest, ApiResponse, Method, Transport};
pub use ui::Ui;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Malformed response body: {0}")]
    Decode(String),
    #[error("Invalid booking transition from {from:?} to {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
}

pub type CoreResult<T> = Result<T, CoreError>;
