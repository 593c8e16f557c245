use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::booking::BookingAttempt;
use crate::CoreResult;

/// The single suspension point between a successful lock and the
/// confirmation request.
#[async_trait]
pub trait PaymentStep: Send + Sync {
    /// Settle payment for a locked attempt. `Ok` means "go ahead and confirm".
    async fn settle(&self, attempt: &BookingAttempt) -> CoreResult<()>;
}

/// Stand-in for gateway latency: waits once, never fails, cannot be cancelled.
#[derive(Debug, Clone)]
pub struct SimulatedPayment {
    delay: Duration,
}

impl SimulatedPayment {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedPayment {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl PaymentStep for SimulatedPayment {
    async fn settle(&self, attempt: &BookingAttempt) -> CoreResult<()> {
        debug!(booking_id = ?attempt.booking_id, delay_ms = self.delay.as_millis() as u64, "Simulating payment");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
