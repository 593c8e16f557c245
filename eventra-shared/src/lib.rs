pub mod ids;
pub mod models;
pub mod money;
pub mod secret;

pub use ids::Id;
pub use money::Money;
pub use secret::Masked;
