pub mod api;
pub mod error;
pub mod pages;
pub mod terminal;
pub mod view;

pub use api::EventraApi;
pub use error::{ClientError, ClientResult};
pub use pages::{Context, PageController, Route, View};
pub use terminal::TerminalUi;
