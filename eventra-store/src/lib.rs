pub mod app_config;
pub mod http;
pub mod token_file;

pub use app_config::Config;
pub use http::HttpTransport;
pub use token_file::FileTokenStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Token file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Token file {path} is not valid JSON: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}
