pub mod config;
pub mod error;
pub mod logging;

// Pipeline stages
pub mod blob_url;
pub mod permalink;
pub mod resolver;
pub mod search;
pub mod timestamp;
pub mod transport;

pub use error::PermalinkError;
