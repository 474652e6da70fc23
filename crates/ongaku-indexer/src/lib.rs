pub mod error;
pub mod harmonia;
pub mod model;

pub use error::IndexerError;
pub use harmonia::{parse_response, IndexerResponse};
pub use model::ReleaseInfo;
