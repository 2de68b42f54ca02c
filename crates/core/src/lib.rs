pub mod config;
pub mod receipt;
pub mod region;
pub mod store;

pub use config::{ConfigError, ExtractionConfig};
pub use receipt::{ExtractedReceipt, MSG_INCOMPLETE, MSG_SUCCESS};
pub use region::{BBox, Category, Detection, RecognizedRegion};
pub use store::{default_stores, CanonicalStore};
