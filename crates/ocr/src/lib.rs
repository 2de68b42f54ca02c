#[macro_use]
mod util;

pub mod aggregate;
pub mod amount;
pub mod date;
pub mod detector;
pub mod extract;
pub mod keywords;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod select;
pub mod store;

pub use aggregate::{aggregate, RawFields};
pub use amount::normalize_amount;
pub use date::normalize_date;
pub use detector::{Detector, StaticDetector};
pub use extract::Extractor;
pub use pipeline::{ReceiptPipeline, SourceError};
pub use preprocess::Variant;
pub use recognizer::{MockRecognizer, RecognitionError, Recognizer, ScriptedRecognizer};
pub use select::select_best;
pub use store::StoreResolver;
pub use util::similarity;
