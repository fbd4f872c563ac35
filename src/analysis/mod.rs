//! Analysis module - the statistical building blocks

pub mod correlation;
pub mod describe;
pub mod descriptive;
pub mod error;
pub mod hourly;
pub mod hypothesis;
pub mod inference;
pub mod loader;

pub use correlation::*;
pub use describe::*;
pub use descriptive::*;
pub use error::AnalysisError;
pub use hourly::*;
pub use hypothesis::*;
pub use inference::*;
pub use loader::*;
