//! Report module - collecting and rendering analysis results

pub mod eda_report;
pub mod export;
pub mod summary;

pub use eda_report::*;
pub use export::*;
pub use summary::*;
