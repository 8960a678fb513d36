//! Analysis pipeline: prompt construction, completion calls, and risk formatting.

mod service;
pub mod types;

pub use service::{AnalysisApi, AnalysisService};
pub use types::{AnalysisError, AnalysisResult};
