//! Query synthesis and execution for Quill.
//!
//! `synthesizer` turns a question into SQL; `executor` runs that SQL and
//! reports an outcome. The two never share state.

pub mod executor;
pub mod synthesizer;

pub use executor::{ExecutionOutcome, QueryExecutor};
pub use synthesizer::QuerySynthesizer;
