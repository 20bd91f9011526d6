//! Integration tests for Quill.

pub mod cli_test;
pub mod executor_test;
pub mod pipeline_test;
