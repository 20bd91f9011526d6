//! Quill - ask a SQLite database questions in plain English.
//!
//! This library exposes the core modules for use in integration tests.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod output;
pub mod query;
