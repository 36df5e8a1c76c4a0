//! Thin client for the Edelweiss dataset API
//!
//! Covers the handful of endpoints the smoke-test command drives: create a
//! dataset, upload data into its in-progress version, infer a schema,
//! publish, query a published version, and delete. Every call authenticates
//! with the bearer token produced by the device authorization flow; the
//! client knows nothing about how that token was obtained.

mod client;
mod error;

pub use client::{Dataset, DatasetsClient};
pub use error::{Error, Result};
