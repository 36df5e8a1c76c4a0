//! Common types for the Edelweiss client tools

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
