//! Shared types for the calculator API workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
