//! Shared types for the MyAussie client workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
