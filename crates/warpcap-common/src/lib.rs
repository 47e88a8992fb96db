//! # Warpcap Common
//!
//! Shared types, errors, and constants used across Warpcap components.
//!
//! ## Modules
//! - `types` - Core data structures (DisplayResolution, TextRect, ChallengeLength)
//! - `error` - Common error type
//! - `constants` - Alphabet, presets, and sampling ranges

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Result, WarpcapError};
pub use types::*;
