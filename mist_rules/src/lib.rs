//! # Mist Rules
//!
//! Rule data shared by every Mist rule system: characters, their themes,
//! moves, and the Essence classification.
//! This crate holds no runtime state and performs no I/O.

pub mod entities;
pub mod error;
pub mod mechanics;

pub use entities::*;
pub use error::*;
pub use mechanics::*;
