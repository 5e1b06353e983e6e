//! # System Modules
//!
//! Interchangeable rule systems for the Mist games, and the machinery that
//! picks one at runtime.
//!
//! ## Core Components
//!
//! - **system**: the [`RuleSystem`] contract, the Mist Engine layer, and the
//!   City of Mist and Otherscape variants
//! - **registry**: systems keyed by validated name, with a fallback
//! - **controller**: resolves the configured system and runs the switch protocol
//! - **settings**: the persistence seam and each system's settings schema
//! - **events**: typed character events and the Essence effect
//!
//! ## Startup
//!
//! Build a [`SystemRegistry`], run the registration phase once, freeze it in
//! an `Arc`, and hand it to a [`SystemController`] with the host's
//! collaborators.

pub mod controller;
pub mod error;
pub mod events;
pub mod host;
pub mod registry;
pub mod settings;
pub mod system;
pub mod testing;

pub use controller::*;
pub use error::*;
pub use events::*;
pub use host::*;
pub use registry::*;
pub use settings::*;
pub use system::*;
