//! The combination search.
//!
//! [`Search`] finds every partition of a hand under one [`Exclusion`];
//! [`Combinations`] keeps the answers per exclusion for the player that
//! asked. Each run is bounded by a [`Config`]: an expansion ceiling and a
//! [`Cancel`] token checked at every recursive step.
pub mod cache;
pub use cache::*;

pub mod cancel;
pub use cancel::*;

pub mod config;
pub use config::*;

pub mod diagnostics;
pub use diagnostics::*;

pub mod engine;
pub use engine::*;

pub mod error;
pub use error::*;

pub mod exclusion;
pub use exclusion::*;
