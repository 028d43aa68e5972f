//! Melds and the pieces the search builds them from.
//!
//! - [`Compatibility`]: how a candidate relates to an open meld's last card
//! - [`Tracker`]: the open meld on one branch, grown card by card
//! - [`Meld`] / [`Partition`]: closed melds and full splits of a hand
pub mod compatibility;
pub use compatibility::*;

pub mod kind;
pub use kind::*;

pub mod meld;
pub use meld::*;

pub mod tracker;
pub use tracker::*;
