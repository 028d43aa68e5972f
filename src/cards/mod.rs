//! Cards, their branch-local views, and the physical deck.
//!
//! - [`Card`]: immutable identity plus sign and suit
//! - [`CardView`]: what the search believes a card to be on one branch
//! - [`Deck`]: `copies` standard decks with jokers, in draw order
pub mod card;
pub use card::*;

pub mod deck;
pub use deck::*;

pub mod sign;
pub use sign::*;

pub mod suit;
pub use suit::*;

pub mod view;
pub use view::*;
