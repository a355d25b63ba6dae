//! Lottery number selection. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod events;
pub mod rng;
pub mod selector;

pub use config::*;
pub use events::*;
pub use rng::*;
pub use selector::*;
