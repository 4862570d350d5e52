//! Mad Libs: fill story templates with your own words (or random ones).
//!
//! The library holds everything with actual rules in it: the placeholder
//! parser and substitution, the random word table, the per-round fill
//! state machine and the bounded story history. Terminal rendering lives
//! in the `madlibs` binary behind the [`core::game::Frontend`] trait.

pub mod core;
pub mod schema;
