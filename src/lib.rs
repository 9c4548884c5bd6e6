#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A hash map keyed by `i64` using separate chaining.
///
/// This module provides the [`LongMap`] container together with its entry
/// view and iterator types.
pub mod map;

#[cfg(feature = "serde")]
mod map_serde;

pub use map::Drain;
pub use map::Entry;
pub use map::InvalidLoadFactor;
pub use map::Iter;
pub use map::Keys;
pub use map::LongMap;
pub use map::OccupiedEntry;
pub use map::VacantEntry;
pub use map::Values;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hash builder used by [`LongMap`] when none is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else {
        /// Stand-in for the default hash builder when the `foldhash` feature
        /// is disabled. It cannot be constructed; supply a hasher through the
        /// `_and_hasher` constructors instead.
        pub enum DefaultHashBuilder {}
    }
}
