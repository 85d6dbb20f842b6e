#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub(crate) use std::collections::hash_map::Entry as KeyEntry;
#[cfg(not(feature = "std"))]
pub(crate) use alloc::collections::btree_map::Entry as KeyEntry;

/// Bound for item keys stored in the crate's maps.
///
/// With `std` this is `Hash + Eq` (backed by `HashMap`); without it, `Ord` (backed by
/// `BTreeMap`).
#[cfg(feature = "std")]
pub trait ItemKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> ItemKey for K {}

#[cfg(not(feature = "std"))]
pub trait ItemKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> ItemKey for K {}
