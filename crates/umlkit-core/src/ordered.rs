//! Helpers for name-keyed maps that keep insertion order.
//!
//! Fields, methods and the class list are all stored in [`IndexMap`]s keyed
//! by name. Renaming an entry must keep it at the same position, which
//! `IndexMap` does not offer directly; [`rekey`] provides it.

use std::collections::HashSet;

use indexmap::IndexMap;

/// Moves the value stored under `old` to the key `new`, keeping its position.
///
/// Returns a mutable reference to the moved value, or `None` when `old` is
/// not present (in which case the map is unchanged).
///
/// The caller must make sure `new` is not already a key of the map.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use umlkit_core::ordered::rekey;
///
/// let mut map = IndexMap::new();
/// map.insert("a".to_string(), 1);
/// map.insert("b".to_string(), 2);
/// map.insert("c".to_string(), 3);
///
/// rekey(&mut map, "b", "z");
/// let keys: Vec<_> = map.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["a", "z", "c"]);
/// ```
pub fn rekey<'m, V>(
    map: &'m mut IndexMap<String, V>,
    old: &str,
    new: impl Into<String>,
) -> Option<&'m mut V> {
    let new = new.into();
    debug_assert!(
        old == new || !map.contains_key(&new),
        "rekey target '{new}' already present"
    );

    let (index, _, value) = map.shift_remove_full(old)?;
    map.shift_insert(index, new, value);
    map.get_index_mut(index).map(|(_, value)| value)
}

/// Returns the first name that appears more than once, if any.
pub fn first_duplicate<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}
