use std::rc::Rc;

/// A type alias for a province id.
/// Province ids in both games are positive integers, zero is never a valid id.
pub type ProvinceId = u32;

/// A type alias for a state id in the destination game.
pub type StateId = u32;

/// A type alias for a country tag, like `ENG` or `D01`.
pub type Tag = String;

/// A type alias for a raw string from a parsed file.
/// Actually a [Rc] around a [str].
pub type GameString = Rc<str>;

/// A type alias for the hashmap used throughout the crate.
pub type HashMap<K, V> = std::collections::HashMap<K, V>;
