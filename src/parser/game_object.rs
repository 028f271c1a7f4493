use std::{
    any::type_name,
    error,
    fmt,
    num::{ParseFloatError, ParseIntError},
};

use derive_more::{Display, From};
use jomini::common::Date;

use super::super::types::GameString;

/// An error that can occur when converting a value from a parsed file.
#[derive(Debug, From, Display)]
pub enum ConversionError {
    /// The value is not of the expected type.
    #[display("failed converting {:?} to {}", _0, _1)]
    InvalidType(SaveFileValue, &'static str),
    #[display("malformed integer: {}", _0)]
    ParseIntError(ParseIntError),
    #[display("malformed real number: {}", _0)]
    ParseFloatError(ParseFloatError),
    #[display("malformed date: {}", _0)]
    #[from(skip)]
    DateError(String),
}

impl error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ParseIntError(err) => Some(err),
            Self::ParseFloatError(err) => Some(err),
            _ => None,
        }
    }
}

/// A string that represents a boolean true value.
const BOOL_TRUE: &str = "yes";
/// A string that represents a boolean false value.
const BOOL_FALSE: &str = "no";

/// A value that comes from a parsed file.
/// Scalars are kept as raw strings and only converted on request, so that a
/// malformed number is reported by the entity that actually needs it.
#[derive(PartialEq, Clone, Debug)]
pub enum SaveFileValue {
    /// A scalar value, quoted or not. May be anything in reality.
    String(GameString),
    /// A braced object value.
    Object(SaveFileObject),
}

impl From<&str> for SaveFileValue {
    fn from(value: &str) -> Self {
        SaveFileValue::String(GameString::from(value))
    }
}

impl From<String> for SaveFileValue {
    fn from(value: String) -> Self {
        SaveFileValue::String(GameString::from(value))
    }
}

impl From<SaveFileObject> for SaveFileValue {
    fn from(value: SaveFileObject) -> Self {
        SaveFileValue::Object(value)
    }
}

impl SaveFileValue {
    // this API allows for easy error collection using the ? operator.
    /// Get the value as a string
    pub fn as_string(&self) -> Result<GameString, ConversionError> {
        match self {
            SaveFileValue::String(s) => Ok(s.clone()),
            _ => Err(ConversionError::InvalidType(
                self.clone(),
                type_name::<GameString>(),
            )),
        }
    }

    /// Get the value as a GameObject
    pub fn as_object(&self) -> Result<&SaveFileObject, ConversionError> {
        match self {
            SaveFileValue::Object(o) => Ok(o),
            _ => Err(ConversionError::InvalidType(
                self.clone(),
                type_name::<SaveFileObject>(),
            )),
        }
    }

    /// Get the value as an integer. Unlike the game, we do not coerce
    /// garbage into a number, a malformed token is an error.
    pub fn as_integer(&self) -> Result<i64, ConversionError> {
        Ok(self.as_string()?.trim().parse::<i64>()?)
    }

    /// Get the value as an unsigned integer, for ids and counts.
    pub fn as_id(&self) -> Result<u32, ConversionError> {
        Ok(self.as_string()?.trim().parse::<u32>()?)
    }

    /// Get the value as a real number. Integers are accepted too.
    pub fn as_real(&self) -> Result<f64, ConversionError> {
        Ok(self.as_string()?.trim().parse::<f64>()?)
    }

    /// Get the value as a boolean. Anything but `yes` and `no` is an error.
    pub fn as_boolean(&self) -> Result<bool, ConversionError> {
        let s = self.as_string()?;
        match s.as_ref() {
            BOOL_TRUE => Ok(true),
            BOOL_FALSE => Ok(false),
            _ => Err(ConversionError::InvalidType(self.clone(), type_name::<bool>())),
        }
    }

    /// Get the value as a date in the `year.month.day` format.
    pub fn as_date(&self) -> Result<Date, ConversionError> {
        let s = self.as_string()?;
        let mut parts = s.split('.');
        if let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        {
            if let (Ok(year), Ok(month), Ok(day)) = (year.parse(), month.parse(), day.parse()) {
                if let Some(date) = Date::from_ymd_opt(year, month, day) {
                    return Ok(date);
                }
            }
        }
        Err(ConversionError::DateError(s.to_string()))
    }
}

/// A single `key = value` pair.
#[derive(PartialEq, Clone, Debug)]
pub struct Leaf {
    key: String,
    value: SaveFileValue,
}

impl Leaf {
    pub fn new(key: String, value: SaveFileValue) -> Self {
        Leaf { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &SaveFileValue {
        &self.value
    }
}

/// An object that comes from a parsed file.
///
/// Paradox files are simultaneously maps and arrays: keys repeat (every
/// `party` block in a country file, every `core` of a province), and a braced
/// block may hold bare tokens (`{ 255 0 0 }`) or anonymous objects. So unlike
/// a [HashMap](std::collections::HashMap) backed representation, we keep
/// everything in file order: the keyed leaves, and separately the unkeyed
/// values.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct SaveFileObject {
    leaves: Vec<Leaf>,
    tokens: Vec<SaveFileValue>,
}

impl SaveFileObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keyed value. Duplicate keys are kept.
    pub fn insert(&mut self, key: String, value: SaveFileValue) {
        self.leaves.push(Leaf::new(key, value));
    }

    /// Append an unkeyed value.
    pub fn push(&mut self, value: SaveFileValue) {
        self.tokens.push(value);
    }

    /// All keyed leaves in file order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// All unkeyed values in file order.
    pub fn tokens(&self) -> &[SaveFileValue] {
        &self.tokens
    }

    /// The unkeyed scalar values, as strings. Anonymous objects are skipped.
    pub fn token_strings(&self) -> impl Iterator<Item = GameString> + '_ {
        self.tokens.iter().filter_map(|t| t.as_string().ok())
    }

    /// First value stored under the key
    pub fn get(&self, key: &str) -> Option<&SaveFileValue> {
        self.leaves
            .iter()
            .find(|leaf| leaf.key == key)
            .map(|leaf| &leaf.value)
    }

    /// Every value stored under the key, in file order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a SaveFileValue> + 'a {
        self.leaves
            .iter()
            .filter(move |leaf| leaf.key == key)
            .map(|leaf| &leaf.value)
    }

    /// Check if the object is empty
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.tokens.is_empty()
    }
}

/// An error raised when a key the caller requires is absent.
#[derive(Debug)]
pub enum KeyError {
    MissingKey(String),
    IndexError(usize, usize),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key) => write!(f, "key {} missing from object", key),
            Self::IndexError(index, len) => {
                write!(f, "index {} out of range for object of length {}", index, len)
            }
        }
    }
}

impl error::Error for KeyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

#[derive(Debug, From, Display)]
pub enum SaveObjectError {
    ConversionError(ConversionError),
    KeyError(KeyError),
}

impl error::Error for SaveObjectError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ConversionError(e) => Some(e),
            Self::KeyError(e) => Some(e),
        }
    }
}

pub trait GameObjectMapping {
    /// Get the value of a key, or return an error if the key is missing.
    fn get_err(&self, key: &str) -> Result<&SaveFileValue, KeyError>;
    /// Get the value of a key as a string.
    fn get_string(&self, key: &str) -> Result<GameString, SaveObjectError>;
    /// Get the value of a key as an object.
    fn get_object(&self, key: &str) -> Result<&SaveFileObject, SaveObjectError>;
    /// Get the value of a key as an integer.
    fn get_integer(&self, key: &str) -> Result<i64, SaveObjectError>;
    /// Get the value of a key as a real number.
    fn get_real(&self, key: &str) -> Result<f64, SaveObjectError>;
}

impl GameObjectMapping for SaveFileObject {
    fn get_err(&self, key: &str) -> Result<&SaveFileValue, KeyError> {
        self.get(key)
            .ok_or_else(|| KeyError::MissingKey(key.to_owned()))
    }

    fn get_string(&self, key: &str) -> Result<GameString, SaveObjectError> {
        Ok(self.get_err(key)?.as_string()?)
    }

    fn get_object(&self, key: &str) -> Result<&SaveFileObject, SaveObjectError> {
        Ok(self.get_err(key)?.as_object()?)
    }

    fn get_integer(&self, key: &str) -> Result<i64, SaveObjectError> {
        Ok(self.get_err(key)?.as_integer()?)
    }

    fn get_real(&self, key: &str) -> Result<f64, SaveObjectError> {
        Ok(self.get_err(key)?.as_real()?)
    }
}

pub trait GameObjectCollection {
    fn get_index(&self, index: usize) -> Result<&SaveFileValue, KeyError>;
}

impl GameObjectCollection for [SaveFileValue] {
    fn get_index(&self, index: usize) -> Result<&SaveFileValue, KeyError> {
        self.get(index)
            .ok_or_else(|| KeyError::IndexError(index, self.len()))
    }
}
