use std::{error, io, num::ParseIntError};

use derive_more::{Display, From};
use jomini::text::ReaderError as TextReaderError;

use super::game_object::{ConversionError, KeyError, SaveObjectError};

/// An error that occurred somewhere within the broadly defined parsing process.
#[derive(Debug, From, Display)]
pub enum ParsingError {
    /// The tokenizer rejected the input
    #[display("tokenizer error: {}", _0)]
    ReaderError(TextReaderError),
    /// The tokens do not form a valid tree
    #[display("syntax error at byte {}: {}", _0, _1)]
    SyntaxError(usize, &'static str),
    /// A value in the tree could not be converted into what an entity needs
    #[display("{}", _0)]
    StructureError(SaveObjectError),
    /// Something went wrong with stdlib IO.
    #[display("io error: {}", _0)]
    IoError(io::Error),
}

impl From<ConversionError> for ParsingError {
    fn from(value: ConversionError) -> Self {
        ParsingError::StructureError(value.into())
    }
}

impl From<ParseIntError> for ParsingError {
    fn from(value: ParseIntError) -> Self {
        ParsingError::StructureError(SaveObjectError::ConversionError(value.into()))
    }
}

impl From<KeyError> for ParsingError {
    fn from(value: KeyError) -> Self {
        ParsingError::StructureError(value.into())
    }
}

impl error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ReaderError(err) => Some(err),
            Self::StructureError(err) => Some(err),
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}
