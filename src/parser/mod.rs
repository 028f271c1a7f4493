/// A submodule that provides the parser output objects.
/// Entities in [structures](crate::structures) are initialized from these
/// objects, through the dispatch tables in [dispatch].
mod game_object;
pub use game_object::{
    ConversionError, GameObjectCollection, GameObjectMapping, KeyError, Leaf, SaveFileObject,
    SaveFileValue, SaveObjectError,
};

/// A submodule that turns the [jomini] token stream into [SaveFileObject] trees.
mod reader;
pub use reader::{parse_slice, ObjectReader};

/// A submodule that provides the [SaveFile] object, the I/O facade of the parser.
mod save_file;
pub use save_file::{SaveFile, SaveFileError};

/// Keyword dispatch tables, the building block of every entity factory.
mod dispatch;
pub use dispatch::{ignore_item, Handler, Parser};

mod error;
pub use error::ParsingError;
