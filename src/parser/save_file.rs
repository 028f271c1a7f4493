use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use derive_more::{Display, From};

use super::{reader::ObjectReader, ParsingError, SaveFileObject};

const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// An error that can occur when opening a file for parsing.
/// Generally things that are the fault of the user, however unintentional those may be
#[derive(Debug, From, Display)]
pub enum SaveFileError {
    /// Something went wrong with stdlib IO.
    #[display("io error: {}", _0)]
    IoError(io::Error),
}

impl std::error::Error for SaveFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
        }
    }
}

/// A struct that represents a file written in the Paradox key-value format.
/// Save games, country definitions, mapping files and the configuration all
/// share the format, so they all go through here.
/// It is just a wrapper around the raw bytes of the file, the encoding is
/// handled by the [ObjectReader] when scalars are extracted.
pub struct SaveFile {
    contents: Vec<u8>,
}

impl SaveFile {
    /// Open a file.
    /// Internally uses [File::open] to open the file and then [SaveFile::read] to read the contents.
    /// The handle is dropped before this function returns.
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<SaveFile, SaveFileError> {
        let mut file = File::open(filename)?;
        let metadata = file.metadata()?;
        SaveFile::read(&mut file, Some(metadata.len() as usize))
    }

    /// Read the contents of a file from a reader.
    pub fn read<F: Read>(
        file: &mut F,
        contents_size: Option<usize>,
    ) -> Result<SaveFile, SaveFileError> {
        let mut contents = if let Some(size) = contents_size {
            Vec::with_capacity(size)
        } else {
            Vec::new()
        };
        file.read_to_end(&mut contents)?;
        // the games never write a BOM, but editors used on mod files do
        if contents.starts_with(UTF8_BOM) {
            contents.drain(..UTF8_BOM.len());
        }
        Ok(SaveFile { contents })
    }

    /// Parse the whole file into the root object
    pub fn parse(&self) -> Result<SaveFileObject, ParsingError> {
        ObjectReader::from_slice(self.contents.as_slice()).read()
    }

    /// The raw contents of the file
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}
