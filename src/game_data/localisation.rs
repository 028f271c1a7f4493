use std::{
    collections::BTreeMap,
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use log::debug;

use super::{super::types::HashMap, GameDataError};

/// The languages of the localisation files, in column order after the key
pub const LANGUAGES: [&str; 5] = ["english", "french", "german", "polish", "spanish"];

/// A source of localised text.
pub trait Localize {
    /// Returns the text for the key in every language it is known in,
    /// keyed by language name.
    fn text_in_each_language(&self, key: &str) -> Option<&BTreeMap<String, String>>;
}

/// Localised text read from the `;` separated localisation files.
///
/// Each row is `KEY;english;french;german;polish;spanish;...`, with any
/// number of trailing columns. Empty cells are treated as missing, and later
/// files override earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Localisation {
    data: HashMap<String, BTreeMap<String, String>>,
}

impl Localize for Localisation {
    fn text_in_each_language(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.data.get(key)
    }
}

impl Localisation {
    pub fn insert(&mut self, key: String, language: String, text: String) {
        self.data.entry(key).or_default().insert(language, text);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Adds every `.csv` file of the directory, in file name order.
    /// The path may be invalid, in which case the function does nothing.
    pub fn add_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GameDataError> {
        let path = path.as_ref();
        if !path.is_dir() {
            debug!("No localisation at {}", path.display());
            return Ok(());
        }
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();
            if entry.file_type()?.is_file()
                && file_path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            {
                files.push(file_path);
            }
        }
        files.sort();
        for file in files {
            self.add_localisation_file(fs::File::open(file)?)?;
        }
        Ok(())
    }

    /// Adds the contents of a single localisation file
    pub fn add_localisation_file<R: Read>(&mut self, contents: R) -> Result<(), GameDataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(true)
            .quoting(false)
            .delimiter(b';')
            .from_reader(contents);
        for record in reader.byte_records() {
            let record = record?;
            let Some(key) = record.get(0) else {
                continue;
            };
            let key = decode(key);
            if key.is_empty() {
                continue;
            }
            for (index, language) in LANGUAGES.iter().enumerate() {
                if let Some(text) = record.get(index + 1) {
                    let text = decode(text);
                    if !text.is_empty() {
                        self.insert(key.clone(), (*language).to_owned(), text);
                    }
                }
            }
        }
        Ok(())
    }
}

fn decode(bytes: &[u8]) -> String {
    let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    decoded.into_owned()
}
