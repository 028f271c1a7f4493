use std::{error, io, path::Path};

use derive_more::{Display, From};

use super::parser::{ParsingError, SaveFile, SaveFileError, SaveFileObject};

/// A submodule that provides the [Issues] table.
mod issues;
pub use issues::Issues;

/// A submodule that provides the [Inventions] table.
mod inventions;
pub use inventions::Inventions;

mod technologies;
pub use technologies::Technologies;

mod continents;
pub use continents::Continents;

/// A submodule that provides the province to state id mapping.
mod state_ids;
pub use state_ids::StateIdMapping;

/// A submodule that provides the [Localisation] table and the [Localize] trait.
mod localisation;
pub use localisation::{Localisation, Localize, LANGUAGES};

/// A submodule that provides the mapping between the provinces of both games.
mod province_mapping;
pub use province_mapping::ProvinceMapping;

mod loader;
pub use loader::GameDataLoader;

/// An error that occurred while processing game data
#[derive(Debug, From, Display)]
pub enum GameDataError {
    ParsingError(ParsingError),
    IOError(SaveFileError),
    CsvError(csv::Error),
}

impl error::Error for GameDataError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            GameDataError::IOError(e) => Some(e),
            GameDataError::ParsingError(e) => Some(e),
            GameDataError::CsvError(e) => Some(e),
        }
    }
}

impl From<io::Error> for GameDataError {
    fn from(e: io::Error) -> Self {
        GameDataError::IOError(SaveFileError::from(e))
    }
}

/// Reads and parses a whole game file
fn read_object<P: AsRef<Path>>(path: P) -> Result<SaveFileObject, GameDataError> {
    Ok(SaveFile::open(path)?.parse()?)
}

/// The lookup tables of the source game the world is built against.
#[derive(Debug, Default)]
pub struct GameData {
    issues: Issues,
    inventions: Inventions,
    technologies: Technologies,
    continents: Continents,
    state_ids: StateIdMapping,
    localisation: Localisation,
}

impl GameData {
    pub fn new(
        issues: Issues,
        inventions: Inventions,
        technologies: Technologies,
        continents: Continents,
        state_ids: StateIdMapping,
        localisation: Localisation,
    ) -> Self {
        GameData {
            issues,
            inventions,
            technologies,
            continents,
            state_ids,
            localisation,
        }
    }

    pub fn issues(&self) -> &Issues {
        &self.issues
    }

    pub fn inventions(&self) -> &Inventions {
        &self.inventions
    }

    pub fn technologies(&self) -> &Technologies {
        &self.technologies
    }

    pub fn continents(&self) -> &Continents {
        &self.continents
    }

    pub fn state_ids(&self) -> &StateIdMapping {
        &self.state_ids
    }

    pub fn localisation(&self) -> &Localisation {
        &self.localisation
    }
}
