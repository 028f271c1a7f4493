use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use super::{
    super::{
        config::Configuration,
        parser::{Parser, ParsingError, SaveFile, SaveFileObject},
    },
    Color, Party, PartyFactory, UnitNames, UnitNamesFactory,
};

/// Directory of the country definition files, relative to a game or mod root
const COUNTRIES_DIR: &str = "common/countries";

/// The contents of a per-country definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonCountryData {
    color: Option<Color>,
    unit_names: UnitNames,
    parties: Vec<Party>,
}

impl CommonCountryData {
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn unit_names(&self) -> &UnitNames {
        &self.unit_names
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Moves the parties out, leaving the list empty
    pub fn take_parties(&mut self) -> Vec<Party> {
        std::mem::take(&mut self.parties)
    }

    /// Moves the unit names out
    pub fn take_unit_names(&mut self) -> UnitNames {
        std::mem::take(&mut self.unit_names)
    }
}

/// Builds [CommonCountryData], either from a parsed object or straight from
/// the game files.
pub struct CommonCountryDataFactory {
    parser: Parser<'static, CommonCountryData>,
}

impl Default for CommonCountryDataFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonCountryDataFactory {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser.register_keyword("color", |data: &mut CommonCountryData, _, value| {
            data.color = Color::from_value(value)?;
            Ok(())
        });
        let unit_names_factory = UnitNamesFactory::new();
        parser.register_keyword(
            "unit_names",
            move |data: &mut CommonCountryData, _, value| {
                data.unit_names = unit_names_factory.get_unit_names(value.as_object()?)?;
                Ok(())
            },
        );
        let party_factory = PartyFactory::new();
        parser.register_keyword("party", move |data: &mut CommonCountryData, _, value| {
            data.parties.push(party_factory.get_party(value.as_object()?)?);
            Ok(())
        });
        CommonCountryDataFactory { parser }
    }

    pub fn get_common_country_data(
        &self,
        base: &SaveFileObject,
    ) -> Result<CommonCountryData, ParsingError> {
        let mut data = CommonCountryData::default();
        self.parser.parse_object(base, &mut data)?;
        Ok(data)
    }

    /// Imports a country definition file.
    ///
    /// The file is looked up in the mod first, if one is given, then in the
    /// base game. A file that cannot be read or tokenized is reported and
    /// treated as absent at that location. Returns `None` if no usable file
    /// was found.
    pub fn import_common_country_data(
        &self,
        filename: &str,
        mod_name: Option<&str>,
        configuration: &Configuration,
    ) -> Result<Option<CommonCountryData>, ParsingError> {
        for path in country_file_candidates(filename, mod_name, configuration) {
            if !path.is_file() {
                debug!("No country file at {}", path.display());
                continue;
            }
            match read_object(&path) {
                Ok(object) => return Ok(Some(self.get_common_country_data(&object)?)),
                Err(err) => warn!("Could not read {}: {}", path.display(), err),
            }
        }
        Ok(None)
    }
}

/// Paths at which a country file may be found, in lookup order
pub fn country_file_candidates(
    filename: &str,
    mod_name: Option<&str>,
    configuration: &Configuration,
) -> Vec<PathBuf> {
    let relative = Path::new(COUNTRIES_DIR).join(filename.trim_start_matches(['/', '\\']));
    let mut candidates = Vec::with_capacity(2);
    if let Some(mod_name) = mod_name {
        candidates.push(configuration.mod_path(mod_name).join(&relative));
    }
    candidates.push(configuration.vic2_path().join(&relative));
    candidates
}

fn read_object(path: &Path) -> Result<SaveFileObject, Box<dyn std::error::Error>> {
    Ok(SaveFile::open(path)?.parse()?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::super::super::parser::parse_slice;
    use super::*;

    const COUNTRY_FILE: &[u8] = b"
        color = { 10 20 30 }
        graphical_culture = BritishGC
        unit_names = { frigate = { Amethyst } }
        party = { name = \"AAA_one\" ideology = liberal }
        party = { name = \"AAA_two\" ideology = conservative }
    ";

    #[test]
    fn test_common_country_data() {
        let base = parse_slice(COUNTRY_FILE).unwrap();
        let data = CommonCountryDataFactory::new()
            .get_common_country_data(&base)
            .unwrap();
        assert_eq!(data.color(), Some(Color::new(10, 20, 30)));
        assert_eq!(data.parties().len(), 2);
        assert_eq!(data.parties()[1].name(), "AAA_two");
        assert_eq!(data.unit_names().get("frigate").unwrap().len(), 1);
    }

    #[test]
    fn test_import_fallback() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join(COUNTRIES_DIR);
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("Aaa.txt"), COUNTRY_FILE).unwrap();
        let modded = dir.path().join("mod/some_mod").join(COUNTRIES_DIR);
        fs::create_dir_all(&modded).unwrap();
        fs::write(modded.join("Bbb.txt"), b"color = { 1 1 1 }").unwrap();

        let configuration = Configuration::new(dir.path(), vec!["some_mod".to_owned()]);
        let factory = CommonCountryDataFactory::new();
        // only in the base game
        let data = factory
            .import_common_country_data("/Aaa.txt", Some("some_mod"), &configuration)
            .unwrap()
            .unwrap();
        assert_eq!(data.color(), Some(Color::new(10, 20, 30)));
        // the mod wins
        fs::write(base.join("Bbb.txt"), b"color = { 2 2 2 }").unwrap();
        let data = factory
            .import_common_country_data("/Bbb.txt", Some("some_mod"), &configuration)
            .unwrap()
            .unwrap();
        assert_eq!(data.color(), Some(Color::new(1, 1, 1)));
        // nowhere
        assert!(factory
            .import_common_country_data("/Ccc.txt", Some("some_mod"), &configuration)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_candidates_order() {
        let configuration = Configuration::new("/game", vec!["some_mod".to_owned()]);
        assert_eq!(
            country_file_candidates("/Aaa.txt", Some("some_mod"), &configuration),
            vec![
                PathBuf::from("/game/mod/some_mod/common/countries/Aaa.txt"),
                PathBuf::from("/game/common/countries/Aaa.txt"),
            ]
        );
        assert_eq!(
            country_file_candidates("/Aaa.txt", None, &configuration),
            vec![PathBuf::from("/game/common/countries/Aaa.txt")]
        );
    }

    #[test]
    fn test_import_broken_file() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join(COUNTRIES_DIR);
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("Aaa.txt"), b"color = { 1 2 3").unwrap();
        let configuration = Configuration::new(dir.path(), Vec::new());
        let factory = CommonCountryDataFactory::new();
        assert!(factory
            .import_common_country_data("/Aaa.txt", None, &configuration)
            .unwrap()
            .is_none());
        // well formed but wrong values are fatal
        fs::write(base.join("Aaa.txt"), b"color = { 1 2 999 }").unwrap();
        assert!(factory
            .import_common_country_data("/Aaa.txt", None, &configuration)
            .is_err());
    }
}
