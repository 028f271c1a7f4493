use std::path::{Path, PathBuf};

use derive_more::Display;
use log::debug;

use super::parser::{GameObjectMapping, ParsingError, SaveFileObject};

/// The role a file plays in the conversion, which decides what happens when
/// it is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FileRole {
    /// The country list of the base game
    #[display("base game country list")]
    PrimaryCountryList,
    /// The country list of a mod
    #[display("mod country list")]
    ModCountryList,
    /// A per-country definition file
    #[display("country definition")]
    CountryDefinition,
}

/// What to do when a file is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFilePolicy {
    /// Abort the conversion
    Fatal,
    /// Report and carry on without the file
    Skip,
}

impl FileRole {
    pub const fn missing_file_policy(self) -> MissingFilePolicy {
        match self {
            FileRole::PrimaryCountryList => MissingFilePolicy::Fatal,
            FileRole::ModCountryList => MissingFilePolicy::Skip,
            FileRole::CountryDefinition => MissingFilePolicy::Skip,
        }
    }
}

/// The converter settings the world needs: where the source game lives and
/// which mods are active, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    vic2_path: PathBuf,
    vic2_mods: Vec<String>,
}

impl Configuration {
    pub fn new<P: Into<PathBuf>>(vic2_path: P, vic2_mods: Vec<String>) -> Self {
        Configuration {
            vic2_path: vic2_path.into(),
            vic2_mods,
        }
    }

    /// Imports a `configuration.txt` style object.
    /// Reads `V2directory = "path"` and `Vic2Mods = { "mod" ... }`,
    /// everything else is left to the other parts of the converter.
    pub fn from_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let vic2_path = PathBuf::from(&*base.get_string("V2directory")?);
        let vic2_mods = match base.get("Vic2Mods") {
            Some(mods) => mods.as_token_list(),
            None => Vec::new(),
        };
        debug!(
            "Configured {} with {} mods",
            vic2_path.display(),
            vic2_mods.len()
        );
        Ok(Configuration {
            vic2_path,
            vic2_mods,
        })
    }

    pub fn vic2_path(&self) -> &Path {
        &self.vic2_path
    }

    pub fn set_vic2_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.vic2_path = path.into();
    }

    pub fn vic2_mods(&self) -> &[String] {
        &self.vic2_mods
    }

    pub fn set_vic2_mods(&mut self, mods: Vec<String>) {
        self.vic2_mods = mods;
    }

    /// The root folder of a mod
    pub fn mod_path(&self, mod_name: &str) -> PathBuf {
        self.vic2_path.join("mod").join(mod_name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_slice;
    use super::*;

    #[test]
    fn test_policy_table() {
        assert_eq!(
            FileRole::PrimaryCountryList.missing_file_policy(),
            MissingFilePolicy::Fatal
        );
        assert_eq!(
            FileRole::ModCountryList.missing_file_policy(),
            MissingFilePolicy::Skip
        );
        assert_eq!(
            FileRole::CountryDefinition.missing_file_policy(),
            MissingFilePolicy::Skip
        );
    }

    #[test]
    fn test_from_object() {
        let base = parse_slice(
            b"configuration = { }
            V2directory = \"/games/Victoria 2\"
            Vic2Mods = { \"PDM\" \"HPM\" }
            HoI4directory = \"/games/hoi4\"",
        )
        .unwrap();
        let configuration = Configuration::from_object(&base).unwrap();
        assert_eq!(configuration.vic2_path(), Path::new("/games/Victoria 2"));
        assert_eq!(configuration.vic2_mods(), &["PDM".to_owned(), "HPM".to_owned()]);
        assert_eq!(
            configuration.mod_path("PDM"),
            Path::new("/games/Victoria 2/mod/PDM")
        );
    }

    #[test]
    fn test_missing_directory() {
        let base = parse_slice(b"Vic2Mods = { }").unwrap();
        assert!(Configuration::from_object(&base).is_err());
    }
}
