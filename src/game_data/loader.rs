use std::{fs, mem, path::Path};

use log::{debug, info};

use super::{
    read_object, Continents, GameData, GameDataError, Inventions, Issues, Localisation,
    StateIdMapping, Technologies,
};

// File system stuff

const ISSUES_PATH: &str = "common/issues.txt";
const CONTINENTS_PATH: &str = "map/continent.txt";
const REGIONS_PATH: &str = "map/region.txt";
const INVENTIONS_DIR: &str = "inventions";
const ARMY_TECHS_PATH: &str = "technologies/army_tech.txt";
const NAVY_TECHS_PATH: &str = "technologies/navy_tech.txt";
const LOCALISATION_DIR: &str = "localisation";

/// A loader for game data.
///
/// Paths are processed in order, the base game first and then every mod.
/// A table file found in a later path replaces the one read before,
/// localisation is merged with later entries winning.
#[derive(Default)]
pub struct GameDataLoader {
    issues: Issues,
    inventions: Inventions,
    technologies: Technologies,
    continents: Continents,
    state_ids: StateIdMapping,
    localisation: Localisation,
}

impl GameDataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search the given game or mod root for the lookup tables
    pub fn process_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GameDataError> {
        let path = path.as_ref();
        info!("Reading game data from {}", path.display());
        let issues_path = path.join(ISSUES_PATH);
        if issues_path.is_file() {
            self.issues = Issues::from_object(&read_object(&issues_path)?);
        }
        let continents_path = path.join(CONTINENTS_PATH);
        if continents_path.is_file() {
            self.continents = Continents::from_object(&read_object(&continents_path)?)?;
        }
        let regions_path = path.join(REGIONS_PATH);
        if regions_path.is_file() {
            self.state_ids = StateIdMapping::from_regions(&read_object(&regions_path)?)?;
        }
        let army_path = path.join(ARMY_TECHS_PATH);
        let navy_path = path.join(NAVY_TECHS_PATH);
        if army_path.is_file() || navy_path.is_file() {
            let mut technologies = Technologies::default();
            if army_path.is_file() {
                technologies.add_army_techs(&read_object(&army_path)?);
            }
            if navy_path.is_file() {
                technologies.add_navy_techs(&read_object(&navy_path)?);
            }
            self.technologies = technologies;
        }
        let inventions_path = path.join(INVENTIONS_DIR);
        if inventions_path.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(&inventions_path)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    files.push(entry.path());
                }
            }
            // the game numbers inventions across files in name order
            files.sort();
            let mut inventions = Inventions::default();
            for file in files {
                inventions.add_from_object(&read_object(&file)?);
            }
            debug!("Read {} inventions", inventions.len());
            self.inventions = inventions;
        }
        self.localisation
            .add_from_path(path.join(LOCALISATION_DIR))?;
        Ok(())
    }

    /// Finalize the game data processing
    pub fn finalize(&mut self) -> GameData {
        GameData::new(
            mem::take(&mut self.issues),
            mem::take(&mut self.inventions),
            mem::take(&mut self.technologies),
            mem::take(&mut self.continents),
            mem::take(&mut self.state_ids),
            mem::take(&mut self.localisation),
        )
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::Localize;
    use super::*;

    fn write(root: &Path, relative: &str, contents: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_loader() {
        let game = TempDir::new().unwrap();
        write(
            game.path(),
            ISSUES_PATH,
            b"party_issues = { trade_policy = { protectionism = { } free_trade = { } } }",
        );
        write(game.path(), CONTINENTS_PATH, b"europe = { provinces = { 1 2 } }");
        write(game.path(), REGIONS_PATH, b"ENG_1 = { 1 } ENG_2 = { 2 }");
        write(game.path(), ARMY_TECHS_PATH, b"flintlock_rifles = { }");
        write(game.path(), "inventions/b_navy_inventions.txt", b"long_range_guns = { }");
        write(game.path(), "inventions/a_army_inventions.txt", b"field_guns = { }");
        write(game.path(), "localisation/text.csv", b"ENG;England;x\n");

        let a_mod = TempDir::new().unwrap();
        write(a_mod.path(), REGIONS_PATH, b"ENG_1 = { 1 2 }");
        write(a_mod.path(), "localisation/text.csv", b"ENG;Britain;x\n");

        let mut loader = GameDataLoader::new();
        loader.process_path(game.path()).unwrap();
        loader.process_path(a_mod.path()).unwrap();
        let data = loader.finalize();

        assert_eq!(data.issues().get_issue_name(2), Some("free_trade"));
        assert_eq!(data.continents().get_continent(1), Some("europe"));
        assert_eq!(data.state_ids().get_state_id(2), Some(1));
        assert!(data.technologies().is_army_tech("flintlock_rifles"));
        assert_eq!(data.inventions().get_invention_name(1), Some("field_guns"));
        assert_eq!(data.inventions().get_invention_name(2), Some("long_range_guns"));
        assert_eq!(
            data.localisation().text_in_each_language("ENG").unwrap()["english"],
            "Britain"
        );
    }

    #[test]
    fn test_empty_path() {
        let game = TempDir::new().unwrap();
        let mut loader = GameDataLoader::new();
        loader.process_path(game.path()).unwrap();
        let data = loader.finalize();
        assert!(data.issues().is_empty());
        assert!(data.localisation().is_empty());
    }
}
