use std::{
    fs,
    path::{Path, PathBuf},
};

use encoding_rs::WINDOWS_1252;
use log::{debug, info, warn};

use super::{
    super::{
        config::{Configuration, FileRole, MissingFilePolicy},
        structures::{country_file_candidates, CommonCountryDataFactory},
    },
    World, WorldError,
};

/// Location of the country list, relative to a game or mod root
const COUNTRY_LIST_PATH: &str = "common/countries.txt";
/// The line that separates the fixed tags from the dynamic ones
const DYNAMIC_TAGS_MARKER: &str = "dynamic_tags";

/// A `TAG = "countries/File.txt"` line of a country list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryListEntry {
    pub tag: String,
    /// The file name, from the first `/` up to the closing quote
    pub filename: String,
}

/// Parses a line of a country list.
/// Comments, short lines, the dynamic tags marker and lines without a quoted
/// path yield `None`.
pub fn parse_country_list_line(line: &str) -> Option<CountryListEntry> {
    let line = line.trim();
    if line.starts_with('#') || line.len() < 3 || line.starts_with(DYNAMIC_TAGS_MARKER) {
        return None;
    }
    let tag = line.get(..3)?;
    let start = line.find('/')?;
    let end = line.rfind('"')?;
    if end <= start {
        return None;
    }
    Some(CountryListEntry {
        tag: tag.to_owned(),
        filename: line[start..end].to_owned(),
    })
}

/// Applies the policy of the role to a missing file
/// Every location that was tried is reported.
fn handle_missing_file(role: FileRole, tried: &[PathBuf]) -> Result<(), WorldError> {
    match role.missing_file_policy() {
        MissingFilePolicy::Fatal => Err(WorldError::MissingFile {
            role,
            path: tried.first().cloned().unwrap_or_default(),
        }),
        MissingFilePolicy::Skip => {
            warn!("Could not find {} at {}, skipping", role, describe_paths(tried));
            Ok(())
        }
    }
}

/// Joins paths for a diagnostic, `a or b`
fn describe_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Reads a country list. Returns `None` if the file is missing and its role
/// allows it.
fn read_country_list(
    path: &Path,
    role: FileRole,
) -> Result<Option<Vec<CountryListEntry>>, WorldError> {
    if !path.is_file() {
        handle_missing_file(role, &[path.to_owned()])?;
        return Ok(None);
    }
    let contents = fs::read(path)?;
    let (contents, _) = WINDOWS_1252.decode_without_bom_handling(&contents);
    let mut entries = Vec::new();
    for line in contents.lines() {
        match parse_country_list_line(line) {
            Some(entry) => entries.push(entry),
            None => {
                if !line.trim().is_empty() {
                    debug!("Skipping country list line {:?}", line);
                }
            }
        }
    }
    Ok(Some(entries))
}

impl World {
    /// Merges the country definition files into the world.
    ///
    /// The country list of every configured mod is read, or the one of the
    /// base game if no mods are configured. Every listed file is looked up in
    /// its mod first and then in the base game. The color and unit names of
    /// a file go to its country if it survived, while its parties are always
    /// appended to the party list, since countries refer to parties by their
    /// position in it.
    pub fn read_country_files(
        &mut self,
        configuration: &Configuration,
    ) -> Result<(), WorldError> {
        let mut lists = Vec::new();
        if configuration.vic2_mods().is_empty() {
            let path = configuration.vic2_path().join(COUNTRY_LIST_PATH);
            if let Some(entries) = read_country_list(&path, FileRole::PrimaryCountryList)? {
                lists.push((None, entries));
            }
        } else {
            for mod_name in configuration.vic2_mods() {
                let path = configuration.mod_path(mod_name).join(COUNTRY_LIST_PATH);
                if let Some(entries) = read_country_list(&path, FileRole::ModCountryList)? {
                    lists.push((Some(mod_name.as_str()), entries));
                }
            }
        }
        let factory = CommonCountryDataFactory::new();
        for (mod_name, entries) in lists {
            info!(
                "Reading {} country files of {}",
                entries.len(),
                mod_name.unwrap_or("the base game")
            );
            for entry in entries {
                let Some(mut data) =
                    factory.import_common_country_data(&entry.filename, mod_name, configuration)?
                else {
                    let tried = country_file_candidates(&entry.filename, mod_name, configuration);
                    handle_missing_file(FileRole::CountryDefinition, &tried)?;
                    continue;
                };
                if let Some(country) = self.countries.get_mut(&entry.tag) {
                    if let Some(color) = data.color() {
                        country.set_color(color);
                    }
                    let unit_names = data.take_unit_names();
                    // a file without names keeps the ones read before
                    if !unit_names.is_empty() {
                        country.set_unit_names(unit_names);
                    }
                }
                self.parties.extend(data.take_parties());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::super::{game_data::GameData, parser::parse_slice, structures::Color};
    use super::*;

    #[test]
    fn test_line_parsing() {
        assert_eq!(
            parse_country_list_line("AAA = \"/AAA - Name.txt\""),
            Some(CountryListEntry {
                tag: "AAA".to_owned(),
                filename: "/AAA - Name.txt".to_owned(),
            })
        );
        assert_eq!(
            parse_country_list_line("ENG = \"countries/United Kingdom.txt\" # comment")
                .unwrap()
                .filename,
            "/United Kingdom.txt"
        );
        assert_eq!(parse_country_list_line("# ENG = \"countries/England.txt\""), None);
        assert_eq!(parse_country_list_line("AB"), None);
        assert_eq!(parse_country_list_line(""), None);
        assert_eq!(parse_country_list_line("dynamic_tags = yes"), None);
        assert_eq!(parse_country_list_line("ENG = England"), None);
    }

    fn write(root: &Path, relative: &str, contents: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn world() -> World {
        World::from_save(
            &parse_slice(b"1={ owner=\"AAA\" } 2={ core=\"BBB\" } AAA={ } BBB={ } CCC={ }")
                .unwrap(),
            &GameData::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_base_game() {
        let game = TempDir::new().unwrap();
        write(
            game.path(),
            COUNTRY_LIST_PATH,
            b"# the countries\nAAA = \"countries/Aaa.txt\"\nCCC = \"countries/Ccc.txt\"\nDDD = \"countries/Ddd.txt\"\ndynamic_tags = yes\nEEE = \"countries/Missing.txt\"\n",
        );
        write(
            game.path(),
            "common/countries/Aaa.txt",
            b"color = { 1 2 3 } party = { name = \"AAA_one\" } party = { name = \"AAA_two\" }",
        );
        write(
            game.path(),
            "common/countries/Ccc.txt",
            b"color = { 4 5 6 } party = { name = \"CCC_one\" }",
        );
        write(game.path(), "common/countries/Ddd.txt", b"color = { 7 8 9 }");

        let mut world = world();
        world
            .read_country_files(&Configuration::new(game.path(), Vec::new()))
            .unwrap();
        assert_eq!(world.country("AAA").unwrap().color(), Some(Color::new(1, 2, 3)));
        // no color for a country without a file
        assert_eq!(world.country("BBB").unwrap().color(), None);
        // culled countries keep their parties in the list
        assert!(world.country("CCC").is_none());
        let names: Vec<_> = world.parties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["AAA_one", "AAA_two", "CCC_one"]);
    }

    #[test]
    fn test_missing_primary_list() {
        let game = TempDir::new().unwrap();
        let mut world = world();
        assert!(matches!(
            world.read_country_files(&Configuration::new(game.path(), Vec::new())),
            Err(WorldError::MissingFile {
                role: FileRole::PrimaryCountryList,
                ..
            })
        ));
    }

    #[test]
    fn test_mods() {
        let game = TempDir::new().unwrap();
        // the base list is not read when mods are configured
        write(game.path(), COUNTRY_LIST_PATH, b"BBB = \"countries/Bbb.txt\"\n");
        write(game.path(), "common/countries/Bbb.txt", b"color = { 9 9 9 }");
        write(
            game.path(),
            "common/countries/Aaa.txt",
            b"color = { 1 1 1 } party = { name = \"base\" }",
        );
        write(
            game.path(),
            "mod/first/common/countries.txt",
            b"AAA = \"countries/Aaa.txt\"\n",
        );
        write(
            game.path(),
            "mod/third/common/countries.txt",
            b"BBB = \"countries/Bbb.txt\"\n",
        );
        write(
            game.path(),
            "mod/third/common/countries/Bbb.txt",
            b"color = { 2 2 2 } party = { name = \"modded\" }",
        );

        let configuration = Configuration::new(
            game.path(),
            vec!["first".to_owned(), "second".to_owned(), "third".to_owned()],
        );
        let mut world = world();
        world.read_country_files(&configuration).unwrap();
        // falls back to the base game file
        assert_eq!(world.country("AAA").unwrap().color(), Some(Color::new(1, 1, 1)));
        // the mod file wins
        assert_eq!(world.country("BBB").unwrap().color(), Some(Color::new(2, 2, 2)));
        let names: Vec<_> = world.parties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["base", "modded"]);
    }

    #[test]
    fn test_describe_paths() {
        let tried = vec![
            PathBuf::from("/game/mod/first/common/countries/Aaa.txt"),
            PathBuf::from("/game/common/countries/Aaa.txt"),
        ];
        assert_eq!(
            describe_paths(&tried),
            "/game/mod/first/common/countries/Aaa.txt or /game/common/countries/Aaa.txt"
        );
        assert!(handle_missing_file(FileRole::CountryDefinition, &tried).is_ok());
        assert!(matches!(
            handle_missing_file(FileRole::PrimaryCountryList, &tried[1..]),
            Err(WorldError::MissingFile { path, .. }) if path == tried[1]
        ));
    }

    #[test]
    fn test_unit_names_kept() {
        let game = TempDir::new().unwrap();
        write(
            game.path(),
            "mod/first/common/countries.txt",
            b"AAA = \"countries/Aaa.txt\"\n",
        );
        write(
            game.path(),
            "mod/first/common/countries/Aaa.txt",
            b"unit_names = { frigate = { Amethyst Beryl } }",
        );
        write(
            game.path(),
            "mod/second/common/countries.txt",
            b"AAA = \"countries/Aaa2.txt\"\n",
        );
        write(
            game.path(),
            "mod/second/common/countries/Aaa2.txt",
            b"color = { 3 3 3 }",
        );
        let configuration =
            Configuration::new(game.path(), vec!["first".to_owned(), "second".to_owned()]);
        let mut world = world();
        world.read_country_files(&configuration).unwrap();
        let aaa = world.country("AAA").unwrap();
        assert_eq!(aaa.color(), Some(Color::new(3, 3, 3)));
        assert_eq!(aaa.unit_names().get("frigate").unwrap().len(), 2);
    }
}
