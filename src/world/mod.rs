use std::{collections::BTreeMap, error, io, path::PathBuf};

use derive_more::{Display, From};
use log::{debug, info, warn};
use serde::Serialize;

use super::{
    config::{Configuration, FileRole},
    game_data::{GameData, ProvinceMapping},
    parser::{ParsingError, SaveFileObject, SaveFileValue},
    structures::{
        Country, CountryFactory, Diplomacy, FromGameObject, Party, Province, ProvinceFactory,
    },
    types::{HashMap, ProvinceId, Tag},
};

/// A submodule that merges the per-country definition files into the world.
mod country_files;
pub use country_files::{parse_country_list_line, CountryListEntry};

/// A submodule that binds localised names and state ids onto the world.
mod localisation;

pub use super::structures::is_country_tag;

/// An error that occurred while building the world
#[derive(Debug, From, Display)]
pub enum WorldError {
    /// A file whose absence cannot be recovered from is missing
    #[display("the {role} {} is missing", path.display())]
    #[from(skip)]
    MissingFile { role: FileRole, path: PathBuf },
    ParsingError(ParsingError),
    IoError(io::Error),
}

impl error::Error for WorldError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            WorldError::ParsingError(e) => Some(e),
            WorldError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

/// Top level keys that parse as a positive integer are provinces
fn province_id(key: &str) -> Option<ProvinceId> {
    key.parse::<ProvinceId>().ok().filter(|id| *id > 0)
}

/// Reads `great_nations = { 12 4 7 }` into a map from the sequential index
/// of a country in the save to its rank.
fn read_great_nations(save: &SaveFileObject) -> Result<HashMap<u32, usize>, ParsingError> {
    let mut indices = HashMap::default();
    if let Some(great_nations) = save.get("great_nations") {
        for (rank, index) in great_nations.as_object()?.tokens().iter().enumerate() {
            indices.insert(index.as_id()?, rank);
        }
    }
    Ok(indices)
}

/// The reconstructed world of the source game.
///
/// Provinces and countries are owned by the world and refer to each other by
/// id and tag. The world is built in passes over the parsed save: every
/// province and country is constructed first, then ownership and cores are
/// linked, workers are placed, countries with nothing left are culled, and
/// finally the country definition files are merged in.
#[derive(Debug, Default, Serialize)]
pub struct World {
    provinces: BTreeMap<ProvinceId, Province>,
    countries: BTreeMap<Tag, Country>,
    /// Tags of the great powers by rank, `None` for ranks nobody took
    great_countries: Vec<Option<Tag>>,
    parties: Vec<Party>,
    diplomacy: Diplomacy,
}

impl World {
    /// Builds the world from a parsed save, then merges the country files of
    /// the configured game and mods.
    pub fn new(
        save: &SaveFileObject,
        game_data: &GameData,
        configuration: &Configuration,
    ) -> Result<Self, WorldError> {
        let mut world = Self::from_save(save, game_data)?;
        world.read_country_files(configuration)?;
        info!(
            "Built a world of {} countries, {} provinces and {} parties",
            world.countries.len(),
            world.provinces.len(),
            world.parties.len()
        );
        Ok(world)
    }

    /// Builds the world from a parsed save alone
    pub fn from_save(save: &SaveFileObject, game_data: &GameData) -> Result<Self, ParsingError> {
        let great_nations = read_great_nations(save)?;
        let ranks = great_nations.values().max().map_or(0, |rank| rank + 1);
        let mut world = World {
            great_countries: vec![None; ranks],
            ..Default::default()
        };
        let province_factory = ProvinceFactory::new(game_data.issues());
        let country_factory = CountryFactory::new(
            game_data.technologies(),
            game_data.inventions(),
            game_data.continents(),
        );
        // scalar values still count as entities, with nothing in them
        let empty = SaveFileObject::new();
        // REB comes first, as 1
        let mut country_index: u32 = 1;
        for leaf in save.leaves() {
            let key = leaf.key();
            let base = match leaf.value() {
                SaveFileValue::Object(object) => object,
                SaveFileValue::String(_) => &empty,
            };
            if let Some(id) = province_id(key) {
                world
                    .provinces
                    .insert(id, province_factory.get_province(id, base)?);
            } else if is_country_tag(key) {
                let mut country = country_factory.get_country(key, base)?;
                if let Some(rank) = great_nations.get(&country_index) {
                    debug!("Set {} as Great Power #{}", key, rank + 1);
                    country.set_great_nation();
                    world.great_countries[*rank] = Some(key.to_owned());
                }
                world.countries.insert(key.to_owned(), country);
                country_index += 1;
            }
        }
        world.set_province_owners();
        world.add_province_core_info();
        world.put_workers_in_provinces();
        world.remove_empty_nations();
        if let Some(diplomacy) = save.get("diplomacy") {
            world.diplomacy = Diplomacy::from_game_object(diplomacy.as_object()?)?;
        }
        Ok(world)
    }

    fn set_province_owners(&mut self) {
        for (id, province) in self.provinces.iter_mut() {
            let Some(owner) = province.owner_string().map(str::to_owned) else {
                continue;
            };
            if let Some(country) = self.countries.get_mut(&owner) {
                country.add_province(*id);
                province.set_owner(owner);
            }
        }
    }

    fn add_province_core_info(&mut self) {
        for (id, province) in self.provinces.iter() {
            for core in province.core_strings() {
                if let Some(country) = self.countries.get_mut(core) {
                    country.add_core(*id);
                }
            }
        }
    }

    fn put_workers_in_provinces(&mut self) {
        for country in self.countries.values() {
            country.put_workers_in_provinces(&mut self.provinces);
        }
    }

    fn remove_empty_nations(&mut self) {
        let empty: Vec<Tag> = self
            .countries
            .values()
            .filter(|country| country.cores().is_empty() && country.provinces().is_empty())
            .map(|country| country.tag().to_owned())
            .collect();
        for tag in &empty {
            self.remove_country(tag);
        }
        debug!("Removed {} empty nations", empty.len());
    }

    pub fn provinces(&self) -> &BTreeMap<ProvinceId, Province> {
        &self.provinces
    }

    pub fn province(&self, id: ProvinceId) -> Option<&Province> {
        self.provinces.get(&id)
    }

    pub fn countries(&self) -> &BTreeMap<Tag, Country> {
        &self.countries
    }

    pub fn country(&self, tag: &str) -> Option<&Country> {
        self.countries.get(tag)
    }

    /// Removes a country from the world, releasing the provinces it owned
    pub fn remove_country(&mut self, tag: &str) -> Option<Country> {
        let country = self.countries.remove(tag)?;
        for id in country.provinces() {
            if let Some(province) = self.provinces.get_mut(id) {
                province.clear_owner();
            }
        }
        for slot in self.great_countries.iter_mut() {
            if slot.as_deref() == Some(tag) {
                *slot = None;
            }
        }
        Some(country)
    }

    /// Tags of the great powers, best ranked first
    pub fn great_countries(&self) -> impl Iterator<Item = &str> + '_ {
        self.great_countries.iter().filter_map(|tag| tag.as_deref())
    }

    /// The great power at a 0-based rank
    pub fn great_country(&self, rank: usize) -> Option<&str> {
        self.great_countries.get(rank).and_then(|tag| tag.as_deref())
    }

    /// Every party of every country file, in load order
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Resolves a 1-based party id
    fn party(&self, id: u32) -> Option<&Party> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.parties.get(index)
    }

    /// The ruling party of the country, if its id is in range
    pub fn ruling_party(&self, country: &Country) -> Option<&Party> {
        self.party(country.ruling_party_id())
    }

    /// The active parties of the country. Ids out of range are dropped.
    pub fn active_parties(&self, country: &Country) -> Vec<&Party> {
        let mut parties = Vec::with_capacity(country.active_party_ids().len());
        for id in country.active_party_ids() {
            match self.party(*id) {
                Some(party) => parties.push(party),
                None => warn!(
                    "Party ID mismatch! Did some Vic2 country files not get read? ({} active party {})",
                    country.tag(),
                    id
                ),
            }
        }
        parties
    }

    pub fn diplomacy(&self) -> &Diplomacy {
        &self.diplomacy
    }

    /// Warns about every province with no destination, returning how many
    /// there were.
    pub fn check_all_provinces_mapped(&self, mapping: &ProvinceMapping) -> usize {
        let mut unmapped = 0;
        for id in self.provinces.keys() {
            if !mapping.is_mapped(*id) {
                warn!("No mapping for Vic2 province {}", id);
                unmapped += 1;
            }
        }
        unmapped
    }
}
