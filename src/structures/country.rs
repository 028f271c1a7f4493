use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{
    super::{
        game_data::{Continents, Inventions, Technologies},
        parser::{ignore_item, Parser, ParsingError, SaveFileObject},
        types::{ProvinceId, Tag},
    },
    Army, Color, FromGameObject, Province, Relations, State, UnitNames,
};

/// How many workers one level of factories employs
const WORKERS_PER_FACTORY_LEVEL: i64 = 10000;

/// Checks whether a key has the shape of a country tag.
///
/// Tags are either three uppercase letters (`ENG`), a dominion tag made of a
/// `D` and two digits (`D01`), or a legacy tag made of an uppercase letter and
/// two digits (`C12`).
pub fn is_country_tag(key: &str) -> bool {
    match key.as_bytes() {
        [a, b, c] if a.is_ascii_uppercase() => {
            let letters = b.is_ascii_uppercase() && c.is_ascii_uppercase();
            let dominion = *a == b'D' && b.is_ascii_digit() && c.is_ascii_digit();
            let legacy = b.is_ascii_digit() && c.is_ascii_digit();
            letters || dominion || legacy
        }
        _ => false,
    }
}

/// A country of the source game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Country {
    tag: Tag,
    color: Option<Color>,
    primary_culture: Option<String>,
    accepted_cultures: Vec<String>,
    religion: Option<String>,
    government: Option<String>,
    capital: Option<ProvinceId>,
    capital_continent: Option<String>,
    civilized: bool,
    prestige: f64,
    money: f64,
    badboy: f64,
    technologies: Vec<String>,
    army_tech_count: u32,
    navy_tech_count: u32,
    inventions: Vec<String>,
    ruling_party: u32,
    active_parties: Vec<u32>,
    provinces: BTreeSet<ProvinceId>,
    cores: BTreeSet<ProvinceId>,
    great_nation: bool,
    names: BTreeMap<String, String>,
    adjectives: BTreeMap<String, String>,
    states: Vec<State>,
    armies: Vec<Army>,
    navies: Vec<Army>,
    relations: BTreeMap<Tag, Relations>,
    unit_names: UnitNames,
}

impl Country {
    pub fn new(tag: Tag) -> Self {
        Country {
            tag,
            ..Default::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    pub fn primary_culture(&self) -> Option<&str> {
        self.primary_culture.as_deref()
    }

    pub fn accepted_cultures(&self) -> &[String] {
        &self.accepted_cultures
    }

    pub fn religion(&self) -> Option<&str> {
        self.religion.as_deref()
    }

    pub fn government(&self) -> Option<&str> {
        self.government.as_deref()
    }

    pub fn capital(&self) -> Option<ProvinceId> {
        self.capital
    }

    /// The continent of the capital, if both are known
    pub fn capital_continent(&self) -> Option<&str> {
        self.capital_continent.as_deref()
    }

    pub fn is_civilized(&self) -> bool {
        self.civilized
    }

    pub fn prestige(&self) -> f64 {
        self.prestige
    }

    pub fn money(&self) -> f64 {
        self.money
    }

    /// Infamy
    pub fn badboy(&self) -> f64 {
        self.badboy
    }

    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    pub fn army_tech_count(&self) -> u32 {
        self.army_tech_count
    }

    pub fn navy_tech_count(&self) -> u32 {
        self.navy_tech_count
    }

    pub fn inventions(&self) -> &[String] {
        &self.inventions
    }

    /// The raw 1-based ruling party id, 0 if the save has none
    pub fn ruling_party_id(&self) -> u32 {
        self.ruling_party
    }

    /// The raw 1-based active party ids
    pub fn active_party_ids(&self) -> &[u32] {
        &self.active_parties
    }

    /// Owned provinces
    pub fn provinces(&self) -> &BTreeSet<ProvinceId> {
        &self.provinces
    }

    pub fn add_province(&mut self, id: ProvinceId) {
        self.provinces.insert(id);
    }

    pub fn cores(&self) -> &BTreeSet<ProvinceId> {
        &self.cores
    }

    pub fn add_core(&mut self, id: ProvinceId) {
        self.cores.insert(id);
    }

    pub fn is_great_nation(&self) -> bool {
        self.great_nation
    }

    pub fn set_great_nation(&mut self) {
        self.great_nation = true;
    }

    pub fn name(&self, language: &str) -> Option<&str> {
        self.names.get(language).map(|n| n.as_str())
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    pub fn set_localised_name(&mut self, language: String, name: String) {
        self.names.insert(language, name);
    }

    pub fn adjective(&self, language: &str) -> Option<&str> {
        self.adjectives.get(language).map(|n| n.as_str())
    }

    pub fn adjectives(&self) -> &BTreeMap<String, String> {
        &self.adjectives
    }

    pub fn set_localised_adjective(&mut self, language: String, adjective: String) {
        self.adjectives.insert(language, adjective);
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut [State] {
        &mut self.states
    }

    pub fn armies(&self) -> &[Army] {
        &self.armies
    }

    pub fn navies(&self) -> &[Army] {
        &self.navies
    }

    /// Relations towards other countries, keyed by their tag
    pub fn relations(&self) -> &BTreeMap<Tag, Relations> {
        &self.relations
    }

    pub fn relations_with(&self, tag: &str) -> Option<&Relations> {
        self.relations.get(tag)
    }

    pub fn unit_names(&self) -> &UnitNames {
        &self.unit_names
    }

    pub fn set_unit_names(&mut self, unit_names: UnitNames) {
        self.unit_names = unit_names;
    }

    /// Distributes the workforce of every state among its owned provinces.
    ///
    /// Factories employ craftsmen and clerks, but only up to
    /// [WORKERS_PER_FACTORY_LEVEL] per factory level of the state; the
    /// excess is scaled down proportionally. Clerks count twice, artisans
    /// always count in full.
    pub fn put_workers_in_provinces(&self, provinces: &mut BTreeMap<ProvinceId, Province>) {
        for state in &self.states {
            let owned: Vec<ProvinceId> = state
                .provinces()
                .iter()
                .filter(|id| self.provinces.contains(*id) && provinces.contains_key(*id))
                .copied()
                .collect();
            let mut factory_workers = 0;
            for id in &owned {
                if let Some(province) = provinces.get(id) {
                    factory_workers +=
                        province.population_of("craftsmen") + province.population_of("clerks");
                }
            }
            let limit = state.factory_level() * WORKERS_PER_FACTORY_LEVEL;
            let ratio = if factory_workers > limit {
                limit as f64 / factory_workers as f64
            } else {
                1.0
            };
            for id in &owned {
                if let Some(province) = provinces.get_mut(id) {
                    let craftsmen = (province.population_of("craftsmen") as f64 * ratio) as i64;
                    let clerks = (province.population_of("clerks") as f64 * ratio) as i64;
                    let artisans = province.population_of("artisans");
                    province.set_employed_workers(craftsmen + 2 * clerks + artisans);
                }
            }
        }
    }
}

/// Builds [Country] objects out of the tag keyed top level blocks of the save.
pub struct CountryFactory<'a> {
    parser: Parser<'a, Country>,
    continents: &'a Continents,
}

impl<'a> CountryFactory<'a> {
    pub fn new(
        techs: &'a Technologies,
        inventions: &'a Inventions,
        continents: &'a Continents,
    ) -> Self {
        let mut parser = Parser::new();
        parser.register_keyword("primary_culture", |country: &mut Country, _, value| {
            country.primary_culture = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("culture", |country: &mut Country, _, value| {
            country.accepted_cultures.extend(value.as_token_list());
            Ok(())
        });
        parser.register_keyword("religion", |country: &mut Country, _, value| {
            country.religion = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("government", |country: &mut Country, _, value| {
            country.government = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("capital", |country: &mut Country, _, value| {
            country.capital = Some(value.as_id()?);
            Ok(())
        });
        parser.register_keyword("civilized", |country: &mut Country, _, value| {
            country.civilized = value.as_boolean()?;
            Ok(())
        });
        parser.register_keyword("prestige", |country: &mut Country, _, value| {
            country.prestige = value.as_real()?;
            Ok(())
        });
        parser.register_keyword("money", |country: &mut Country, _, value| {
            country.money = value.as_real()?;
            Ok(())
        });
        parser.register_keyword("badboy", |country: &mut Country, _, value| {
            country.badboy = value.as_real()?;
            Ok(())
        });
        parser.register_keyword("technology", move |country: &mut Country, _, value| {
            for leaf in value.as_object()?.leaves() {
                let tech = leaf.key();
                if techs.is_army_tech(tech) {
                    country.army_tech_count += 1;
                }
                if techs.is_navy_tech(tech) {
                    country.navy_tech_count += 1;
                }
                country.technologies.push(tech.to_owned());
            }
            Ok(())
        });
        parser.register_keyword("active_inventions", move |country: &mut Country, _, value| {
            for invention in value.as_object()?.tokens() {
                if let Some(name) = inventions.get_invention_name(invention.as_id()?) {
                    country.inventions.push(name.to_owned());
                }
            }
            Ok(())
        });
        parser.register_keyword("ruling_party", |country: &mut Country, _, value| {
            country.ruling_party = value.as_id()?;
            Ok(())
        });
        parser.register_keyword("active_party", |country: &mut Country, _, value| {
            country.active_parties.push(value.as_id()?);
            Ok(())
        });
        parser.register_keyword("state", |country: &mut Country, _, value| {
            country
                .states
                .push(State::from_game_object(value.as_object()?)?);
            Ok(())
        });
        parser.register_keyword("army", |country: &mut Country, _, value| {
            country
                .armies
                .push(Army::from_game_object(value.as_object()?)?);
            Ok(())
        });
        parser.register_keyword("navy", |country: &mut Country, _, value| {
            country
                .navies
                .push(Army::navy_from_game_object(value.as_object()?)?);
            Ok(())
        });
        parser.register_keyword("flags", ignore_item);
        parser.register_catch_all(|country: &mut Country, key, value| {
            // relations are stored under the tag of the other country
            if is_country_tag(key) {
                if let Ok(relations) = value.as_object() {
                    country
                        .relations
                        .insert(key.to_owned(), Relations::from_game_object(relations)?);
                }
            }
            Ok(())
        });
        CountryFactory { parser, continents }
    }

    pub fn get_country(&self, tag: &str, base: &SaveFileObject) -> Result<Country, ParsingError> {
        let mut country = Country::new(tag.to_owned());
        self.parser.parse_object(base, &mut country)?;
        country.capital_continent = country
            .capital
            .and_then(|capital| self.continents.get_continent(capital))
            .map(|continent| continent.to_owned());
        Ok(country)
    }
}
