use log::debug;

use super::super::{
    parser::{GameObjectMapping, ParsingError, SaveFileObject},
    types::{HashMap, ProvinceId},
};

/// The continent of every province
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Continents {
    provinces: HashMap<ProvinceId, String>,
}

impl Continents {
    /// Reads `continent = { provinces = { 1 2 3 } }` blocks
    pub fn from_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut continents = Continents::default();
        for leaf in base.leaves() {
            let Ok(continent) = leaf.value().as_object() else {
                continue;
            };
            if continent.get("provinces").is_none() {
                debug!("Continent {} has no provinces", leaf.key());
                continue;
            }
            for province in continent.get_object("provinces")?.tokens() {
                continents.insert(province.as_id()?, leaf.key().to_owned());
            }
        }
        Ok(continents)
    }

    pub fn insert(&mut self, province: ProvinceId, continent: String) {
        self.provinces.insert(province, continent);
    }

    pub fn get_continent(&self, province: ProvinceId) -> Option<&str> {
        self.provinces.get(&province).map(|c| c.as_str())
    }
}
