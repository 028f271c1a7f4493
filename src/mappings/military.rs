use std::{collections::BTreeMap, error};

use derive_more::{Display, From};
use log::debug;
use serde::Serialize;

use super::super::{
    parser::{GameObjectMapping, ParsingError, SaveFileObject, SaveFileValue},
    structures::Army,
    types::HashMap,
};

/// The key of the mappings used when no configured mod has its own
const DEFAULT_MAPPINGS: &str = "default";

#[derive(Debug, From, Display)]
pub enum MappingError {
    /// The mappings have no unit map
    #[display("the military mappings for {_0} have no map section")]
    #[from(skip)]
    MissingMap(String),
    /// No mappings for the configured mods and no default ones
    #[display("no military mappings apply")]
    NoMappings,
    ParsingError(ParsingError),
}

impl error::Error for MappingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MappingError::ParsingError(e) => Some(e),
            _ => None,
        }
    }
}

/// A destination unit type a source unit type is converted into
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionType {
    unit_type: String,
    size: f64,
}

impl DivisionType {
    pub fn unit_type(&self) -> &str {
        &self.unit_type
    }

    /// How many of this type one source unit turns into
    pub fn size(&self) -> f64 {
        self.size
    }

    fn from_value(value: &SaveFileValue) -> Result<Self, ParsingError> {
        match value {
            SaveFileValue::String(unit_type) => Ok(DivisionType {
                unit_type: unit_type.to_string(),
                size: 1.0,
            }),
            SaveFileValue::Object(object) => Ok(DivisionType {
                unit_type: object.get_string("type")?.to_string(),
                size: match object.get("size") {
                    Some(size) => size.as_real()?,
                    None => 1.0,
                },
            }),
        }
    }
}

/// The military mappings of a single mod.
///
/// ```text
/// map = { link = { vic = infantry hoi = { type = infantry size = 3 } } }
/// division_templates = { division_template = { name = "Infantry Division" } }
/// substitutes = { artillery = artillery_brigade }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilitaryMappings {
    mod_name: String,
    unit_map: HashMap<String, Vec<DivisionType>>,
    division_templates: Vec<String>,
    substitutes: HashMap<String, String>,
}

impl MilitaryMappings {
    pub fn from_object(mod_name: &str, base: &SaveFileObject) -> Result<Self, MappingError> {
        let Some(map) = base.get("map") else {
            return Err(MappingError::MissingMap(mod_name.to_owned()));
        };
        Ok(Self::read(mod_name, map, base)?)
    }

    fn read(
        mod_name: &str,
        map: &SaveFileValue,
        base: &SaveFileObject,
    ) -> Result<Self, ParsingError> {
        let mut mappings = MilitaryMappings {
            mod_name: mod_name.to_owned(),
            ..Default::default()
        };
        if let Ok(map) = map.as_object() {
            for link in map.get_all("link") {
                let link = link.as_object()?;
                let vic = link.get_string("vic")?.to_string();
                let entry = mappings.unit_map.entry(vic).or_default();
                for hoi in link.get_all("hoi") {
                    entry.push(DivisionType::from_value(hoi)?);
                }
            }
        }
        if let Some(templates) = base.get("division_templates") {
            for template in templates.as_object()?.get_all("division_template") {
                mappings
                    .division_templates
                    .push(template.as_object()?.get_string("name")?.to_string());
            }
        }
        if let Some(substitutes) = base.get("substitutes") {
            for leaf in substitutes.as_object()?.leaves() {
                mappings
                    .substitutes
                    .insert(leaf.key().to_owned(), leaf.value().as_string()?.to_string());
            }
        }
        Ok(mappings)
    }

    pub fn mod_name(&self) -> &str {
        &self.mod_name
    }

    /// The destination types of a source unit type
    pub fn get_unit_mapping(&self, vic2_type: &str) -> Option<&[DivisionType]> {
        self.unit_map.get(vic2_type).map(|types| types.as_slice())
    }

    pub fn unit_map(&self) -> &HashMap<String, Vec<DivisionType>> {
        &self.unit_map
    }

    /// Names of the division templates, in file order
    pub fn division_templates(&self) -> &[String] {
        &self.division_templates
    }

    /// Replacement types for destination types that may be unavailable
    pub fn substitutes(&self) -> &HashMap<String, String> {
        &self.substitutes
    }

    /// Projects the units of an army onto destination unit types, weighting
    /// every unit by its strength. Units with no mapping are skipped.
    pub fn project_army(&self, army: &Army) -> BTreeMap<String, f64> {
        let mut projected = BTreeMap::new();
        for unit in army.units() {
            match self.get_unit_mapping(unit.unit_type()) {
                Some(types) => {
                    for division_type in types {
                        *projected
                            .entry(division_type.unit_type().to_owned())
                            .or_insert(0.0) += division_type.size() * unit.strength();
                    }
                }
                None => debug!("No military mapping for {} units", unit.unit_type()),
            }
        }
        projected
    }
}

/// A file of military mappings, one block per mod plus the default ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilitaryMappingsFile {
    mappings: Vec<MilitaryMappings>,
}

impl MilitaryMappingsFile {
    pub fn from_object(base: &SaveFileObject) -> Result<Self, MappingError> {
        let mut mappings = Vec::new();
        for leaf in base.leaves() {
            if let Ok(object) = leaf.value().as_object() {
                mappings.push(MilitaryMappings::from_object(leaf.key(), object)?);
            }
        }
        Ok(MilitaryMappingsFile { mappings })
    }

    /// The mappings of the first configured mod that has its own, else the
    /// default ones.
    pub fn get_military_mappings(
        &self,
        mods: &[String],
    ) -> Result<&MilitaryMappings, MappingError> {
        mods.iter()
            .find_map(|mod_name| self.mappings.iter().find(|m| &m.mod_name == mod_name))
            .or_else(|| self.mappings.iter().find(|m| m.mod_name == DEFAULT_MAPPINGS))
            .ok_or(MappingError::NoMappings)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::{parser::parse_slice, structures::FromGameObject};
    use super::*;

    #[test]
    fn test_missing_map() {
        let base = parse_slice(b"").unwrap();
        assert!(matches!(
            MilitaryMappings::from_object("", &base),
            Err(MappingError::MissingMap(_))
        ));
    }

    #[test]
    fn test_empty_sections() {
        let base = parse_slice(b"map = { } division_templates = { } substitutes = { }").unwrap();
        let mappings = MilitaryMappings::from_object("", &base).unwrap();
        assert!(mappings.unit_map().is_empty());
        assert!(mappings.division_templates().is_empty());
        assert!(mappings.substitutes().is_empty());
    }

    #[test]
    fn test_templates_and_substitutes() {
        let base = parse_slice(
            b"map = { }
            division_templates = {
                division_template = { name = \"Light Infantry Brigade\" }
                division_template = { name = \"Cavalry Division\" regiments = { } }
            }
            substitutes = { artillery = artillery_brigade }",
        )
        .unwrap();
        let mappings = MilitaryMappings::from_object("", &base).unwrap();
        assert_eq!(
            mappings.division_templates(),
            &["Light Infantry Brigade".to_owned(), "Cavalry Division".to_owned()]
        );
        assert_eq!(mappings.substitutes().len(), 1);
        assert_eq!(mappings.substitutes()["artillery"], "artillery_brigade");
    }

    #[test]
    fn test_projection() {
        let base = parse_slice(
            b"map = {
                link = { vic = infantry hoi = { type = infantry size = 3 } }
                link = { vic = artillery hoi = artillery_brigade hoi = { type = infantry size = 1 } }
            }",
        )
        .unwrap();
        let mappings = MilitaryMappings::from_object("", &base).unwrap();
        let army = Army::from_game_object(
            &parse_slice(
                b"regiment = { type = infantry strength = 2.000 }
                regiment = { type = artillery strength = 1.000 }
                regiment = { type = hussar strength = 3.000 }",
            )
            .unwrap(),
        )
        .unwrap();
        let projected = mappings.project_army(&army);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected["infantry"], 7.0);
        assert_eq!(projected["artillery_brigade"], 1.0);
    }

    #[test]
    fn test_mod_selection() {
        let base = parse_slice(
            b"default = { map = { } substitutes = { a = b } }
            PDM = { map = { } }",
        )
        .unwrap();
        let file = MilitaryMappingsFile::from_object(&base).unwrap();
        let mods = vec!["HPM".to_owned(), "PDM".to_owned()];
        assert_eq!(file.get_military_mappings(&mods).unwrap().mod_name(), "PDM");
        assert_eq!(file.get_military_mappings(&[]).unwrap().mod_name(), "default");
        let broken = parse_slice(b"default = { substitutes = { } }").unwrap();
        assert!(MilitaryMappingsFile::from_object(&broken).is_err());
        let empty = MilitaryMappingsFile::default();
        assert!(empty.get_military_mappings(&[]).is_err());
    }
}
