use std::rc::Rc;

use serde::Serialize;

use super::{
    super::{
        game_data::Issues,
        parser::{Parser, ParsingError, SaveFileObject, SaveFileValue},
        types::{ProvinceId, Tag},
    },
    Pop, PopFactory, POP_TYPES,
};

/// A province of the source game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Province {
    id: ProvinceId,
    name: String,
    owner_string: Option<String>,
    controller: Option<String>,
    core_strings: Vec<String>,
    /// Set by the ownership pass, only if the owner exists
    owner: Option<Tag>,
    pops: Vec<Pop>,
    fort_level: i64,
    naval_base_level: i64,
    railroad_level: i64,
    employed_workers: i64,
}

impl Province {
    pub fn id(&self) -> ProvinceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owner tag as written in the save, resolved or not
    pub fn owner_string(&self) -> Option<&str> {
        self.owner_string.as_deref()
    }

    /// The resolved owner
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn set_owner(&mut self, owner: Tag) {
        self.owner = Some(owner);
    }

    pub fn clear_owner(&mut self) {
        self.owner = None;
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    /// Tags of the countries with a core on the province, as written in the save
    pub fn core_strings(&self) -> &[String] {
        &self.core_strings
    }

    pub fn pops(&self) -> &[Pop] {
        &self.pops
    }

    /// Total size of the pops of a given type
    pub fn population_of(&self, pop_type: &str) -> i64 {
        self.pops
            .iter()
            .filter(|p| p.pop_type() == pop_type)
            .map(|p| p.size())
            .sum()
    }

    pub fn total_population(&self) -> i64 {
        self.pops.iter().map(|p| p.size()).sum()
    }

    pub fn fort_level(&self) -> i64 {
        self.fort_level
    }

    pub fn naval_base_level(&self) -> i64 {
        self.naval_base_level
    }

    pub fn railroad_level(&self) -> i64 {
        self.railroad_level
    }

    pub fn employed_workers(&self) -> i64 {
        self.employed_workers
    }

    pub fn set_employed_workers(&mut self, workers: i64) {
        self.employed_workers = workers;
    }
}

/// Buildings are stored as `fort = { 1.000 0.000 }`, the current level first.
fn building_level(value: &SaveFileValue) -> Result<i64, ParsingError> {
    let level = match value {
        SaveFileValue::String(_) => value.as_real()?,
        SaveFileValue::Object(object) => match object.tokens().first() {
            Some(level) => level.as_real()?,
            None => 0.0,
        },
    };
    Ok(level.floor() as i64)
}

/// Builds [Province] objects out of the numbered top level blocks of the save.
pub struct ProvinceFactory<'a> {
    parser: Parser<'a, Province>,
}

impl<'a> ProvinceFactory<'a> {
    pub fn new(issues: &'a Issues) -> Self {
        let mut parser = Parser::new();
        parser.register_keyword("name", |province: &mut Province, _, value| {
            province.name = value.as_string()?.to_string();
            Ok(())
        });
        parser.register_keyword("owner", |province: &mut Province, _, value| {
            province.owner_string = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("controller", |province: &mut Province, _, value| {
            province.controller = Some(value.as_string()?.to_string());
            Ok(())
        });
        parser.register_keyword("core", |province: &mut Province, _, value| {
            let core = value.as_string()?.to_string();
            if !province.core_strings.contains(&core) {
                province.core_strings.push(core);
            }
            Ok(())
        });
        parser.register_keyword("fort", |province: &mut Province, _, value| {
            province.fort_level = building_level(value)?;
            Ok(())
        });
        parser.register_keyword("naval_base", |province: &mut Province, _, value| {
            province.naval_base_level = building_level(value)?;
            Ok(())
        });
        parser.register_keyword("railroad", |province: &mut Province, _, value| {
            province.railroad_level = building_level(value)?;
            Ok(())
        });
        let pop_factory = Rc::new(PopFactory::new(issues));
        for pop_type in POP_TYPES {
            let pop_factory = pop_factory.clone();
            parser.register_keyword(pop_type, move |province: &mut Province, key, value| {
                province
                    .pops
                    .push(pop_factory.get_pop(key, value.as_object()?)?);
                Ok(())
            });
        }
        ProvinceFactory { parser }
    }

    pub fn get_province(
        &self,
        id: ProvinceId,
        base: &SaveFileObject,
    ) -> Result<Province, ParsingError> {
        let mut province = Province {
            id,
            ..Default::default()
        };
        self.parser.parse_object(base, &mut province)?;
        Ok(province)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::parser::parse_slice;
    use super::*;

    #[test]
    fn test_province() {
        let issues = Issues::default();
        let factory = ProvinceFactory::new(&issues);
        let base = parse_slice(
            b"name=\"London\" owner=\"ENG\" controller=\"ENG\" core=\"ENG\" core=\"SCO\" core=\"ENG\"
            fort={ 1.000 0.000 } railroad={ 2.000 0.000 }
            craftsmen={ id=1 size=1000 british=protestant }
            clerks={ id=2 size=200 british=protestant }
            craftsmen={ id=3 size=500 irish=catholic }
            garrison=100.000",
        )
        .unwrap();
        let province = factory.get_province(300, &base).unwrap();
        assert_eq!(province.id(), 300);
        assert_eq!(province.name(), "London");
        assert_eq!(province.owner_string(), Some("ENG"));
        assert_eq!(province.owner(), None);
        assert_eq!(province.core_strings(), &["ENG".to_owned(), "SCO".to_owned()]);
        assert_eq!(province.fort_level(), 1);
        assert_eq!(province.railroad_level(), 2);
        assert_eq!(province.naval_base_level(), 0);
        assert_eq!(province.pops().len(), 3);
        assert_eq!(province.population_of("craftsmen"), 1500);
        assert_eq!(province.total_population(), 1700);
        assert_eq!(province.pops()[2].culture(), Some("irish"));
    }

    #[test]
    fn test_malformed_pop() {
        let issues = Issues::default();
        let factory = ProvinceFactory::new(&issues);
        let base = parse_slice(b"farmers={ size=many }").unwrap();
        assert!(factory.get_province(1, &base).is_err());
    }
}
