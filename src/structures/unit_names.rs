use serde::Serialize;

use super::super::{
    parser::{Parser, ParsingError, SaveFileObject},
    types::HashMap,
};

/// Names for new units, keyed by unit type, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnitNames {
    names: HashMap<String, Vec<String>>,
}

impl UnitNames {
    pub fn get(&self, unit_type: &str) -> Option<&[String]> {
        self.names.get(unit_type).map(|n| n.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Builds [UnitNames] out of a `unit_names = { type = { "a" "b" } }` block.
pub struct UnitNamesFactory {
    parser: Parser<'static, UnitNames>,
}

impl Default for UnitNamesFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitNamesFactory {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser.register_catch_all(|names: &mut UnitNames, key, value| {
            names
                .names
                .entry(key.to_owned())
                .or_default()
                .extend(value.as_token_list());
            Ok(())
        });
        UnitNamesFactory { parser }
    }

    pub fn get_unit_names(&self, base: &SaveFileObject) -> Result<UnitNames, ParsingError> {
        let mut names = UnitNames::default();
        self.parser.parse_object(base, &mut names)?;
        Ok(names)
    }
}
