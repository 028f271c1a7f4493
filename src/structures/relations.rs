use serde::Serialize;

use super::{
    super::parser::{ParsingError, SaveFileObject},
    FromGameObject,
};

/// The relations of a country towards another.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Relations {
    value: i64,
    level: i64,
    military_access: bool,
}

impl Relations {
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The influence level, from hostile to in sphere
    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn has_military_access(&self) -> bool {
        self.military_access
    }
}

impl FromGameObject for Relations {
    fn from_game_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut relations = Relations::default();
        if let Some(value) = base.get("value") {
            relations.value = value.as_integer()?;
        }
        if let Some(level) = base.get("level") {
            relations.level = level.as_integer()?;
        }
        if let Some(access) = base.get("military_access") {
            relations.military_access = access.as_boolean()?;
        }
        Ok(relations)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::parser::parse_slice;
    use super::*;

    #[test]
    fn test_relations() {
        let base = parse_slice(b"value=150 level=4 military_access=yes last_send_diplomat=1836.1.1")
            .unwrap();
        let relations = Relations::from_game_object(&base).unwrap();
        assert_eq!(relations.value(), 150);
        assert_eq!(relations.level(), 4);
        assert!(relations.has_military_access());
        assert_eq!(
            Relations::from_game_object(&SaveFileObject::new()).unwrap(),
            Relations::default()
        );
    }
}
