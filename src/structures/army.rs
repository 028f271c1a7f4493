use serde::Serialize;

use super::{
    super::{
        parser::{GameObjectMapping, ParsingError, SaveFileObject},
        types::ProvinceId,
    },
    FromGameObject,
};

/// A regiment of an army or a ship of a navy
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Unit {
    name: String,
    unit_type: String,
    strength: f64,
    organisation: f64,
    experience: f64,
}

impl Unit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_type(&self) -> &str {
        &self.unit_type
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn organisation(&self) -> f64 {
        self.organisation
    }

    pub fn experience(&self) -> f64 {
        self.experience
    }
}

impl FromGameObject for Unit {
    fn from_game_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut unit = Unit::default();
        if let Some(name) = base.get("name") {
            unit.name = name.as_string()?.to_string();
        }
        unit.unit_type = base.get_string("type")?.to_string();
        if let Some(strength) = base.get("strength") {
            unit.strength = strength.as_real()?;
        }
        if let Some(organisation) = base.get("organisation") {
            unit.organisation = organisation.as_real()?;
        }
        if let Some(experience) = base.get("experience") {
            unit.experience = experience.as_real()?;
        }
        Ok(unit)
    }
}

/// An army or a navy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Army {
    name: String,
    location: Option<ProvinceId>,
    units: Vec<Unit>,
    navy: bool,
}

impl Army {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Option<ProvinceId> {
        self.location
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn is_navy(&self) -> bool {
        self.navy
    }

    /// Reads a `navy = { ... }` block, whose units are stored under `ship`
    pub fn navy_from_game_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut navy = Self::read(base, "ship")?;
        navy.navy = true;
        Ok(navy)
    }

    fn read(base: &SaveFileObject, unit_key: &str) -> Result<Self, ParsingError> {
        let mut army = Army::default();
        if let Some(name) = base.get("name") {
            army.name = name.as_string()?.to_string();
        }
        if let Some(location) = base.get("location") {
            army.location = Some(location.as_id()?);
        }
        for unit in base.get_all(unit_key) {
            army.units.push(Unit::from_game_object(unit.as_object()?)?);
        }
        Ok(army)
    }
}

impl FromGameObject for Army {
    /// Reads an `army = { ... }` block, whose units are stored under `regiment`
    fn from_game_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        Self::read(base, "regiment")
    }
}
