use serde::Serialize;

use super::{
    super::{
        parser::{GameObjectMapping, ParsingError, SaveFileObject},
        types::{ProvinceId, StateId},
    },
    FromGameObject,
};

/// A state of a country, as stored in the save.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct State {
    provinces: Vec<ProvinceId>,
    id: Option<StateId>,
    factory_level: i64,
}

impl State {
    pub fn new(provinces: Vec<ProvinceId>) -> Self {
        State {
            provinces,
            ..Default::default()
        }
    }

    /// The provinces of the state, in save order
    pub fn provinces(&self) -> &[ProvinceId] {
        &self.provinces
    }

    pub fn first_province(&self) -> Option<ProvinceId> {
        self.provinces.first().copied()
    }

    /// The id of the state in the destination game, once resolved
    pub fn id(&self) -> Option<StateId> {
        self.id
    }

    pub fn set_id(&mut self, id: StateId) {
        self.id = Some(id);
    }

    /// Sum of the levels of the factories in the state
    pub fn factory_level(&self) -> i64 {
        self.factory_level
    }
}

impl FromGameObject for State {
    fn from_game_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut state = State::default();
        if let Some(provinces) = base.get("provinces") {
            for province in provinces.as_object()?.tokens() {
                state.provinces.push(province.as_id()?);
            }
        }
        for building in base.get_all("state_buildings") {
            let building = building.as_object()?;
            if building.get("level").is_some() {
                state.factory_level += building.get_integer("level")?;
            }
        }
        Ok(state)
    }
}
