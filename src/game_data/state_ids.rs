use super::super::{
    parser::{ParsingError, SaveFileObject},
    types::{HashMap, ProvinceId, StateId},
};

/// Maps every province to the numeric id of its state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateIdMapping {
    states: HashMap<ProvinceId, StateId>,
}

impl StateIdMapping {
    /// Reads a region file, `REGION = { 1 2 3 }`.
    /// States are numbered from 1 in the order they are defined.
    pub fn from_regions(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut mapping = StateIdMapping::default();
        let mut id: StateId = 0;
        for leaf in base.leaves() {
            let Ok(region) = leaf.value().as_object() else {
                continue;
            };
            id += 1;
            for province in region.tokens() {
                mapping.insert(province.as_id()?, id);
            }
        }
        Ok(mapping)
    }

    pub fn insert(&mut self, province: ProvinceId, state: StateId) {
        self.states.insert(province, state);
    }

    pub fn get_state_id(&self, province: ProvinceId) -> Option<StateId> {
        self.states.get(&province).copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
