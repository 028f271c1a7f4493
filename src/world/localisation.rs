use log::warn;

use super::{
    super::game_data::{Localize, StateIdMapping},
    World,
};

impl World {
    /// Binds localised names and adjectives onto every country, and
    /// resolves the state ids of their states.
    pub fn set_localisations<L: Localize>(&mut self, localisation: &L, state_ids: &StateIdMapping) {
        for country in self.countries.values_mut() {
            let tag = country.tag().to_owned();
            if let Some(names) = localisation.text_in_each_language(&tag) {
                for (language, name) in names {
                    country.set_localised_name(language.clone(), name.clone());
                }
            }
            if let Some(adjectives) = localisation.text_in_each_language(&format!("{}_ADJ", tag)) {
                for (language, adjective) in adjectives {
                    country.set_localised_adjective(language.clone(), adjective.clone());
                }
            }
            // states are identified by their first province
            for state in country.states_mut() {
                let Some(province) = state.first_province() else {
                    warn!("{} has a state without provinces", tag);
                    continue;
                };
                match state_ids.get_state_id(province) {
                    Some(id) => state.set_id(id),
                    None => warn!("Could not find the state for Vic2 province {}", province),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::{
        game_data::{GameData, Localisation},
        parser::parse_slice,
    };
    use super::*;

    #[test]
    fn test_localisation() {
        let mut world = World::from_save(
            &parse_slice(
                b"1={ owner=\"AAA\" } 2={ owner=\"AAA\" } 3={ owner=\"BBB\" }
                AAA={ state={ provinces={ 2 1 } } state={ provinces={ 3 } } }
                BBB={ }",
            )
            .unwrap(),
            &GameData::default(),
        )
        .unwrap();
        let mut localisation = Localisation::default();
        localisation.insert("AAA".to_owned(), "english".to_owned(), "Aland".to_owned());
        localisation.insert("AAA".to_owned(), "french".to_owned(), "Alande".to_owned());
        localisation.insert("AAA_ADJ".to_owned(), "english".to_owned(), "Alandish".to_owned());
        let mut state_ids = StateIdMapping::default();
        state_ids.insert(2, 42);
        state_ids.insert(1, 7);

        world.set_localisations(&localisation, &state_ids);

        let aaa = world.country("AAA").unwrap();
        assert_eq!(aaa.name("english"), Some("Aland"));
        assert_eq!(aaa.name("french"), Some("Alande"));
        assert_eq!(aaa.adjective("english"), Some("Alandish"));
        assert_eq!(aaa.adjective("french"), None);
        // resolved through the first province
        assert_eq!(aaa.states()[0].id(), Some(42));
        // no mapping, left unresolved
        assert_eq!(aaa.states()[1].id(), None);
        let bbb = world.country("BBB").unwrap();
        assert!(bbb.names().is_empty());
        assert!(bbb.adjectives().is_empty());
    }
}
