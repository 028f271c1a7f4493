use std::collections::HashSet;

use super::super::parser::SaveFileObject;

/// The army and navy technology tables, used to count how far a country
/// got along each branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Technologies {
    army: HashSet<String>,
    navy: HashSet<String>,
}

impl Technologies {
    pub fn new<A: IntoIterator<Item = String>, N: IntoIterator<Item = String>>(
        army: A,
        navy: N,
    ) -> Self {
        Technologies {
            army: army.into_iter().collect(),
            navy: navy.into_iter().collect(),
        }
    }

    /// Adds the technologies defined in an army technology file
    pub fn add_army_techs(&mut self, base: &SaveFileObject) {
        self.army.extend(tech_names(base));
    }

    /// Adds the technologies defined in a navy technology file
    pub fn add_navy_techs(&mut self, base: &SaveFileObject) {
        self.navy.extend(tech_names(base));
    }

    pub fn is_army_tech(&self, tech: &str) -> bool {
        self.army.contains(tech)
    }

    pub fn is_navy_tech(&self, tech: &str) -> bool {
        self.navy.contains(tech)
    }
}

fn tech_names(base: &SaveFileObject) -> impl Iterator<Item = String> + '_ {
    base.leaves()
        .iter()
        .filter(|leaf| leaf.value().as_object().is_ok())
        .map(|leaf| leaf.key().to_owned())
}
