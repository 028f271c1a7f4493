use jomini::common::Date;
use log::debug;
use serde::Serialize;

use super::{
    super::{
        parser::{ParsingError, SaveFileObject},
        types::Tag,
    },
    serialize_date, FromGameObject,
};

/// A single agreement between two countries, like an alliance or a vassalage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agreement {
    kind: String,
    first: Tag,
    second: Tag,
    #[serde(serialize_with = "serialize_date")]
    start_date: Option<Date>,
}

impl Agreement {
    /// The key the agreement was stored under, `alliance`, `vassal`...
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    /// Checks whether the agreement involves the country
    pub fn involves(&self, tag: &str) -> bool {
        self.first == tag || self.second == tag
    }
}

/// All agreements of the save. Empty if the save has no diplomacy section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diplomacy {
    agreements: Vec<Agreement>,
}

impl Diplomacy {
    pub fn agreements(&self) -> &[Agreement] {
        &self.agreements
    }

    pub fn is_empty(&self) -> bool {
        self.agreements.is_empty()
    }

    /// Agreements of the given kind
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Agreement> + 'a {
        self.agreements.iter().filter(move |a| a.kind == kind)
    }

    /// Drops every agreement involving the country
    pub fn remove_country(&mut self, tag: &str) {
        self.agreements.retain(|a| !a.involves(tag));
    }
}

impl FromGameObject for Diplomacy {
    fn from_game_object(base: &SaveFileObject) -> Result<Self, ParsingError> {
        let mut diplomacy = Diplomacy::default();
        for leaf in base.leaves() {
            let Ok(agreement) = leaf.value().as_object() else {
                continue;
            };
            let (Some(first), Some(second)) = (agreement.get("first"), agreement.get("second"))
            else {
                debug!("Skipping {} without both parties", leaf.key());
                continue;
            };
            diplomacy.agreements.push(Agreement {
                kind: leaf.key().to_owned(),
                first: first.as_string()?.to_string(),
                second: second.as_string()?.to_string(),
                start_date: agreement
                    .get("start_date")
                    .map(|date| date.as_date())
                    .transpose()?,
            });
        }
        Ok(diplomacy)
    }
}
