use jomini::common::{Date, PdsDate};
use serde::Serializer;

use super::parser::{ParsingError, SaveFileObject};

/// A submodule that provides the [Color] object.
mod color;
pub use color::Color;

/// A submodule that provides the [Pop] object and its factory.
mod pop;
pub use pop::{Pop, PopFactory, POP_TYPES};

/// A submodule that provides the [Party] object and its factory.
mod party;
pub use party::{Party, PartyFactory};

mod unit_names;
pub use unit_names::{UnitNames, UnitNamesFactory};

/// A submodule that provides the [CommonCountryData] object, the contents of
/// a per-country definition file.
mod common_country_data;
pub use common_country_data::{
    country_file_candidates, CommonCountryData, CommonCountryDataFactory,
};

/// A submodule that provides the [Province] object.
mod province;
pub use province::{Province, ProvinceFactory};

mod state;
pub use state::State;

/// A submodule that provides the [Army] object, used for navies too.
mod army;
pub use army::{Army, Unit};

mod relations;
pub use relations::Relations;

/// A submodule that provides the [Diplomacy] aggregate.
mod diplomacy;
pub use diplomacy::{Agreement, Diplomacy};

/// A submodule that provides the [Country] object.
mod country;
pub use country::{is_country_tag, Country, CountryFactory};

/// A trait for objects that can be created from a [SaveFileObject] without
/// any auxiliary data.
/// Entities that need lookup tables are built by factories instead.
pub trait FromGameObject: Sized {
    /// Create a new object from a parsed object.
    fn from_game_object(base: &SaveFileObject) -> Result<Self, ParsingError>;
}

/// Serializes an optional date in the ISO 8601 format.
fn serialize_date<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.serialize_some(&date.iso_8601().to_string()),
        None => serializer.serialize_none(),
    }
}
