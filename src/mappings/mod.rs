/// A submodule that provides the unit vocabulary of the destination game.
mod military;
pub use military::{DivisionType, MappingError, MilitaryMappings, MilitaryMappingsFile};
