//! Reconstructs the world of a finished Victoria 2 game, as a starting point
//! for a Hearts of Iron 4 scenario.
//!
//! The save is parsed into a tree of [parser::SaveFileObject]s, from which
//! the [world::World] graph of countries, provinces, pops, parties and
//! diplomatic agreements is built. Lookup tables of the source game come from
//! [game_data], and the vocabulary of the destination game from [mappings].
//!
//! ```no_run
//! use vic2_to_hoi4::{
//!     config::Configuration, game_data::GameDataLoader, parser::SaveFile, world::World,
//! };
//!
//! let configuration = Configuration::new("/games/Victoria 2", Vec::new());
//! let mut loader = GameDataLoader::new();
//! loader.process_path(configuration.vic2_path()).unwrap();
//! let game_data = loader.finalize();
//! let save = SaveFile::open("save.v2").unwrap().parse().unwrap();
//! let mut world = World::new(&save, &game_data, &configuration).unwrap();
//! world.set_localisations(game_data.localisation(), game_data.state_ids());
//! ```

/// A submodule that provides opaque types commonly used in the project
pub mod types;

/// A submodule that handles parsing of the key-value files of both games
pub mod parser;

/// A submodule that provides the converter configuration and the missing
/// file policy.
pub mod config;

/// A submodule that loads the lookup tables of the source game
pub mod game_data;

/// The entities of the world, and the factories that build them
pub mod structures;

/// A submodule that provides the [World](world::World) graph
pub mod world;

/// Mappings onto the vocabulary of the destination game
pub mod mappings;
