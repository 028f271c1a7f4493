use clap_derive::Parser;
use derive_more::{Display, From};

use std::{error, path::PathBuf};

use vic2_to_hoi4::{
    config::Configuration,
    game_data::LANGUAGES,
    parser::{ParsingError, SaveFile, SaveFileError},
};

/// An error in the arguments of the program
#[derive(Debug, Display, From)]
pub enum ArgsError {
    #[display("no Victoria 2 path given, neither as an argument nor in the configuration")]
    NoGamePath,
    #[display("could not read the configuration: {_0}")]
    SaveFileError(SaveFileError),
    #[display("could not parse the configuration: {_0}")]
    ParsingError(ParsingError),
}

impl error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ArgsError::SaveFileError(e) => Some(e),
            ArgsError::ParsingError(e) => Some(e),
            _ => None,
        }
    }
}

/// A function to parse the language argument.
fn parse_lang_arg(input: &str) -> Result<&'static str, &'static str> {
    LANGUAGES
        .iter()
        .find(|x| **x == input)
        .map_or(Err("Invalid language"), |e| Ok(*e))
}

/// A function to parse the path argument.
fn parse_path_arg(input: &str) -> Result<PathBuf, &'static str> {
    let p = PathBuf::from(input);
    if p.exists() {
        Ok(p)
    } else {
        Err("Invalid path")
    }
}

/// The arguments to the program.
#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    #[arg(value_parser = parse_path_arg)]
    /// The path to the save file.
    pub filename: PathBuf,
    #[arg(short, long, default_value = None, value_parser = parse_path_arg)]
    /// The path to the converter configuration file.
    pub configuration: Option<PathBuf>,
    #[arg(short, long, default_value = None, value_parser = parse_path_arg)]
    /// The path to the Victoria 2 installation. Overrides the configuration.
    pub game_path: Option<PathBuf>,
    #[arg(short, long = "mod")]
    /// The mods to use, in load order. Overrides the configuration.
    pub mods: Vec<String>,
    #[arg(short, long, default_value_t = LANGUAGES[0], value_parser = parse_lang_arg)]
    /// The language to report names in.
    pub language: &'static str,
    #[arg(long, default_value = None, value_parser = parse_path_arg)]
    /// The province mapping file to check the world against.
    pub province_mappings: Option<PathBuf>,
    #[arg(long, default_value = None, value_parser = parse_path_arg)]
    /// The military mapping file to project the armies of the great powers with.
    pub military_mappings: Option<PathBuf>,
    #[arg(long, default_value = None)]
    /// A path to a file to dump the world to, as json.
    pub dump: Option<PathBuf>,
}

impl Args {
    /// Builds the converter configuration, the arguments overriding the
    /// configuration file.
    pub fn get_configuration(&self) -> Result<Configuration, ArgsError> {
        let mut configuration = match &self.configuration {
            Some(path) => Configuration::from_object(&SaveFile::open(path)?.parse()?)?,
            None => Configuration::default(),
        };
        if let Some(game_path) = &self.game_path {
            configuration.set_vic2_path(game_path);
        }
        if !self.mods.is_empty() {
            configuration.set_vic2_mods(self.mods.clone());
        }
        if configuration.vic2_path().as_os_str().is_empty() {
            return Err(ArgsError::NoGamePath);
        }
        Ok(configuration)
    }
}
