use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::{fs, process::ExitCode, time::Duration};

use vic2_to_hoi4::{
    game_data::{GameDataLoader, ProvinceMapping},
    mappings::MilitaryMappingsFile,
    parser::SaveFile,
    world::World,
};

/// A submodule that provides the command line arguments
mod args;
use args::Args;

/// Creates a spinner for a single step of the process
fn spinner(style: &ProgressStyle, message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style.clone());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Main function. This is the entry point of the program.
///
/// # Process
///
/// 1. Reads the arguments and builds the configuration
/// 2. Loads the lookup tables of the base game and of every mod
/// 3. Parses the save file
/// 4. Builds the [World], merging in the country files
/// 5. Binds the localisation and the state ids onto the world
/// 6. Optionally checks the province mappings and projects the armies of the
///    great powers onto the unit types of the destination game
/// 7. Optionally dumps the world to a json file
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let configuration = args.get_configuration()?;
    let spinner_style = ProgressStyle::default_spinner()
        .template("[{elapsed_precise}] {spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let data_spinner = spinner(&spinner_style, "Loading game data");
    let mut loader = GameDataLoader::new();
    loader.process_path(configuration.vic2_path())?;
    for mod_name in configuration.vic2_mods() {
        loader.process_path(configuration.mod_path(mod_name))?;
    }
    let game_data = loader.finalize();
    data_spinner.finish_with_message("Game data loaded");

    let save_spinner = spinner(&spinner_style, "Parsing the save file");
    let save = SaveFile::open(&args.filename)?.parse()?;
    save_spinner.finish_with_message("Save parsing complete");

    let world_spinner = spinner(&spinner_style, "Building the world");
    let mut world = World::new(&save, &game_data, &configuration)?;
    world.set_localisations(game_data.localisation(), game_data.state_ids());
    world_spinner.finish_with_message("World built");

    for tag in world.great_countries() {
        let name = world
            .country(tag)
            .and_then(|country| country.name(args.language))
            .unwrap_or(tag);
        info!("Great power: {} ({})", name, tag);
    }

    if let Some(path) = &args.province_mappings {
        let mapping = ProvinceMapping::from_object(&SaveFile::open(path)?.parse()?)?;
        let unmapped = world.check_all_provinces_mapped(&mapping);
        info!("{} provinces have no mapping", unmapped);
    }

    if let Some(path) = &args.military_mappings {
        let file = MilitaryMappingsFile::from_object(&SaveFile::open(path)?.parse()?)?;
        let mappings = file.get_military_mappings(configuration.vic2_mods())?;
        for tag in world.great_countries() {
            let Some(country) = world.country(tag) else {
                continue;
            };
            for army in country.armies() {
                for (unit_type, amount) in mappings.project_army(army) {
                    info!("{} {}: {:.1} {}", tag, army.name(), amount, unit_type);
                }
            }
        }
    }

    if let Some(path) = &args.dump {
        let json = serde_json::to_string_pretty(&world)?;
        fs::write(path, json)?;
        info!("World dumped to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
