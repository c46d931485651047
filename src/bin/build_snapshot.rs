use clap::{App, Arg};
use log::info;
use std::path::PathBuf;

use common::Timer;
use storage::StatsStore;
use wikilinker::Settings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let app = App::new("build_snapshot")
        .version("0.1.0")
        .about("Load the raw statistics files and write them out as a binary snapshot.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .default_value("wikilinker.toml")
                .help("Settings file"),
        )
        .arg(
            Arg::with_name("output")
                .takes_value(true)
                .help("Snapshot path, the configured snapshot when omitted"),
        )
        .get_matches();

    let settings = Settings::new(app.value_of("config").unwrap_or("wikilinker.toml"))?;
    let output = match app.value_of("output") {
        Some(path) => PathBuf::from(path),
        None => match settings.snapshot {
            Some(path) => path,
            None => {
                println!("{}", app.usage());
                return Ok(());
            }
        },
    };

    let mut timer = Timer::new();
    let stats = StatsStore::load(&settings.stats)?;
    timer.finish("Loading statistics");
    info!(
        "{} mentions, {} entities with inlinks, {} entity pairs",
        stats.commonness().len(),
        stats.inlinks().len(),
        stats.pair_inlinks().len()
    );
    stats.write_snapshot(&output)?;
    info!("Snapshot written to {:?}", output);
    Ok(())
}
