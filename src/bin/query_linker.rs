use clap::{App, Arg};

use linker::{Linker, Strategy};
use wikilinker::{load_stats, Settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let app = App::new("query_linker")
        .version("0.1.0")
        .about("Parse and return entities for a text fragment.")
        .arg(
            Arg::with_name("query")
                .takes_value(true)
                .help("Query to tag entities for")
                .required(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .default_value("wikilinker.toml")
                .help("Settings file"),
        )
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .takes_value(true)
                .possible_values(Strategy::NAMES)
                .help("Disambiguation strategy"),
        )
        .get_matches();

    let query = match app.value_of("query") {
        Some(query) => query,
        None => {
            println!("{}", app.usage());
            return Ok(());
        }
    };

    let mut settings = Settings::new(app.value_of("config").unwrap_or("wikilinker.toml"))?;
    if let Some(strategy) = app.value_of("strategy") {
        settings.linker = settings.linker.with_strategy(strategy.parse::<Strategy>()?);
    }

    let stats = load_stats(&settings)?;
    let linker = Linker::with_params(&stats, settings.linker)?;

    let candidates = linker.parse(&linker::Document::new("query", query));
    println!("before disambiguation:");
    for mention in candidates.iter() {
        println!("\t{}: {:?}", mention.mention, mention.entities);
    }
    let result = linker.disambiguate(&candidates);
    println!("========================================");
    for link in result.iter() {
        println!("{}\t{}\t{}", link.mention, link.entity, link.score);
    }
    for failure in result.failures() {
        println!("{}\tfailed: {}", failure.mention, failure.error);
    }
    Ok(())
}
