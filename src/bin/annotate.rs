use clap::{App, Arg};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use linker::{Linker, Strategy};
use wikilinker::{link_writer, load_snippets, load_stats, run_batch, OutputFormat, Settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let app = App::new("annotate")
        .version("0.1.0")
        .about("Link the mentions of every document in a snippets file to Wikipedia entities.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .default_value("wikilinker.toml")
                .help("Settings file"),
        )
        .arg(
            Arg::with_name("snippets")
                .takes_value(true)
                .help("`id<TAB>text` documents to annotate"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output file, standard output when omitted"),
        )
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .takes_value(true)
                .possible_values(Strategy::NAMES)
                .help("Disambiguation strategy"),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .possible_values(&["tsv", "jsonl"])
                .help("Output format"),
        )
        .arg(
            Arg::with_name("top_k")
                .long("top-k")
                .takes_value(true)
                .help("Candidates kept by the voting strategy"),
        )
        .arg(
            Arg::with_name("k_th")
                .long("k-th")
                .takes_value(true)
                .help("Fraction of candidates kept by the tagme strategy"),
        )
        .arg(
            Arg::with_name("jobs")
                .short("j")
                .long("jobs")
                .takes_value(true)
                .help("Worker threads, 0 for one per core"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Hide the progress bar"),
        )
        .get_matches();

    let config = app.value_of("config").unwrap_or("wikilinker.toml");
    let mut settings = Settings::new(config)?;

    if let Some(strategy) = app.value_of("strategy") {
        settings.linker = settings.linker.with_strategy(strategy.parse::<Strategy>()?);
    }
    if let Some(top_k) = app.value_of("top_k") {
        settings.linker = settings.linker.with_top_k(top_k.parse()?);
    }
    if let Some(k_th) = app.value_of("k_th") {
        settings.linker = settings.linker.with_k_th(k_th.parse()?);
    }
    if let Some(format) = app.value_of("format") {
        settings.output.format = format.parse::<OutputFormat>()?;
    }
    if let Some(jobs) = app.value_of("jobs") {
        settings.output.jobs = jobs.parse()?;
    }
    if let Some(output) = app.value_of("output") {
        settings.output.path = Some(output.into());
    }
    if let Some(snippets) = app.value_of("snippets") {
        settings.snippets = Some(snippets.into());
    }

    let snippets_path = match &settings.snippets {
        Some(path) => path.clone(),
        None => {
            println!("{}", app.usage());
            return Ok(());
        }
    };

    let stats = load_stats(&settings)?;
    let linker = Linker::with_params(&stats, settings.linker)?;
    let snippets = load_snippets(&snippets_path)?;
    info!("{} documents in {:?}", snippets.len(), snippets_path);

    let out: Box<dyn Write> = match &settings.output.path {
        Some(path) => Box::new(BufWriter::with_capacity(8192 * 1024, File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let mut writer = link_writer(settings.output.format, out);
    run_batch(
        &linker,
        &snippets,
        writer.as_mut(),
        settings.output.jobs,
        !app.is_present("quiet"),
    )?;
    Ok(())
}
