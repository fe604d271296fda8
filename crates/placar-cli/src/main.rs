use std::collections::BTreeMap;
use std::process;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use placar::WebScraper;
use placar::clean::{PartyAliases, normalize_parties};
use placar::export::to_csv;
use placar::tally::{ChoiceCounts, PartySet, PartyTally, scoreboard};

#[derive(Parser)]
#[command(name = "placar")]
#[command(about = "Extract roll-call votes from a camara.leg.br voting page", long_about = None)]
struct Cli {
    #[arg(help = "URL of the voting results page")]
    url: String,

    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    format: OutputFormat,

    #[arg(
        long = "parties",
        value_name = "A,B,C",
        help = "Comma-separated party set to score as a bloc (repeatable, case-insensitive)"
    )]
    parties: Vec<String>,

    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    official_result: &'a Option<String>,
    party_tally: &'a PartyTally,
    scoreboards: &'a BTreeMap<String, ChoiceCounts>,
    records: &'a [placar::VoteRecord],
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = WebScraper::new().unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    let result = scraper.fetch_voting(&cli.url).await.unwrap_or_else(|e| {
        log::error!("Error fetching voting page: {}", e);
        process::exit(1);
    });

    let official_result = result.official_result;
    let records = normalize_parties(result.records, &PartyAliases::default());

    let party_tally = PartyTally::from_records(&records);
    let scoreboards: BTreeMap<String, ChoiceCounts> = cli
        .parties
        .iter()
        .map(|spec| {
            let set = PartySet::new(spec.split(','));
            (spec.clone(), scoreboard(&records, |p| set.contains(p)))
        })
        .collect();

    match cli.format {
        OutputFormat::Json => serialize_json(&Report {
            official_result: &official_result,
            party_tally: &party_tally,
            scoreboards: &scoreboards,
            records: &records,
        }),
        OutputFormat::Csv => print!("{}", to_csv(&records)),
        OutputFormat::Text => {
            match &official_result {
                Some(text) => println!("Resultado oficial: {}", text),
                None => println!("Resultado oficial: (não encontrado)"),
            }

            println!("\nResumo por partido:");
            print!("{}", party_tally);

            println!("\nPlacar geral: {}", scoreboard(&records, |_| true));
            for (spec, counts) in &scoreboards {
                println!("Placar [{}]: {}", spec, counts);
            }

            println!("\nVotos por deputado:");
            for (i, record) in records.iter().enumerate() {
                println!("{:>3}. {}", i + 1, record);
            }
        }
    }
}
