// ABOUTME: CLI binary for the noticia article extraction pipeline.
// ABOUTME: Fetches one article URL, prints a report, and saves the record as a timestamped CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use noticia::{write_csv, Client, ExtractionResult, Pipeline};

/// Number of body characters shown in the console excerpt.
const EXCERPT_CHARS: usize = 500;

#[derive(Parser, Debug)]
#[command(name = "noticia")]
#[command(about = "Extract the main content and metadata of a news article")]
struct Args {
    /// URL of the article to process
    url: String,

    /// Total fetch attempts before giving up
    #[arg(long = "max-retries", default_value_t = 3)]
    max_retries: u32,

    /// Directory where the CSV file is written
    #[arg(long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Print the record as JSON instead of the readable report
    #[arg(long = "json")]
    json: bool,

    /// Skip writing the CSV file
    #[arg(long = "no-save")]
    no_save: bool,
}

/// Render the human-readable report for an extracted record.
fn render_report(record: &noticia::ArticleRecord) -> String {
    let excerpt: String = record.body.chars().take(EXCERPT_CHARS).collect();
    let ellipsis = if record.body.chars().count() > EXCERPT_CHARS {
        "..."
    } else {
        ""
    };

    format!(
        "--- Contenido Extraído ---\n\
         Título: {}\n\
         Autor: {}\n\
         Fecha: {}\n\
         Contenido (Extracto):\n\
         --------------------------------------------------\n\
         {}{}\n\
         --------------------------------------------------",
        record.title, record.author, record.published_at, excerpt, ellipsis
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    eprintln!("Procesando URL: {}...", args.url);

    let pipeline =
        Pipeline::new(Client::builder().build()).with_max_retries(args.max_retries.max(1));

    match pipeline.extract(&args.url).await {
        ExtractionResult::Success(record) => {
            if args.json {
                match serde_json::to_string_pretty(&record) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("error serializing record: {}", e);
                        return ExitCode::from(1);
                    }
                }
            } else {
                println!("{}", render_report(&record));
            }

            if !args.no_save {
                match write_csv(&record, &args.output_dir) {
                    Ok(path) => eprintln!("Datos guardados en: {}", path.display()),
                    Err(e) => {
                        eprintln!("error writing CSV: {}", e);
                        return ExitCode::from(1);
                    }
                }
            }

            ExitCode::SUCCESS
        }
        ExtractionResult::Failure(failure) => {
            eprintln!("--- ERROR ---");
            eprintln!("{}", failure.error);
            ExitCode::from(1)
        }
    }
}
