use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use expo_scraper::config::Settings;
use expo_scraper::parser::{self, Coordinator, PageKind, RawPage};
use expo_scraper::{fetch, output, ExhibitorRecord};

#[derive(Parser)]
#[command(name = "expo_scraper", about = "Trade-fair exhibitor catalog extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract exhibitors from saved listing pages
    Extract {
        /// HTML files (or plain text with --text / .txt extension)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Treat every input as plain page text
        #[arg(long)]
        text: bool,
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read the contact block of one saved detail page
    Detail {
        file: PathBuf,
        /// Link recorded in the output row
        #[arg(long, default_value = "")]
        link: String,
    },
    /// Crawl the online catalog page by page
    Crawl {
        /// Max listing pages (default: until the catalog ends)
        #[arg(short = 'n', long)]
        max_pages: Option<usize>,
        /// Visit every detail page and write the contact CSV
        #[arg(long)]
        details: bool,
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let coordinator = Coordinator::default();

    let result = match cli.command {
        Commands::Extract {
            files,
            text,
            format,
            output,
        } => {
            let pages = load_pages(&files, text)?;
            let records = parser::process_pages(&coordinator, &pages);
            if records.is_empty() {
                eprintln!("No exhibitors found in {} pages.", pages.len());
            }
            write_records(output.as_deref(), format, &records)?;
            eprintln!("Extracted {} exhibitors from {} pages.", records.len(), pages.len());
            Ok(())
        }
        Commands::Detail { file, link } => {
            let html = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let doc = scraper::Html::parse_document(&html);
            let row = parser::detail::parse_detail(&doc, &link);
            println!("{}", serde_json::to_string_pretty(&row)?);
            Ok(())
        }
        Commands::Crawl {
            max_pages,
            details,
            format,
            output,
        } => {
            let mut settings = Settings::load()?;
            if max_pages.is_some() {
                settings.max_pages = max_pages;
            }
            info!(base_url = %settings.base_url, "Starting catalog crawl");
            let fetcher = fetch::Fetcher::new(settings)?;

            let t_listing = Instant::now();
            let crawl = fetch::crawl_listing(&fetcher, &coordinator).await?;
            eprintln!(
                "Read {} listing pages ({} exhibitors, {} detail links) in {:.1}s",
                crawl.pages,
                crawl.records.len(),
                crawl.links.len(),
                t_listing.elapsed().as_secs_f64()
            );

            if details {
                let rows = fetch::crawl_details(&fetcher, &crawl.links).await?;
                let mut out = open_output(output.as_deref())?;
                output::write_csv(&mut out, &rows)?;
                out.flush()?;
                eprintln!("Saved {} exhibitors with contacts.", rows.len());
            } else {
                write_records(output.as_deref(), format, &crawl.records)?;
                eprintln!("Saved {} exhibitors.", crawl.records.len());
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn load_pages(files: &[PathBuf], force_text: bool) -> anyhow::Result<Vec<RawPage>> {
    files
        .iter()
        .map(|path| {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let is_text = force_text || path.extension().is_some_and(|e| e == "txt");
            Ok(RawPage {
                source: path.display().to_string(),
                kind: if is_text { PageKind::Text } else { PageKind::Html },
                content,
            })
        })
        .collect()
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            fs::File::create(p).with_context(|| format!("Failed to create {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_records(
    path: Option<&Path>,
    format: Format,
    records: &[ExhibitorRecord],
) -> anyhow::Result<()> {
    let mut out = open_output(path)?;
    match format {
        Format::Json => output::write_json(&mut out, records)?,
        Format::Csv => output::write_csv_exhibitors(&mut out, records)?,
    }
    out.flush()?;
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{m}m {s}s"),
        _ => format!("{h}h {m}m {s}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn duration_formats() {
        assert_eq!(format_duration(Duration::from_millis(4200)), "4.2s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h 2m 3s");
    }
}
