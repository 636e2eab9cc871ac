use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape product pages and merge the results into the listing store.
    Crawl(CrawlArgs),
    /// Expand per-size prices into one flat record per size.
    Flatten(FlattenArgs),
    /// Write the listing store to a timestamped CSV file.
    ExportCsv(ExportCsvArgs),
    /// Write the flattened records to a single-sheet spreadsheet.
    ExportXlsx(ExportXlsxArgs),
}

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// Input file with one product URL per line.
    #[arg(long)]
    pub urls: String,

    /// Persisted listing collection (read, merged, overwritten).
    #[arg(long, default_value = "listings.json")]
    pub store: String,

    /// WebDriver endpoint the browser session is driven through.
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver: String,

    /// Maximum URLs consumed from the input file per run.
    #[arg(long, default_value_t = 300)]
    pub max_urls: usize,

    /// Upper bound for the product heading to appear after navigation.
    #[arg(long, default_value_t = 30)]
    pub heading_timeout_secs: u64,

    /// Upper bound for UI transitions (size grid, unit tabs) to settle.
    #[arg(long, default_value_t = 2000)]
    pub settle_ms: u64,
}

#[derive(Debug, Args)]
pub struct FlattenArgs {
    /// Listing collection to flatten.
    #[arg(long, default_value = "listings.json")]
    pub input: String,

    /// Output file for the flat records.
    #[arg(long, default_value = "listings_flat.json")]
    pub out: String,
}

#[derive(Debug, Args)]
pub struct ExportCsvArgs {
    /// Listing collection to export.
    #[arg(long, default_value = "listings.json")]
    pub input: String,

    /// Output name prefix; `_<timestamp>.csv` is appended, with a numeric
    /// suffix when that name is already taken.
    #[arg(long, default_value = "listings")]
    pub base: String,
}

#[derive(Debug, Args)]
pub struct ExportXlsxArgs {
    /// Flattened records to export.
    #[arg(long, default_value = "listings_flat.json")]
    pub input: String,

    /// Output spreadsheet path (overwritten if present).
    #[arg(long, default_value = "listings.xlsx")]
    pub out: String,
}
