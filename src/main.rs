use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    kickscrape::logging::init().context("init logging")?;

    let cli = kickscrape::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        kickscrape::cli::Command::Crawl(args) => {
            kickscrape::crawl::run(args).await.context("crawl")?;
        }
        kickscrape::cli::Command::Flatten(args) => {
            kickscrape::flatten::run(args).context("flatten")?;
        }
        kickscrape::cli::Command::ExportCsv(args) => {
            kickscrape::export::run_csv(args).context("export csv")?;
        }
        kickscrape::cli::Command::ExportXlsx(args) => {
            kickscrape::export::run_xlsx(args).context("export xlsx")?;
        }
    }

    Ok(())
}
