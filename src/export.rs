//! Disposable projections of the listing store: CSV of the raw collection,
//! XLSX of the flattened records. Both are strict readers.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::{ExportCsvArgs, ExportXlsxArgs};
use crate::listing::FlatRecord;
use crate::store;

const CSV_HEADERS: [&str; 7] = [
    "brand",
    "category",
    "style",
    "release_date",
    "colorway",
    "retail_price",
    "sizes",
];

const XLSX_HEADERS: [&str; 8] = [
    "brand",
    "category",
    "style",
    "release_date",
    "colorway",
    "retail_price",
    "size",
    "price",
];

pub fn run_csv(args: ExportCsvArgs) -> anyhow::Result<()> {
    let listings = store::load(Path::new(&args.input))?;
    if listings.is_empty() {
        anyhow::bail!("listing store is empty: no header row can be derived");
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let out_path = timestamped_csv_path(&args.base, &timestamp);

    let mut writer = csv::Writer::from_path(&out_path)
        .with_context(|| format!("create csv: {}", out_path.display()))?;
    writer
        .write_record(CSV_HEADERS)
        .context("write csv header")?;
    for listing in &listings {
        // The nested sizes column is JSON-encoded rather than left to the
        // writer's stringification of a non-scalar value.
        let sizes = serde_json::to_string(&listing.sizes).context("encode sizes column")?;
        writer
            .write_record([
                listing.brand.as_str(),
                listing.category.as_str(),
                listing.style.as_str(),
                listing.release_date.as_str(),
                listing.colorway.as_str(),
                listing.retail_price.as_str(),
                sizes.as_str(),
            ])
            .context("write csv row")?;
    }
    writer.flush().context("flush csv")?;

    tracing::info!(rows = listings.len(), out = %out_path.display(), "csv export complete");
    Ok(())
}

/// `<base>_<timestamp>.csv`, falling back to `_<n>` suffixes while the
/// candidate name is taken (two exports within the same second).
fn timestamped_csv_path(base: &str, timestamp: &str) -> PathBuf {
    let candidate = PathBuf::from(format!("{base}_{timestamp}.csv"));
    if !candidate.exists() {
        return candidate;
    }

    let mut n = 1u32;
    loop {
        let candidate = PathBuf::from(format!("{base}_{timestamp}_{n}.csv"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

pub fn run_xlsx(args: ExportXlsxArgs) -> anyhow::Result<()> {
    let records = load_flat_records(Path::new(&args.input))?;

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in XLSX_HEADERS.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .context("write xlsx header")?;
    }
    for (row, record) in records.iter().enumerate() {
        let cells = [
            record.brand.as_str(),
            record.category.as_str(),
            record.style.as_str(),
            record.release_date.as_str(),
            record.colorway.as_str(),
            record.retail_price.as_str(),
            record.size.as_str(),
            record.price.as_str(),
        ];
        for (col, cell) in cells.iter().enumerate() {
            sheet
                .write_string(row as u32 + 1, col as u16, *cell)
                .context("write xlsx cell")?;
        }
    }

    workbook
        .save(&args.out)
        .with_context(|| format!("save workbook: {}", args.out))?;

    tracing::info!(rows = records.len(), out = %args.out, "xlsx export complete");
    Ok(())
}

fn load_flat_records(path: &Path) -> anyhow::Result<Vec<FlatRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read flat records: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parse flat records: {}", path.display()))
}
