use std::{collections::HashMap, fmt, path::PathBuf};

use csv::ReaderBuilder;
use derive_getters::Getters;
use derive_new::new;
use reqwest::Client;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use super::utils::{is_google_sheet_without_csv, make_request};
use crate::{
    error::{PipelineError, redact_query},
    models::{ColumnMap, RawHolding, SheetField},
};

/// Where the portfolio sheet is read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SheetSource {
    Url(String),
    Path(PathBuf),
}

impl SheetSource {
    /// Anything starting with `http://` or `https://` is fetched, everything
    /// else is read as a local file (with `~` expansion).
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            SheetSource::Url(location.to_string())
        } else {
            SheetSource::Path(PathBuf::from(shellexpand::tilde(location).into_owned()))
        }
    }

    pub async fn fetch_bytes(&self, client: &Client) -> Result<Vec<u8>, PipelineError> {
        match self {
            SheetSource::Url(url) => {
                if is_google_sheet_without_csv(url) {
                    warn!("Google Sheets link does not end in 'output=csv', publish the sheet as CSV");
                }
                make_request(client, url).await
            }
            SheetSource::Path(path) => tokio::fs::read(path).await.map_err(|e| {
                PipelineError::SourceUnavailable(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                ))
            }),
        }
    }
}

impl fmt::Display for SheetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSource::Url(url) => write!(f, "{}", redact_query(url)),
            SheetSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, new)]
pub struct SheetRows {
    rows: Vec<RawHolding>,
    skipped: usize,
}

pub async fn load_sheet(
    source: &SheetSource,
    columns: &ColumnMap,
    client: &Client,
) -> Result<SheetRows, PipelineError> {
    let data = source.fetch_bytes(client).await?;
    parse_sheet(&data, columns)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses the raw sheet export. Rows that are not valid UTF-8 or cannot be
/// decoded are skipped and counted, the rest of the sheet still loads.
pub fn parse_sheet(data: impl AsRef<[u8]>, columns: &ColumnMap) -> Result<SheetRows, PipelineError> {
    let data = data.as_ref();
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let first = data.iter().position(|b| !b.is_ascii_whitespace());
    let Some(first) = first else {
        return Err(PipelineError::SourceUnavailable(
            "The sheet response is empty".to_string(),
        ));
    };
    if data[first] == b'<' {
        return Err(PipelineError::SourceUnavailable(
            "The sheet response is HTML, not CSV".to_string(),
        ));
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::SourceUnavailable(format!("Failed to read sheet header: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    info!(columns = ?headers, "Detected sheet columns");

    let mut indices: HashMap<SheetField, usize> = HashMap::new();
    for field in SheetField::iter() {
        let header = columns.header(field);
        match headers.iter().position(|h| h == header) {
            Some(idx) => {
                indices.insert(field, idx);
            }
            None if field.is_required() => {
                return Err(PipelineError::MissingColumn(header.to_string()));
            }
            None => debug!(column = header, "Optional column not present"),
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (row_idx, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row_idx + 1, error = %e, "Skipping unreadable sheet row");
                skipped += 1;
                continue;
            }
        };

        if record.iter().all(|cell| cell.trim().is_empty()) {
            debug!(row = row_idx + 1, "Skipping blank sheet row");
            continue;
        }

        let cell = |field: SheetField| -> String {
            indices
                .get(&field)
                .and_then(|&idx| record.get(idx))
                .unwrap_or("")
                .to_string()
        };

        rows.push(RawHolding::new(
            cell(SheetField::Asset),
            cell(SheetField::Ticker),
            cell(SheetField::Quantity),
            cell(SheetField::PurchasePrice),
        ));
    }

    Ok(SheetRows::new(rows, skipped))
}
