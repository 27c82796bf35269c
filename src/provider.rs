use crate::error::QueryError;
use crate::transaction::{RawSaleRecord, SaleRecord};

use std::future::Future;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Supplies the full, unfiltered record set. Every call is a fresh fetch.
pub trait DataProvider: Send + Sync + 'static {
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<SaleRecord>, QueryError>> + Send;

    fn describe(&self) -> String;
}

/// Fetches the JSON feed over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QueryError::data_unavailable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl DataProvider for HttpProvider {
    async fn fetch_records(&self) -> Result<Vec<SaleRecord>, QueryError> {
        info!(url = %self.url, "fetching sale records");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| request_error(&self.url, e))?;

        let raw: Vec<RawSaleRecord> = response
            .json()
            .await
            .map_err(|e| request_error(&self.url, e))?;

        debug!(count = raw.len(), "received sale records");
        into_records(raw)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn request_error(url: &str, error: reqwest::Error) -> QueryError {
    if error.is_timeout() {
        QueryError::data_unavailable(format!("Request to {} timed out", url))
    } else if let Some(status) = error.status() {
        QueryError::data_unavailable(format!("{} responded with {}", url, status))
    } else if error.is_decode() {
        QueryError::data_unavailable(format!("Malformed payload from {}: {}", url, error))
    } else {
        QueryError::data_unavailable(format!("Request to {} failed: {}", url, error))
    }
}

/// Reads a local `.json` array or `.csv` export.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataProvider for FileProvider {
    async fn fetch_records(&self) -> Result<Vec<SaleRecord>, QueryError> {
        info!(path = %self.path.display(), "reading sale records");

        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            QueryError::data_unavailable(format!("Cannot read {}: {}", self.path.display(), e))
        })?;

        let is_csv = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let raw = if is_csv {
            read_csv_records(bytes.as_slice())?
        } else {
            serde_json::from_slice::<Vec<RawSaleRecord>>(&bytes).map_err(|e| {
                QueryError::data_unavailable(format!(
                    "Malformed JSON in {}: {}",
                    self.path.display(),
                    e
                ))
            })?
        };

        into_records(raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses a CSV export whose header row uses the JSON field names.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<RawSaleRecord>, QueryError> {
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.into_deserialize::<RawSaleRecord>()
        .map(|row| row.map_err(|e| QueryError::data_unavailable(format!("Malformed CSV row: {}", e))))
        .collect()
}

/// Serves a fixed in-memory record set.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    records: Vec<SaleRecord>,
}

impl StaticProvider {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }
}

impl DataProvider for StaticProvider {
    async fn fetch_records(&self) -> Result<Vec<SaleRecord>, QueryError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

/// Runtime choice between the HTTP feed and a local file.
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpProvider),
    File(FileProvider),
}

impl DataProvider for Source {
    async fn fetch_records(&self) -> Result<Vec<SaleRecord>, QueryError> {
        match self {
            Source::Http(provider) => provider.fetch_records().await,
            Source::File(provider) => provider.fetch_records().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::Http(provider) => provider.describe(),
            Source::File(provider) => provider.describe(),
        }
    }
}

fn into_records(raw: Vec<RawSaleRecord>) -> Result<Vec<SaleRecord>, QueryError> {
    raw.into_iter()
        .map(SaleRecord::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError::data_unavailable(format!("Malformed payload: {}", e)))
}
