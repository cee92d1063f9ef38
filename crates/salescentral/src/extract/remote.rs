//! Tables published as files over HTTP or in S3 buckets.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::info;

use crate::error::{Result, SalesCentralError};
use crate::input::{Parser, parse_card_pdf, parse_json_table};
use crate::table::Table;

use super::Extractor;

/// Region used to resolve `s3://` locators when none is configured.
pub const DEFAULT_S3_REGION: &str = "eu-west-1";

const S3_SCHEME: &str = "s3://";

/// File formats that can be read remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFormat {
    Csv,
    Json,
    /// The card details PDF.
    Pdf,
}

/// A resolved remote file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocator {
    /// HTTPS address the file is fetched from.
    pub url: String,
    pub format: RemoteFormat,
}

impl RemoteLocator {
    /// Resolve a locator. `s3://bucket/key` becomes the bucket's public
    /// HTTPS address in `region`; `http(s)://` URLs are used as-is.
    ///
    /// Fails with `UnsupportedFormat` for any extension other than `.csv`,
    /// `.json` or `.pdf`, and for other schemes.
    pub fn parse(locator: &str, region: &str) -> Result<Self> {
        let url = if let Some(rest) = locator.strip_prefix(S3_SCHEME) {
            let (bucket, key) = rest
                .split_once('/')
                .filter(|(bucket, key)| !bucket.is_empty() && !key.is_empty())
                .ok_or_else(|| {
                    SalesCentralError::UnsupportedFormat(format!(
                        "'{}' has no bucket and key",
                        locator
                    ))
                })?;
            format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
        } else if locator.starts_with("https://") || locator.starts_with("http://") {
            locator.to_string()
        } else {
            return Err(SalesCentralError::UnsupportedFormat(format!(
                "'{}' is not an http(s) or s3 locator",
                locator
            )));
        };

        let format = format_of(&url).ok_or_else(|| {
            SalesCentralError::UnsupportedFormat(format!(
                "'{}' is not a CSV, JSON or PDF file",
                locator
            ))
        })?;

        Ok(Self { url, format })
    }
}

fn format_of(url: &str) -> Option<RemoteFormat> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "csv" => Some(RemoteFormat::Csv),
        "json" => Some(RemoteFormat::Json),
        "pdf" => Some(RemoteFormat::Pdf),
        _ => None,
    }
}

/// Downloads remote CSV, JSON or PDF files and parses them into tables.
pub struct RemoteExtractor {
    client: Client,
    region: String,
    parser: Parser,
}

impl RemoteExtractor {
    /// Create an extractor resolving S3 locators in the default region.
    pub fn new() -> Result<Self> {
        Self::with_region(DEFAULT_S3_REGION)
    }

    /// Create an extractor resolving S3 locators in `region`.
    pub fn with_region(region: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                SalesCentralError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            region: region.into(),
            parser: Parser::new(),
        })
    }

    /// Fetch and parse a remote table.
    pub fn fetch_remote_table(&self, locator: &str) -> Result<Table> {
        let remote = RemoteLocator::parse(locator, &self.region)?;
        info!(url = %remote.url, format = ?remote.format, "Fetching remote table");

        let bytes = self
            .client
            .get(&remote.url)
            .send()?
            .error_for_status()?
            .bytes()?;

        match remote.format {
            RemoteFormat::Csv => self.parser.parse_bytes(&bytes),
            RemoteFormat::Json => parse_json_table(&bytes),
            RemoteFormat::Pdf => parse_card_pdf(&bytes),
        }
    }
}

impl Extractor for RemoteExtractor {
    fn read_table(&self, source_id: &str) -> Result<Table> {
        self.fetch_remote_table(source_id)
    }
}
