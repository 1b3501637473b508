//! Google Sheets backend over the v4 `values` REST API.

use crate::config::toml_config::SheetsConfig;
use crate::domain::ports::{Grid, TableKind, TableStore};
use crate::utils::error::{InventoryError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a Grid,
}

pub struct SheetsStore {
    client: Client,
    api_base: Url,
    spreadsheet_id: String,
    access_token: String,
    containers_sheet: String,
    movements_sheet: String,
}

impl SheetsStore {
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base).map_err(|e| InventoryError::InvalidConfigValueError {
            field: "store.sheets.api_base".to_string(),
            value: config.api_base.clone(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| InventoryError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_base,
            spreadsheet_id: config.spreadsheet_id.clone(),
            access_token: config.access_token.clone(),
            containers_sheet: config.containers_sheet.clone(),
            movements_sheet: config.movements_sheet.clone(),
        })
    }

    fn sheet_name(&self, table: TableKind) -> &str {
        match table {
            TableKind::Containers => &self.containers_sheet,
            TableKind::Movements => &self.movements_sheet,
        }
    }

    fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| InventoryError::ConfigError {
                message: format!("api_base '{}' cannot carry a path", self.api_base),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    async fn fetch(&self, table: TableKind) -> Result<Grid> {
        let url = self.values_url(self.sheet_name(table))?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let response = check_status(response, "read", table).await?;
        let body: ValueRange = response.json().await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

async fn check_status(response: Response, action: &str, table: TableKind) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "credentials rejected",
        StatusCode::NOT_FOUND => "spreadsheet or sheet not found",
        StatusCode::TOO_MANY_REQUESTS => "rate limited",
        _ => "unexpected response",
    };
    let body = response.text().await.unwrap_or_default();
    tracing::error!("Sheets {} of '{}' failed with {}: {}", action, table, status, body);

    Err(InventoryError::store_unavailable(format!(
        "{} of '{}' failed: {} ({})",
        action, table, reason, status
    )))
}

/// Grows `grid` with blank cells so that it covers everything `previous` occupied.
///
/// Writing the padded grid in one request replaces the sheet without an
/// intermediate cleared state.
fn pad_to_extent(mut grid: Grid, previous: &Grid) -> Grid {
    let width = grid
        .iter()
        .chain(previous.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    let height = grid.len().max(previous.len());

    grid.resize_with(height, Vec::new);
    for row in &mut grid {
        row.resize(width, String::new());
    }
    grid
}

#[async_trait]
impl TableStore for SheetsStore {
    async fn load(&self, table: TableKind) -> Result<Grid> {
        let grid = self.fetch(table).await?;
        tracing::debug!("Loaded {} rows from sheet '{}'", grid.len(), self.sheet_name(table));
        Ok(grid)
    }

    async fn replace_all(&self, table: TableKind, grid: Grid) -> Result<()> {
        let previous = self.fetch(table).await?;
        let padded = pad_to_extent(grid, &previous);
        if padded.is_empty() {
            return Ok(());
        }

        let range = format!("{}!A1", self.sheet_name(table));
        let url = self.values_url(&range)?;
        tracing::debug!("PUT {} ({} rows)", url, padded.len());

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValueUpdate {
                range: &range,
                major_dimension: "ROWS",
                values: &padded,
            })
            .send()
            .await?;
        check_status(response, "write", table).await?;
        Ok(())
    }
}
