use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SheetLayout;
use crate::error::PublishError;

pub const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, PartialEq, Eq)]
pub enum SheetOutcome {
    Updated { row: usize, range: String },
    Skipped(&'static str),
}

#[async_trait]
pub trait SheetSink: Send + Sync {
    /// Writes one number per team into the row of `event_name`.
    async fn update_event_row(&self, event_name: &str, totals: &[u32]) -> Result<SheetOutcome, PublishError>;
}

#[derive(Deserialize, Debug, Default)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<&'a [u32]>,
}

fn quoted_sheet(worksheet: &str) -> String {
    format!("'{}'", worksheet.replace('\'', "''"))
}

/// First row (1-based) whose first cell contains the event name, ignoring case.
fn find_event_row(values: &[Vec<String>], event_name: &str) -> Option<usize> {
    let event_name = event_name.to_lowercase();
    values
        .iter()
        .position(|row| {
            row.first()
                .is_some_and(|cell| cell.to_lowercase().contains(&event_name))
        })
        .map(|i| i + 1)
}

/// `'SEASON SCORE'!B5:I5` for eight teams starting at column B.
fn team_range(layout: &SheetLayout, row: usize, teams: usize) -> Option<String> {
    let first = layout.first_team_column as u8;
    let last = first.checked_add(u8::try_from(teams.checked_sub(1)?).ok()?)?;
    if !last.is_ascii_uppercase() {
        return None;
    }
    Some(format!(
        "{}!{}{row}:{}{row}",
        quoted_sheet(&layout.worksheet),
        first as char,
        last as char
    ))
}

pub struct GoogleSheets {
    http: reqwest::Client,
    sheet_id: Option<String>,
    token: Option<String>,
    layout: SheetLayout,
}

impl GoogleSheets {
    pub fn new(http: reqwest::Client, sheet_id: Option<String>, token: Option<String>, layout: SheetLayout) -> Self {
        Self {
            http,
            sheet_id,
            token,
            layout,
        }
    }

    fn values_url(sheet_id: &str, range: &str) -> Result<reqwest::Url, PublishError> {
        let mut url = reqwest::Url::parse(SHEETS_API).map_err(|_| PublishError::SheetsStatus {
            status: 0,
            body: "invalid sheets api url".to_string(),
        })?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(sheet_id).push("values").push(range);
        }
        Ok(url)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, PublishError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(PublishError::SheetsStatus { status, body })
        }
    }
}

#[async_trait]
impl SheetSink for GoogleSheets {
    async fn update_event_row(&self, event_name: &str, totals: &[u32]) -> Result<SheetOutcome, PublishError> {
        let (Some(sheet_id), Some(token)) = (&self.sheet_id, &self.token) else {
            warn!("Google Sheets credentials not configured. Skipping Sheets update.");
            return Ok(SheetOutcome::Skipped("credentials not configured"));
        };

        let column_a = format!("{}!A:A", quoted_sheet(&self.layout.worksheet));
        let resp = self
            .http
            .get(Self::values_url(sheet_id, &column_a)?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(PublishError::Sheets)?;
        let column: ValueRange = Self::check(resp).await?.json().await.map_err(PublishError::Sheets)?;

        let Some(row) = find_event_row(&column.values, event_name) else {
            warn!(
                "Could not find '{event_name}' in {} sheet. Skipping update.",
                self.layout.worksheet
            );
            return Ok(SheetOutcome::Skipped("event row not found"));
        };
        let Some(range) = team_range(&self.layout, row, totals.len()) else {
            warn!("{} teams do not fit in the sheet columns. Skipping update.", totals.len());
            return Ok(SheetOutcome::Skipped("team columns out of range"));
        };

        let mut url = Self::values_url(sheet_id, &range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = ValueUpdate {
            range: &range,
            major_dimension: "ROWS",
            values: vec![totals],
        };
        let resp = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(PublishError::Sheets)?;
        Self::check(resp).await?;
        info!("Updated Google Sheets row {row} ({event_name})");
        Ok(SheetOutcome::Updated { row, range })
    }
}
