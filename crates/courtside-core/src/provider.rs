// Stats provider: the remote source of career tables and player bios.
//
// `StatsProvider` is the seam the rest of the core talks to. The production
// implementation queries the stats.nba.com JSON endpoints, which answer with
// `resultSets`: named tables of `headers` plus a `rowSet` of positional rows.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{PerMode, ProviderConfig, SeasonType};
use crate::error::StatsError;
use crate::model::{CareerStatsTable, Cell, PlayerBio, PlayerId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const CAREER_STATS_ENDPOINT: &str = "playercareerstats";
const PLAYER_INFO_ENDPOINT: &str = "commonplayerinfo";
const PLAYER_INFO_RESULT_SET: &str = "CommonPlayerInfo";

/// stats.nba.com rejects requests that do not look like they come from the
/// nba.com site.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Source of per-player tables.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Season-by-season totals. An empty table means the provider has no
    /// data for the id.
    async fn career_stats(&self, player_id: PlayerId) -> Result<CareerStatsTable, StatsError>;

    /// Biographical record, or `None` when the provider does not know the id.
    async fn player_info(&self, player_id: PlayerId) -> Result<Option<PlayerBio>, StatsError>;
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ResultSetsResponse {
    #[serde(rename = "resultSets", default)]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet", default)]
    row_set: Vec<Vec<Value>>,
}

fn decode(body: &str) -> Result<ResultSetsResponse, StatsError> {
    serde_json::from_str(body).map_err(|e| StatsError::Malformed(e.to_string()))
}

/// Parse a `playercareerstats` body into the table for one season type.
///
/// Falls back to the first result set when the named one is absent.
pub fn parse_career_stats(
    body: &str,
    season_type: SeasonType,
) -> Result<CareerStatsTable, StatsError> {
    let mut response = decode(body)?;
    let wanted = season_type.result_set_name();

    let idx = match response.result_sets.iter().position(|rs| rs.name == wanted) {
        Some(idx) => idx,
        None if response.result_sets.is_empty() => {
            return Err(StatsError::Malformed("response has no result sets".into()));
        }
        None => {
            warn!("result set {wanted} missing, using {}", response.result_sets[0].name);
            0
        }
    };

    let set = response.result_sets.swap_remove(idx);
    let rows = set
        .row_set
        .iter()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();
    CareerStatsTable::new(set.headers, rows)
}

/// Parse a `commonplayerinfo` body. An empty row set means "not found".
pub fn parse_player_info(body: &str) -> Result<Option<PlayerBio>, StatsError> {
    let response = decode(body)?;
    let Some(set) = response
        .result_sets
        .iter()
        .find(|rs| rs.name == PLAYER_INFO_RESULT_SET)
        .or_else(|| response.result_sets.first())
    else {
        return Ok(None);
    };
    let Some(row) = set.row_set.first() else {
        return Ok(None);
    };

    let field = |name: &str| -> Option<String> {
        let idx = set.headers.iter().position(|h| h == name)?;
        match row.get(idx)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };

    Ok(Some(PlayerBio {
        display_name: field("DISPLAY_FIRST_LAST"),
        school: field("SCHOOL"),
        team_name: field("TEAM_NAME"),
        height: field("HEIGHT"),
        weight: field("WEIGHT"),
        position: field("POSITION"),
        jersey: field("JERSEY"),
        country: field("COUNTRY"),
        birthdate: field("BIRTHDATE").and_then(|raw| parse_birthdate(&raw)),
    }))
}

/// Birth dates arrive as `1988-03-14T00:00:00`.
fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    let date = raw.split('T').next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// NbaStatsProvider
// ---------------------------------------------------------------------------

/// HTTP client for the stats.nba.com endpoints.
pub struct NbaStatsProvider {
    http: reqwest::Client,
    base_url: String,
    per_mode: PerMode,
    season_type: SeasonType,
}

impl NbaStatsProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, StatsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers())
            .build()
            .map_err(|e| StatsError::Network(format!("failed to build http client: {e}")))?;

        Ok(NbaStatsProvider {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_mode: config.per_mode,
            season_type: config.season_type,
        })
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, StatsError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, ?query, "provider request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Network(format!(
                "{endpoint} returned status {status}"
            )));
        }

        response.text().await.map_err(|e| network_error(&url, e))
    }
}

#[async_trait]
impl StatsProvider for NbaStatsProvider {
    async fn career_stats(&self, player_id: PlayerId) -> Result<CareerStatsTable, StatsError> {
        let body = self
            .get(
                CAREER_STATS_ENDPOINT,
                &[
                    ("PlayerID", player_id.to_string()),
                    ("PerMode", self.per_mode.as_query().to_string()),
                    ("LeagueID", String::new()),
                ],
            )
            .await?;
        let table = parse_career_stats(&body, self.season_type)?;
        debug!(%player_id, seasons = table.len(), "career stats received");
        Ok(table)
    }

    async fn player_info(&self, player_id: PlayerId) -> Result<Option<PlayerBio>, StatsError> {
        let body = self
            .get(
                PLAYER_INFO_ENDPOINT,
                &[
                    ("PlayerID", player_id.to_string()),
                    ("LeagueID", String::new()),
                ],
            )
            .await?;
        parse_player_info(&body)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        HeaderName::from_static("x-nba-stats-origin"),
        HeaderValue::from_static("stats"),
    );
    headers.insert(
        HeaderName::from_static("x-nba-stats-token"),
        HeaderValue::from_static("true"),
    );
    headers
}

fn network_error(url: &str, err: reqwest::Error) -> StatsError {
    if err.is_timeout() {
        StatsError::Network(format!("request to {url} timed out"))
    } else {
        StatsError::Network(format!("request to {url} failed: {err}"))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
