// End-to-end controller tests against an in-memory stats provider.
//
// The fake provider counts every call so the tests can assert that invalid
// input never reaches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use courtside_core::chart::ChartType;
use courtside_core::client::StatsClient;
use courtside_core::controller::{
    run_search, SearchContext, SearchPhase, SearchRequest, INVALID_PLAYER_ID_MESSAGE,
    INVALID_SELECTION_MESSAGE,
};
use courtside_core::directory::PlayerDirectory;
use courtside_core::error::StatsError;
use courtside_core::model::{CareerStatsTable, Cell, PlayerBio, PlayerId};
use courtside_core::provider::StatsProvider;

// ===========================================================================
// Test helpers
// ===========================================================================

enum Behavior {
    Table(CareerStatsTable),
    Fail(String),
}

struct FakeProvider {
    behavior: Behavior,
    bio: Option<PlayerBio>,
    calls: AtomicUsize,
}

impl FakeProvider {
    fn with_table(table: CareerStatsTable) -> Arc<Self> {
        Arc::new(FakeProvider {
            behavior: Behavior::Table(table),
            bio: Some(PlayerBio {
                school: Some("Davidson".into()),
                team_name: Some("Warriors".into()),
                ..PlayerBio::default()
            }),
            calls: AtomicUsize::new(0),
        })
    }

    fn with_bio(table: CareerStatsTable, bio: PlayerBio) -> Arc<Self> {
        Arc::new(FakeProvider {
            behavior: Behavior::Table(table),
            bio: Some(bio),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(FakeProvider {
            behavior: Behavior::Fail(message.into()),
            bio: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsProvider for FakeProvider {
    async fn career_stats(&self, _player_id: PlayerId) -> Result<CareerStatsTable, StatsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Table(table) => Ok(table.clone()),
            Behavior::Fail(message) => Err(StatsError::Network(message.clone())),
        }
    }

    async fn player_info(&self, _player_id: PlayerId) -> Result<Option<PlayerBio>, StatsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.bio.clone())
    }
}

fn client_for(provider: Arc<FakeProvider>) -> StatsClient {
    let directory = PlayerDirectory::embedded().expect("embedded directory");
    StatsClient::new(provider, Arc::new(directory))
}

fn request(player_id: &str, stat: &str, chart_type: &str) -> SearchRequest {
    SearchRequest {
        seq: 1,
        player_id: player_id.into(),
        stat: stat.into(),
        chart_type: chart_type.into(),
    }
}

/// Five seasons with a PTS column, shaped like the provider's table.
fn five_seasons() -> CareerStatsTable {
    let seasons = ["2009-10", "2010-11", "2011-12", "2012-13", "2013-14"];
    let points = [1399.0, 1372.0, 383.0, 1786.0, 1873.0];
    let assists = [463.0, 428.0, 138.0, 539.0, 666.0];
    let rows = seasons
        .iter()
        .zip(points)
        .zip(assists)
        .map(|((season, pts), ast)| {
            vec![
                Cell::Text((*season).into()),
                Cell::Number(201939.0),
                Cell::Number(pts),
                Cell::Number(ast),
            ]
        })
        .collect();
    CareerStatsTable::new(
        vec![
            "SEASON_ID".into(),
            "PLAYER_ID".into(),
            "PTS".into(),
            "AST".into(),
        ],
        rows,
    )
    .unwrap()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[tokio::test]
async fn valid_player_renders_single_line_series() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider.clone());
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("201939", "PTS", "line")).await;

    assert_eq!(result.phase, SearchPhase::Rendered);
    assert_eq!(result.figure.chart_type, ChartType::Line);
    assert_eq!(result.figure.series.len(), 1);
    let series = &result.figure.series[0];
    assert_eq!(series.len(), 5);
    assert!(series.title.contains("PTS"));
    assert_eq!(
        series.x,
        vec!["2009-10", "2010-11", "2011-12", "2012-13", "2013-14"]
    );
    assert!(result.message.contains("Stephen Curry"));
    assert_eq!(result.message, "Player Stephen Curry - PTS over Career");
    assert_eq!(result.player_name.as_deref(), Some("Stephen Curry"));
    assert_eq!(
        result.bio.as_ref().and_then(|b| b.school.as_deref()),
        Some("Davidson")
    );
}

#[tokio::test]
async fn zero_player_id_fails_without_fetching() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider.clone());
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("0", "PTS", "line")).await;

    assert_eq!(result.phase, SearchPhase::Failed);
    assert_eq!(result.message, INVALID_PLAYER_ID_MESSAGE);
    assert!(result.figure.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn invalid_ids_never_reach_the_provider() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider.clone());
    let ctx = SearchContext::new(&client);

    for input in ["", "-1", "-201939", "abc", "20.5", "  "] {
        let result = run_search(&ctx, request(input, "PTS", "bar")).await;
        assert_eq!(result.message, INVALID_PLAYER_ID_MESSAGE, "input {input:?}");
        assert!(result.figure.is_empty());
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn unknown_player_reports_not_found() {
    let empty = CareerStatsTable::new(vec!["SEASON_ID".into(), "PTS".into()], vec![]).unwrap();
    let provider = FakeProvider::with_table(empty);
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("999999999", "PTS", "line")).await;

    assert_eq!(result.phase, SearchPhase::Failed);
    assert!(result.figure.is_empty());
    assert!(result.message.contains("Player not found"));
    assert!(result.message.contains("999999999"));
}

#[tokio::test]
async fn player_missing_from_directory_uses_bio_name() {
    // Jalen Brunson is not in the embedded directory.
    let bio = PlayerBio {
        display_name: Some("Jalen Brunson".into()),
        team_name: Some("Knicks".into()),
        ..PlayerBio::default()
    };
    let provider = FakeProvider::with_bio(five_seasons(), bio);
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("1628973", "PTS", "line")).await;

    assert_eq!(result.phase, SearchPhase::Rendered);
    assert_eq!(result.message, "Player Jalen Brunson - PTS over Career");
    assert_eq!(result.player_name.as_deref(), Some("Jalen Brunson"));
    assert_eq!(result.figure.series.len(), 1);
}

#[tokio::test]
async fn player_without_directory_entry_or_bio_name_is_not_found() {
    // The provider has data, but neither the directory nor the bio names
    // this id.
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("123456789", "PTS", "line")).await;

    assert_eq!(result.phase, SearchPhase::Failed);
    assert!(result.figure.is_empty());
    assert_eq!(
        result.message,
        "Error fetching data for Player ID 123456789: Player not found"
    );
}

#[tokio::test]
async fn network_failure_is_reported_with_id_and_detail() {
    let provider = FakeProvider::failing("connection reset");
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("201939", "PTS", "line")).await;

    assert_eq!(result.phase, SearchPhase::Failed);
    assert!(result.figure.is_empty());
    assert!(result.message.starts_with("Error fetching data for Player ID 201939"));
    assert!(result.message.contains("connection reset"));
}

#[tokio::test]
async fn unknown_stat_is_an_invalid_selection() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("201939", "XYZ", "line")).await;

    assert_eq!(result.phase, SearchPhase::Failed);
    assert_eq!(result.message, INVALID_SELECTION_MESSAGE);
    assert!(result.figure.is_empty());
}

#[tokio::test]
async fn unknown_chart_type_is_rejected_before_fetching() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider.clone());
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("201939", "PTS", "pie")).await;

    assert_eq!(result.phase, SearchPhase::Failed);
    assert_eq!(result.message, INVALID_SELECTION_MESSAGE);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn identifier_columns_are_invalid_selections() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    for stat in ["SEASON_ID", "PLAYER_ID"] {
        let result = run_search(&ctx, request("201939", stat, "line")).await;
        assert_eq!(result.phase, SearchPhase::Failed, "stat {stat}");
        assert_eq!(result.message, INVALID_SELECTION_MESSAGE);
        assert!(result.figure.is_empty());
    }
}

#[tokio::test]
async fn all_stats_as_bars_skips_id_columns() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let result = run_search(&ctx, request("201939", "all", "bar")).await;

    assert_eq!(result.phase, SearchPhase::Rendered);
    assert_eq!(result.figure.chart_type, ChartType::Bar);
    let stats: Vec<&str> = result.figure.series.iter().map(|s| s.stat.as_str()).collect();
    assert_eq!(stats, vec!["PTS", "AST"]);
    assert!(result
        .figure
        .series
        .iter()
        .all(|s| s.chart_type == ChartType::Bar));
    assert_eq!(result.message, "Player Stephen Curry - Stats over Career");
}

#[tokio::test]
async fn repeated_searches_are_deterministic() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let first = run_search(&ctx, request("201939", "AST", "scatter")).await;
    let second = run_search(&ctx, request("201939", "AST", "scatter")).await;

    assert_eq!(first.figure, second.figure);
    assert_eq!(first.message, second.message);
    assert_eq!(
        first.figure.series[0].y,
        vec![Some(463.0), Some(428.0), Some(138.0), Some(539.0), Some(666.0)]
    );
}

#[tokio::test]
async fn result_echoes_request_sequence() {
    let provider = FakeProvider::with_table(five_seasons());
    let client = client_for(provider);
    let ctx = SearchContext::new(&client);

    let mut req = request("201939", "PTS", "line");
    req.seq = 42;
    let result = run_search(&ctx, req).await;
    assert_eq!(result.seq, 42);

    let mut bad = request("0", "PTS", "line");
    bad.seq = 43;
    assert_eq!(run_search(&ctx, bad).await.seq, 43);
}
