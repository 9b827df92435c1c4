//! Record store.
//!
//! The engine reads and writes league records through [`RecordStore`].
//! Two implementations are provided:
//! - [`MemoryStore`]: in-process, for tests and ephemeral use
//! - [`JsonlStore`]: JSONL files under the data directory

mod jsonl;
mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Game, GameStatLine, GameStatus, Player, PlayerId, PlayerSeasonProfile, StatLineId, Team,
    TeamId,
};

pub use jsonl::{EntityType, JsonlReader, JsonlStore, JsonlWriter};
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt record at {}:{line}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Directory holding the league's entity files.
    pub fn league_dir(&self) -> PathBuf {
        self.data_dir.join("league")
    }

    pub fn entity_path(&self, entity: EntityType) -> PathBuf {
        self.league_dir().join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Filter for game queries. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub season: Option<String>,
    pub team_id: Option<TeamId>,
    pub status: Option<GameStatus>,
}

impl GameFilter {
    pub fn completed() -> Self {
        Self {
            status: Some(GameStatus::Completed),
            ..Default::default()
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        self.season.as_deref().map_or(true, |s| game.season == s)
            && self
                .team_id
                .as_ref()
                .map_or(true, |t| game.side_of(t).is_some())
            && self.status.map_or(true, |s| game.status == s)
    }
}

/// The whole league dataset. Also the shape of an import file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueData {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub stat_lines: Vec<GameStatLine>,
}

/// Persistent record store for raw league entities.
///
/// Every list call returns a consistent snapshot of the records it covers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The whole dataset, read as one consistent view.
    async fn snapshot(&self) -> Result<LeagueData, StorageError>;

    /// All stat lines of one player, in entry order.
    async fn list_game_stat_lines(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<GameStatLine>, StorageError>;

    async fn list_all_game_stat_lines(&self) -> Result<Vec<GameStatLine>, StorageError>;

    async fn get_game_stat_line(
        &self,
        id: &StatLineId,
    ) -> Result<Option<GameStatLine>, StorageError>;

    async fn create_game_stat_line(&self, line: &GameStatLine) -> Result<(), StorageError>;

    /// Replace an existing line. Fails with `NotFound` if the ID is unknown.
    async fn update_game_stat_line(&self, line: &GameStatLine) -> Result<(), StorageError>;

    /// Remove a line, returning it if it existed.
    async fn delete_game_stat_line(
        &self,
        id: &StatLineId,
    ) -> Result<Option<GameStatLine>, StorageError>;

    async fn write_player_season_profile(
        &self,
        player_id: &PlayerId,
        profile: &PlayerSeasonProfile,
    ) -> Result<(), StorageError>;

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>, StorageError>;

    async fn list_players(&self) -> Result<Vec<Player>, StorageError>;

    /// Insert or replace by ID.
    async fn save_player(&self, player: &Player) -> Result<(), StorageError>;

    async fn list_games(&self, filter: &GameFilter) -> Result<Vec<Game>, StorageError>;

    /// Insert or replace by ID.
    async fn save_game(&self, game: &Game) -> Result<(), StorageError>;

    async fn list_teams(&self) -> Result<Vec<Team>, StorageError>;

    /// Insert or replace by ID.
    async fn save_team(&self, team: &Team) -> Result<(), StorageError>;
}

/// Insert `item` or replace the existing entry with the same key, keeping
/// its position.
pub(crate) fn upsert_by<T: Clone, K: PartialEq>(
    items: &mut Vec<T>,
    item: &T,
    key: impl Fn(&T) -> &K,
) {
    match items.iter().position(|x| key(x) == key(item)) {
        Some(i) => items[i] = item.clone(),
        None => items.push(item.clone()),
    }
}
