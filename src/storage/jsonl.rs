//! JSONL (JSON Lines) storage.
//!
//! One file per entity type under `<data_dir>/league/`. Each line is one
//! entity. Mutations rewrite the whole file through a temporary file and a
//! rename, so readers never see a half-written file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::{upsert_by, GameFilter, LeagueData, RecordStore, StorageConfig, StorageError};
use crate::models::{
    Game, GameStatLine, Player, PlayerId, PlayerSeasonProfile, StatLineId, Team,
};

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Team,
    Player,
    Game,
    StatLine,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Team => "teams.jsonl",
            EntityType::Player => "players.jsonl",
            EntityType::Game => "games.jsonl",
            EntityType::StatLine => "stat_lines.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let tmp_path = self.path.with_extension("jsonl.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &self.path)?;
        debug!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    /// Read all entities from the file. A missing file reads as empty.
    ///
    /// A line that does not parse fails the whole read with
    /// [`StorageError::Corrupt`]; the file is the record of truth and a
    /// partial read would be written back over it.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let entity = serde_json::from_str(&line).map_err(|source| {
                error!(
                    "Corrupt record at line {} in {:?}: {}",
                    idx + 1,
                    self.path,
                    source
                );
                StorageError::Corrupt {
                    path: self.path.clone(),
                    line: idx + 1,
                    source,
                }
            })?;
            entities.push(entity);
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// Record store backed by JSONL files.
///
/// A store-wide lock makes every read a consistent snapshot and serializes
/// read-modify-write cycles on a file.
pub struct JsonlStore {
    config: StorageConfig,
    lock: RwLock<()>,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            lock: RwLock::new(()),
        }
    }

    fn reader<T: DeserializeOwned>(&self, entity: EntityType) -> JsonlReader<T> {
        JsonlReader::for_entity(&self.config, entity)
    }

    fn writer<T: Serialize>(&self, entity: EntityType) -> JsonlWriter<T> {
        JsonlWriter::for_entity(&self.config, entity)
    }
}

#[async_trait]
impl RecordStore for JsonlStore {
    async fn snapshot(&self) -> Result<LeagueData, StorageError> {
        let _guard = self.lock.read().await;
        Ok(LeagueData {
            teams: self.reader(EntityType::Team).read_all()?,
            players: self.reader(EntityType::Player).read_all()?,
            games: self.reader(EntityType::Game).read_all()?,
            stat_lines: self.reader(EntityType::StatLine).read_all()?,
        })
    }

    async fn list_game_stat_lines(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<GameStatLine>, StorageError> {
        let _guard = self.lock.read().await;
        self.reader::<GameStatLine>(EntityType::StatLine)
            .read_where(|l| &l.player_id == player_id)
    }

    async fn list_all_game_stat_lines(&self) -> Result<Vec<GameStatLine>, StorageError> {
        let _guard = self.lock.read().await;
        self.reader(EntityType::StatLine).read_all()
    }

    async fn get_game_stat_line(
        &self,
        id: &StatLineId,
    ) -> Result<Option<GameStatLine>, StorageError> {
        let _guard = self.lock.read().await;
        let lines: Vec<GameStatLine> = self.reader(EntityType::StatLine).read_all()?;
        Ok(lines.into_iter().find(|l| &l.id == id))
    }

    async fn create_game_stat_line(&self, line: &GameStatLine) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        // Never append behind a corrupt record.
        self.reader::<GameStatLine>(EntityType::StatLine).read_all()?;
        self.writer(EntityType::StatLine).append(line)
    }

    async fn update_game_stat_line(&self, line: &GameStatLine) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut lines: Vec<GameStatLine> = self.reader(EntityType::StatLine).read_all()?;
        let existing = lines
            .iter_mut()
            .find(|l| l.id == line.id)
            .ok_or_else(|| StorageError::NotFound {
                entity: "stat line",
                id: line.id.to_string(),
            })?;
        *existing = line.clone();
        self.writer(EntityType::StatLine).write_all(&lines)?;
        Ok(())
    }

    async fn delete_game_stat_line(
        &self,
        id: &StatLineId,
    ) -> Result<Option<GameStatLine>, StorageError> {
        let _guard = self.lock.write().await;
        let mut lines: Vec<GameStatLine> = self.reader(EntityType::StatLine).read_all()?;
        let Some(pos) = lines.iter().position(|l| &l.id == id) else {
            return Ok(None);
        };
        let removed = lines.remove(pos);
        self.writer(EntityType::StatLine).write_all(&lines)?;
        Ok(Some(removed))
    }

    async fn write_player_season_profile(
        &self,
        player_id: &PlayerId,
        profile: &PlayerSeasonProfile,
    ) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut players: Vec<Player> = self.reader(EntityType::Player).read_all()?;
        let player = players
            .iter_mut()
            .find(|p| &p.id == player_id)
            .ok_or_else(|| StorageError::NotFound {
                entity: "player",
                id: player_id.to_string(),
            })?;
        player.profile = *profile;
        self.writer(EntityType::Player).write_all(&players)?;
        Ok(())
    }

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>, StorageError> {
        let _guard = self.lock.read().await;
        let players: Vec<Player> = self.reader(EntityType::Player).read_all()?;
        Ok(players.into_iter().find(|p| &p.id == id))
    }

    async fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        let _guard = self.lock.read().await;
        self.reader(EntityType::Player).read_all()
    }

    async fn save_player(&self, player: &Player) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut players: Vec<Player> = self.reader(EntityType::Player).read_all()?;
        upsert_by(&mut players, player, |p| &p.id);
        self.writer(EntityType::Player).write_all(&players)?;
        Ok(())
    }

    async fn list_games(&self, filter: &GameFilter) -> Result<Vec<Game>, StorageError> {
        let _guard = self.lock.read().await;
        self.reader::<Game>(EntityType::Game)
            .read_where(|g| filter.matches(g))
    }

    async fn save_game(&self, game: &Game) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut games: Vec<Game> = self.reader(EntityType::Game).read_all()?;
        upsert_by(&mut games, game, |g| &g.id);
        self.writer(EntityType::Game).write_all(&games)?;
        Ok(())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, StorageError> {
        let _guard = self.lock.read().await;
        self.reader(EntityType::Team).read_all()
    }

    async fn save_team(&self, team: &Team) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut teams: Vec<Team> = self.reader(EntityType::Team).read_all()?;
        upsert_by(&mut teams, team, |t| &t.id);
        self.writer(EntityType::Team).write_all(&teams)?;
        Ok(())
    }
}
