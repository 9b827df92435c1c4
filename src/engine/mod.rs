//! Stats engine.
//!
//! Owns the write path for stat lines. Every mutation runs
//! "write line, read all lines, aggregate, write profile" under a lock held
//! per player, so a stored profile always reflects the lines it was built
//! from. Query operations read a snapshot from the store and hand it to the
//! pure functions in [`crate::calculate`].

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::{
    aggregate, assign_tiers, compute_leaderboard, compute_standings, paginate, Page, Pagination,
};
use crate::models::{
    GameStatLine, LeaderboardEntry, LeaderboardMode, NewStatLine, Player, PlayerId,
    PlayerSeasonProfile, SeasonFilter, Standing, StatKey, StatLineId, StatLinePatch, TierBands,
    ValidationError,
};
use crate::storage::{LeagueData, RecordStore, StorageError};

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Stat line not found: {0}")]
    StatLineNotFound(StatLineId),

    #[error("Store error: {0}")]
    Store(#[from] StorageError),

    #[error("Stat line {line_id} was saved but the profile of {player_id} was not updated: {source}")]
    ProfileNotCommitted {
        player_id: PlayerId,
        line_id: StatLineId,
        source: StorageError,
    },
}

/// A stat line mutation together with the profile it produced.
#[derive(Debug, Clone, Serialize)]
pub struct StatLineChange {
    pub line: GameStatLine,
    pub profile: PlayerSeasonProfile,
}

/// Counts from an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub teams: usize,
    pub players: usize,
    pub games: usize,
    pub stat_lines: usize,
    pub profiles_recomputed: usize,
}

type StaleSet = Arc<Mutex<HashSet<PlayerId>>>;

fn lock_set(set: &StaleSet) -> std::sync::MutexGuard<'_, HashSet<PlayerId>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a player stale when dropped while armed.
///
/// Armed right after a stat line is written. Disarmed once the profile
/// write succeeds. Any error or cancellation in between leaves the mark.
struct StaleGuard {
    stale: StaleSet,
    player_id: PlayerId,
    armed: bool,
}

impl StaleGuard {
    fn arm(stale: &StaleSet, player_id: &PlayerId) -> Self {
        Self {
            stale: Arc::clone(stale),
            player_id: player_id.clone(),
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for StaleGuard {
    fn drop(&mut self) {
        if self.armed {
            warn!(
                player_id = %self.player_id,
                "Profile left stale after stat line write"
            );
            lock_set(&self.stale).insert(self.player_id.clone());
        }
    }
}

/// Statistics engine over an injected record store.
pub struct StatsEngine {
    store: Arc<dyn RecordStore>,
    locks: Mutex<HashMap<PlayerId, Arc<tokio::sync::Mutex<()>>>>,
    stale: StaleSet,
}

impl StatsEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
            stale: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    fn player_lock(&self, player_id: &PlayerId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Clones are only handed out under this mutex, so an entry the map
        // alone holds has no waiters and can go.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(player_id.clone()).or_default())
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// False when a write path failed after its line write and no
    /// recomputation has succeeded since.
    pub fn is_profile_current(&self, player_id: &PlayerId) -> bool {
        !lock_set(&self.stale).contains(player_id)
    }

    pub async fn get_player(&self, player_id: &PlayerId) -> Result<Player, EngineError> {
        self.store
            .get_player(player_id)
            .await?
            .ok_or_else(|| EngineError::PlayerNotFound(player_id.clone()))
    }

    /// Rebuild and store a player's profile from all of their stat lines.
    pub async fn recompute_profile(
        &self,
        player_id: &PlayerId,
    ) -> Result<PlayerSeasonProfile, EngineError> {
        let lock = self.player_lock(player_id);
        let _held = lock.lock().await;

        let player = self.get_player(player_id).await?;
        Ok(self.recompute_locked(&player).await?)
    }

    /// Must be called with the player's lock held.
    async fn recompute_locked(&self, player: &Player) -> Result<PlayerSeasonProfile, StorageError> {
        let lines = self.store.list_game_stat_lines(&player.id).await?;
        let profile = aggregate(&lines).with_external_from(&player.profile);

        self.store
            .write_player_season_profile(&player.id, &profile)
            .await?;
        lock_set(&self.stale).remove(&player.id);

        info!(
            player_id = %player.id,
            games_played = profile.games_played,
            "Recomputed season profile"
        );
        Ok(profile)
    }

    /// Recompute every player's profile. Returns how many were rebuilt.
    pub async fn recompute_all(&self) -> Result<usize, EngineError> {
        let players = self.store.list_players().await?;
        for player in &players {
            self.recompute_profile(&player.id).await?;
        }
        info!("Recomputed {} profiles", players.len());
        Ok(players.len())
    }

    /// Finish a write path: recompute, or report the profile as uncommitted.
    async fn commit_profile(
        &self,
        player: &Player,
        line: GameStatLine,
        guard: StaleGuard,
    ) -> Result<StatLineChange, EngineError> {
        let profile = self.recompute_locked(player).await.map_err(|source| {
            EngineError::ProfileNotCommitted {
                player_id: player.id.clone(),
                line_id: line.id.clone(),
                source,
            }
        })?;
        guard.disarm();
        Ok(StatLineChange { line, profile })
    }

    /// Record a new stat line and refresh the player's profile.
    pub async fn create_stat_line(&self, new: NewStatLine) -> Result<StatLineChange, EngineError> {
        let line = new.into_line()?;

        let lock = self.player_lock(&line.player_id);
        let _held = lock.lock().await;

        let player = self.get_player(&line.player_id).await?;
        self.store.create_game_stat_line(&line).await?;
        let guard = StaleGuard::arm(&self.stale, &player.id);
        debug!(line_id = %line.id, player_id = %player.id, "Created stat line");

        self.commit_profile(&player, line, guard).await
    }

    /// Apply a partial update to a stat line and refresh the profile.
    pub async fn update_stat_line(
        &self,
        id: &StatLineId,
        patch: &StatLinePatch,
    ) -> Result<StatLineChange, EngineError> {
        let player_id = self.line_owner(id).await?;

        let lock = self.player_lock(&player_id);
        let _held = lock.lock().await;

        // Re-read under the lock; the line may have changed or gone.
        let current = self
            .store
            .get_game_stat_line(id)
            .await?
            .ok_or_else(|| EngineError::StatLineNotFound(id.clone()))?;
        let updated = patch.apply_to(&current)?;
        let player = self.get_player(&player_id).await?;

        self.store.update_game_stat_line(&updated).await?;
        let guard = StaleGuard::arm(&self.stale, &player.id);
        debug!(line_id = %id, player_id = %player.id, "Updated stat line");

        self.commit_profile(&player, updated, guard).await
    }

    /// Delete a stat line and refresh the profile.
    pub async fn delete_stat_line(&self, id: &StatLineId) -> Result<StatLineChange, EngineError> {
        let player_id = self.line_owner(id).await?;

        let lock = self.player_lock(&player_id);
        let _held = lock.lock().await;

        let player = self.get_player(&player_id).await?;
        let removed = self
            .store
            .delete_game_stat_line(id)
            .await?
            .ok_or_else(|| EngineError::StatLineNotFound(id.clone()))?;
        let guard = StaleGuard::arm(&self.stale, &player.id);
        debug!(line_id = %id, player_id = %player.id, "Deleted stat line");

        self.commit_profile(&player, removed, guard).await
    }

    async fn line_owner(&self, id: &StatLineId) -> Result<PlayerId, EngineError> {
        self.store
            .get_game_stat_line(id)
            .await?
            .map(|line| line.player_id)
            .ok_or_else(|| EngineError::StatLineNotFound(id.clone()))
    }

    /// Standings in ranking order.
    pub async fn standings(
        &self,
        season: &SeasonFilter,
        conference: Option<&str>,
    ) -> Result<Vec<Standing>, EngineError> {
        let data = self.store.snapshot().await?;
        debug!(
            teams = data.teams.len(),
            games = data.games.len(),
            season = %season,
            "Computing standings"
        );
        Ok(compute_standings(&data.teams, &data.games, season, conference))
    }

    /// Tier bands over the standings for the same filters.
    pub async fn tiers(
        &self,
        season: &SeasonFilter,
        conference: Option<&str>,
    ) -> Result<TierBands, EngineError> {
        let standings = self.standings(season, conference).await?;
        Ok(assign_tiers(&standings))
    }

    /// One page of the leaderboard for `stat`.
    pub async fn leaderboard(
        &self,
        stat: StatKey,
        season: &SeasonFilter,
        mode: LeaderboardMode,
        pagination: &Pagination,
    ) -> Result<Page<LeaderboardEntry>, EngineError> {
        let data = self.store.snapshot().await?;
        let entries = compute_leaderboard(
            &data.players,
            &data.stat_lines,
            &data.games,
            stat,
            season,
            mode,
        );
        Ok(paginate(&entries, pagination))
    }

    /// Load a dataset into the store and rebuild every profile.
    ///
    /// Every stat line is validated and must belong to a known player before
    /// anything is written. Records with an existing ID are replaced.
    pub async fn import(&self, data: LeagueData) -> Result<ImportSummary, EngineError> {
        let mut known: HashSet<PlayerId> = self
            .store
            .list_players()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        known.extend(data.players.iter().map(|p| p.id.clone()));

        for line in &data.stat_lines {
            line.stats.validate()?;
            if !known.contains(&line.player_id) {
                return Err(EngineError::PlayerNotFound(line.player_id.clone()));
            }
        }

        for team in &data.teams {
            self.store.save_team(team).await?;
        }
        for player in &data.players {
            self.store.save_player(player).await?;
        }
        for game in &data.games {
            self.store.save_game(game).await?;
        }
        for line in &data.stat_lines {
            if self.store.get_game_stat_line(&line.id).await?.is_some() {
                self.store.update_game_stat_line(line).await?;
            } else {
                self.store.create_game_stat_line(line).await?;
            }
        }
        info!(
            teams = data.teams.len(),
            players = data.players.len(),
            games = data.games.len(),
            stat_lines = data.stat_lines.len(),
            "Imported league data"
        );

        let profiles_recomputed = self.recompute_all().await?;
        Ok(ImportSummary {
            teams: data.teams.len(),
            players: data.players.len(),
            games: data.games.len(),
            stat_lines: data.stat_lines.len(),
            profiles_recomputed,
        })
    }
}
