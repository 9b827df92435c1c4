//! In-memory record store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{upsert_by, GameFilter, LeagueData, RecordStore, StorageError};
use crate::models::{
    Game, GameStatLine, Player, PlayerId, PlayerSeasonProfile, StatLineId, Team,
};

/// Record store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<LeagueData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn snapshot(&self) -> Result<LeagueData, StorageError> {
        Ok(self.data.read().await.clone())
    }

    async fn list_game_stat_lines(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<GameStatLine>, StorageError> {
        let data = self.data.read().await;
        Ok(data
            .stat_lines
            .iter()
            .filter(|l| &l.player_id == player_id)
            .cloned()
            .collect())
    }

    async fn list_all_game_stat_lines(&self) -> Result<Vec<GameStatLine>, StorageError> {
        Ok(self.data.read().await.stat_lines.clone())
    }

    async fn get_game_stat_line(
        &self,
        id: &StatLineId,
    ) -> Result<Option<GameStatLine>, StorageError> {
        let data = self.data.read().await;
        Ok(data.stat_lines.iter().find(|l| &l.id == id).cloned())
    }

    async fn create_game_stat_line(&self, line: &GameStatLine) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.stat_lines.push(line.clone());
        debug!("Created stat line {} for player {}", line.id, line.player_id);
        Ok(())
    }

    async fn update_game_stat_line(&self, line: &GameStatLine) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        let existing = data
            .stat_lines
            .iter_mut()
            .find(|l| l.id == line.id)
            .ok_or_else(|| StorageError::NotFound {
                entity: "stat line",
                id: line.id.to_string(),
            })?;
        *existing = line.clone();
        Ok(())
    }

    async fn delete_game_stat_line(
        &self,
        id: &StatLineId,
    ) -> Result<Option<GameStatLine>, StorageError> {
        let mut data = self.data.write().await;
        let Some(pos) = data.stat_lines.iter().position(|l| &l.id == id) else {
            return Ok(None);
        };
        debug!("Deleted stat line {}", id);
        Ok(Some(data.stat_lines.remove(pos)))
    }

    async fn write_player_season_profile(
        &self,
        player_id: &PlayerId,
        profile: &PlayerSeasonProfile,
    ) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        let player = data
            .players
            .iter_mut()
            .find(|p| &p.id == player_id)
            .ok_or_else(|| StorageError::NotFound {
                entity: "player",
                id: player_id.to_string(),
            })?;
        player.profile = *profile;
        Ok(())
    }

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>, StorageError> {
        let data = self.data.read().await;
        Ok(data.players.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        Ok(self.data.read().await.players.clone())
    }

    async fn save_player(&self, player: &Player) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        upsert_by(&mut data.players, player, |p| &p.id);
        Ok(())
    }

    async fn list_games(&self, filter: &GameFilter) -> Result<Vec<Game>, StorageError> {
        let data = self.data.read().await;
        Ok(data
            .games
            .iter()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect())
    }

    async fn save_game(&self, game: &Game) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        upsert_by(&mut data.games, game, |g| &g.id);
        Ok(())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, StorageError> {
        Ok(self.data.read().await.teams.clone())
    }

    async fn save_team(&self, team: &Team) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        upsert_by(&mut data.teams, team, |t| &t.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoxScore, GameResult, NewStatLine};
    use chrono::NaiveDate;

    fn line_for(player: &Player, points: u32) -> GameStatLine {
        NewStatLine {
            player_id: player.id.clone(),
            game_id: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            opponent: "Opp".to_string(),
            result: GameResult::Loss,
            stats: BoxScore {
                points,
                ..Default::default()
            },
        }
        .into_line()
        .unwrap()
    }

    #[tokio::test]
    async fn test_stat_line_crud() {
        let store = MemoryStore::new();
        let player = Player::new("Ada", None);
        store.save_player(&player).await.unwrap();

        let mut line = line_for(&player, 12);
        store.create_game_stat_line(&line).await.unwrap();
        assert_eq!(store.list_game_stat_lines(&player.id).await.unwrap().len(), 1);

        line.stats.points = 14;
        store.update_game_stat_line(&line).await.unwrap();
        let fetched = store.get_game_stat_line(&line.id).await.unwrap().unwrap();
        assert_eq!(fetched.stats.points, 14);

        let removed = store.delete_game_stat_line(&line.id).await.unwrap();
        assert_eq!(removed.map(|l| l.id), Some(line.id.clone()));
        assert!(store.delete_game_stat_line(&line.id).await.unwrap().is_none());
        assert!(store.list_game_stat_lines(&player.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_line_fails() {
        let store = MemoryStore::new();
        let line = line_for(&Player::new("Ada", None), 1);
        let err = store.update_game_stat_line(&line).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: "stat line", .. }));
    }

    #[tokio::test]
    async fn test_lines_scoped_to_player() {
        let store = MemoryStore::new();
        let a = Player::new("A", None);
        let b = Player::new("B", None);
        store.create_game_stat_line(&line_for(&a, 1)).await.unwrap();
        store.create_game_stat_line(&line_for(&b, 2)).await.unwrap();
        store.create_game_stat_line(&line_for(&a, 3)).await.unwrap();

        let lines = store.list_game_stat_lines(&a.id).await.unwrap();
        let points: Vec<u32> = lines.iter().map(|l| l.stats.points).collect();
        assert_eq!(points, vec![1, 3]);
        assert_eq!(store.list_all_game_stat_lines().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_profile_write_requires_player() {
        let store = MemoryStore::new();
        let err = store
            .write_player_season_profile(&"ghost".into(), &PlayerSeasonProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: "player", .. }));
    }

    #[tokio::test]
    async fn test_save_player_replaces() {
        let store = MemoryStore::new();
        let mut p = Player::new("Ada", None);
        store.save_player(&p).await.unwrap();
        p.jersey_number = Some(9);
        store.save_player(&p).await.unwrap();

        let players = store.list_players().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].jersey_number, Some(9));
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_copy() {
        let store = MemoryStore::new();
        let player = Player::new("Ada", None);
        store.save_player(&player).await.unwrap();
        store.create_game_stat_line(&line_for(&player, 7)).await.unwrap();

        let before = store.snapshot().await.unwrap();
        store.create_game_stat_line(&line_for(&player, 9)).await.unwrap();

        assert_eq!(before.players.len(), 1);
        assert_eq!(before.stat_lines.len(), 1);
        assert_eq!(store.snapshot().await.unwrap().stat_lines.len(), 2);
    }
}
