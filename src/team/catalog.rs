// Player catalog: lookup, creation, edits, deletion, id generation.

use chrono::Utc;
use tracing::info;

use crate::scoring::{Position, StatLine};

use super::player::{Player, PlayerEdit};
use super::seed::seed_players;

/// The full set of known players, addressed by id.
///
/// Insertion order is preserved for stable listings. The catalog is the
/// single owner of `Player` values; the squad and match records refer to
/// entries by id only.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    players: Vec<Player>,
}

impl PlayerCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        PlayerCatalog::default()
    }

    /// Build the catalog from the built-in seed list.
    pub fn seed() -> Self {
        let players = seed_players();
        info!("Seeded catalog with {} players", players.len());
        PlayerCatalog { players }
    }

    /// Rebuild the catalog from persisted players.
    ///
    /// Point totals are derived data, so they are recomputed here rather
    /// than trusted from storage.
    pub fn from_players(mut players: Vec<Player>) -> Self {
        for player in &mut players {
            player.recompute_points();
        }
        PlayerCatalog { players }
    }

    /// Create a new player with a generated id and return a reference to it.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        image_ref: impl Into<String>,
        value: f64,
        stats: StatLine,
    ) -> &Player {
        let id = self.generate_player_id();
        let player = Player::new(id, name, position, team, image_ref, value, stats);
        info!("Added player {} ({}) to catalog", player.name, player.position);
        self.players.push(player);
        self.players.last().expect("player just appended")
    }

    /// Look up a player by id.
    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable lookup by id. Used by the ledger to fold performance deltas.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Whether a player with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Apply an info edit to the player with this id.
    ///
    /// Returns `false` (leaving the catalog untouched) when the id is
    /// unknown.
    pub fn update_info(&mut self, id: &str, edit: PlayerEdit) -> bool {
        match self.get_mut(id) {
            Some(player) => {
                player.apply_edit(edit);
                true
            }
            None => false,
        }
    }

    /// Remove and return the player with this id, if present.
    ///
    /// Callers holding squad membership for this id are responsible for
    /// the cascading squad removal.
    pub fn remove(&mut self, id: &str) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        let removed = self.players.remove(idx);
        info!("Removed player {} from catalog", removed.name);
        Some(removed)
    }

    /// All players, in insertion order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players at the given position, in insertion order.
    pub fn by_position(&self, position: Position) -> Vec<&Player> {
        self.players.iter().filter(|p| p.position == position).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Generate a unique player id from the current UTC timestamp.
    ///
    /// Format: `player_YYYYMMDD_HHMMSS_SSS`. A numeric suffix breaks the
    /// tie when two players are created within the same millisecond.
    fn generate_player_id(&self) -> String {
        let base = Utc::now().format("player_%Y%m%d_%H%M%S_%3f").to_string();
        if !self.contains(&base) {
            return base;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}_{n}");
            if !self.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalog_has_expected_size() {
        let catalog = PlayerCatalog::seed();
        assert_eq!(catalog.len(), 30);
        assert!(catalog.contains("1"));
        assert!(catalog.contains("30"));
    }

    #[test]
    fn add_generates_unique_ids() {
        let mut catalog = PlayerCatalog::new();
        let id1 = catalog
            .add("Player A", Position::Defender, "FC A", "", 5.0, StatLine::default())
            .id
            .clone();
        let id2 = catalog
            .add("Player B", Position::Defender, "FC B", "", 5.0, StatLine::default())
            .id
            .clone();
        assert_ne!(id1, id2);
        assert!(id1.starts_with("player_"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn add_starts_with_given_stats() {
        let mut catalog = PlayerCatalog::new();
        let stats = StatLine {
            goals: 3,
            minutes_played: 270,
            ..Default::default()
        };
        let player = catalog.add("Scorer", Position::Forward, "FC", "", 6.0, stats);
        assert_eq!(player.stats.goals, 3);
        // 3 goals * 4 + 270 / 90 * 2 = 18
        assert_eq!(player.total_points, 18);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let catalog = PlayerCatalog::seed();
        assert!(catalog.get("missing").is_none());
        assert!(!catalog.contains("missing"));
    }

    #[test]
    fn update_info_edits_known_player() {
        let mut catalog = PlayerCatalog::seed();
        let changed = catalog.update_info(
            "11",
            PlayerEdit {
                team: Some("Al Nassr".into()),
                ..Default::default()
            },
        );
        assert!(changed);
        assert_eq!(catalog.get("11").unwrap().team, "Al Nassr");
    }

    #[test]
    fn update_info_unknown_id_is_noop() {
        let mut catalog = PlayerCatalog::seed();
        let changed = catalog.update_info("missing", PlayerEdit::default());
        assert!(!changed);
        assert_eq!(catalog.len(), 30);
    }

    #[test]
    fn remove_returns_player_and_shrinks() {
        let mut catalog = PlayerCatalog::seed();
        let removed = catalog.remove("21").unwrap();
        assert_eq!(removed.name, "Erling Haaland");
        assert_eq!(catalog.len(), 29);
        assert!(catalog.remove("21").is_none());
    }

    #[test]
    fn by_position_filters() {
        let catalog = PlayerCatalog::seed();
        let keepers = catalog.by_position(Position::Goalkeeper);
        assert_eq!(keepers.len(), 3);
        assert!(keepers.iter().all(|p| p.position == Position::Goalkeeper));
        let forwards = catalog.by_position(Position::Forward);
        assert_eq!(forwards.len(), 10);
    }

    #[test]
    fn from_players_recomputes_stale_points() {
        let mut player = Player::new(
            "p1",
            "Stale",
            Position::Forward,
            "FC",
            "",
            5.0,
            StatLine {
                goals: 2,
                ..Default::default()
            },
        );
        player.total_points = 999;
        let catalog = PlayerCatalog::from_players(vec![player]);
        assert_eq!(catalog.get("p1").unwrap().total_points, 8);
    }
}
