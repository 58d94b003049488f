// Squad membership and selection invariants.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::scoring::Position;

use super::catalog::PlayerCatalog;
use super::player::Player;

/// Maximum number of players in the selected squad.
pub const SQUAD_CAPACITY: usize = 11;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SquadError {
    #[error("squad already has the maximum of 11 players")]
    CapacityExceeded,

    #[error("a goalkeeper is already selected; only one is allowed")]
    DuplicateGoalkeeper,

    #[error("no player with id `{0}` in the catalog")]
    UnknownPlayer(String),
}

/// The user's selected squad: an ordered list of player ids.
///
/// Membership is a weak relation. Ids whose player has since been deleted
/// are dropped at read time rather than eagerly repaired, so a deletion
/// never requires more cleanup than removing the id itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Squad {
    members: Vec<String>,
}

/// Aggregate numbers for the squad header display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadSummary {
    pub player_count: usize,
    pub total_points: i32,
    pub total_value: f64,
    pub formation: String,
}

impl Squad {
    pub fn new() -> Self {
        Squad::default()
    }

    /// Rebuild the squad from persisted member ids.
    pub fn from_ids(ids: Vec<String>) -> Self {
        Squad { members: ids }
    }

    /// Member ids in selection order. May contain dangling ids; use
    /// [`Squad::resolve`] for player entities.
    pub fn ids(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.members.iter().any(|id| id == player_id)
    }

    /// Add a player to the squad.
    ///
    /// Re-adding a current member is a silent no-op. Otherwise the squad
    /// invariants are checked before any mutation: at most 11 members,
    /// and at most one goalkeeper.
    pub fn add(&mut self, catalog: &PlayerCatalog, player_id: &str) -> Result<(), SquadError> {
        let player = catalog
            .get(player_id)
            .ok_or_else(|| SquadError::UnknownPlayer(player_id.to_string()))?;

        if self.contains(player_id) {
            return Ok(());
        }
        if self.members.len() >= SQUAD_CAPACITY {
            return Err(SquadError::CapacityExceeded);
        }
        if player.position == Position::Goalkeeper && self.has_goalkeeper(catalog) {
            return Err(SquadError::DuplicateGoalkeeper);
        }

        self.members.push(player_id.to_string());
        Ok(())
    }

    /// Remove a player from the squad; no-op when absent.
    ///
    /// Also called as the cascading cleanup when a player is deleted from
    /// the catalog.
    pub fn remove(&mut self, player_id: &str) {
        self.members.retain(|id| id != player_id);
    }

    /// Empty the squad.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Whether any current member resolves to a goalkeeper.
    pub fn has_goalkeeper(&self, catalog: &PlayerCatalog) -> bool {
        self.resolve(catalog)
            .iter()
            .any(|p| p.position == Position::Goalkeeper)
    }

    /// Resolve member ids to player entities, silently dropping any id
    /// that no longer exists in the catalog. Never errors.
    pub fn resolve<'a>(&self, catalog: &'a PlayerCatalog) -> Vec<&'a Player> {
        self.members
            .iter()
            .filter_map(|id| {
                let player = catalog.get(id);
                if player.is_none() {
                    warn!("Squad member {} no longer resolves; skipping", id);
                }
                player
            })
            .collect()
    }

    /// The outfield shape as a "DEF-MID-FWD" count string (e.g. "4-4-2").
    /// The goalkeeper is excluded; "-" when no outfield player resolves.
    pub fn formation(&self, catalog: &PlayerCatalog) -> String {
        let mut def = 0u32;
        let mut mid = 0u32;
        let mut fwd = 0u32;
        for player in self.resolve(catalog) {
            match player.position {
                Position::Defender => def += 1,
                Position::Midfielder => mid += 1,
                Position::Forward => fwd += 1,
                Position::Goalkeeper => {}
            }
        }
        if def == 0 && mid == 0 && fwd == 0 {
            "-".to_string()
        } else {
            format!("{def}-{mid}-{fwd}")
        }
    }

    /// Aggregate points, value, count, and formation for the squad.
    pub fn summary(&self, catalog: &PlayerCatalog) -> SquadSummary {
        let players = self.resolve(catalog);
        SquadSummary {
            player_count: players.len(),
            total_points: players.iter().map(|p| p.total_points).sum(),
            total_value: players.iter().map(|p| p.value).sum(),
            formation: self.formation(catalog),
        }
    }
}

// ---------------------------------------------------------------------------
// Formation presets
// ---------------------------------------------------------------------------

/// Slot counts for a named formation preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationShape {
    pub goalkeepers: u8,
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
}

/// Look up a formation preset by its conventional name.
///
/// The known presets are 4-4-2, 4-3-3, 3-5-2, and 5-3-2; anything else
/// returns `None` and callers needing a default fall back to 4-4-2.
pub fn formation_positions(name: &str) -> Option<FormationShape> {
    let shape = match name {
        "4-4-2" => FormationShape { goalkeepers: 1, defenders: 4, midfielders: 4, forwards: 2 },
        "4-3-3" => FormationShape { goalkeepers: 1, defenders: 4, midfielders: 3, forwards: 3 },
        "3-5-2" => FormationShape { goalkeepers: 1, defenders: 3, midfielders: 5, forwards: 2 },
        "5-3-2" => FormationShape { goalkeepers: 1, defenders: 5, midfielders: 3, forwards: 2 },
        _ => return None,
    };
    Some(shape)
}
