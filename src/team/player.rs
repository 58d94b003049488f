// Player entity: descriptive fields, cumulative stats, derived points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{self, PerformanceDelta, Position, StatLine};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique, immutable identifier.
    pub id: String,
    pub name: String,
    pub team: String,
    /// Reference to a headshot image. Purely descriptive.
    #[serde(default)]
    pub image_ref: String,
    /// Fixed at creation unless explicitly edited; drives scoring weights.
    pub position: Position,
    /// Display value in millions. No budget logic is enforced on it.
    pub value: f64,
    #[serde(default)]
    pub stats: StatLine,
    /// Derived from `(position, stats)` and recomputed on every stats
    /// mutation; never trusted from storage.
    #[serde(default)]
    pub total_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A partial edit to a player's descriptive fields.
///
/// `id` and `stats` are deliberately absent: the id is immutable and
/// stats only change through match performance deltas.
#[derive(Debug, Clone, Default)]
pub struct PlayerEdit {
    pub name: Option<String>,
    pub team: Option<String>,
    pub image_ref: Option<String>,
    pub position: Option<Position>,
    pub value: Option<f64>,
}

impl Player {
    /// Create a player with an initial stat line. Points are computed
    /// immediately so the derived field is never stale.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        image_ref: impl Into<String>,
        value: f64,
        stats: StatLine,
    ) -> Self {
        let now = Utc::now();
        let mut player = Player {
            id: id.into(),
            name: name.into(),
            team: team.into(),
            image_ref: image_ref.into(),
            position,
            value,
            stats,
            total_points: 0,
            created_at: now,
            updated_at: now,
        };
        player.recompute_points();
        player
    }

    /// Recompute the derived point total from the current position and stats.
    pub fn recompute_points(&mut self) {
        self.total_points = scoring::score(Some(self.position), &self.stats);
    }

    /// Fold a single-match performance into the cumulative stats and
    /// refresh the point total.
    pub fn apply_performance(&mut self, delta: &PerformanceDelta) {
        self.stats.apply(delta);
        self.recompute_points();
        self.updated_at = Utc::now();
    }

    /// Apply an info edit. A position change re-weights the existing
    /// stats, so points are recomputed here as well.
    pub fn apply_edit(&mut self, edit: PlayerEdit) {
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(team) = edit.team {
            self.team = team;
        }
        if let Some(image_ref) = edit.image_ref {
            self.image_ref = image_ref;
        }
        if let Some(position) = edit.position {
            self.position = position;
        }
        if let Some(value) = edit.value {
            self.value = value;
        }
        self.recompute_points();
        self.updated_at = Utc::now();
    }
}
