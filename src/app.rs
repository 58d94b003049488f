// Application state and orchestration.
//
// Owns the catalog, squad, and ledger, funnels every mutation through
// the manager APIs, and flushes persisted state after each committed
// change. A failed flush is reported to the caller but never rolls back
// the in-memory state; the app keeps running in a modified-but-unsaved
// condition.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::{Database, PersistedState};
use crate::scoring::{Position, StatLine};
use crate::team::catalog::PlayerCatalog;
use crate::team::ledger::{LedgerError, MatchDraft, MatchLedger, MatchRecord};
use crate::team::player::{Player, PlayerEdit};
use crate::team::squad::{Squad, SquadError, SquadSummary};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Squad(#[from] SquadError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("failed to persist state: {0}")]
    Persistence(anyhow::Error),
}

/// The complete application state.
pub struct AppState {
    pub config: Config,
    catalog: PlayerCatalog,
    squad: Squad,
    ledger: MatchLedger,
    db: Database,
}

impl AppState {
    /// Restore persisted state from the database, seeding the built-in
    /// catalog when nothing has been saved yet.
    pub fn load_or_seed(config: Config, db: Database) -> anyhow::Result<Self> {
        match db.load()? {
            Some(state) => {
                info!(
                    "Restored {} players, {} matches, {} squad members",
                    state.players.len(),
                    state.matches.len(),
                    state.squad.len()
                );
                Ok(AppState {
                    config,
                    catalog: PlayerCatalog::from_players(state.players),
                    squad: Squad::from_ids(state.squad),
                    ledger: MatchLedger::from_records(state.matches),
                    db,
                })
            }
            None => {
                info!("No persisted state found; seeding built-in catalog");
                let app = AppState {
                    config,
                    catalog: PlayerCatalog::seed(),
                    squad: Squad::new(),
                    ledger: MatchLedger::new(),
                    db,
                };
                if let Err(e) = app.flush() {
                    warn!("Initial seed could not be persisted: {e}");
                }
                Ok(app)
            }
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &PlayerCatalog {
        &self.catalog
    }

    pub fn squad(&self) -> &Squad {
        &self.squad
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    /// Squad member entities, dangling ids dropped.
    pub fn squad_players(&self) -> Vec<&Player> {
        self.squad.resolve(&self.catalog)
    }

    pub fn squad_summary(&self) -> SquadSummary {
        self.squad.summary(&self.catalog)
    }

    /// Snapshot of the state exactly as it would be persisted.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            players: self.catalog.players().to_vec(),
            matches: self.ledger.records().to_vec(),
            squad: self.squad.ids().to_vec(),
        }
    }

    // ------------------------------------------------------------------
    // Catalog mutations
    // ------------------------------------------------------------------

    /// Create a player and return its generated id.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        image_ref: impl Into<String>,
        value: f64,
        stats: StatLine,
    ) -> Result<String, AppError> {
        let id = self
            .catalog
            .add(name, position, team, image_ref, value, stats)
            .id
            .clone();
        self.flush()?;
        Ok(id)
    }

    /// Edit a player's descriptive fields. Unknown ids are a logged no-op.
    pub fn update_player_info(&mut self, id: &str, edit: PlayerEdit) -> Result<(), AppError> {
        if !self.catalog.update_info(id, edit) {
            warn!("Ignoring edit for unknown player {id}");
            return Ok(());
        }
        self.flush()
    }

    /// Delete a player from the catalog, cascading removal from the
    /// squad. Match records keep their historical player ids; lookups
    /// filter them out from then on.
    pub fn delete_player(&mut self, id: &str) -> Result<(), AppError> {
        if self.catalog.remove(id).is_none() {
            return Ok(());
        }
        self.squad.remove(id);
        self.flush()
    }

    // ------------------------------------------------------------------
    // Squad mutations
    // ------------------------------------------------------------------

    pub fn add_to_squad(&mut self, player_id: &str) -> Result<(), AppError> {
        self.squad.add(&self.catalog, player_id)?;
        self.flush()
    }

    pub fn remove_from_squad(&mut self, player_id: &str) -> Result<(), AppError> {
        self.squad.remove(player_id);
        self.flush()
    }

    pub fn clear_squad(&mut self) -> Result<(), AppError> {
        self.squad.clear();
        self.flush()
    }

    // ------------------------------------------------------------------
    // Match ledger
    // ------------------------------------------------------------------

    /// Validate and save a composed match.
    ///
    /// Every performance must belong to a current squad member. On
    /// success the record append and the player stat updates land in the
    /// same persistence flush, so the database sees them as one unit.
    pub fn save_match(&mut self, draft: &MatchDraft) -> Result<MatchRecord, AppError> {
        for perf in draft.performances() {
            if !self.squad.contains(&perf.player_id) {
                return Err(LedgerError::NotInSquad(perf.player_id.clone()).into());
            }
        }
        let record = self.ledger.save(&mut self.catalog, draft)?.clone();
        self.flush()?;
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Wipe persisted state, then re-seed the catalog and empty the
    /// squad and ledger. When the wipe itself fails nothing is touched.
    pub fn reset_all(&mut self) -> Result<(), AppError> {
        self.db.clear().map_err(AppError::Persistence)?;
        self.catalog = PlayerCatalog::seed();
        self.squad = Squad::new();
        self.ledger = MatchLedger::new();
        info!("All data reset to the built-in catalog");
        self.flush()
    }

    /// Write the current state to the database.
    fn flush(&self) -> Result<(), AppError> {
        self.db.save(&self.snapshot()).map_err(AppError::Persistence)
    }
}
