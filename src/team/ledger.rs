// Match ledger: composing, validating, and saving match results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::scoring::{self, PerformanceDelta};

use super::catalog::PlayerCatalog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("opponent name must not be empty")]
    EmptyOpponent,

    #[error("invalid score `{0}`: expected a non-negative whole number")]
    InvalidScore(String),

    #[error("player `{0}` is not in the selected squad")]
    NotInSquad(String),
}

/// A match result being composed.
///
/// Score fields hold the raw text as entered; they are validated and
/// parsed only on save. A draft becomes an immutable [`MatchRecord`]
/// when saved, and nothing else transitions it.
#[derive(Debug, Clone, Default)]
pub struct MatchDraft {
    pub opponent: String,
    pub home_score: String,
    pub away_score: String,
    performances: Vec<PerformanceDelta>,
}

impl MatchDraft {
    pub fn new(
        opponent: impl Into<String>,
        home_score: impl Into<String>,
        away_score: impl Into<String>,
    ) -> Self {
        MatchDraft {
            opponent: opponent.into(),
            home_score: home_score.into(),
            away_score: away_score.into(),
            performances: Vec::new(),
        }
    }

    /// Insert or replace the performance for `delta.player_id`.
    ///
    /// A player contributes at most one performance per match; confirming
    /// again overwrites the earlier entry instead of appending a
    /// duplicate that would be double-counted.
    pub fn upsert_performance(&mut self, delta: PerformanceDelta) {
        match self
            .performances
            .iter_mut()
            .find(|p| p.player_id == delta.player_id)
        {
            Some(existing) => *existing = delta,
            None => self.performances.push(delta),
        }
    }

    /// Drop the performance for this player, if one was entered.
    pub fn remove_performance(&mut self, player_id: &str) {
        self.performances.retain(|p| p.player_id != player_id);
    }

    /// Performances entered so far, in first-confirmation order.
    pub fn performances(&self) -> &[PerformanceDelta] {
        &self.performances
    }
}

/// An immutable log entry for one completed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique id, generated at save time.
    pub id: String,
    pub opponent: String,
    pub home_score: u32,
    pub away_score: u32,
    /// Set at save time; not user-editable.
    pub date: DateTime<Utc>,
    pub performances: Vec<PerformanceDelta>,
    /// Sum of each performance's delta points at the time of saving.
    pub total_points: i32,
}

impl MatchRecord {
    /// The score formatted for display (e.g. "2-1").
    pub fn score_line(&self) -> String {
        format!("{}-{}", self.home_score, self.away_score)
    }
}

/// The append-only list of saved match records.
#[derive(Debug, Clone, Default)]
pub struct MatchLedger {
    matches: Vec<MatchRecord>,
}

impl MatchLedger {
    pub fn new() -> Self {
        MatchLedger::default()
    }

    /// Rebuild the ledger from persisted records.
    pub fn from_records(matches: Vec<MatchRecord>) -> Self {
        MatchLedger { matches }
    }

    /// Saved records, oldest first.
    pub fn records(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Validate and save a composed match.
    ///
    /// Rejections happen before any mutation: an empty opponent or a
    /// score field that does not parse as a non-negative integer leaves
    /// both the ledger and the catalog untouched.
    ///
    /// On success the record is appended with a fresh id and timestamp,
    /// its total computed from the delta stats, and every performance is
    /// folded into the owning player's cumulative stats. This is the
    /// only path that mutates player stats after creation.
    pub fn save(
        &mut self,
        catalog: &mut PlayerCatalog,
        draft: &MatchDraft,
    ) -> Result<&MatchRecord, LedgerError> {
        let opponent = draft.opponent.trim();
        if opponent.is_empty() {
            return Err(LedgerError::EmptyOpponent);
        }
        let home_score = parse_score(&draft.home_score)?;
        let away_score = parse_score(&draft.away_score)?;

        // Match totals use each performance's delta stats, not the
        // player's cumulative line. A performance whose player no longer
        // resolves scores without its position-dependent terms.
        let total_points: i32 = draft
            .performances
            .iter()
            .map(|perf| {
                let position = catalog.get(&perf.player_id).map(|p| p.position);
                scoring::score_performance(position, perf)
            })
            .sum();

        let record = MatchRecord {
            id: self.generate_match_id(),
            opponent: opponent.to_string(),
            home_score,
            away_score,
            date: Utc::now(),
            performances: draft.performances.clone(),
            total_points,
        };

        for perf in &record.performances {
            match catalog.get_mut(&perf.player_id) {
                Some(player) => player.apply_performance(perf),
                None => warn!(
                    "Performance for unknown player {} kept in record but not folded",
                    perf.player_id
                ),
            }
        }

        info!(
            "Saved match vs {} ({}): {} performances, {} points",
            record.opponent,
            record.score_line(),
            record.performances.len(),
            record.total_points
        );

        self.matches.push(record);
        Ok(self.matches.last().expect("match record just appended"))
    }

    /// Generate a unique match id from the current UTC timestamp.
    ///
    /// Format: `match_YYYYMMDD_HHMMSS_SSS`, with a numeric suffix when
    /// two matches are saved within the same millisecond.
    fn generate_match_id(&self) -> String {
        let base = Utc::now().format("match_%Y%m%d_%H%M%S_%3f").to_string();
        if !self.matches.iter().any(|m| m.id == base) {
            return base;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}_{n}");
            if !self.matches.iter().any(|m| m.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

fn parse_score(raw: &str) -> Result<u32, LedgerError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| LedgerError::InvalidScore(raw.to_string()))
}
