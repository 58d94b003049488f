// SQLite persistence for the player catalog, squad, and match ledger.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::scoring::PerformanceDelta;
use crate::team::ledger::MatchRecord;
use crate::team::player::Player;

/// Everything the app persists between sessions.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PersistedState {
    pub players: Vec<Player>,
    pub matches: Vec<MatchRecord>,
    pub squad: Vec<String>,
}

/// SQLite-backed persistence.
///
/// The catalog and squad live as JSON blobs in a key-value table, while
/// match records get their own append-only table since they are
/// immutable once written.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    const PLAYERS_KEY: &'static str = "players";
    const SQUAD_KEY: &'static str = "squad";

    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database
    /// (useful for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS app_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS match_records (
                id           TEXT PRIMARY KEY,
                opponent     TEXT NOT NULL,
                home_score   INTEGER NOT NULL,
                away_score   INTEGER NOT NULL,
                date         TEXT NOT NULL,
                total_points INTEGER NOT NULL,
                performances TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Load the persisted state, or `None` when nothing has been saved
    /// yet (the caller then seeds the built-in catalog).
    pub fn load(&self) -> Result<Option<PersistedState>> {
        let conn = self.conn();

        let Some(players_json) = read_blob(&conn, Self::PLAYERS_KEY)? else {
            return Ok(None);
        };
        let players: Vec<Player> = serde_json::from_str(&players_json)
            .context("failed to deserialize persisted players")?;

        let squad: Vec<String> = match read_blob(&conn, Self::SQUAD_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .context("failed to deserialize persisted squad")?,
            None => Vec::new(),
        };

        let mut stmt = conn
            .prepare(
                "SELECT id, opponent, home_score, away_score, date, total_points, performances
                 FROM match_records ORDER BY date, id",
            )
            .context("failed to prepare match_records query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i64>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })
            .context("failed to query match records")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map match record rows")?;

        let mut matches = Vec::with_capacity(rows.len());
        for (id, opponent, home, away, date, total_points, performances_json) in rows {
            let date = DateTime::parse_from_rfc3339(&date)
                .with_context(|| format!("invalid date on match record {id}"))?
                .with_timezone(&Utc);
            let performances: Vec<PerformanceDelta> =
                serde_json::from_str(&performances_json).unwrap_or_default();
            matches.push(MatchRecord {
                id,
                opponent,
                home_score: home as u32,
                away_score: away as u32,
                date,
                performances,
                total_points: total_points as i32,
            });
        }

        Ok(Some(PersistedState {
            players,
            matches,
            squad,
        }))
    }

    /// Persist the full state in a single transaction.
    ///
    /// Catalog and squad blobs are replaced wholesale; match records use
    /// INSERT OR IGNORE since they are immutable, so re-saving an
    /// existing record is a no-op and the write stays idempotent.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin save transaction")?;

        let players_json = serde_json::to_string(&state.players)
            .context("failed to serialize players")?;
        let squad_json =
            serde_json::to_string(&state.squad).context("failed to serialize squad")?;

        tx.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            params![Self::PLAYERS_KEY, players_json],
        )
        .context("failed to save players")?;
        tx.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            params![Self::SQUAD_KEY, squad_json],
        )
        .context("failed to save squad")?;

        for record in &state.matches {
            let performances_json = serde_json::to_string(&record.performances)
                .context("failed to serialize performances")?;
            tx.execute(
                "INSERT OR IGNORE INTO match_records
                    (id, opponent, home_score, away_score, date, total_points, performances)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.opponent,
                    record.home_score,
                    record.away_score,
                    record.date.to_rfc3339(),
                    record.total_points,
                    performances_json,
                ],
            )
            .context("failed to save match record")?;
        }

        tx.commit().context("failed to commit save")
    }

    /// Delete all persisted state. The caller re-seeds afterwards.
    pub fn clear(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin transaction")?;
        tx.execute("DELETE FROM app_state", [])
            .context("failed to delete app state")?;
        tx.execute("DELETE FROM match_records", [])
            .context("failed to delete match records")?;
        tx.commit().context("failed to commit clear")
    }
}

/// Read a JSON blob from the key-value table. `None` when the key does
/// not exist.
fn read_blob(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn
        .prepare("SELECT value FROM app_state WHERE key = ?1")
        .context("failed to prepare app_state query")?;
    let mut rows = stmt
        .query_map(params![key], |row| row.get::<_, String>(0))
        .context("failed to query app_state")?;
    match rows.next() {
        Some(row) => Ok(Some(row.context("failed to read app_state row")?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Position, StatLine};
    use crate::team::catalog::PlayerCatalog;
    use crate::team::ledger::{MatchDraft, MatchLedger};

    /// Helper: create a fresh in-memory database for each test.
    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    fn sample_state() -> PersistedState {
        let mut catalog = PlayerCatalog::from_players(vec![
            Player::new("p1", "One", Position::Goalkeeper, "FC", "", 5.0, StatLine::default()),
            Player::new("p2", "Two", Position::Forward, "FC", "", 7.0, StatLine::default()),
        ]);
        let mut ledger = MatchLedger::new();
        let mut draft = MatchDraft::new("Arsenal", "2", "1");
        draft.upsert_performance(PerformanceDelta {
            player_id: "p2".into(),
            goals: 1,
            minutes_played: 90,
            ..Default::default()
        });
        ledger.save(&mut catalog, &draft).unwrap();

        PersistedState {
            players: catalog.players().to_vec(),
            matches: ledger.records().to_vec(),
            squad: vec!["p1".into(), "p2".into()],
        }
    }

    #[test]
    fn open_creates_tables() {
        let db = test_db();
        let conn = db.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(tables.contains(&"app_state".to_string()));
        assert!(tables.contains(&"match_records".to_string()));
    }

    #[test]
    fn load_returns_none_when_empty() {
        let db = test_db();
        assert!(db.load().unwrap().is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let db = test_db();
        let state = sample_state();
        db.save(&state).unwrap();

        let loaded = db.load().unwrap().expect("state should exist");
        assert_eq!(loaded.players, state.players);
        assert_eq!(loaded.squad, state.squad);
        assert_eq!(loaded.matches, state.matches);
    }

    #[test]
    fn save_replaces_blobs() {
        let db = test_db();
        let mut state = sample_state();
        db.save(&state).unwrap();

        state.squad.pop();
        db.save(&state).unwrap();

        let loaded = db.load().unwrap().unwrap();
        assert_eq!(loaded.squad, vec!["p1".to_string()]);
    }

    #[test]
    fn match_records_are_insert_or_ignore() {
        let db = test_db();
        let state = sample_state();
        db.save(&state).unwrap();
        // Saving again must not duplicate the immutable record.
        db.save(&state).unwrap();

        let loaded = db.load().unwrap().unwrap();
        assert_eq!(loaded.matches.len(), 1);
    }

    #[test]
    fn repeated_save_is_byte_stable() {
        let db = test_db();
        let state = sample_state();
        db.save(&state).unwrap();

        let first = db.load().unwrap().unwrap();
        db.save(&first).unwrap();
        let second = db.load().unwrap().unwrap();

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn clear_removes_everything() {
        let db = test_db();
        db.save(&sample_state()).unwrap();
        db.clear().unwrap();
        assert!(db.load().unwrap().is_none());
    }

    #[test]
    fn state_survives_reopen_on_disk() {
        let tmp_dir = std::env::temp_dir();
        let db_path = tmp_dir.join(format!("gaffer_db_test_{}.db", std::process::id()));
        let db_path_str = db_path.to_str().unwrap();
        let _ = std::fs::remove_file(&db_path);

        let state = sample_state();
        {
            let db = Database::open(db_path_str).unwrap();
            db.save(&state).unwrap();
        }
        {
            let db = Database::open(db_path_str).unwrap();
            let loaded = db.load().unwrap().expect("state should persist");
            assert_eq!(loaded.players.len(), 2);
            assert_eq!(loaded.matches.len(), 1);
            assert_eq!(loaded.squad.len(), 2);
        }

        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(format!("{db_path_str}-wal"));
        let _ = std::fs::remove_file(format!("{db_path_str}-shm"));
    }

    #[test]
    fn load_preserves_match_order() {
        let db = test_db();
        let mut catalog = PlayerCatalog::new();
        let mut ledger = MatchLedger::new();
        ledger.save(&mut catalog, &MatchDraft::new("First", "1", "0")).unwrap();
        ledger.save(&mut catalog, &MatchDraft::new("Second", "0", "0")).unwrap();
        let state = PersistedState {
            players: vec![],
            matches: ledger.records().to_vec(),
            squad: vec![],
        };
        // players blob must exist for load() to consider state present
        db.save(&state).unwrap();

        let loaded = db.load().unwrap().unwrap();
        assert_eq!(loaded.matches.len(), 2);
        assert_eq!(loaded.matches[0].opponent, "First");
        assert_eq!(loaded.matches[1].opponent, "Second");
    }
}
