// Scoring engine: positions, stat lines, and the points rubric.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rubric constants
// ---------------------------------------------------------------------------

/// One appearance point bundle is awarded per full 90 minutes played.
pub const MINUTES_PER_APPEARANCE: u32 = 90;
/// Points awarded per full appearance.
pub const APPEARANCE_POINTS: i32 = 2;
/// Goalkeepers earn one point per three saves.
pub const SAVES_PER_POINT: u32 = 3;
/// Points per assist, for every position.
pub const ASSIST_POINTS: i32 = 3;
/// Deduction per yellow card.
pub const YELLOW_CARD_POINTS: i32 = -1;
/// Deduction per red card.
pub const RED_CARD_POINTS: i32 = -3;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Pitch positions used for squad selection and scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Accepts the conventional abbreviations "GK", "DEF", "MID", "FWD"
    /// in any case. Anything else is `None`.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GK" => Some(Position::Goalkeeper),
            "DEF" => Some(Position::Defender),
            "MID" => Some(Position::Midfielder),
            "FWD" => Some(Position::Forward),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Deterministic ordering index for roster display (GK first).
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }

    /// All positions, in display order.
    pub fn all() -> [Position; 4] {
        [
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ]
    }

    /// Points per goal scored from this position.
    pub fn goal_points(&self) -> i32 {
        match self {
            Position::Goalkeeper | Position::Defender => 6,
            Position::Midfielder => 5,
            Position::Forward => 4,
        }
    }

    /// Points per clean sheet kept from this position.
    pub fn clean_sheet_points(&self) -> i32 {
        match self {
            Position::Goalkeeper | Position::Defender => 4,
            Position::Midfielder => 1,
            Position::Forward => 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Stat lines and performance deltas
// ---------------------------------------------------------------------------

/// Cumulative season counters for a single player.
///
/// Every field defaults to zero so partial records deserialize cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub clean_sheets: u32,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub minutes_played: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
}

impl StatLine {
    /// Add a single-match performance onto these cumulative counters.
    ///
    /// Addition semantics per field: every counter adds, and the
    /// clean-sheet flag adds one sheet when set.
    pub fn apply(&mut self, delta: &PerformanceDelta) {
        self.goals += delta.goals;
        self.assists += delta.assists;
        self.clean_sheets += u32::from(delta.clean_sheet);
        self.saves += delta.saves;
        self.minutes_played += delta.minutes_played;
        self.yellow_cards += delta.yellow_cards;
        self.red_cards += delta.red_cards;
    }
}

/// The incremental stats a single player contributed in one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceDelta {
    /// Id of the player this performance belongs to.
    pub player_id: String,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub minutes_played: u32,
    /// Whether the player kept a clean sheet in this match.
    #[serde(default)]
    pub clean_sheet: bool,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
}

impl PerformanceDelta {
    /// View this delta as a stat line (clean-sheet flag becomes 0 or 1).
    pub fn as_stat_line(&self) -> StatLine {
        StatLine {
            goals: self.goals,
            assists: self.assists,
            clean_sheets: u32::from(self.clean_sheet),
            saves: self.saves,
            minutes_played: self.minutes_played,
            yellow_cards: self.yellow_cards,
            red_cards: self.red_cards,
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring functions
// ---------------------------------------------------------------------------

/// Score a cumulative stat line under the points rubric.
///
/// Pure and deterministic: the same inputs always produce the same total.
/// The total may go negative since card deductions are not floored.
///
/// `position` is `None` when the player can no longer be resolved; all
/// position-dependent terms (goal weight, clean sheets, saves) then
/// contribute zero, while appearance, assist, and card points still count.
pub fn score(position: Option<Position>, stats: &StatLine) -> i32 {
    let mut points = 0i32;

    points += (stats.minutes_played / MINUTES_PER_APPEARANCE) as i32 * APPEARANCE_POINTS;

    if let Some(pos) = position {
        points += pos.goal_points() * stats.goals as i32;
        points += pos.clean_sheet_points() * stats.clean_sheets as i32;
        if pos == Position::Goalkeeper {
            points += (stats.saves / SAVES_PER_POINT) as i32;
        }
    }

    points += ASSIST_POINTS * stats.assists as i32;
    points += YELLOW_CARD_POINTS * stats.yellow_cards as i32;
    points += RED_CARD_POINTS * stats.red_cards as i32;

    points
}

/// Score a single-match performance delta.
///
/// Identical rubric to [`score`], with the clean-sheet flag counting as
/// a single sheet.
pub fn score_performance(position: Option<Position>, perf: &PerformanceDelta) -> i32 {
    score(position, &perf.as_stat_line())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(
        goals: u32,
        assists: u32,
        clean_sheets: u32,
        saves: u32,
        minutes_played: u32,
        yellow_cards: u32,
        red_cards: u32,
    ) -> StatLine {
        StatLine {
            goals,
            assists,
            clean_sheets,
            saves,
            minutes_played,
            yellow_cards,
            red_cards,
        }
    }

    #[test]
    fn from_str_pos_standard_positions() {
        assert_eq!(Position::from_str_pos("GK"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("DEF"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("MID"), Some(Position::Midfielder));
        assert_eq!(Position::from_str_pos("FWD"), Some(Position::Forward));
    }

    #[test]
    fn from_str_pos_case_insensitive() {
        assert_eq!(Position::from_str_pos("gk"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("Def"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("mid"), Some(Position::Midfielder));
    }

    #[test]
    fn from_str_pos_invalid() {
        assert_eq!(Position::from_str_pos("ST"), None);
        assert_eq!(Position::from_str_pos(""), None);
        assert_eq!(Position::from_str_pos("CB"), None);
    }

    #[test]
    fn display_str_roundtrip() {
        for pos in Position::all() {
            let parsed = Position::from_str_pos(pos.display_str());
            assert_eq!(parsed, Some(pos), "roundtrip failed for {}", pos);
        }
    }

    #[test]
    fn serde_uses_abbreviations() {
        let json = serde_json::to_string(&Position::Goalkeeper).unwrap();
        assert_eq!(json, "\"GK\"");
        let parsed: Position = serde_json::from_str("\"FWD\"").unwrap();
        assert_eq!(parsed, Position::Forward);
    }

    #[test]
    fn goal_weights_by_position() {
        assert_eq!(Position::Goalkeeper.goal_points(), 6);
        assert_eq!(Position::Defender.goal_points(), 6);
        assert_eq!(Position::Midfielder.goal_points(), 5);
        assert_eq!(Position::Forward.goal_points(), 4);
    }

    #[test]
    fn clean_sheet_weights_by_position() {
        assert_eq!(Position::Goalkeeper.clean_sheet_points(), 4);
        assert_eq!(Position::Defender.clean_sheet_points(), 4);
        assert_eq!(Position::Midfielder.clean_sheet_points(), 1);
        assert_eq!(Position::Forward.clean_sheet_points(), 0);
    }

    #[test]
    fn forward_worked_example() {
        // 2 goals * 4 + 1 assist * 3 - 1 yellow = 10
        let s = stats(2, 1, 0, 0, 0, 1, 0);
        assert_eq!(score(Some(Position::Forward), &s), 10);
    }

    #[test]
    fn goalkeeper_worked_example() {
        // 10 saves / 3 + 2 clean sheets * 4 + 180 minutes / 90 * 2 = 3 + 8 + 4 = 15
        let s = stats(0, 0, 2, 10, 180, 0, 0);
        assert_eq!(score(Some(Position::Goalkeeper), &s), 15);
    }

    #[test]
    fn minutes_truncate_to_full_appearances() {
        assert_eq!(score(Some(Position::Midfielder), &stats(0, 0, 0, 0, 89, 0, 0)), 0);
        assert_eq!(score(Some(Position::Midfielder), &stats(0, 0, 0, 0, 90, 0, 0)), 2);
        assert_eq!(score(Some(Position::Midfielder), &stats(0, 0, 0, 0, 179, 0, 0)), 2);
        assert_eq!(score(Some(Position::Midfielder), &stats(0, 0, 0, 0, 180, 0, 0)), 4);
    }

    #[test]
    fn saves_only_count_for_goalkeepers() {
        let s = stats(0, 0, 0, 9, 0, 0, 0);
        assert_eq!(score(Some(Position::Goalkeeper), &s), 3);
        assert_eq!(score(Some(Position::Defender), &s), 0);
        assert_eq!(score(Some(Position::Midfielder), &s), 0);
        assert_eq!(score(Some(Position::Forward), &s), 0);
    }

    #[test]
    fn forwards_get_no_clean_sheet_points() {
        let s = stats(0, 0, 5, 0, 0, 0, 0);
        assert_eq!(score(Some(Position::Forward), &s), 0);
        assert_eq!(score(Some(Position::Midfielder), &s), 5);
        assert_eq!(score(Some(Position::Defender), &s), 20);
    }

    #[test]
    fn cards_can_drive_total_negative() {
        let s = stats(0, 0, 0, 0, 0, 2, 1);
        assert_eq!(score(Some(Position::Forward), &s), -5);
    }

    #[test]
    fn missing_position_drops_position_dependent_terms() {
        // Goals, clean sheets, and saves all rely on the position; minutes,
        // assists, and cards do not.
        let s = stats(3, 2, 1, 6, 90, 1, 0);
        assert_eq!(score(None, &s), 2 + 6 - 1);
    }

    #[test]
    fn zero_stats_score_zero() {
        for pos in Position::all() {
            assert_eq!(score(Some(pos), &StatLine::default()), 0);
        }
    }

    #[test]
    fn score_is_deterministic() {
        let s = stats(4, 2, 3, 12, 1260, 2, 1);
        let first = score(Some(Position::Goalkeeper), &s);
        let second = score(Some(Position::Goalkeeper), &s);
        assert_eq!(first, second);
    }

    #[test]
    fn performance_clean_sheet_counts_as_one() {
        let perf = PerformanceDelta {
            player_id: "p1".into(),
            clean_sheet: true,
            minutes_played: 90,
            ..Default::default()
        };
        // 1 clean sheet * 4 + 1 appearance * 2
        assert_eq!(score_performance(Some(Position::Goalkeeper), &perf), 6);
        // Midfielders earn a single point for the sheet
        assert_eq!(score_performance(Some(Position::Midfielder), &perf), 3);
    }

    #[test]
    fn midfielder_match_worked_example() {
        let perf = PerformanceDelta {
            player_id: "p1".into(),
            goals: 1,
            minutes_played: 90,
            ..Default::default()
        };
        // 1 goal * 5 + 90 minutes / 90 * 2 = 7
        assert_eq!(score_performance(Some(Position::Midfielder), &perf), 7);
    }

    #[test]
    fn stat_line_apply_adds_every_field() {
        let mut stats = StatLine {
            goals: 10,
            assists: 5,
            clean_sheets: 3,
            saves: 20,
            minutes_played: 900,
            yellow_cards: 2,
            red_cards: 0,
        };
        let delta = PerformanceDelta {
            player_id: "p1".into(),
            goals: 2,
            assists: 1,
            minutes_played: 90,
            clean_sheet: true,
            saves: 4,
            yellow_cards: 1,
            red_cards: 1,
        };
        stats.apply(&delta);
        assert_eq!(stats.goals, 12);
        assert_eq!(stats.assists, 6);
        assert_eq!(stats.clean_sheets, 4);
        assert_eq!(stats.saves, 24);
        assert_eq!(stats.minutes_played, 990);
        assert_eq!(stats.yellow_cards, 3);
        assert_eq!(stats.red_cards, 1);
    }

    #[test]
    fn stat_line_apply_without_clean_sheet() {
        let mut stats = StatLine::default();
        let delta = PerformanceDelta {
            player_id: "p1".into(),
            goals: 1,
            ..Default::default()
        };
        stats.apply(&delta);
        assert_eq!(stats.clean_sheets, 0);
        assert_eq!(stats.goals, 1);
    }

    #[test]
    fn stat_line_missing_fields_deserialize_to_zero() {
        let line: StatLine = serde_json::from_str(r#"{"goals": 3}"#).unwrap();
        assert_eq!(line.goals, 3);
        assert_eq!(line.assists, 0);
        assert_eq!(line.minutes_played, 0);
    }
}
