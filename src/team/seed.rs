// Built-in catalog used when no persisted state exists yet.

use crate::scoring::{Position, StatLine};

use super::player::Player;

const IMAGE_BASE: &str = "https://resources.premierleague.com/premierleague/photos/players/250x250";

fn stats(g: u32, a: u32, cs: u32, s: u32, mins: u32, yel: u32, red: u32) -> StatLine {
    StatLine {
        goals: g,
        assists: a,
        clean_sheets: cs,
        saves: s,
        minutes_played: mins,
        yellow_cards: yel,
        red_cards: red,
    }
}

fn player(
    id: &str,
    name: &str,
    position: Position,
    team: &str,
    image_id: &str,
    value: f64,
    stats: StatLine,
) -> Player {
    Player::new(
        id,
        name,
        position,
        team,
        format!("{IMAGE_BASE}/{image_id}.png"),
        value,
        stats,
    )
}

/// The default player list: thirty players across the four positions,
/// each with an opening stat line.
pub(crate) fn seed_players() -> Vec<Player> {
    use Position::{Defender, Forward, Goalkeeper, Midfielder};

    vec![
        // Goalkeepers
        player("1", "Alisson Becker", Goalkeeper, "Liverpool", "p116535", 5.5, stats(0, 1, 12, 98, 2800, 1, 0)),
        player("2", "Ederson", Goalkeeper, "Man City", "p177298", 5.5, stats(0, 0, 15, 70, 3000, 0, 0)),
        player("3", "David Raya", Goalkeeper, "Arsenal", "p108818", 5.0, stats(0, 0, 10, 85, 2500, 0, 0)),
        // Defenders
        player("4", "Trent Alexander-Arnold", Defender, "Liverpool", "p169187", 7.0, stats(2, 12, 12, 0, 2700, 0, 0)),
        player("5", "Virgil van Dijk", Defender, "Liverpool", "p97032", 6.5, stats(5, 1, 12, 0, 2900, 0, 0)),
        player("6", "Kieran Trippier", Defender, "Newcastle", "p61933", 6.8, stats(1, 10, 10, 0, 2650, 0, 0)),
        player("7", "William Saliba", Defender, "Arsenal", "p226597", 5.9, stats(2, 1, 14, 0, 3100, 0, 0)),
        player("8", "Rúben Dias", Defender, "Man City", "p171314", 6.0, stats(0, 1, 15, 0, 2400, 0, 0)),
        player("9", "Ben Chilwell", Defender, "Chelsea", "p149484", 5.7, stats(2, 2, 5, 0, 1800, 0, 0)),
        player("10", "Pervis Estupiñán", Defender, "Brighton", "p204800", 5.2, stats(1, 5, 7, 0, 2550, 0, 0)),
        // Midfielders
        player("11", "Mohamed Salah", Midfielder, "Liverpool", "p118748", 13.0, stats(19, 12, 11, 0, 2850, 0, 0)),
        player("12", "Kevin De Bruyne", Midfielder, "Man City", "p61366", 10.5, stats(7, 18, 12, 0, 2300, 0, 0)),
        player("13", "Bukayo Saka", Midfielder, "Arsenal", "p223340", 9.0, stats(15, 11, 13, 0, 3000, 0, 0)),
        player("14", "Martin Ødegaard", Midfielder, "Arsenal", "p184029", 8.6, stats(15, 7, 12, 0, 2950, 0, 0)),
        player("15", "Bruno Fernandes", Midfielder, "Man Utd", "p141746", 8.5, stats(8, 8, 10, 0, 3150, 0, 0)),
        player("16", "Marcus Rashford", Midfielder, "Man Utd", "p176297", 8.8, stats(17, 5, 9, 0, 2700, 0, 0)),
        player("17", "Phil Foden", Midfielder, "Man City", "p209244", 8.0, stats(11, 5, 10, 0, 2000, 0, 0)),
        player("18", "Kaoru Mitoma", Midfielder, "Brighton", "p464787", 6.6, stats(7, 6, 6, 0, 2350, 0, 0)),
        player("19", "James Maddison", Midfielder, "Tottenham", "p116643", 7.8, stats(10, 9, 4, 0, 2500, 0, 0)),
        player("20", "Son Heung-min", Midfielder, "Tottenham", "p85971", 9.6, stats(10, 6, 8, 0, 2800, 0, 0)),
        // Forwards
        player("21", "Erling Haaland", Forward, "Man City", "p223094", 14.0, stats(36, 8, 13, 0, 2750, 0, 0)),
        player("22", "Harry Kane", Forward, "Tottenham", "p78830", 11.5, stats(30, 3, 9, 0, 3300, 0, 0)),
        player("23", "Gabriel Jesus", Forward, "Arsenal", "p165153", 8.0, stats(11, 6, 10, 0, 2100, 0, 0)),
        player("24", "Ivan Toney", Forward, "Brentford", "p119807", 7.5, stats(20, 4, 11, 0, 3050, 0, 0)),
        player("25", "Ollie Watkins", Forward, "Aston Villa", "p178186", 7.9, stats(15, 6, 9, 0, 3100, 0, 0)),
        player("26", "Alexander Isak", Forward, "Newcastle", "p218031", 7.7, stats(10, 1, 7, 0, 1600, 0, 0)),
        player("27", "Callum Wilson", Forward, "Newcastle", "p66957", 7.6, stats(18, 5, 8, 0, 2000, 0, 0)),
        player("28", "Darwin Núñez", Forward, "Liverpool", "p447296", 7.4, stats(9, 3, 6, 0, 1800, 0, 0)),
        player("29", "Cody Gakpo", Forward, "Liverpool", "p220697", 7.2, stats(7, 2, 5, 0, 1500, 0, 0)),
        player("30", "Evan Ferguson", Forward, "Brighton", "p500756", 6.0, stats(6, 2, 4, 0, 1000, 0, 0)),
    ]
}
