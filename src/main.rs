// Squad builder entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config (copying defaults on first run)
// 3. Open the database
// 4. Restore persisted state or seed the built-in catalog
// 5. Print the catalog, squad, and ledger summary

use anyhow::Context;
use tracing::info;

use gaffer::app::AppState;
use gaffer::config;
use gaffer::db::Database;
use gaffer::scoring::Position;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Squad builder starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: team={}, formation={}, db={}",
        config.team_name, config.formation, config.db_path
    );

    let db = Database::open(&config.db_path).context("failed to open database")?;
    let app = AppState::load_or_seed(config, db).context("failed to load application state")?;

    print_summary(&app);

    info!("Squad builder shut down cleanly");
    Ok(())
}

fn print_summary(app: &AppState) {
    println!("{} ({})", app.config.team_name, app.config.formation);
    println!();

    println!("Catalog: {} players", app.catalog().len());
    for pos in Position::all() {
        println!("  {:<3} {}", pos.display_str(), app.catalog().by_position(pos).len());
    }
    println!();

    let summary = app.squad_summary();
    println!(
        "Squad: {}/11 selected, formation {}, {} pts, £{:.1}m",
        summary.player_count, summary.formation, summary.total_points, summary.total_value
    );
    for player in app.squad_players() {
        println!(
            "  {:<3} {:<24} {:<14} {:>4} pts",
            player.position.display_str(),
            player.name,
            player.team,
            player.total_points
        );
    }
    println!();

    println!("Matches: {} recorded", app.ledger().len());
    for record in app.ledger().records() {
        println!(
            "  vs {:<20} {:>5}  {:>4} pts  {}",
            record.opponent,
            record.score_line(),
            record.total_points,
            record.date.format("%Y-%m-%d")
        );
    }
}

/// Initialize tracing to log to a file rather than the terminal output.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gaffer.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gaffer=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
