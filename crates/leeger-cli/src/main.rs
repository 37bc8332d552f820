// leeger entry point.
//
// 1. Initialize tracing (stderr, stdout stays machine-readable)
// 2. Load the league record (JSON) and the statistic options (TOML)
// 3. Compute one statistic, league-wide or for a single season
// 4. Print the result as JSON keyed by owner or team name

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

use leeger_core::calc::{all_time, awal, game_outcome, points, year_outcome};
use leeger_core::config::load_options;
use leeger_core::{League, StatOptions, Year};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stat {
    Wins,
    Losses,
    Ties,
    GamesPlayed,
    WinPercentage,
    Awal,
    AwalPerGame,
    OpponentAwal,
    OpponentAwalPerGame,
    PointsScored,
    OpponentPointsScored,
    PointsScoredPerGame,
    ChampionshipCount,
}

#[derive(Debug, Parser)]
#[command(name = "leeger", version)]
#[command(about = "Filtered statistics over a multi-season fantasy league record")]
struct Args {
    /// League record in JSON
    league: PathBuf,

    /// Statistic to compute
    #[arg(value_enum)]
    stat: Stat,

    /// Options file in TOML (yearNumberStart, weekNumberEnd, onlyPostSeason, ...)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Compute across every season in range, keyed by owner (default)
    #[arg(long, conflicts_with = "year")]
    all_time: bool,

    /// Compute for one season only, keyed by team
    #[arg(long)]
    year: Option<i32>,
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.league)
        .with_context(|| format!("failed to read league file {}", args.league.display()))?;
    let league = League::from_json_str(&text)
        .with_context(|| format!("failed to import league from {}", args.league.display()))?;
    info!(
        "Loaded league '{}': {} owners, {} seasons",
        league.name,
        league.owners.len(),
        league.years.len()
    );

    let options = match &args.options {
        Some(path) => load_options(path).context("failed to load statistic options")?,
        None => StatOptions::default(),
    };

    let output = match args.year {
        Some(year_number) => {
            let year = league
                .year(year_number)
                .with_context(|| format!("year {year_number} is not in league '{}'", league.name))?;
            info!("Computing {:?} for season {}", args.stat, year_number);
            season_stat(year, args.stat, &options)?
        }
        None => {
            info!("Computing all-time {:?}", args.stat);
            all_time_stat(&league, args.stat, &options)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn all_time_stat(league: &League, stat: Stat, options: &StatOptions) -> Result<serde_json::Value> {
    let names: HashMap<_, _> = league.owners.iter().map(|o| (&o.id, o.name.as_str())).collect();
    let label = |id: &leeger_core::OwnerId| names.get(id).copied().unwrap_or(id.as_str()).to_string();

    let value = match stat {
        Stat::Wins => by_name(all_time::wins(league, options)?, label)?,
        Stat::Losses => by_name(all_time::losses(league, options)?, label)?,
        Stat::Ties => by_name(all_time::ties(league, options)?, label)?,
        Stat::GamesPlayed => by_name(all_time::games_played(league, options)?, label)?,
        Stat::WinPercentage => by_name(all_time::win_percentage(league, options)?, label)?,
        Stat::Awal => by_name(all_time::awal(league, options)?, label)?,
        Stat::AwalPerGame => by_name(all_time::awal_per_game(league, options)?, label)?,
        Stat::OpponentAwal => by_name(all_time::opponent_awal(league, options)?, label)?,
        Stat::OpponentAwalPerGame => {
            by_name(all_time::opponent_awal_per_game(league, options)?, label)?
        }
        Stat::PointsScored => by_name(all_time::points_scored(league, options)?, label)?,
        Stat::OpponentPointsScored => {
            by_name(all_time::opponent_points_scored(league, options)?, label)?
        }
        Stat::PointsScoredPerGame => {
            by_name(all_time::points_scored_per_game(league, options)?, label)?
        }
        Stat::ChampionshipCount => by_name(all_time::championship_count(league, options)?, label)?,
    };
    Ok(value)
}

fn season_stat(year: &Year, stat: Stat, options: &StatOptions) -> Result<serde_json::Value> {
    let names: HashMap<_, _> = year.teams.iter().map(|t| (&t.id, t.name.as_str())).collect();
    let label = |id: &leeger_core::TeamId| names.get(id).copied().unwrap_or(id.as_str()).to_string();

    let value = match stat {
        Stat::Wins => by_name(game_outcome::wins(year, options)?, label)?,
        Stat::Losses => by_name(game_outcome::losses(year, options)?, label)?,
        Stat::Ties => by_name(game_outcome::ties(year, options)?, label)?,
        Stat::GamesPlayed => by_name(game_outcome::games_played(year, options)?, label)?,
        Stat::WinPercentage => by_name(game_outcome::win_percentage(year, options)?, label)?,
        Stat::Awal => by_name(awal::awal(year, options)?, label)?,
        Stat::AwalPerGame => by_name(awal::awal_per_game(year, options)?, label)?,
        Stat::OpponentAwal => by_name(awal::opponent_awal(year, options)?, label)?,
        Stat::OpponentAwalPerGame => by_name(awal::opponent_awal_per_game(year, options)?, label)?,
        Stat::PointsScored => by_name(points::points_scored(year, options)?, label)?,
        Stat::OpponentPointsScored => {
            by_name(points::opponent_points_scored(year, options)?, label)?
        }
        Stat::PointsScoredPerGame => {
            by_name(points::points_scored_per_game(year, options)?, label)?
        }
        Stat::ChampionshipCount => {
            by_name(year_outcome::championship_count(year, options)?, label)?
        }
    };
    Ok(value)
}

/// Re-key a result map by display name, sorted for stable output.
fn by_name<K, V, F>(values: HashMap<K, V>, label: F) -> Result<serde_json::Value>
where
    K: Eq + Hash,
    V: Serialize,
    F: Fn(&K) -> String,
{
    let named: BTreeMap<String, V> = values.into_iter().map(|(k, v)| (label(&k), v)).collect();
    Ok(serde_json::to_value(named)?)
}

fn init_tracing() -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leeger=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
