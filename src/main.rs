use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_stats::api::{build_router, state::AppState};
use league_stats::calculate::tier_for_rank;
use league_stats::config::AppConfig;
use league_stats::engine::StatsEngine;
use league_stats::models::{LeaderboardMode, PlayerId, SeasonFilter, StatKey, Tier};
use league_stats::storage::{JsonlStore, LeagueData};

#[derive(Parser)]
#[command(name = "league-stats")]
#[command(about = "League statistics aggregation, standings and leaderboards")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Import teams, players, games and stat lines from a JSON file
    Import {
        /// JSON file with `teams`, `players`, `games` and `stat_lines`
        file: PathBuf,
    },

    /// Rebuild season profiles from stat lines
    Recompute {
        /// Only this player
        #[arg(long)]
        player: Option<String>,
    },

    /// Print standings
    Standings {
        /// Season tag, or "all"
        #[arg(long)]
        season: Option<String>,

        /// Count only games against this conference
        #[arg(long)]
        conference: Option<String>,
    },

    /// Print tier bands
    Tiers {
        #[arg(long)]
        season: Option<String>,

        #[arg(long)]
        conference: Option<String>,
    },

    /// Print a leaderboard page
    Leaderboard {
        /// Stat key (points, reb, ast, fg_pct, eff, ...)
        #[arg(long, default_value = "points")]
        stat: String,

        #[arg(long)]
        season: Option<String>,

        /// averages or totals
        #[arg(long, default_value = "averages")]
        mode: String,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        page_size: Option<u32>,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting league-stats v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Data directory: {}", config.data_dir.display());

    let store = Arc::new(JsonlStore::new(config.storage()));
    let engine = Arc::new(StatsEngine::new(store));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = config.server.bind_addr();
            let app = build_router(AppState::new(engine, config));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Import { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let data: LeagueData = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", file.display()))?;

            let summary = engine.import(data).await?;
            println!("\n=== Import Results ===");
            println!("Teams:            {}", summary.teams);
            println!("Players:          {}", summary.players);
            println!("Games:            {}", summary.games);
            println!("Stat lines:       {}", summary.stat_lines);
            println!("Profiles rebuilt: {}", summary.profiles_recomputed);
        }
        Commands::Recompute { player: Some(id) } => {
            let player_id = PlayerId::from(id);
            let profile = engine.recompute_profile(&player_id).await?;
            println!(
                "{}: {} games, {:.1} pts, {:.1} reb, {:.1} ast, {:.1} eff",
                player_id,
                profile.games_played,
                profile.points,
                profile.rebounds,
                profile.assists,
                profile.efficiency
            );
        }
        Commands::Recompute { player: None } => {
            let count = engine.recompute_all().await?;
            println!("Recomputed {} profiles", count);
        }
        Commands::Standings { season, conference } => {
            let season = SeasonFilter::parse(season.as_deref());
            let standings = engine.standings(&season, conference.as_deref()).await?;
            let n = standings.len();

            println!("\n=== Standings ({}) ===", season);
            println!(
                "{:>3}  {:<24} {:>4} {:>4} {:>6} {:>6}  {:<5} Tier",
                "#", "Team", "W", "L", "PCT", "DIFF", "STRK"
            );
            for (rank, s) in standings.iter().enumerate() {
                let tier = tier_for_rank(rank, n).map(|t| t.to_string());
                println!(
                    "{:>3}  {:<24} {:>4} {:>4} {:>6.3} {:>+6}  {:<5} {}",
                    rank + 1,
                    s.team_name,
                    s.wins,
                    s.losses,
                    s.win_percentage,
                    s.point_differential,
                    s.streak,
                    tier.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Tiers { season, conference } => {
            let season = SeasonFilter::parse(season.as_deref());
            let bands = engine.tiers(&season, conference.as_deref()).await?;

            println!("\n=== Tiers ({}) ===", season);
            for tier in Tier::ALL {
                let names: Vec<&str> = bands
                    .band(tier)
                    .iter()
                    .map(|s| s.team_name.as_str())
                    .collect();
                println!("{}: {}", tier, names.join(", "));
            }
        }
        Commands::Leaderboard {
            stat,
            season,
            mode,
            page,
            page_size,
        } => {
            let stat: StatKey = stat.parse().map_err(anyhow::Error::msg)?;
            let mode: LeaderboardMode = mode.parse().map_err(anyhow::Error::msg)?;
            let season = SeasonFilter::parse(season.as_deref());
            let limits = config.leaderboard;
            let pagination = league_stats::calculate::Pagination::with_limits(
                page,
                page_size,
                limits.page_size,
                limits.max_page_size,
            );

            let result = engine.leaderboard(stat, &season, mode, &pagination).await?;
            println!("\n=== {} leaders ({}, {:?}) ===", stat, season, mode);
            for entry in &result.items {
                println!(
                    "{:>3}  {:<24} {:>8.2}  ({} gp)",
                    entry.rank, entry.player_name, entry.value, entry.games_played
                );
            }
            println!("{}", result.meta.summary());
        }
    }

    Ok(())
}
