use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use arcade_connect_four::ai::{AiConfig, Difficulty, Engine, TierAgent};
use arcade_connect_four::arena::{play_match, MatchStats};
use arcade_connect_four::config::AppConfig;
use arcade_connect_four::game::Player;

/// Play the AI tiers against each other and print win rates.
#[derive(Parser)]
#[command(name = "arena", about = "Pit Connect Four AI tiers against each other")]
struct Cli {
    /// Games per pairing; the first move alternates between sides
    #[arg(long, default_value_t = 20)]
    games: usize,

    /// Base seed for the engines' random sources
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Path to TOML configuration file
    #[arg(long, default_value = "arcade.toml")]
    config: PathBuf,
}

fn tier_agent(config: &AiConfig, difficulty: Difficulty, seed: u64) -> TierAgent {
    TierAgent::new(Engine::seeded(config.clone(), seed), difficulty)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    println!(
        "{:<8} {:<8} {:>7} {:>7} {:>7} {:>8}",
        "tier", "vs", "win%", "loss%", "draw%", "avg len"
    );

    for (i, &tier) in Difficulty::ALL.iter().enumerate() {
        for (j, &opponent) in Difficulty::ALL.iter().enumerate() {
            let base = cli.seed.wrapping_add((i * 3 + j) as u64 * 1_000_003);
            let mut agent = tier_agent(&config.ai, tier, base);
            let mut other = tier_agent(&config.ai, opponent, base.wrapping_add(1));
            let mut stats = MatchStats::with_capacity(cli.games);

            for game in 0..cli.games {
                let first = if game % 2 == 0 {
                    Player::Computer
                } else {
                    Player::Human
                };
                let result = play_match(&mut agent, &mut other, first)
                    .with_context(|| format!("{tier} vs {opponent}, game {game}"))?;
                stats.record(result);
            }

            info!(%tier, %opponent, games = stats.total_games(), "pairing finished");
            println!(
                "{:<8} {:<8} {:>6.1}% {:>6.1}% {:>6.1}% {:>8.1}",
                tier.as_str(),
                opponent.as_str(),
                stats.win_rate(Player::Computer, cli.games) * 100.0,
                stats.win_rate(Player::Human, cli.games) * 100.0,
                stats.draw_rate(cli.games) * 100.0,
                stats.average_game_length(cli.games),
            );
        }
    }

    Ok(())
}
