use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use arcade_connect_four::ai::{Difficulty, Engine};
use arcade_connect_four::config::AppConfig;
use arcade_connect_four::game::{Board, Outcome, Player, COLS};
use arcade_connect_four::session::{Session, TracingReporter};

/// Play Connect Four against the computer.
#[derive(Parser)]
#[command(name = "play", about = "Play Connect Four against the computer")]
struct Cli {
    /// AI tier: easy, medium or hard (defaults to the configured tier)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "arcade.toml")]
    config: PathBuf,

    /// Seed the engine for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

enum Command {
    Drop(usize),
    Restart,
    Difficulty(Difficulty),
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("q"), None) => Ok(Command::Quit),
        (Some("r"), None) => Ok(Command::Restart),
        (Some("d"), Some(tier)) => tier
            .parse()
            .map(Command::Difficulty)
            .map_err(|e| format!("{e}")),
        (Some(word), None) => match word.parse::<usize>() {
            Ok(n) if (1..=COLS).contains(&n) => Ok(Command::Drop(n - 1)),
            _ => Err(format!("expected a column 1-{COLS}, r, d <tier> or q")),
        },
        _ => Err(format!("expected a column 1-{COLS}, r, d <tier> or q")),
    }
}

fn print_board(board: &Board) {
    println!();
    println!("{board}");
    println!("{}", (1..=COLS).map(|c| c.to_string()).collect::<String>());
}

fn announce(outcome: &Outcome, score: Option<u32>) {
    match outcome.winner() {
        Some(Player::Human) => println!("You win!"),
        Some(Player::Computer) => println!("The computer wins."),
        None => println!("Draw."),
    }
    if let Some(score) = score {
        println!("Final score: {score}");
    }
    println!("r to play again, q to quit");
}

fn close(session: &mut Session<TracingReporter>) {
    if session.is_ended() {
        return;
    }
    match session.end_session() {
        Ok(total) => println!(
            "Session total: {total} over {} game(s).",
            session.games_played()
        ),
        Err(e) => println!("{e}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let difficulty = cli.difficulty.unwrap_or(config.session.default_difficulty);
    let delay = Duration::from_millis(config.session.computer_delay_ms);
    let mut engine = match cli.seed {
        Some(seed) => Engine::seeded(config.ai.clone(), seed),
        None => Engine::new(config.ai.clone()),
    };
    let mut session = Session::start(
        difficulty,
        config.session.clone(),
        config.scoring.clone(),
        TracingReporter,
    );

    println!("Connect Four ({difficulty}). You are X, the computer is O.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if !session.is_over() && session.turn() == Player::Computer {
            thread::sleep(delay);
            let (column, outcome) = session
                .request_computer_move(&mut engine)
                .context("computer move failed")?;
            println!("Computer plays column {}", column + 1);
            if outcome.is_terminal() {
                print_board(session.board());
                announce(&outcome, session.final_score());
            }
            continue;
        }

        if !session.is_over() {
            print_board(session.board());
        }
        print!("> ");
        io::stdout().flush().context("flushing stdout")?;

        let Some(line) = lines.next() else {
            close(&mut session);
            break;
        };
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => {
                close(&mut session);
                break;
            }
            Ok(Command::Restart) => {
                session.restart();
                println!("New game ({}).", session.difficulty());
            }
            Ok(Command::Difficulty(tier)) => match session.set_difficulty(tier) {
                Ok(()) => println!("Difficulty set to {tier}."),
                Err(e) => println!("{e}"),
            },
            Ok(Command::Drop(column)) => match session.play_human_move(column) {
                Ok(outcome) if outcome.is_terminal() => {
                    print_board(session.board());
                    announce(&outcome, session.final_score());
                }
                Ok(_) => {}
                Err(e) => println!("{e}"),
            },
            Err(msg) => println!("{msg}"),
        }
    }

    Ok(())
}
