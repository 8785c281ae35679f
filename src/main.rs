use std::io::{self, BufRead, Write};

use broadside::{
    init_logging,
    text::{self, Command},
    GameEvent, GameSession, Opponent, Phase, RandomOpponent, Side,
};

use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2000, help = "Pause before the computer fires, in milliseconds")]
        delay_ms: u64,
    },
    /// Play unattended games with random shots on both sides and print a JSON summary.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: u32,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, delay_ms } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            play(make_rng(seed), Duration::from_millis(delay_ms)).await?;
        }
        Commands::Sim { seed, games } => {
            let summary = simulate(make_rng(seed), seed, games)?;
            println!("{}", serde_json::to_string(&summary)?);
        }
    }
    Ok(())
}

fn announce(events: &[GameEvent]) {
    for event in events {
        if let Some(line) = text::describe_event(event) {
            println!("{}", line);
        }
    }
}

fn read_command(prompt: &str) -> anyhow::Result<Option<Command>> {
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match text::parse_command(&line) {
            Ok(Command::Quit) => return Ok(None),
            Ok(Command::Help) => print_help(),
            Ok(cmd) => return Ok(Some(cmd)),
            Err(e) => println!("✗ {}", e),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  A1..J10  place the next ship there, or fire at that cell");
    println!("  r        rotate the next ship (placement only)");
    println!("  auto     place the remaining ships randomly");
    println!("  q        quit");
}

fn print_boards(session: &GameSession) {
    let view = session.view();
    println!("\nYour grid:");
    print!("{}", text::render_grid(&view.human));
    if !matches!(view.phase, Phase::Placing) {
        println!("\nOpponent's grid:");
        print!("{}", text::render_grid(&view.computer));
    }
}

async fn play(mut rng: SmallRng, delay: Duration) -> anyhow::Result<()> {
    let mut session = GameSession::new();
    announce(&session.start_game(&mut rng)?);
    print_help();

    loop {
        match session.phase() {
            Phase::Menu => announce(&session.start_game(&mut rng)?),
            Phase::Placing => {
                print_boards(&session);
                let Some(ship) = session.next_ship() else {
                    continue;
                };
                let prompt = format!(
                    "Place your {} (size {}, {:?}): ",
                    ship.name(),
                    ship.length(),
                    session.orientation()
                );
                match read_command(&prompt)? {
                    None => return Ok(()),
                    Some(Command::Cell(r, c)) => announce(&session.place_ship(r, c)),
                    Some(Command::Rotate) => {
                        println!("Orientation: {:?}", session.toggle_orientation());
                    }
                    Some(Command::Auto) => announce(&session.auto_place_human(&mut rng)?),
                    Some(_) => {}
                }
            }
            Phase::Playing(Side::Human) => {
                print_boards(&session);
                match read_command("Your turn, fire at: ")? {
                    None => return Ok(()),
                    Some(Command::Cell(r, c)) => {
                        let events = session.attack(r, c);
                        if events.is_empty() {
                            println!("You already fired at {}.", text::coord_label(r, c));
                        }
                        announce(&events);
                    }
                    Some(_) => println!("Enter a cell such as B7."),
                }
            }
            Phase::Playing(Side::Computer) => {
                println!("Opponent's turn...");
                tokio::time::sleep(delay).await;
                announce(&session.computer_turn(&mut rng)?);
            }
            Phase::GameOver { winner } => {
                print_boards(&session);
                info!("game over, winner {:?}", winner);
                print!("Play again? [y/N]: ");
                io::stdout().flush()?;
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                if !line.trim().eq_ignore_ascii_case("y") {
                    return Ok(());
                }
                session.reset_to_menu();
            }
        }
    }
}

fn simulate(mut rng: SmallRng, seed: Option<u64>, games: u32) -> anyhow::Result<serde_json::Value> {
    let mut gunner = RandomOpponent::new();
    let mut results = Vec::new();
    let mut human_wins = 0u32;

    for _ in 0..games {
        let mut session = GameSession::new();
        let mut events = session.start_game(&mut rng)?;
        events.extend(session.auto_place_human(&mut rng)?);

        while session.turn() == Some(Side::Human) {
            let target = session.computer_board();
            let (r, c) = gunner.select_target(&mut rng, &target.hits(), &target.misses())?;
            events.extend(session.attack_and_reply(r, c, &mut rng)?);
        }

        let shots = |side: Side| {
            events
                .iter()
                .filter(|e| {
                    matches!(e, GameEvent::ShotHit { by, .. } | GameEvent::ShotMiss { by, .. } if *by == side)
                })
                .count()
        };
        let winner = session
            .winner()
            .ok_or_else(|| anyhow::anyhow!("game ended without a winner"))?;
        if winner == Side::Human {
            human_wins += 1;
        }
        results.push(json!({
            "winner": winner,
            "human_shots": shots(Side::Human),
            "computer_shots": shots(Side::Computer),
        }));
    }

    Ok(json!({
        "seed": seed,
        "games": results,
        "human_wins": human_wins,
        "computer_wins": games - human_wins,
    }))
}
