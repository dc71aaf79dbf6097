//! Console game loops: oracle-assisted agent mode and two-player manual mode.

use crate::oracle::Oracle;
use crate::retry::RetryPolicy;
use crate::session::{Session, TurnOutput};
use anyhow::Result;
use futures::StreamExt;
use std::io::Write;
use std::sync::Arc;
use tictalk_engine::{Game, GameStatus, Move};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};

/// Runs the oracle-assisted loop: one utterance per turn, classified
/// and routed through the session.
///
/// The session ends on the literal `quit` token, on end of input, or
/// when the game reaches a win or draw.
#[instrument(skip(oracle, policy))]
pub async fn run_agent_mode(oracle: Arc<dyn Oracle>, policy: RetryPolicy) -> Result<()> {
    let mut session = Session::new(oracle, policy);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", session.snapshot().render());
    println!("You are X. Make a move, ask about the game, or type 'quit' to leave.");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            info!("End of input, leaving session");
            break;
        };
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }
        if utterance.eq_ignore_ascii_case("quit") {
            println!("Goodbye.");
            break;
        }

        match session.handle(utterance).await {
            TurnOutput::Board(snapshot) => println!("{}", snapshot.render()),
            TurnOutput::Rejected(snapshot) => println!("Error: {}", snapshot.error()),
            TurnOutput::Narration(mut stream) => {
                while let Some(fragment) = stream.next().await {
                    match fragment {
                        Ok(text) => {
                            print!("{text}");
                            std::io::stdout().flush()?;
                        }
                        Err(e) => {
                            warn!(error = %e, "Oracle stream failed mid-reply");
                            println!("\nThe agent lost its train of thought. Please try again.");
                            break;
                        }
                    }
                }
                println!();
            }
            TurnOutput::Retry(message) => println!("{message}"),
            TurnOutput::GameOver(status, snapshot) => {
                println!("{}", snapshot.render());
                announce(status);
                break;
            }
        }
    }

    Ok(())
}

/// Runs the two-player loop: strict alternation, no oracle.
///
/// Non-integer input re-prompts without consuming a turn; the loop
/// exits with a win or draw message.
#[instrument]
pub fn run_manual_mode() -> Result<()> {
    let mut game = Game::new();
    let stdin = std::io::stdin();

    loop {
        let snapshot = game.snapshot();
        println!("\nCurrent board:");
        println!("{}", snapshot.render());

        match game.status() {
            GameStatus::InProgress => {}
            status => {
                announce(status);
                break;
            }
        }

        let player = game.expected_player();
        print!("{player} move (1-9): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let position: u8 = match line.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                println!("Invalid input. Please enter a number between 1 and 9.");
                continue;
            }
        };

        let result = game.play(Move::new(player, position));
        if !result.accepted() {
            println!("Error: {}", result.error());
        }
    }

    Ok(())
}

fn announce(status: GameStatus) {
    match status {
        GameStatus::Won(player) => println!("Game over! Winner: {player}"),
        GameStatus::Draw => println!("Game over! It's a draw."),
        GameStatus::InProgress => {}
    }
}
