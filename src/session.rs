//! Line-oriented play loop over any async reader/writer pair.
//!
//! Each line is either a session command (`board`, `moves e2`, `json`,
//! `quit`) or a move handed to [`GameState::apply_notated_move`].

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::engine::game::GameState;
use crate::engine::types::{ChessError, Square};
use crate::models::BoardSnapshot;

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Empty,
    Quit,
    Board,
    Moves(&'a str),
    Json,
    Move(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line.split_whitespace().collect::<Vec<_>>()[..] {
            [] => Command::Empty,
            ["quit"] | ["exit"] => Command::Quit,
            ["board"] => Command::Board,
            ["json"] => Command::Json,
            ["moves", square] => Command::Moves(square),
            ["moves"] => Command::Moves(""),
            _ => Command::Move(line),
        }
    }
}

enum Reply {
    Quit,
    Text(String),
    Silent,
}

/// Drive `game` from `reader` until end of input or `quit`.
pub async fn run_session<R, W>(
    game: &mut GameState,
    reader: R,
    writer: &mut W,
    prompt: &str,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(turn = %game.current_turn(), "session started");
    writer
        .write_all(format!("{}\n", game.board()).as_bytes())
        .await?;

    let mut lines = reader.lines();
    loop {
        writer
            .write_all(format!("{prompt} ({} to move) ", game.current_turn()).as_bytes())
            .await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match respond(game, line.trim())? {
            Reply::Quit => break,
            Reply::Text(text) => writer.write_all(text.as_bytes()).await?,
            Reply::Silent => {}
        }
    }

    writer.write_all(b"\n").await?;
    writer.flush().await?;
    info!("session ended");
    Ok(())
}

fn respond(game: &mut GameState, line: &str) -> std::io::Result<Reply> {
    let command = Command::parse(line);
    debug!(?command, "session input");

    let reply = match command {
        Command::Empty => Reply::Silent,
        Command::Quit => Reply::Quit,
        Command::Board => Reply::Text(format!("{}\n", game.board())),
        Command::Json => {
            let json = serde_json::to_string(&BoardSnapshot::from_game(game))?;
            Reply::Text(format!("{json}\n"))
        }
        Command::Moves(arg) => Reply::Text(match Square::from_algebraic(arg) {
            Some(sq) => {
                let targets: Vec<String> =
                    game.legal_moves(sq).iter().map(|t| t.to_string()).collect();
                if targets.is_empty() {
                    format!("{sq}: no moves\n")
                } else {
                    format!("{sq}: {}\n", targets.join(" "))
                }
            }
            None => format!("{}\n", ChessError::InvalidSquare(arg.to_string())),
        }),
        Command::Move(text) => Reply::Text(match game.apply_notated_move(text) {
            Ok(record) => format!("{record}\n{}\n", game.board()),
            Err(err) => format!("Invalid move: {err}\n"),
        }),
    };
    Ok(reply)
}
