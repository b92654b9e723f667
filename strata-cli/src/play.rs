//! Play command - interactive terminal game
//!
//! The loop reads one coordinate per line and feeds it to the selection
//! state machine: the first touch on an own piece highlights its moves,
//! a touch on a highlighted cell executes the move.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use strata_core::{
    board::{Coord, COLS, LAYERS, ROWS},
    pieces::Team,
    GameSession, SelectionEvent, Selector, Setup,
};

#[derive(Args)]
pub struct PlayArgs {
    /// JSON file with a custom starting position
    #[arg(long)]
    pub setup: Option<PathBuf>,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let mut session = match &args.setup {
        Some(path) => Setup::load(path)?.to_session(),
        None => GameSession::new(),
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    play_loop(&mut session, stdin.lock(), stdout.lock())
}

/// Drive a session from line-based input until quit or game over
fn play_loop(session: &mut GameSession, input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut selector = Selector::new();
    render(session, &selector, &mut out)?;
    writeln!(out, "{} to move (coordinate like e2@1, or help)", session.current_turn())?;

    for line in input.lines() {
        let line = line?;
        let cmd = line.trim();
        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "enter a coordinate like e2@1 to select a piece,")?;
                writeln!(out, "then a highlighted cell (+ go, x attack) to move;")?;
                writeln!(out, "quit exits")?;
            }
            _ => match cmd.parse::<Coord>() {
                Ok(at) => {
                    let event = selector.touch_cell(session, at);
                    describe(&event, &mut out)?;
                    render(session, &selector, &mut out)?;
                    if let Some(winner) = session.result().winner() {
                        writeln!(out, "{winner} wins")?;
                        return Ok(());
                    }
                    writeln!(out, "{} to move", session.current_turn())?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
        }
    }
    Ok(())
}

fn describe(event: &SelectionEvent, out: &mut impl Write) -> Result<()> {
    match event {
        SelectionEvent::Highlighted { moves, .. } => {
            writeln!(
                out,
                "selected: {} go-cells, {} attack-cells",
                moves.go.len(),
                moves.attacks.len()
            )?;
        }
        SelectionEvent::Cleared => writeln!(out, "selection cleared")?,
        SelectionEvent::Moved { outcome, .. } => {
            writeln!(out, "moved")?;
            if outcome.captured.is_some() {
                writeln!(out, "capture!")?;
            }
            if outcome.promoted.is_some() {
                writeln!(out, "pawn promoted to queen")?;
            }
        }
        SelectionEvent::Ignored => writeln!(out, "nothing there")?,
    }
    Ok(())
}

/// Draw the three layers top to bottom, white uppercase, black lowercase
fn render(session: &GameSession, selector: &Selector, out: &mut impl Write) -> Result<()> {
    let highlight = selector.selected().map(|(_, moves)| moves);
    for layer in (1..=LAYERS).rev() {
        writeln!(out, "layer @{layer}")?;
        for row in (1..=ROWS).rev() {
            write!(out, "{row} ")?;
            for col in 1..=COLS {
                let at = Coord::new(layer, row, col);
                let glyph = match session.piece_at(at) {
                    Some(piece) => {
                        let letter = piece.kind.letter();
                        if piece.team == Team::White {
                            letter.to_ascii_uppercase()
                        } else {
                            letter
                        }
                    }
                    None => match highlight {
                        Some(moves) if moves.go.contains(&at) => '+',
                        _ => '.',
                    },
                };
                let glyph = match highlight {
                    Some(moves) if moves.is_attack(at) => 'x',
                    _ => glyph,
                };
                write!(out, "{glyph} ")?;
            }
            writeln!(out)?;
        }
        writeln!(out, "  a b c d e f g h")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use strata_core::game::GameResult;
    use strata_core::pieces::PieceKind;

    fn coord(text: &str) -> Coord {
        text.parse().unwrap()
    }

    fn script(session: &mut GameSession, lines: &str) -> String {
        let mut out = Vec::new();
        play_loop(session, Cursor::new(lines), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_scripted_opening_move() {
        let mut session = GameSession::new();
        let output = script(&mut session, "e2@1\ne4@1\nquit\n");

        assert!(output.contains("selected:"));
        assert!(output.contains("moved"));
        assert_eq!(session.piece_at(coord("e4@1")).unwrap().kind, PieceKind::Pawn);
        assert_eq!(session.current_turn(), strata_core::Team::Black);
    }

    #[test]
    fn test_garbage_and_empty_lines_are_harmless() {
        let mut session = GameSession::new();
        let output = script(&mut session, "\nnonsense\nz9@9\nhelp\nquit\n");

        assert!(output.contains("malformed coordinate"));
        assert_eq!(session.current_turn(), strata_core::Team::White);
    }

    #[test]
    fn test_touching_empty_cell_reports_nothing_there() {
        let mut session = GameSession::new();
        let output = script(&mut session, "d5@2\nquit\n");
        assert!(output.contains("nothing there"));
    }

    #[test]
    fn test_king_capture_ends_loop() {
        let mut session = GameSession::from_placements(
            &[(PieceKind::Queen, coord("d4@2"))],
            &[(PieceKind::King, coord("d5@2"))],
        );
        let output = script(&mut session, "d4@2\nd5@2\nd5@2\n");

        assert!(output.contains("capture!"));
        assert!(output.contains("white wins"));
        assert_eq!(session.result(), GameResult::WhiteWins);
    }
}
