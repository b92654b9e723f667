//! Selection state machine
//!
//! A presentation layer forwards raw "touch" input here and renders the
//! events it gets back. At most one piece is selected at a time, and the
//! highlighted move set is recomputed on every selection, so stale
//! highlights cannot survive a board change.

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::game::{GameResult, GameSession, MoveOutcome, MoveSet};
use crate::pieces::PieceId;

#[derive(Clone, Debug, Default)]
enum SelectionState {
    #[default]
    Idle,
    Selected { piece: PieceId, moves: MoveSet },
}

/// What a touch did, for the presentation layer to render
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A piece was selected; highlight its go-cells and attack-cells
    Highlighted { piece: PieceId, moves: MoveSet },
    /// The selection was dropped; clear all highlights
    Cleared,
    /// The selected piece moved; redraw from the session state
    Moved { piece: PieceId, outcome: MoveOutcome },
    /// The touch had no effect
    Ignored,
}

/// Tracks which piece is selected and routes touches to the session
#[derive(Clone, Debug, Default)]
pub struct Selector {
    state: SelectionState,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected piece and its highlighted moves, if any
    pub fn selected(&self) -> Option<(PieceId, &MoveSet)> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Selected { piece, moves } => Some((*piece, moves)),
        }
    }

    /// Handle a touch on a piece.
    ///
    /// Selecting an own-turn piece highlights its moves and replaces any
    /// previous selection. Touching the selected piece again deselects it.
    /// Enemy pieces and finished games ignore the touch; capturing an
    /// enemy goes through [`Selector::touch_cell`] on its cell instead.
    pub fn touch_piece(&mut self, session: &mut GameSession, id: PieceId) -> SelectionEvent {
        if session.result() != GameResult::Ongoing {
            return SelectionEvent::Ignored;
        }
        let piece = match session.piece(id) {
            Some(piece) => *piece,
            None => return SelectionEvent::Ignored,
        };
        if piece.team != session.current_turn() {
            return SelectionEvent::Ignored;
        }
        if let SelectionState::Selected { piece: selected, .. } = self.state {
            if selected == id {
                self.state = SelectionState::Idle;
                return SelectionEvent::Cleared;
            }
        }
        let moves = session
            .legal_moves(id)
            .expect("selected piece vanished from session");
        self.state = SelectionState::Selected {
            piece: id,
            moves: moves.clone(),
        };
        SelectionEvent::Highlighted { piece: id, moves }
    }

    /// Handle a touch on a cell.
    ///
    /// With a selection active, a highlighted cell executes the move and a
    /// cell holding an own-turn piece re-routes to [`Selector::touch_piece`].
    /// Anything else is ignored and the selection stands.
    pub fn touch_cell(&mut self, session: &mut GameSession, at: Coord) -> SelectionEvent {
        if session.result() != GameResult::Ongoing || !at.is_valid() {
            return SelectionEvent::Ignored;
        }
        if let SelectionState::Selected { piece, ref moves } = self.state {
            if moves.contains(at) {
                return self.apply(session, piece, at);
            }
        }
        match session.piece_at(at) {
            Some(piece) if piece.team == session.current_turn() => {
                let id = piece.id;
                self.touch_piece(session, id)
            }
            _ => SelectionEvent::Ignored,
        }
    }

    fn apply(&mut self, session: &mut GameSession, piece: PieceId, dest: Coord) -> SelectionEvent {
        self.state = SelectionState::Idle;
        match session.apply_move(piece, dest) {
            Ok(outcome) => SelectionEvent::Moved { piece, outcome },
            // The destination came out of this session's own move set
            Err(err) => unreachable!("selected destination rejected: {err}"),
        }
    }
}
