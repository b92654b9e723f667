//! Game session, move generation and move application

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Coord, Lattice, Step};
use crate::pieces::{PieceId, PieceKind, Team};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    pub fn for_winner(team: Team) -> Self {
        match team {
            Team::White => GameResult::WhiteWins,
            Team::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(self) -> Option<Team> {
        match self {
            GameResult::Ongoing => None,
            GameResult::WhiteWins => Some(Team::White),
            GameResult::BlackWins => Some(Team::Black),
        }
    }
}

/// A piece on the board.
///
/// The coordinate here is the source of truth for where the piece stands;
/// the lattice occupant entries are a derived index.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub team: Team,
    pub kind: PieceKind,
    pub coord: Coord,
    /// Set after the first accepted move; gates the pawn double-step
    pub has_moved: bool,
    pub captured: bool,
}

/// Live pieces for one side
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pieces: FxHashMap<PieceId, Piece>,
}

impl Registry {
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    fn insert(&mut self, piece: Piece) {
        self.pieces.insert(piece.id, piece);
    }

    fn remove(&mut self, id: PieceId) -> Option<Piece> {
        self.pieces.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }
}

/// Legal destinations for one piece.
///
/// Go-cells are empty and reachable; attack-cells hold an enemy piece and
/// terminate their ray. The two sets are disjoint. The full set is computed
/// before it is exposed, so there is no per-cell highlight state to clear.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSet {
    pub go: Vec<Coord>,
    pub attacks: Vec<Coord>,
}

impl MoveSet {
    pub fn contains(&self, at: Coord) -> bool {
        self.go.contains(&at) || self.attacks.contains(&at)
    }

    pub fn is_attack(&self, at: Coord) -> bool {
        self.attacks.contains(&at)
    }

    pub fn is_empty(&self) -> bool {
        self.go.is_empty() && self.attacks.is_empty()
    }
}

/// Life-cycle events produced by an accepted move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Piece removed from the opposing registry
    pub captured: Option<PieceId>,
    /// Replacement piece created by pawn promotion
    pub promoted: Option<(PieceId, PieceKind)>,
    /// Winner, when the captured piece was a king
    pub game_over: Option<Team>,
}

/// Rejected move or query; the session state is unchanged
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece with id {0}")]
    UnknownPiece(PieceId),
    #[error("piece belongs to {piece} but it is {turn}'s turn")]
    WrongTurn { piece: Team, turn: Team },
    #[error("{0} is not a legal destination")]
    IllegalDestination(Coord),
    #[error("the game is over")]
    GameOver,
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// Full game state: lattice, per-team registries, turn and result.
///
/// All mutation goes through [`GameSession::apply_move`]; callers submit
/// only destinations previously produced by [`GameSession::legal_moves`],
/// and anything else is rejected without touching the state.
#[derive(Clone, Debug)]
pub struct GameSession {
    lattice: Lattice,
    white: Registry,
    black: Registry,
    turn: Team,
    result: GameResult,
    next_id: u32,
}

impl GameSession {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game with the standard starting position
    pub fn new() -> Self {
        crate::setup::Setup::standard().to_session()
    }

    /// Create a game from explicit piece placements
    pub fn from_placements(
        white: &[(PieceKind, Coord)],
        black: &[(PieceKind, Coord)],
    ) -> Self {
        let mut session = Self {
            lattice: Lattice::new(),
            white: Registry::default(),
            black: Registry::default(),
            turn: Team::White,
            result: GameResult::Ongoing,
            next_id: 0,
        };
        for &(kind, coord) in white {
            session.spawn(Team::White, kind, coord);
        }
        for &(kind, coord) in black {
            session.spawn(Team::Black, kind, coord);
        }
        session
    }

    fn spawn(&mut self, team: Team, kind: PieceKind, coord: Coord) -> PieceId {
        assert!(coord.is_valid(), "placement off the board: {coord}");
        assert!(
            !self.lattice.cell(coord).is_occupied(),
            "two pieces placed on {coord}"
        );
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.registry_mut(team).insert(Piece {
            id,
            team,
            kind,
            coord,
            has_moved: false,
            captured: false,
        });
        self.lattice.set_occupant(coord, Some((team, id)));
        id
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_turn(&self) -> Team {
        self.turn
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn registry(&self, team: Team) -> &Registry {
        match team {
            Team::White => &self.white,
            Team::Black => &self.black,
        }
    }

    fn registry_mut(&mut self, team: Team) -> &mut Registry {
        match team {
            Team::White => &mut self.white,
            Team::Black => &mut self.black,
        }
    }

    /// Look a piece up by id on either side
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.white.get(id).or_else(|| self.black.get(id))
    }

    /// Piece standing on a cell, if any
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        let (team, id) = self.lattice.cell(at).occupant()?;
        let piece = self.registry(team).get(id);
        debug_assert!(piece.is_some(), "occupant of {at} missing from registry");
        piece
    }

    /// Iterate one side's live pieces
    pub fn pieces(&self, team: Team) -> impl Iterator<Item = &Piece> {
        self.registry(team).iter()
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Compute the legal destinations for a piece on the current lattice.
    ///
    /// This is a pure query: it works for either side regardless of whose
    /// turn it is, so a presentation layer can preview moves.
    pub fn legal_moves(&self, id: PieceId) -> Result<MoveSet, MoveError> {
        let piece = self.piece(id).ok_or(MoveError::UnknownPiece(id))?;
        Ok(self.moves_for(piece))
    }

    fn moves_for(&self, piece: &Piece) -> MoveSet {
        let mut moves = MoveSet::default();
        match piece.kind.ray_profile() {
            Some((dirs, range)) => {
                for &step in dirs {
                    self.ray_cast(piece, step, range, &mut moves);
                }
            }
            None => self.pawn_moves(piece, &mut moves),
        }
        moves
    }

    /// Walk `origin + k*step` for k = 1..=max_steps while in bounds: empty
    /// cells are go-cells, the first enemy cell is an attack-cell and ends
    /// the ray, an own piece ends the ray outright.
    fn ray_cast(&self, piece: &Piece, step: Step, max_steps: i8, moves: &mut MoveSet) {
        for k in 1..=max_steps {
            let dest = piece.coord.offset(step, k);
            if !dest.is_valid() {
                break;
            }
            match self.lattice.cell(dest).occupant() {
                None => moves.go.push(dest),
                Some((team, _)) => {
                    if team != piece.team {
                        moves.attacks.push(dest);
                    }
                    break;
                }
            }
        }
    }

    /// Pawn cone: quiet forward steps on the same and both adjacent layers,
    /// a double-step along the same directions while unmoved, and diagonal
    /// captures (same and both adjacent layers) onto enemy pieces only.
    fn pawn_moves(&self, piece: &Piece, moves: &mut MoveSet) {
        let forward = piece.team.forward();

        for layer_delta in [-1i8, 0, 1] {
            let step = (layer_delta, forward, 0);
            let one = piece.coord.offset(step, 1);
            if one.is_valid() && !self.lattice.cell(one).is_occupied() {
                moves.go.push(one);
                if !piece.has_moved {
                    let two = piece.coord.offset(step, 2);
                    if two.is_valid() && !self.lattice.cell(two).is_occupied() {
                        moves.go.push(two);
                    }
                }
            }
        }

        for layer_delta in [-1i8, 0, 1] {
            for col_delta in [-1i8, 1] {
                let dest = piece.coord.offset((layer_delta, forward, col_delta), 1);
                if !dest.is_valid() {
                    continue;
                }
                if let Some((team, _)) = self.lattice.cell(dest).occupant() {
                    if team != piece.team {
                        moves.attacks.push(dest);
                    }
                }
            }
        }
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move to a destination previously offered for this piece.
    ///
    /// Wrong turn, unknown id, non-legal destination or a finished game are
    /// rejected as no-ops. On success the lattice and registries are
    /// updated, captures and promotion are resolved, and the turn flips.
    pub fn apply_move(&mut self, id: PieceId, dest: Coord) -> Result<MoveOutcome, MoveError> {
        if self.result != GameResult::Ongoing {
            return Err(MoveError::GameOver);
        }
        let piece = *self.piece(id).ok_or(MoveError::UnknownPiece(id))?;
        if piece.team != self.turn {
            return Err(MoveError::WrongTurn {
                piece: piece.team,
                turn: self.turn,
            });
        }
        let moves = self.moves_for(&piece);
        if !moves.contains(dest) {
            return Err(MoveError::IllegalDestination(dest));
        }

        let mut outcome = MoveOutcome::default();

        // Capture resolution. A desync between the move set and the lattice
        // here is an engine bug, not a recoverable state.
        if moves.is_attack(dest) {
            let (victim_team, victim_id) = self
                .lattice
                .cell(dest)
                .occupant()
                .expect("attack-cell without occupant");
            let mut victim = self
                .registry_mut(victim_team)
                .remove(victim_id)
                .expect("occupant missing from registry");
            victim.captured = true;
            if victim.kind.is_king() {
                self.result = GameResult::for_winner(piece.team);
                outcome.game_over = Some(piece.team);
            }
            outcome.captured = Some(victim_id);
        }

        // Relocate the mover
        self.lattice.set_occupant(piece.coord, None);
        self.lattice.set_occupant(dest, Some((piece.team, id)));
        let moved = self
            .registry_mut(piece.team)
            .get_mut(id)
            .expect("moving piece missing from registry");
        moved.coord = dest;
        moved.has_moved = true;

        // Promotion: a pawn on its far corner becomes a fresh queen
        if piece.kind == PieceKind::Pawn {
            let (corner_layer, corner_row) = piece.team.promotion_corner();
            if dest.layer == corner_layer && dest.row == corner_row {
                self.registry_mut(piece.team).remove(id);
                self.lattice.set_occupant(dest, None);
                let queen_id = self.spawn(piece.team, PieceKind::Queen, dest);
                outcome.promoted = Some((queen_id, PieceKind::Queen));
            }
        }

        self.turn = self.turn.opponent();
        Ok(outcome)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
