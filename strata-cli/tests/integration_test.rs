//! Integration tests for the Strata engine
//!
//! Tests the full stack: setup loading, move generation, selection flow
//! and game termination.

use strata_core::{
    board::Coord,
    game::{GameResult, GameSession},
    pieces::{PieceKind, Team},
    selection::{SelectionEvent, Selector},
    setup::Setup,
};

fn coord(text: &str) -> Coord {
    text.parse().unwrap()
}

// ============================================================================
// SETUP TESTS
// ============================================================================

#[test]
fn test_standard_game_opens_with_full_armies() {
    let session = GameSession::new();

    assert_eq!(session.result(), GameResult::Ongoing);
    assert_eq!(session.current_turn(), Team::White);
    assert_eq!(session.registry(Team::White).len(), 16);
    assert_eq!(session.registry(Team::Black).len(), 16);

    // Every white piece has at least the pawn cone or a knight jump open
    let movable = session
        .pieces(Team::White)
        .filter(|p| !session.legal_moves(p.id).unwrap().is_empty())
        .count();
    assert!(movable >= 10, "opening position should be mobile");
}

#[test]
fn test_setup_file_roundtrip_through_json() {
    let setup = Setup::standard();
    let json = serde_json::to_string_pretty(&setup).unwrap();
    let parsed: Setup = serde_json::from_str(&json).unwrap();
    let session = parsed.to_session();
    assert_eq!(session.registry(Team::White).len(), 16);
}

// ============================================================================
// FULL GAME FLOW
// ============================================================================

#[test]
fn test_selection_driven_exchange() {
    let mut session = GameSession::new();
    let mut selector = Selector::new();

    // White pushes a pawn out two steps
    let pawn = session.piece_at(coord("d2@1")).unwrap().id;
    selector.touch_cell(&mut session, coord("d2@1"));
    let event = selector.touch_cell(&mut session, coord("d4@1"));
    assert!(matches!(event, SelectionEvent::Moved { .. }));

    // Black answers in kind on the top layer
    selector.touch_cell(&mut session, coord("d7@3"));
    let event = selector.touch_cell(&mut session, coord("d5@3"));
    assert!(matches!(event, SelectionEvent::Moved { .. }));

    assert_eq!(session.current_turn(), Team::White);
    assert_eq!(session.piece_at(coord("d4@1")).unwrap().id, pawn);
}

#[test]
fn test_pawn_marches_to_promotion() {
    // A lone white pawn climbs layer by layer to the far corner
    let mut session = GameSession::from_placements(
        &[(PieceKind::Pawn, coord("d2@1")), (PieceKind::King, coord("a1@1"))],
        &[(PieceKind::King, coord("h8@2")), (PieceKind::Pawn, coord("a7@3"))],
    );
    let pawn = session.piece_at(coord("d2@1")).unwrap().id;
    let black_pawn = session.piece_at(coord("a7@3")).unwrap().id;
    let black_king = session.piece_at(coord("h8@2")).unwrap().id;

    // Climbing cone steps: each gains a row, drifting up the layers
    session.apply_move(pawn, coord("d4@3")).unwrap();
    session.apply_move(black_pawn, coord("a6@3")).unwrap();
    session.apply_move(pawn, coord("d5@3")).unwrap();
    session.apply_move(black_pawn, coord("a5@3")).unwrap();
    session.apply_move(pawn, coord("d6@3")).unwrap();
    session.apply_move(black_pawn, coord("a4@3")).unwrap();
    session.apply_move(pawn, coord("d7@3")).unwrap();
    session.apply_move(black_king, coord("h7@2")).unwrap();

    let outcome = session.apply_move(pawn, coord("d8@3")).unwrap();
    let (queen_id, kind) = outcome.promoted.unwrap();
    assert_eq!(kind, PieceKind::Queen);
    assert_eq!(session.piece(queen_id).unwrap().coord, coord("d8@3"));
    assert!(session.piece(pawn).is_none());
}

#[test]
fn test_game_ends_on_king_capture_and_stays_ended() {
    let mut session = GameSession::from_placements(
        &[(PieceKind::Rook, coord("a1@1")), (PieceKind::King, coord("h1@1"))],
        &[(PieceKind::King, coord("a8@1")), (PieceKind::Rook, coord("h8@3"))],
    );
    let rook = session.piece_at(coord("a1@1")).unwrap().id;

    let outcome = session.apply_move(rook, coord("a8@1")).unwrap();
    assert_eq!(outcome.game_over, Some(Team::White));
    assert_eq!(session.result(), GameResult::WhiteWins);

    // Selection layer ignores everything after the game ends
    let mut selector = Selector::new();
    assert_eq!(
        selector.touch_cell(&mut session, coord("h8@3")),
        SelectionEvent::Ignored
    );
    let black_rook = session.piece_at(coord("h8@3")).unwrap().id;
    assert!(session.apply_move(black_rook, coord("h7@3")).is_err());
}

// ============================================================================
// CROSS-LAYER TACTICS
// ============================================================================

#[test]
fn test_bishop_forks_across_layers() {
    let session = GameSession::from_placements(
        &[(PieceKind::Bishop, coord("d4@2"))],
        &[
            (PieceKind::Rook, coord("f6@2")),
            (PieceKind::Rook, coord("e5@3")),
            (PieceKind::King, coord("c3@1")),
        ],
    );
    let bishop = session.piece_at(coord("d4@2")).unwrap().id;
    let moves = session.legal_moves(bishop).unwrap();

    assert!(moves.attacks.contains(&coord("f6@2")));
    assert!(moves.attacks.contains(&coord("e5@3")));
    assert!(moves.attacks.contains(&coord("c3@1")));
    // Rays stop at their first target
    assert!(!moves.contains(coord("g7@2")));
}

#[test]
fn test_queen_reaches_every_layer_from_the_middle() {
    let session = GameSession::from_placements(&[(PieceKind::Queen, coord("d4@2"))], &[]);
    let queen = session.piece_at(coord("d4@2")).unwrap().id;
    let moves = session.legal_moves(queen).unwrap();

    assert!(moves.go.contains(&coord("d4@1")));
    assert!(moves.go.contains(&coord("d4@3")));
    assert!(moves.go.contains(&coord("e5@3")));
    assert!(moves.go.contains(&coord("c3@1")));
    assert!(moves.go.contains(&coord("h4@2")));
}
