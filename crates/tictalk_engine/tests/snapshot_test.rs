//! Tests for the serializable result snapshot and board rendering.

use tictalk_engine::{Game, Move, Player};

#[test]
fn test_empty_board_snapshot() {
    let snapshot = Game::new().snapshot();
    assert_eq!(snapshot.x(), &[] as &[u8]);
    assert_eq!(snapshot.o(), &[] as &[u8]);
    assert_eq!(snapshot.empty(), (1..=9).collect::<Vec<u8>>().as_slice());
    assert_eq!(snapshot.winner(), None);
    assert!(snapshot.accepted());
}

#[test]
fn test_json_uses_wire_field_names() {
    let mut game = Game::new();
    game.play(Move::new(Player::X, 5));
    game.play(Move::new(Player::O, 1));

    let value: serde_json::Value = serde_json::from_str(&game.snapshot().to_json()).unwrap();
    assert_eq!(value["X"], serde_json::json!([5]));
    assert_eq!(value["O"], serde_json::json!([1]));
    assert_eq!(value["empty"], serde_json::json!([2, 3, 4, 6, 7, 8, 9]));
    assert_eq!(value["winner"], serde_json::Value::Null);
    assert_eq!(value["error"], "");
}

#[test]
fn test_winner_in_snapshot() {
    let mut game = Game::new();
    for (player, position) in [
        (Player::X, 1),
        (Player::O, 4),
        (Player::X, 2),
        (Player::O, 5),
        (Player::X, 3),
    ] {
        game.play(Move::new(player, position));
    }
    let snapshot = game.snapshot();
    assert_eq!(snapshot.winner(), Some(Player::X));

    let value: serde_json::Value = serde_json::from_str(&snapshot.to_json()).unwrap();
    assert_eq!(value["winner"], "X");
}

#[test]
fn test_render_shows_marks_and_position_digits() {
    let mut game = Game::new();
    game.play(Move::new(Player::X, 5));
    game.play(Move::new(Player::O, 1));

    let rendered = game.snapshot().render();
    let expected = "\
O | 2 | 3
----------
4 | X | 6
----------
7 | 8 | 9
";
    assert_eq!(rendered, expected);
}

#[test]
fn test_rejected_snapshot_renders_current_board() {
    let mut game = Game::new();
    game.play(Move::new(Player::X, 5));
    let rejected = game.play(Move::new(Player::O, 5));

    assert_eq!(rejected.error(), "cell 5 occupied");
    assert_eq!(rejected.render(), game.snapshot().render());
}
