use std::fs::{self, File};

use pgn_replay::{Replay, Termination};

fn test_game(name: &str) -> Replay<File> {
    let pgn = File::open(format!("tests/games/{name}.pgn")).expect("failed to open game");
    let expected =
        fs::read_to_string(format!("tests/games/{name}.board")).expect("failed to read board");

    let mut replay = Replay::new(pgn);
    while replay.step().expect("legal game").is_some() {}

    assert_eq!(replay.board().to_string(), expected, "game {name}");
    replay
}

#[test]
fn test_fischer_spassky() {
    let replay = test_game("01");
    assert_eq!(replay.outcome(), Some(Termination::Draw));
    assert_eq!(replay.tags().len(), 7);
    assert_eq!(replay.tags()[4].value, "Fischer, Robert J.");
}

#[test]
fn test_game_02() {
    test_game("02");
}

#[test]
fn test_anand_bareev() {
    test_game("03");
}

#[test]
fn test_ignores_input_after_result() {
    let replay = test_game("04");
    assert!(matches!(replay.outcome(), Some(Termination::Decisive { .. })));
}

#[test]
fn test_game_05() {
    test_game("05");
}

#[test]
fn test_en_passant_without_result() {
    let replay = test_game("06");
    assert_eq!(replay.outcome(), None);
    assert!(replay.board().double_steps().next().is_none());
}

#[test]
fn test_move_list_without_headers() {
    let replay = test_game("07");
    assert!(replay.tags().is_empty());
}

#[test]
fn test_lasker_thomas() {
    test_game("08");
}

#[test]
fn test_game_09() {
    test_game("09");
}

#[test]
fn test_game_10() {
    test_game("10");
}

#[test]
fn test_game_11() {
    test_game("11");
}

#[test]
fn test_comment_inside_variation() {
    let replay = test_game("12");
    assert_eq!(replay.outcome(), None);
}

#[test]
fn test_crlf() {
    let pgn = fs::read_to_string("tests/games/01.pgn")
        .expect("failed to read game")
        .replace('\n', "\r\n");
    let expected = fs::read_to_string("tests/games/01.board").expect("failed to read board");

    let board = pgn_replay::replay(pgn.as_bytes()).expect("legal game");
    assert_eq!(board.to_string(), expected);
}
