use iai::black_box;
use pgn_replay::{san, Board, Color, MoveEvent, Token, Tokenizer};

const GAME: &str = include_str!("../tests/games/01.pgn");

const SANS: [&str; 112] = [
    "e4", "e5", "Nf3", "Nc6", "Bc4", "Nf6", "Ng5", "d5", "exd5", "Na5", "Bb5+", "c6", "dxc6",
    "bxc6", "Ba4", "Ba6", "d3", "Bc5", "O-O", "O-O", "Nc3", "Qc7", "Nge4", "Be7", "Nxf6+",
    "Bxf6", "Ne4", "Be7", "Re1", "Rad8", "f3", "c5", "Be3", "c4", "Qc1", "cxd3", "cxd3", "Qb8",
    "Nf2", "Bxd3", "Nxd3", "Rxd3", "Qc2", "Rxe3", "Rxe3", "Qb6", "Re1", "Bc5", "Qe4", "f5",
    "Qxe5", "f4", "Qd5+", "Kh8", "Kh1", "Bxe3", "b3", "Qd8", "Rd1", "Qxd5", "Rxd5", "Nb7",
    "b4", "Rd8", "Rxd8+", "Nxd8", "Bd7", "Kg8", "a4", "Kf8", "g4", "Ke7", "Bf5", "h6", "h4",
    "Nf7", "h5", "Nd6", "Bd3", "Ke6", "Kg2", "Kd5", "Kh3", "Nf7", "b5", "Bb6", "Kg2", "Kc5",
    "Kf1", "Ne5", "Be2", "Kb4", "Bd1", "Nc4", "Ke2", "Ne3", "g5", "hxg5", "Kd2", "Nxd1",
    "Kxd1", "Kxa4", "Kd2", "Kxb5", "Kd3", "a5", "Ke4", "a4", "Kf5", "a3", "h6", "gxh6",
];

fn bench_decode() -> usize {
    black_box(SANS)
        .iter()
        .filter(|text| matches!(san::decode(text, Color::White), Ok(MoveEvent::NextMove(_))))
        .count()
}

fn bench_tokenize() -> Vec<Token> {
    Tokenizer::new(black_box(GAME).as_bytes())
        .collect::<Result<_, _>>()
        .expect("valid tokens")
}

fn bench_apply_sans() -> Board {
    let mut board = black_box(Board::new());
    let mut turn = Color::White;
    for text in black_box(SANS).iter() {
        let event = san::decode(text, turn).expect("valid san");
        board.apply(&event).expect("legal move");
        turn = !turn;
    }
    board
}

fn bench_replay() -> Board {
    pgn_replay::replay(black_box(GAME).as_bytes()).expect("legal game")
}

iai::main!(bench_decode, bench_tokenize, bench_apply_sans, bench_replay);
