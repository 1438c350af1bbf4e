use pgn_replay::{
    san::{self, DecodeErrorKind},
    Color, MoveEvent, MoveFlags, Role,
};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

#[serde_as]
#[derive(Deserialize)]
struct Record {
    san: String,
    #[serde_as(as = "DisplayFromStr")]
    color: Color,
    #[serde_as(as = "DisplayFromStr")]
    role: Role,
    from: String,
    to: String,
    #[serde_as(as = "Option<DisplayFromStr>")]
    promotion: Option<Role>,
    capture: bool,
    check: bool,
    checkmate: bool,
    canonical: String,
}

#[test]
fn test_san_table() {
    let mut reader = csv::Reader::from_path("tests/san.csv").expect("reader");

    for (i, record) in reader.deserialize().enumerate() {
        let record: Record = record.expect("record");
        let line = i + 2;

        let m = match san::decode(&record.san, record.color) {
            Ok(MoveEvent::NextMove(m)) => m,
            other => panic!("line {line}: expected piece move, got {other:?}"),
        };

        assert_eq!(m.color, record.color, "line {line}");
        assert_eq!(m.role, record.role, "line {line}");
        assert_eq!(m.from.to_string(), record.from, "line {line}");
        assert_eq!(m.to.to_string(), record.to, "line {line}");
        assert_eq!(m.promotion, record.promotion, "line {line}");
        assert_eq!(m.flags.contains(MoveFlags::CAPTURE), record.capture, "line {line}");
        assert_eq!(m.flags.contains(MoveFlags::CHECK), record.check, "line {line}");
        assert_eq!(m.flags.contains(MoveFlags::CHECKMATE), record.checkmate, "line {line}");
        assert_eq!(m.to_string(), record.canonical, "line {line}");
        assert_eq!(m.text, record.san, "line {line}");

        match san::decode(&record.canonical, record.color) {
            Ok(MoveEvent::NextMove(again)) => assert!(m.same_fields(&again), "line {line}"),
            other => panic!("line {line}: canonical text does not decode: {other:?}"),
        }
    }
}

#[test]
fn test_special_tokens() {
    for color in Color::ALL {
        assert_eq!(san::decode("e", color), Ok(MoveEvent::Ignore));
        assert_eq!(san::decode("p", color), Ok(MoveEvent::Ignore));
        for text in ["O-O", "O-O+", "O-O-O", "O-O-O#"] {
            assert!(matches!(
                san::decode(text, color),
                Ok(MoveEvent::Castle { color: c, .. }) if c == color
            ));
        }
        for text in ["1-0", "0-1", "1/2-1/2"] {
            assert!(matches!(san::decode(text, color), Ok(MoveEvent::GameEnd(_))));
        }
    }
}

#[test]
fn test_invalid_san() {
    for (text, kind) in [
        ("", DecodeErrorKind::MissingCharacter),
        ("+", DecodeErrorKind::MissingCharacter),
        ("#+", DecodeErrorKind::MissingCharacter),
        ("Q", DecodeErrorKind::MissingCharacter),
        ("Zf3", DecodeErrorKind::ExpectedPiece),
        ("nf3", DecodeErrorKind::ExpectedPiece),
        ("QNf3", DecodeErrorKind::TrailingCharacters),
        ("e2e4e5", DecodeErrorKind::ExpectedPiece),
    ] {
        let err = san::decode(text, Color::White).expect_err(text);
        assert_eq!(err.kind, kind, "{text:?}");
        assert_eq!(err.text, text);
    }
}
