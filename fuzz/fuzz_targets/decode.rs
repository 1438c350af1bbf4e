#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pgn_replay::{san, Color, MoveEvent};

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    white: bool,
}

fuzz_target!(|input: Input| {
    let color = Color::from_white(input.white);
    if let Ok(MoveEvent::NextMove(m)) = san::decode(&input.text, color) {
        let canonical = m.to_string();
        match san::decode(&canonical, color) {
            Ok(MoveEvent::NextMove(again)) => assert!(m.same_fields(&again)),
            Ok(MoveEvent::Ignore) => assert_eq!(canonical, "e"),
            other => panic!("{canonical:?} decoded to {other:?}"),
        }
    }
});
