#![no_main]

use libfuzzer_sys::fuzz_target;
use pgn_replay::{Replay, ReplayError};

fuzz_target!(|data: &[u8]| {
    let mut replay = Replay::new(data);
    loop {
        let before = replay.board().clone();
        match replay.step() {
            Ok(Some(_)) => (),
            Ok(None) => break,
            Err(ReplayError::Illegal(_)) => {
                assert_eq!(replay.board(), &before);
                break;
            }
            Err(_) => break,
        }
        assert!(replay.board().double_steps().count() <= 1);
    }
});
