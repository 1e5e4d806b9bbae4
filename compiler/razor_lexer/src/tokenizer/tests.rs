#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Start,
    Inner,
}

#[test]
fn restores_only_exact_boundaries() {
    let mut states = ResumeStates::new();
    states.record(2, Mode::Inner);
    states.record(4, Mode::Start);
    states.record(7, Mode::Inner);

    assert_eq!(states.restore(7), Mode::Inner);
    assert_eq!(states.restore(5), Mode::Start);
    // 7 was forgotten by the previous restore.
    assert_eq!(states.restore(7), Mode::Start);
    assert_eq!(states.restore(2), Mode::Inner);
}

#[test]
fn ignores_out_of_order_records() {
    let mut states = ResumeStates::new();
    states.record(5, Mode::Inner);
    states.record(3, Mode::Inner);
    assert_eq!(states.restore(3), Mode::Start);
}
