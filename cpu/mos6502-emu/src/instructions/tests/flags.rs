use super::{ExpectedState, run_test};
use test_log::test;

#[test]
fn carry() {
    run_test(
        // SEC
        "38",
        ExpectedState { p: Some(0x21), cycles: Some(2), ..ExpectedState::default() },
    );

    run_test(
        // CLC; SEC; CLC
        "18 38 18",
        ExpectedState { p: Some(0x20), cycles: Some(6), ..ExpectedState::default() },
    );
}

#[test]
fn interrupt_disable() {
    run_test(
        // SEI
        "78",
        ExpectedState { p: Some(0x24), cycles: Some(2), ..ExpectedState::default() },
    );

    run_test(
        // SEI; CLI
        "78 58",
        ExpectedState { p: Some(0x20), cycles: Some(4), ..ExpectedState::default() },
    );
}

#[test]
fn decimal() {
    run_test(
        // SED
        "F8",
        ExpectedState { p: Some(0x28), cycles: Some(2), ..ExpectedState::default() },
    );

    run_test(
        // SED; CLD
        "F8 D8",
        ExpectedState { p: Some(0x20), cycles: Some(4), ..ExpectedState::default() },
    );
}

#[test]
fn clv() {
    run_test(
        // LDA #$50; ADC #$50; CLV
        "A950 6950 B8",
        ExpectedState { p: Some(0xA0), cycles: Some(6), ..ExpectedState::default() },
    );
}
