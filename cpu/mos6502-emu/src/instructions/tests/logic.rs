use super::{ExpectedState, hash_map, run_test, run_test_with_memory};
use test_log::test;

#[test]
fn and_ora_eor() {
    run_test(
        // LDA #$F0; AND #$3C
        "A9F0 293C",
        ExpectedState { a: Some(0x30), p: Some(0x20), cycles: Some(4), ..ExpectedState::default() },
    );

    run_test(
        // LDA #$00; ORA #$00
        "A900 0900",
        ExpectedState { a: Some(0x00), p: Some(0x22), cycles: Some(4), ..ExpectedState::default() },
    );

    run_test(
        // LDA #$FF; EOR #$0F
        "A9FF 490F",
        ExpectedState { a: Some(0xF0), p: Some(0xA0), cycles: Some(4), ..ExpectedState::default() },
    );
}

#[test]
fn shifts_on_accumulator() {
    run_test(
        // LDA #$81; ASL A
        "A981 0A",
        ExpectedState { a: Some(0x02), p: Some(0x21), cycles: Some(4), ..ExpectedState::default() },
    );

    run_test(
        // SEC; LDA #$80; ROL A
        "38 A980 2A",
        ExpectedState { a: Some(0x01), p: Some(0x21), cycles: Some(6), ..ExpectedState::default() },
    );

    run_test(
        // SEC; LDA #$01; ROR A
        "38 A901 6A",
        ExpectedState { a: Some(0x80), p: Some(0xA1), cycles: Some(6), ..ExpectedState::default() },
    );
}

#[test]
fn shifts_on_memory() {
    run_test_with_memory(
        // LDA #$55; LSR $10
        "A955 4610",
        &[(0x0010, &[0x01])],
        ExpectedState {
            a: Some(0x55),
            p: Some(0x23),
            memory: hash_map! { 0x0010 => 0x00 },
            cycles: Some(2 + 5),
            ..ExpectedState::default()
        },
    );

    run_test_with_memory(
        // CLC; ROR $0300
        "18 6E0003",
        &[(0x0300, &[0x02])],
        ExpectedState {
            a: Some(0x00),
            p: Some(0x20),
            memory: hash_map! { 0x0300 => 0x01 },
            cycles: Some(2 + 6),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn cmp_immediate() {
    run_test(
        // LDA #$40; CMP #$40
        "A940 C940",
        ExpectedState { a: Some(0x40), p: Some(0x23), cycles: Some(4), ..ExpectedState::default() },
    );

    run_test(
        // LDA #$40; CMP #$41
        "A940 C941",
        ExpectedState { p: Some(0xA0), cycles: Some(4), ..ExpectedState::default() },
    );

    run_test(
        // LDA #$40; CMP #$30
        "A940 C930",
        ExpectedState { p: Some(0x21), cycles: Some(4), ..ExpectedState::default() },
    );
}

#[test]
fn cmp_absolute_x_page_cross() {
    run_test(
        // LDX #$10; CMP $02F8,X
        "A210 DDF802",
        ExpectedState { p: Some(0x23), cycles: Some(2 + 5), ..ExpectedState::default() },
    );
}

#[test]
fn cpx_cpy() {
    run_test(
        // LDX #$05; CPX #$06
        "A205 E006",
        ExpectedState { p: Some(0xA0), cycles: Some(4), ..ExpectedState::default() },
    );

    run_test_with_memory(
        // LDY #$80; CPY $10
        "A080 C410",
        &[(0x0010, &[0x7F])],
        ExpectedState { p: Some(0x21), cycles: Some(2 + 3), ..ExpectedState::default() },
    );
}

#[test]
fn bit_zero_page() {
    run_test_with_memory(
        // LDA #$0F; BIT $10
        "A90F 2410",
        &[(0x0010, &[0xC0])],
        ExpectedState { a: Some(0x0F), p: Some(0xE2), cycles: Some(5), ..ExpectedState::default() },
    );

    run_test_with_memory(
        // LDA #$01; BIT $0300
        "A901 2C0003",
        &[(0x0300, &[0x01])],
        ExpectedState { a: Some(0x01), p: Some(0x20), cycles: Some(6), ..ExpectedState::default() },
    );
}
