use super::{ExpectedState, hash_map, run_test, run_test_with_memory};
use test_log::test;

#[test]
fn lda_immediate() {
    run_test(
        // LDA #$78
        "A978",
        ExpectedState {
            a: Some(0x78),
            p: Some(0x20),
            cycles: Some(2),
            ..ExpectedState::default()
        },
    );

    run_test(
        // LDA #$DD
        "A9DD",
        ExpectedState {
            a: Some(0xDD),
            p: Some(0xA0),
            cycles: Some(2),
            ..ExpectedState::default()
        },
    );

    run_test(
        // LDA #$00
        "A900",
        ExpectedState {
            a: Some(0x00),
            p: Some(0x22),
            cycles: Some(2),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn ldx_ldy_immediate() {
    run_test(
        // LDX #$DD
        "A2DD",
        ExpectedState {
            x: Some(0xDD),
            p: Some(0xA0),
            cycles: Some(2),
            ..ExpectedState::default()
        },
    );

    run_test(
        // LDY #$00
        "A000",
        ExpectedState {
            y: Some(0x00),
            p: Some(0x22),
            cycles: Some(2),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn lda_zero_page() {
    run_test_with_memory(
        // LDA $10
        "A510",
        &[(0x0010, &[0x80])],
        ExpectedState {
            a: Some(0x80),
            p: Some(0xA0),
            cycles: Some(3),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn lda_absolute_x() {
    run_test_with_memory(
        // LDX #$20; LDA $01F0,X
        "A220 BDF001",
        &[(0x0210, &[0x42])],
        ExpectedState {
            a: Some(0x42),
            x: Some(0x20),
            p: Some(0x20),
            // Crossing from $01xx into $02xx costs an extra cycle
            cycles: Some(2 + 5),
            ..ExpectedState::default()
        },
    );

    run_test_with_memory(
        // LDX #$05; LDA $01F0,X
        "A205 BDF001",
        &[(0x01F5, &[0x33])],
        ExpectedState {
            a: Some(0x33),
            x: Some(0x05),
            cycles: Some(2 + 4),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn lda_indexed_indirect() {
    run_test_with_memory(
        // LDX #$04; LDA ($3C,X)
        "A204 A13C",
        &[(0x0040, &[0x00, 0x20]), (0x2000, &[0x01])],
        ExpectedState {
            a: Some(0x01),
            p: Some(0x20),
            cycles: Some(2 + 6),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn lda_indirect_indexed() {
    run_test_with_memory(
        // LDY #$10; LDA ($40),Y
        "A010 B140",
        &[(0x0040, &[0xF8, 0x12]), (0x1308, &[0x7F])],
        ExpectedState {
            a: Some(0x7F),
            y: Some(0x10),
            cycles: Some(2 + 6),
            ..ExpectedState::default()
        },
    );

    run_test_with_memory(
        // LDY #$01; LDA ($40),Y
        "A001 B140",
        &[(0x0040, &[0xF8, 0x12]), (0x12F9, &[0x7E])],
        ExpectedState {
            a: Some(0x7E),
            cycles: Some(2 + 5),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn sta_absolute() {
    run_test(
        // LDA #$42; STA $0300
        "A942 8D0003",
        ExpectedState {
            memory: hash_map! { 0x0300 => 0x42 },
            cycles: Some(2 + 4),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn sta_absolute_x_ignores_page_cross() {
    run_test(
        // LDX #$FF; LDA #$42; STA $0201,X
        "A2FF A942 9D0102",
        ExpectedState {
            memory: hash_map! { 0x0300 => 0x42 },
            cycles: Some(2 + 2 + 5),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn stx_zero_page_y() {
    run_test(
        // LDX #$AB; LDY #$05; STX $10,Y
        "A2AB A005 9610",
        ExpectedState {
            memory: hash_map! { 0x0015 => 0xAB },
            cycles: Some(2 + 2 + 4),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn register_transfers() {
    run_test(
        // LDA #$80; TAX
        "A980 AA",
        ExpectedState {
            x: Some(0x80),
            p: Some(0xA0),
            cycles: Some(4),
            ..ExpectedState::default()
        },
    );

    run_test(
        // LDY #$00; LDA #$01; TYA
        "A000 A901 98",
        ExpectedState {
            a: Some(0x00),
            p: Some(0x22),
            cycles: Some(6),
            ..ExpectedState::default()
        },
    );

    run_test(
        // TSX
        "BA",
        ExpectedState {
            x: Some(0xFD),
            p: Some(0xA0),
            cycles: Some(2),
            ..ExpectedState::default()
        },
    );
}

#[test]
fn txs_does_not_touch_flags() {
    run_test(
        // LDX #$00; TXS
        "A200 9A",
        ExpectedState {
            s: Some(0x00),
            p: Some(0x22),
            cycles: Some(4),
            ..ExpectedState::default()
        },
    );
}
