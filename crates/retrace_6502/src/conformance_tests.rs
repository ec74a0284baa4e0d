//! End-to-end conformance: run a fixed program from reset and compare
//! every emitted trace line byte-for-byte against precomputed oracle
//! lines.

use once_cell::sync::Lazy;

use crate::cpu::tests::TestBus;
use crate::cpu::Cpu;
use crate::trace::TraceEmitter;

/// Program image loaded at $C000, entered through the reset vector.
static PROGRAM: &[u8] = &[
    0x4C, 0xF5, 0xC5, // C000 JMP $C5F5
];

static SUBROUTINE: &[u8] = &[
    0xA2, 0x00, // C5F5 LDX #$00
    0x86, 0x10, // C5F7 STX $10
    0x38, // C5F9 SEC
    0xB0, 0x02, // C5FA BCS $C5FE
    0x00, 0x00, // C5FC (skipped)
    0xA9, 0x55, // C5FE LDA #$55
    0x8D, 0x00, 0x02, // C600 STA $0200
    0xA7, 0x10, // C603 LAX $10 (undocumented)
    0xEA, // C605 NOP
];

static ORACLE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU: 30,  0 CYC:10",
        "C5F5  A2 00     LDX #$00                        A:00 X:00 Y:00 P:24 SP:FD PPU: 36,  0 CYC:12",
        "C5F7  86 10     STX $10 = 00                    A:00 X:00 Y:00 P:26 SP:FD PPU: 45,  0 CYC:15",
        "C5F9  38        SEC                             A:00 X:00 Y:00 P:26 SP:FD PPU: 51,  0 CYC:17",
        "C5FA  B0 02     BCS $C5FE                       A:00 X:00 Y:00 P:27 SP:FD PPU: 60,  0 CYC:20",
        "C5FE  A9 55     LDA #$55                        A:00 X:00 Y:00 P:27 SP:FD PPU: 66,  0 CYC:22",
        "C600  8D 00 02  STA $0200 = 00                  A:55 X:00 Y:00 P:25 SP:FD PPU: 78,  0 CYC:26",
        "C603  A7 10    *LAX $10 = 00                    A:55 X:00 Y:00 P:25 SP:FD PPU: 87,  0 CYC:29",
        "C605  EA        NOP                             A:00 X:00 Y:00 P:27 SP:FD PPU: 93,  0 CYC:31",
    ]
});

fn boot() -> (Cpu, TestBus) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut bus = TestBus::default();
    for (i, b) in PROGRAM.iter().enumerate() {
        bus.memory[0xC000 + i] = *b;
    }
    for (i, b) in SUBROUTINE.iter().enumerate() {
        bus.memory[0xC5F5 + i] = *b;
    }
    bus.memory[0xFFFC] = 0x00;
    bus.memory[0xFFFD] = 0xC0;

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    (cpu, bus)
}

#[test]
fn trace_matches_the_oracle_byte_for_byte() {
    let (mut cpu, mut bus) = boot();
    let emitter = TraceEmitter::new();

    for (i, expected) in ORACLE.iter().enumerate() {
        let record = cpu.step(&mut bus);
        let line = emitter.line(&record);
        assert_eq!(&line, expected, "line {i}");
    }
}

#[test]
fn jump_then_load_scenario() {
    let (mut cpu, mut bus) = boot();
    assert_eq!(cpu.regs.p.bits(), 0x24);
    assert_eq!(cpu.regs.sp, 0xFD);
    assert_eq!(cpu.clock().cycles(), 7);

    cpu.step(&mut bus); // JMP $C5F5
    assert_eq!(cpu.regs.pc, 0xC5F5);
    assert_eq!(cpu.clock().cycles(), 10);
    assert_eq!(cpu.regs.p.bits(), 0x24);

    cpu.step(&mut bus); // LDX #$00
    assert_eq!(cpu.clock().cycles(), 12);
    assert_eq!(cpu.regs.p.bits(), 0x26);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.x, 0x00);
    assert_eq!(cpu.regs.sp, 0xFD);
}

#[test]
fn peripheral_position_advances_three_dots_per_cycle() {
    let (mut cpu, mut bus) = boot();
    let mut prev_cycles = cpu.clock().cycles();
    let mut prev_ticks = u64::from(cpu.clock().dot());

    for _ in 0..ORACLE.len() {
        cpu.step(&mut bus);
        let cycles = cpu.clock().cycles();
        let ticks = u64::from(cpu.clock().dot());
        assert_eq!(ticks - prev_ticks, (cycles - prev_cycles) * 3);
        prev_cycles = cycles;
        prev_ticks = ticks;
    }
}
