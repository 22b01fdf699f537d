use pretty_assertions::assert_eq;

use lc2k_rs::decoder::{Decoded, Op};
use lc2k_rs::isa::lc2k::encode;
use lc2k_rs::{CpuConfig, RunState, SimError, Simulator, Trap};

fn word(d: Decoded) -> i32 {
    encode(&d) as i32
}

fn run(program: &[i32], trace: bool) -> (Simulator, String) {
    let mut sim = Simulator::new(CpuConfig::default());
    sim.load(program).unwrap();
    let mut out = Vec::new();
    sim.run(&mut out, trace).unwrap();
    (sim, String::from_utf8(out).unwrap())
}

#[test]
fn lone_halt() {
    let (sim, out) = run(&[word(Decoded::otype(Op::Halt))], true);
    assert_eq!(sim.state(), RunState::Halted);
    assert_eq!(sim.cpu.executed, 1);
    assert_eq!(sim.cpu.reg, [0; 8]);
    assert_eq!(out.matches("@@@").count(), 2);
    assert!(out.starts_with("memory[0]=25165824\n"));
    assert!(out.contains("machine halted\ntotal of 1 instructions executed\nfinal state of machine:\n"));
    assert!(out.contains("\tpc 1\n"));
}

#[test]
fn load_then_add() {
    // lw 0 1 4 ; lw 0 2 4 ; add 1 2 3 ; halt ; .fill 5
    let program = [
        word(Decoded::itype(Op::Lw, 0, 1, 4)),
        word(Decoded::itype(Op::Lw, 0, 2, 4)),
        word(Decoded::rtype(Op::Add, 1, 2, 3)),
        word(Decoded::otype(Op::Halt)),
        5,
    ];
    let (sim, out) = run(&program, true);
    assert_eq!(sim.cpu.reg[3], 10);
    assert_eq!(sim.cpu.executed, 4);
    // one dump per instruction plus the final one
    assert_eq!(out.matches("@@@").count(), 5);
    assert_eq!(sim.snapshot().registers, vec![0, 5, 5, 10, 0, 0, 0, 0]);
}

#[test]
fn large_fill_values_are_not_truncated() {
    let program = [
        word(Decoded::itype(Op::Lw, 0, 1, 4)),
        word(Decoded::itype(Op::Lw, 0, 2, 5)),
        word(Decoded::rtype(Op::Add, 1, 2, 3)),
        word(Decoded::otype(Op::Halt)),
        100_000,
        -300_000,
    ];
    let (sim, _) = run(&program, false);
    assert_eq!(sim.cpu.reg[3], -200_000);
}

#[test]
fn countdown_loop() {
    // 0: lw 0 1 6     r1 = 3
    // 1: lw 0 2 7     r2 = -1
    // 2: beq 0 1 2    done when r1 == 0
    // 3: add 1 2 1
    // 4: beq 0 0 -3   back to 2
    // 5: halt
    // 6: .fill 3
    // 7: .fill -1
    let program = [
        word(Decoded::itype(Op::Lw, 0, 1, 6)),
        word(Decoded::itype(Op::Lw, 0, 2, 7)),
        word(Decoded::itype(Op::Beq, 0, 1, 2)),
        word(Decoded::rtype(Op::Add, 1, 2, 1)),
        word(Decoded::itype(Op::Beq, 0, 0, -3)),
        word(Decoded::otype(Op::Halt)),
        3,
        -1,
    ];
    let (sim, out) = run(&program, false);
    assert_eq!(sim.cpu.reg[1], 0);
    assert_eq!(sim.cpu.executed, 2 + 3 * 3 + 1 + 1);
    assert_eq!(out.matches("@@@").count(), 1);
}

#[test]
fn runaway_program_hits_step_limit() {
    let mut sim = Simulator::new(CpuConfig { max_steps: 50, ..CpuConfig::default() });
    sim.load(&[word(Decoded::itype(Op::Beq, 0, 0, -1))]).unwrap();
    let err = sim.run(&mut std::io::sink(), false).unwrap_err();
    assert!(matches!(err, SimError::Trap(Trap::StepLimit { limit: 50 })));
    assert_eq!(sim.cpu.executed, 50);
}

#[test]
fn store_below_address_zero_traps() {
    let program = [word(Decoded::itype(Op::Sw, 0, 0, -1))];
    let mut sim = Simulator::new(CpuConfig::default());
    sim.load(&program).unwrap();
    let err = sim.run(&mut std::io::sink(), false).unwrap_err();
    assert!(matches!(err, SimError::Trap(Trap::Bus { addr: -1, .. })));
}

#[test]
fn text_image_loading() {
    let mut sim = Simulator::new(CpuConfig::default());
    sim.load_text("25165824\n").unwrap();
    assert_eq!(sim.state(), RunState::Running);
    assert!(matches!(
        sim.load_text("12\nbad\n"),
        Err(lc2k_rs::memory::LoadError::BadWord { addr: 1, .. })
    ));
}
