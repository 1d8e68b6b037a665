
use crate::helpers::{load_words, machine};
use common::asm::{Instr, Opcode};

fn ins(op: Opcode, operand: u16) -> u16 {
    Instr::new(op, operand).encode()
}

const MARKER: u16 = 0x0123;

#[test]
fn bra_unconditional() {
    let mut cpu = machine(16);
    // 0: bra 2; 1: lda marker (skipped); 2: hlt
    load_words(
        &mut cpu,
        0,
        &[ins(Opcode::Bra, 2), ins(Opcode::Lda, 3), ins(Opcode::Hlt, 0), MARKER],
    );
    cpu.run().unwrap();
    assert_eq!(cpu.acc(), 0);
    assert_eq!(cpu.pc(), 3);
}

#[test]
fn brz_taken_when_zero() {
    let mut cpu = machine(16);
    load_words(
        &mut cpu,
        0,
        &[ins(Opcode::Brz, 2), ins(Opcode::Lda, 3), ins(Opcode::Hlt, 0), MARKER],
    );
    cpu.run().unwrap();
    assert_eq!(cpu.acc(), 0, "branch should have skipped the load");
}

#[test]
fn brz_not_taken_when_nonzero() {
    let mut cpu = machine(16);
    // 0: lda marker; 1: brz 3 (not taken); 2: lda zero; 3: hlt
    load_words(
        &mut cpu,
        0,
        &[
            ins(Opcode::Lda, 4),
            ins(Opcode::Brz, 3),
            ins(Opcode::Lda, 5),
            ins(Opcode::Hlt, 0),
            MARKER,
            0,
        ],
    );
    cpu.run().unwrap();
    assert_eq!(cpu.acc(), 0, "fall-through should have executed the second load");
    assert!(cpu.zero());
}

#[test]
fn brp_follows_positive_flag() {
    // Negative accumulator: not taken.
    let mut cpu = machine(16);
    load_words(
        &mut cpu,
        0,
        &[
            ins(Opcode::Lda, 4),
            ins(Opcode::Brp, 3),
            ins(Opcode::Lda, 5),
            ins(Opcode::Hlt, 0),
            0x8000,
            MARKER,
        ],
    );
    cpu.run().unwrap();
    assert_eq!(cpu.acc(), MARKER);

    // Positive (top bit clear): taken.
    let mut cpu = machine(16);
    load_words(
        &mut cpu,
        0,
        &[
            ins(Opcode::Lda, 4),
            ins(Opcode::Brp, 3),
            ins(Opcode::Lda, 5),
            ins(Opcode::Hlt, 0),
            0x7fff,
            MARKER,
        ],
    );
    cpu.run().unwrap();
    assert_eq!(cpu.acc(), 0x7fff);
}

#[test]
fn branches_leave_flags_alone() {
    let mut cpu = machine(16);
    load_words(
        &mut cpu,
        0,
        &[ins(Opcode::Lda, 3), ins(Opcode::Bra, 2), ins(Opcode::Hlt, 0), 0x8000],
    );
    cpu.run().unwrap();
    assert!(!cpu.positive());
    assert!(!cpu.zero());
}

#[test]
fn pc_wraps_at_top_of_address_space() {
    let mut cpu = machine(4096);
    cpu.bus_mut().write(0xfff, ins(Opcode::Not, 0));
    // Address 0 already holds 0, which decodes to hlt.
    cpu.set_pc(0xfff);
    cpu.run().unwrap();

    assert_eq!(cpu.acc(), 0xffff, "the instruction at the top ran");
    assert!(!cpu.is_active());
    assert_eq!(cpu.pc(), 1, "execution wrapped to address 0");
}

#[test]
fn step_after_halt_is_a_noop() {
    let mut cpu = machine(16);
    cpu.run().unwrap();
    assert!(!cpu.is_active());
    let pc = cpu.pc();

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), pc);
    assert!(!cpu.is_active());
}

#[test]
fn unwired_fetch_halts() {
    // No RAM at all: every fetch reads the null sentinel, decoded as 0.
    let mut cpu = crate::helpers::machine(0);
    cpu.run().unwrap();
    assert!(!cpu.is_active());
    assert_eq!(cpu.pc(), 1);
}
