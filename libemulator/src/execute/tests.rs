use libq8isa::{
    instruction::{assembler, kind::InstructionKind, Instruction},
    Byte, Word,
};

use crate::{
    memory::Storage,
    Emulator, ExecuteStatus, RunSummary,
};

#[test]
fn load_immediate() {
    let mut emulator = Emulator::new();

    assert_eq!(emulator.execute(0x2A05), ExecuteStatus::Normal);
    assert_eq!(emulator.register(0xA), 5);
}

#[test]
fn load_from_memory() -> anyhow::Result<()> {
    let mut image = vec![0; 0x0B];
    image[0x0A] = 0x42;

    let mut emulator = Emulator::with_memory(image)?;
    emulator.execute(0x1A0A);

    assert_eq!(emulator.register(0xA), 0x42);

    Ok(())
}

#[test]
fn store_to_memory() {
    let addr = 0xC8;
    let value = 0x99;

    let emulator = exec(vec![
        Instruction::new(InstructionKind::LoadI)
            .with_reg_a(3)
            .with_immediate(value),
        Instruction::new(InstructionKind::Store)
            .with_reg_a(3)
            .with_immediate(addr),
    ]);

    assert_eq!(emulator.memory.read(addr as usize), value);
}

#[test]
fn copy_register() {
    let emulator = exec(vec![
        Instruction::new(InstructionKind::LoadI)
            .with_reg_a(1)
            .with_immediate(0x5A),
        Instruction::new(InstructionKind::Cpy)
            .with_reg_a(7)
            .with_reg_c(1),
    ]);

    assert_eq!(emulator.register(7), 0x5A);
    assert_eq!(emulator.register(1), 0x5A);
}

#[test]
fn copy_to_itself_is_noop() {
    let mut emulator = Emulator::new();
    emulator.execute(0x2433);
    let before = snapshot(&emulator);

    emulator.execute(0x4404);

    assert_eq!(snapshot(&emulator), before);
}

#[test]
fn add_signed_wraps() {
    let emulator = exec(three_register_op(InstructionKind::Add, 0x7F, 0x01));
    assert_eq!(emulator.register(0), 0x80);

    let emulator = exec(three_register_op(InstructionKind::Add, 0x05, 0xFD));
    assert_eq!(emulator.register(0), 0x02);
}

#[test]
fn add_fixed_point() {
    let emulator = exec(three_register_op(InstructionKind::AddF, 0x10, 0x10));
    assert_eq!(emulator.register(0), 0x20);

    let emulator = exec(three_register_op(InstructionKind::AddF, 0x18, 0x04));
    assert_eq!(emulator.register(0), 0x1C);
}

#[test]
fn bitwise_ops() {
    let cases = [
        (InstructionKind::Or, 0b1100_1010 | 0b0101_0110),
        (InstructionKind::And, 0b1100_1010 & 0b0101_0110),
        (InstructionKind::Xor, 0b1100_1010 ^ 0b0101_0110),
    ];

    for (kind, expected) in cases {
        let emulator = exec(three_register_op(kind, 0b1100_1010, 0b0101_0110));
        assert_eq!(emulator.register(0), expected, "{}", kind);
    }
}

#[test]
fn destination_may_alias_source() {
    // add %1, %1, %1
    let mut emulator = Emulator::new();
    emulator.execute(0x2103);
    emulator.execute(0x5111);

    assert_eq!(emulator.register(1), 6);
}

#[test]
fn rotate_right() {
    let mut emulator = Emulator::new();

    emulator.execute(0x2281);
    emulator.execute(0xA201);
    assert_eq!(emulator.register(2), 0xC0);

    // Bits 7..4 are not part of the count.
    emulator.execute(0xA2F4);
    assert_eq!(emulator.register(2), 0x0C);
}

#[test]
fn rotate_by_zero_is_identity() {
    let mut emulator = Emulator::new();
    emulator.execute(0x25B7);
    let before = snapshot(&emulator);

    emulator.execute(0xA500);

    assert_eq!(snapshot(&emulator), before);
    assert_eq!(emulator.register(5), 0xB7);
}

#[test]
fn jumps_are_inert() {
    let mut emulator = Emulator::with_memory((0..=255).collect()).unwrap();
    for register in 0..libq8isa::REGISTER_COUNT as Word {
        emulator.execute(0x2000 | register << 8 | register * 17);
    }

    let before = snapshot(&emulator);
    let pc = emulator.pc;

    for opcode in [0xB, 0xD] {
        for operands in (0..=0x0FFF).step_by(7).chain([0x0000, 0x0FFF, 0x0511]) {
            let status = emulator.execute(opcode << 12 | operands);
            assert_eq!(status, ExecuteStatus::Normal);
        }
    }

    assert_eq!(snapshot(&emulator), before);
    assert_eq!(emulator.pc, pc);
}

#[test]
fn halt_returns_status_without_side_effects() {
    let mut emulator = Emulator::new();
    let before = snapshot(&emulator);

    assert_eq!(emulator.execute(0xC000), ExecuteStatus::Halted);
    assert_eq!(emulator.execute(0xCABC), ExecuteStatus::Halted);
    assert_eq!(snapshot(&emulator), before);
}

#[test]
fn unassigned_opcodes_are_noops() {
    let mut emulator = Emulator::new();
    emulator.execute(0x2142);
    let before = snapshot(&emulator);

    for word in [0x0000, 0x0123, 0xE000, 0xE1FF, 0xF000, 0xFFFF] {
        assert_eq!(emulator.execute(word), ExecuteStatus::Normal, "{:04X}", word);
    }

    assert_eq!(snapshot(&emulator), before);
}

#[test]
fn opcode_table_has_thirteen_handlers() {
    let emulator = Emulator::new();
    let registered: Vec<_> = emulator.opcode_table().registered().collect();

    assert_eq!(registered, (1..=13).collect::<Vec<usize>>());
    assert!(emulator.opcode_table().handler(0).is_none());
    assert!(emulator.opcode_table().handler(14).is_none());
    assert!(emulator.opcode_table().handler(15).is_none());
    assert!(emulator.opcode_table().handler(16).is_none());
}

#[test]
fn instruction_register_tracks_last_word() {
    let mut emulator = Emulator::new();

    emulator.execute(0x2A05);
    emulator.execute(0xE000);

    assert_eq!(emulator.ir, 0xE000);
    assert_eq!(emulator.pc, 0);
}

#[test]
fn execute_all_stops_after_halt() {
    let mut emulator = Emulator::new();

    let summary = emulator.execute_all([0x2001, 0xC000, 0x2102]);

    assert_eq!(
        summary,
        RunSummary {
            executed: 2,
            halted: true
        }
    );
    assert_eq!(emulator.register(0), 1);
    assert_eq!(emulator.register(1), 0, "instruction after halt was executed");
}

#[test]
fn execute_all_without_halt() {
    let mut emulator = Emulator::new();

    let summary = emulator.execute_all([0x2001, 0x2102]);

    assert_eq!(
        summary,
        RunSummary {
            executed: 2,
            halted: false
        }
    );
}

#[test]
fn patches_show_changes() {
    let mut emulator = Emulator::new();

    emulator.execute(0x2A05);
    emulator.execute(0x3A10);

    let registers: Vec<_> = emulator.reg_file.pop_patches().collect();
    let memory: Vec<_> = emulator.memory.pop_patches().collect();

    assert_eq!(registers.len(), 1);
    assert_eq!(registers[0].0, 0xA);
    assert_eq!(registers[0].1.new_value, 5);

    assert_eq!(memory.len(), 1);
    assert_eq!(memory[0].0, 0x10);
    assert_eq!(memory[0].1.new_value, 5);
}

fn three_register_op(kind: InstructionKind, a: Byte, b: Byte) -> Vec<Instruction> {
    vec![
        Instruction::new(InstructionKind::LoadI)
            .with_reg_a(1)
            .with_immediate(a),
        Instruction::new(InstructionKind::LoadI)
            .with_reg_a(2)
            .with_immediate(b),
        Instruction::new(kind)
            .with_reg_a(0)
            .with_reg_b(1)
            .with_reg_c(2),
    ]
}

fn snapshot(emulator: &Emulator) -> (Vec<Byte>, Vec<Byte>) {
    (emulator.reg_file.snapshot(), emulator.memory.snapshot())
}

fn exec(instructions: Vec<Instruction>) -> Emulator {
    let program = assembler::assemble(instructions).expect("Failed to assemble instructions");

    let mut emulator = Emulator::new();
    let summary = emulator.execute_all(program);
    assert!(!summary.halted);

    emulator
}

