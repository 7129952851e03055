use libq8isa::{instruction::kind::InstructionKind, Byte, Word};
use log::debug;

use super::{table::Handler, ExecuteStatus};
use crate::{
    alu,
    memory::{MainMemory, RegFile, Storage},
};

pub(super) const HANDLERS: [(InstructionKind, Handler); 13] = [
    (InstructionKind::Load, load),
    (InstructionKind::LoadI, load_immediate),
    (InstructionKind::Store, store),
    (InstructionKind::Cpy, copy),
    (InstructionKind::Add, add),
    (InstructionKind::AddF, add_fixed),
    (InstructionKind::Or, or),
    (InstructionKind::And, and),
    (InstructionKind::Xor, xor),
    (InstructionKind::Ror, rotate_right),
    (InstructionKind::JmpEq, jump_if_equal),
    (InstructionKind::Halt, halt),
    (InstructionKind::JmpGt, jump_if_greater),
];

fn load(word: Word, reg_file: &mut RegFile, memory: &mut MainMemory) -> ExecuteStatus {
    let value = memory.read(address(word));
    reg_file.store(libq8isa::reg_a(word), value);

    ExecuteStatus::Normal
}

fn load_immediate(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    reg_file.store(libq8isa::reg_a(word), libq8isa::immediate(word));

    ExecuteStatus::Normal
}

fn store(word: Word, reg_file: &mut RegFile, memory: &mut MainMemory) -> ExecuteStatus {
    let value = reg_file.read(libq8isa::reg_a(word));
    memory.store(address(word), value);

    ExecuteStatus::Normal
}

fn copy(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    let value = reg_file.read(libq8isa::reg_c(word));
    reg_file.store(libq8isa::reg_a(word), value);

    ExecuteStatus::Normal
}

fn add(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    binary(word, reg_file, alu::add_signed)
}

fn add_fixed(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    binary(word, reg_file, alu::add_fixed)
}

fn or(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    binary(word, reg_file, |a, b| a | b)
}

fn and(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    binary(word, reg_file, |a, b| a & b)
}

fn xor(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    binary(word, reg_file, |a, b| a ^ b)
}

fn rotate_right(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    let reg = libq8isa::reg_a(word);
    let steps = libq8isa::reg_c(word) as u32;

    let value = alu::rotate_right(reg_file.read(reg), steps);
    reg_file.store(reg, value);

    ExecuteStatus::Normal
}

// The jumps only evaluate their condition. There is no control transfer until programs get a
// program counter driven run loop.

fn jump_if_equal(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    let reg = libq8isa::reg_a(word);
    let value = libq8isa::immediate(word);

    let condition = reg_file.read(reg) == value;
    debug!("jeq %{} == {:#04X}: {} (not taken)", reg, value, condition);

    ExecuteStatus::Normal
}

fn jump_if_greater(word: Word, reg_file: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    let reg = libq8isa::reg_a(word);
    let value = libq8isa::immediate(word);

    let condition = alu::greater_signed(reg_file.read(reg), value);
    debug!("jgt %{} > {:#04X}: {} (not taken)", reg, value, condition);

    ExecuteStatus::Normal
}

fn halt(_: Word, _: &mut RegFile, _: &mut MainMemory) -> ExecuteStatus {
    ExecuteStatus::Halted
}

/// `reg[A] = op(reg[B], reg[C])`
fn binary<F>(word: Word, reg_file: &mut RegFile, op: F) -> ExecuteStatus
where
    F: FnOnce(Byte, Byte) -> Byte,
{
    let a = reg_file.read(libq8isa::reg_b(word));
    let b = reg_file.read(libq8isa::reg_c(word));

    reg_file.store(libq8isa::reg_a(word), op(a, b));

    ExecuteStatus::Normal
}

fn address(word: Word) -> usize {
    libq8isa::immediate(word) as usize
}
