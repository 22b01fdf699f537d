use serde::{Deserialize, Serialize};

/// The eight LC-2K opcodes. Discriminants are the 3-bit opcode field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Op {
    Add = 0,
    Nor = 1,
    Lw = 2,
    Sw = 3,
    Beq = 4,
    Jalr = 5,
    Halt = 6,
    Noop = 7,
}

/// Field layout class of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// regA, regB, destReg
    R,
    /// regA, regB, 16-bit offsetField
    I,
    /// regA, regB
    J,
    /// opcode only
    O,
}

impl Op {
    pub const ALL: [Op; 8] = [
        Op::Add,
        Op::Nor,
        Op::Lw,
        Op::Sw,
        Op::Beq,
        Op::Jalr,
        Op::Halt,
        Op::Noop,
    ];

    pub fn from_opcode(opcode: u8) -> Option<Op> {
        Op::ALL.get(opcode as usize).copied()
    }

    pub fn opcode(self) -> u8 {
        self as u8
    }

    pub fn format(self) -> Format {
        match self {
            Op::Add | Op::Nor => Format::R,
            Op::Lw | Op::Sw | Op::Beq => Format::I,
            Op::Jalr => Format::J,
            Op::Halt | Op::Noop => Format::O,
        }
    }
}

/// Operand set of one instruction. Fields a format does not use are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub reg_a: u8,
    pub reg_b: u8,
    pub dest: u8,
    pub offset: i32,
}

impl Decoded {
    pub fn rtype(op: Op, reg_a: u8, reg_b: u8, dest: u8) -> Self {
        Self { op, reg_a, reg_b, dest, offset: 0 }
    }

    pub fn itype(op: Op, reg_a: u8, reg_b: u8, offset: i16) -> Self {
        Self { op, reg_a, reg_b, dest: 0, offset: offset as i32 }
    }

    pub fn jtype(op: Op, reg_a: u8, reg_b: u8) -> Self {
        Self { op, reg_a, reg_b, dest: 0, offset: 0 }
    }

    pub fn otype(op: Op) -> Self {
        Self { op, reg_a: 0, reg_b: 0, dest: 0, offset: 0 }
    }
}

pub trait Decoder {
    fn decode(&self, raw32: u32) -> Option<Decoded>;
}
