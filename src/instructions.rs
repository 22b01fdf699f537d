use crate::decoder::{Format, Op};

/// Assembler directive that stores a literal or label address verbatim.
pub const FILL: &str = ".fill";

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub format: Format,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Op::Add,
        mnemonic: "add",
        format: Format::R,
    },
    InstrDesc {
        op: Op::Nor,
        mnemonic: "nor",
        format: Format::R,
    },
    InstrDesc {
        op: Op::Lw,
        mnemonic: "lw",
        format: Format::I,
    },
    InstrDesc {
        op: Op::Sw,
        mnemonic: "sw",
        format: Format::I,
    },
    InstrDesc {
        op: Op::Beq,
        mnemonic: "beq",
        format: Format::I,
    },
    InstrDesc {
        op: Op::Jalr,
        mnemonic: "jalr",
        format: Format::J,
    },
    InstrDesc {
        op: Op::Halt,
        mnemonic: "halt",
        format: Format::O,
    },
    InstrDesc {
        op: Op::Noop,
        mnemonic: "noop",
        format: Format::O,
    },
];

pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

pub fn describe(op: Op) -> &'static InstrDesc {
    // TABLE is indexed by opcode
    &TABLE[op.opcode() as usize]
}

/// Mnemonics and directives that can never be labels.
pub fn is_reserved(token: &str) -> bool {
    token == FILL || lookup(token).is_some()
}
