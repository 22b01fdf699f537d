use crate::decoder::{Decoded, Decoder, Format, Op};

/// LC-2K word layout.
///
/// ```text
///  31      25 24  22 21  19 18  16 15                        0
/// | unused   | op   | regA | regB | offsetField / destReg     |
/// ```
///
/// destReg occupies bits 2..0 for R-type words; offsetField is a 16-bit
/// two's-complement value for I-type words.
pub const OPCODE_SHIFT: u32 = 22;
pub const REG_A_SHIFT: u32 = 19;
pub const REG_B_SHIFT: u32 = 16;
pub const REG_MASK: u32 = 0x7;
pub const OPCODE_MASK: u32 = 0x7;
pub const OFFSET_MASK: u32 = 0xFFFF;
pub const OFFSET_MIN: i32 = -32768;
pub const OFFSET_MAX: i32 = 32767;
pub const NUM_REGS: usize = 8;

/// Bits that must be clear in any instruction word.
pub const UNUSED_MASK: u32 = !((1 << 25) - 1);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("opcode {opcode} is not a {expected:?}-type instruction")]
    WrongFormat { opcode: u8, expected: Format },
    #[error("word {word:#010x} has bits set above the opcode field")]
    NotAnInstruction { word: u32 },
}

pub fn opcode_of(word: u32) -> u8 {
    ((word >> OPCODE_SHIFT) & OPCODE_MASK) as u8
}

/// Reinterpret a 16-bit field as two's complement.
pub fn sign_extend16(field: u32) -> i32 {
    let field = (field & OFFSET_MASK) as i32;
    if field & (1 << 15) != 0 {
        field - (1 << 16)
    } else {
        field
    }
}

fn regs(opcode: u8, reg_a: u8, reg_b: u8) -> u32 {
    let mut raw = (opcode as u32 & OPCODE_MASK) << OPCODE_SHIFT;
    raw |= (reg_a as u32 & REG_MASK) << REG_A_SHIFT;
    raw |= (reg_b as u32 & REG_MASK) << REG_B_SHIFT;
    raw
}

pub fn encode_rtype(op: Op, reg_a: u8, reg_b: u8, dest: u8) -> u32 {
    regs(op.opcode(), reg_a, reg_b) | (dest as u32 & REG_MASK)
}

pub fn encode_itype(op: Op, reg_a: u8, reg_b: u8, offset: i32) -> u32 {
    regs(op.opcode(), reg_a, reg_b) | (offset as u32 & OFFSET_MASK)
}

pub fn encode_jtype(op: Op, reg_a: u8, reg_b: u8) -> u32 {
    regs(op.opcode(), reg_a, reg_b)
}

pub fn encode_otype(op: Op) -> u32 {
    (op.opcode() as u32 & OPCODE_MASK) << OPCODE_SHIFT
}

/// Pack an operand set into a word. Registers and offsets wider than their
/// fields are masked; callers validate ranges beforehand.
pub fn encode(d: &Decoded) -> u32 {
    match d.op.format() {
        Format::R => encode_rtype(d.op, d.reg_a, d.reg_b, d.dest),
        Format::I => encode_itype(d.op, d.reg_a, d.reg_b, d.offset),
        Format::J => encode_jtype(d.op, d.reg_a, d.reg_b),
        Format::O => encode_otype(d.op),
    }
}

fn class_op(word: u32, expected: Format) -> Result<Op, DecodeError> {
    let opcode = opcode_of(word);
    match Op::from_opcode(opcode) {
        Some(op) if op.format() == expected => Ok(op),
        _ => Err(DecodeError::WrongFormat { opcode, expected }),
    }
}

fn reg_a_of(word: u32) -> u8 {
    ((word >> REG_A_SHIFT) & REG_MASK) as u8
}

fn reg_b_of(word: u32) -> u8 {
    ((word >> REG_B_SHIFT) & REG_MASK) as u8
}

pub fn decode_rtype(word: u32) -> Result<Decoded, DecodeError> {
    let op = class_op(word, Format::R)?;
    Ok(Decoded::rtype(op, reg_a_of(word), reg_b_of(word), (word & REG_MASK) as u8))
}

pub fn decode_itype(word: u32) -> Result<Decoded, DecodeError> {
    let op = class_op(word, Format::I)?;
    Ok(Decoded {
        op,
        reg_a: reg_a_of(word),
        reg_b: reg_b_of(word),
        dest: 0,
        offset: sign_extend16(word),
    })
}

pub fn decode_jtype(word: u32) -> Result<Decoded, DecodeError> {
    let op = class_op(word, Format::J)?;
    Ok(Decoded::jtype(op, reg_a_of(word), reg_b_of(word)))
}

pub fn decode_otype(word: u32) -> Result<Decoded, DecodeError> {
    let op = class_op(word, Format::O)?;
    Ok(Decoded::otype(op))
}

/// Full decode: dispatches on the opcode field to the class decoder.
///
/// A word with any of bits 31-25 set is rejected rather than masked down
/// to the opcode in bits 24-22, so negative data words never execute.
pub fn decode_word(word: u32) -> Result<Decoded, DecodeError> {
    if word & UNUSED_MASK != 0 {
        return Err(DecodeError::NotAnInstruction { word });
    }
    let opcode = opcode_of(word);
    // 3-bit field; every value names an opcode
    let op = Op::from_opcode(opcode).ok_or(DecodeError::NotAnInstruction { word })?;
    match op.format() {
        Format::R => decode_rtype(word),
        Format::I => decode_itype(word),
        Format::J => decode_jtype(word),
        Format::O => decode_otype(word),
    }
}

pub struct Lc2kDecoder;

impl Lc2kDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Lc2kDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Lc2kDecoder {
    fn decode(&self, raw32: u32) -> Option<Decoded> {
        decode_word(raw32).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_offset_sign_extends() {
        let raw = encode_itype(Op::Beq, 0, 1, -1);
        assert_eq!(raw & OFFSET_MASK, 0xFFFF);
        let d = decode_itype(raw).unwrap();
        assert_eq!(d.offset, -1);
    }

    #[test]
    fn offset_extremes() {
        for off in [OFFSET_MIN, -5, 0, 5, OFFSET_MAX] {
            let d = Decoded::itype(Op::Lw, 7, 3, off as i16);
            assert_eq!(decode_word(encode(&d)).unwrap(), d);
        }
    }

    #[test]
    fn class_decoders_reject_other_classes() {
        let add = encode_rtype(Op::Add, 1, 2, 3);
        assert_eq!(
            decode_itype(add),
            Err(DecodeError::WrongFormat { opcode: 0, expected: Format::I })
        );
        let halt = encode_otype(Op::Halt);
        assert!(decode_rtype(halt).is_err());
        assert!(decode_jtype(halt).is_err());
        assert!(decode_otype(halt).is_ok());
    }

    #[test]
    fn rtype_keeps_middle_bits_clear() {
        let raw = encode_rtype(Op::Nor, 7, 7, 7);
        assert_eq!(raw & 0xFFF8, 0);
        assert_eq!(raw, (1 << 22) | (7 << 19) | (7 << 16) | 7);
    }

    #[test]
    fn high_bits_are_not_instructions() {
        let neg = -1i32 as u32;
        assert_eq!(decode_word(neg), Err(DecodeError::NotAnInstruction { word: neg }));
        assert!(Lc2kDecoder::new().decode(1 << 25).is_none());
    }

    #[test]
    fn register_fields_are_masked() {
        let raw = encode_jtype(Op::Jalr, 9, 10);
        let d = decode_jtype(raw).unwrap();
        assert_eq!((d.reg_a, d.reg_b), (1, 2));
    }
}
