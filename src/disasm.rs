use crate::decoder::{Decoded, Format};
use crate::instructions::{describe, FILL};
use crate::isa::lc2k::decode_word;

pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = describe(d.op).mnemonic;
    match d.op.format() {
        Format::R => format!("{} {} {} {}", mn, d.reg_a, d.reg_b, d.dest),
        Format::I => format!("{} {} {} {}", mn, d.reg_a, d.reg_b, d.offset),
        Format::J => format!("{} {} {}", mn, d.reg_a, d.reg_b),
        Format::O => mn.to_string(),
    }
}

/// Render any memory word; words that do not decode are shown as data.
pub fn fmt_word(word: i32) -> String {
    match decode_word(word as u32) {
        Ok(d) => fmt_decoded(&d),
        Err(_) => format!("{} {}", FILL, word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Op;
    use crate::isa::lc2k::encode;

    #[test]
    fn renders_each_format() {
        assert_eq!(fmt_decoded(&Decoded::rtype(Op::Nor, 1, 2, 3)), "nor 1 2 3");
        assert_eq!(fmt_decoded(&Decoded::itype(Op::Beq, 0, 1, -5)), "beq 0 1 -5");
        assert_eq!(fmt_decoded(&Decoded::jtype(Op::Jalr, 4, 7)), "jalr 4 7");
        assert_eq!(fmt_decoded(&Decoded::otype(Op::Halt)), "halt");
    }

    #[test]
    fn data_words_render_as_fill() {
        assert_eq!(fmt_word(-1), ".fill -1");
        let lw = encode(&Decoded::itype(Op::Lw, 0, 1, 5)) as i32;
        assert_eq!(fmt_word(lw), "lw 0 1 5");
    }
}
