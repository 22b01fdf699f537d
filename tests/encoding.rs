use pretty_assertions::assert_eq;

use lc2k_rs::decoder::{Decoded, Decoder, Op};
use lc2k_rs::isa::lc2k::{
    decode_itype, decode_word, encode, encode_itype, encode_otype, Lc2kDecoder, OFFSET_MAX,
    OFFSET_MIN,
};

#[test]
fn every_opcode_round_trips() {
    let samples = [
        Decoded::rtype(Op::Add, 1, 2, 3),
        Decoded::rtype(Op::Nor, 7, 0, 5),
        Decoded::itype(Op::Lw, 0, 1, 5),
        Decoded::itype(Op::Sw, 6, 2, -32768),
        Decoded::itype(Op::Beq, 3, 4, 32767),
        Decoded::jtype(Op::Jalr, 4, 7),
        Decoded::otype(Op::Halt),
        Decoded::otype(Op::Noop),
    ];
    let dec = Lc2kDecoder::new();
    for d in samples {
        assert_eq!(dec.decode(encode(&d)), Some(d));
    }
}

#[test]
fn lw_field_layout() {
    // lw 0 1 5
    let raw = encode(&Decoded::itype(Op::Lw, 0, 1, 5));
    assert_eq!(raw, (2 << 22) | (0 << 19) | (1 << 16) | 5);
    assert_eq!(raw, 8454149);
    let d = decode_itype(raw).unwrap();
    assert_eq!((d.op, d.reg_a, d.reg_b, d.offset), (Op::Lw, 0, 1, 5));
}

#[test]
fn offset_minus_one_is_not_65535() {
    let raw = encode_itype(Op::Beq, 0, 0, -1);
    assert_eq!(decode_word(raw).unwrap().offset, -1);
    assert_eq!(decode_word(encode_itype(Op::Beq, 0, 0, OFFSET_MIN)).unwrap().offset, OFFSET_MIN);
    assert_eq!(decode_word(encode_itype(Op::Beq, 0, 0, OFFSET_MAX)).unwrap().offset, OFFSET_MAX);
}

#[test]
fn otype_words_are_bare_opcodes() {
    assert_eq!(encode_otype(Op::Halt), 25165824);
    assert_eq!(encode_otype(Op::Noop), 29360128);
}
