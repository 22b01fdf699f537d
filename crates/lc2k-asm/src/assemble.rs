use std::io::{self, Write};

use lc2k_rs::decoder::{Format, Op};
use lc2k_rs::instructions::{lookup, FILL};
use lc2k_rs::isa::lc2k::{
    encode_itype, encode_jtype, encode_otype, encode_rtype, NUM_REGS, OFFSET_MAX, OFFSET_MIN,
};

use crate::error::{AsmError, Diagnostic, DiagnosticKind};
use crate::labels::LabelTable;
use crate::parser::{parse_number, Line, LineParser};

#[derive(Debug, Clone, Copy, Default)]
pub struct AsmOptions {
    /// Reject the program if any line produced a diagnostic.
    pub strict: bool,
}

/// Result of a completed pass 2.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// One word per instruction line, in source order.
    pub words: Vec<i32>,
    pub labels: LabelTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Two-pass assembler over one source text.
pub struct Assembler<'a> {
    src: &'a str,
    opts: AsmOptions,
    labels: LabelTable,
    diagnostics: Vec<Diagnostic>,
}

pub fn assemble(src: &str, opts: AsmOptions) -> Result<Assembly, AsmError> {
    Assembler::new(src, opts).run()
}

impl<'a> Assembler<'a> {
    pub fn new(src: &'a str, opts: AsmOptions) -> Self {
        Self {
            src,
            opts,
            labels: LabelTable::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn run(mut self) -> Result<Assembly, AsmError> {
        self.collect_labels()?;
        let words = self.encode_lines()?;
        if self.opts.strict && !self.diagnostics.is_empty() {
            return Err(AsmError::Rejected { diagnostics: self.diagnostics });
        }
        Ok(Assembly {
            words,
            labels: self.labels,
            diagnostics: self.diagnostics,
        })
    }

    /// Pass 1: bind every label to the address of its line.
    fn collect_labels(&mut self) -> Result<(), AsmError> {
        for (address, line) in (0u32..).zip(LineParser::new(self.src)) {
            let line = line?;
            let Some(label) = line.label else { continue };
            match self.labels.define(label, address) {
                Ok(name) => {
                    if name.is_truncation_of(label) {
                        tracing::warn!(label, %name, "label truncated");
                    }
                    tracing::debug!(%name, address, "label");
                }
                Err(kind) => self.report(&line, address, kind),
            }
        }
        Ok(())
    }

    /// Pass 2: encode each line. A line that fails emits 0 and is reported.
    fn encode_lines(&mut self) -> Result<Vec<i32>, AsmError> {
        let mut words = Vec::new();
        for (address, line) in (0u32..).zip(LineParser::new(self.src)) {
            let line = line?;
            let word = match self.encode_line(&line, address) {
                Ok(w) => w,
                Err(kind) => {
                    self.report(&line, address, kind);
                    0
                }
            };
            tracing::info!(
                "{}\t(address {}): {} (hex {:#x})",
                line.opcode,
                address,
                word,
                word
            );
            words.push(word);
        }
        Ok(words)
    }

    fn report(&mut self, line: &Line<'_>, address: u32, kind: DiagnosticKind) {
        let d = Diagnostic {
            address,
            line: line.number,
            opcode: line.opcode.to_string(),
            kind,
        };
        tracing::debug!(%d, "diagnostic");
        self.diagnostics.push(d);
    }

    fn encode_line(&self, line: &Line<'_>, address: u32) -> Result<i32, DiagnosticKind> {
        if line.opcode.is_empty() {
            return Err(DiagnosticKind::MissingOpcode);
        }
        if line.opcode == FILL {
            let arg = operand(line, 0)?;
            return match parse_number(arg) {
                Some(v) => Ok(v),
                None => Ok(self.labels.resolve(arg)? as i32),
            };
        }
        let desc = lookup(line.opcode)
            .ok_or_else(|| DiagnosticKind::UnknownOpcode(line.opcode.to_string()))?;
        let word = match desc.format {
            Format::R => {
                let (a, b) = (register(line, 0)?, register(line, 1)?);
                encode_rtype(desc.op, a, b, register(line, 2)?)
            }
            Format::I => {
                let (a, b) = (register(line, 0)?, register(line, 1)?);
                encode_itype(desc.op, a, b, self.offset(line, desc.op, address)?)
            }
            Format::J => encode_jtype(desc.op, register(line, 0)?, register(line, 1)?),
            Format::O => encode_otype(desc.op),
        };
        Ok(word as i32)
    }

    /// offsetField for lw/sw/beq. Only beq may name a label, which becomes
    /// a displacement from the following address.
    fn offset(&self, line: &Line<'_>, op: Op, address: u32) -> Result<i32, DiagnosticKind> {
        let arg = operand(line, 2)?;
        let value = match parse_number(arg) {
            Some(v) => v as i64,
            None if op == Op::Beq => {
                self.labels.resolve(arg)? as i64 - (address as i64 + 1)
            }
            None if self.labels.resolve(arg).is_ok() => {
                return Err(DiagnosticKind::LabelNotAllowed(arg.to_string()));
            }
            None => return Err(DiagnosticKind::NotANumber(arg.to_string())),
        };
        if !(OFFSET_MIN as i64..=OFFSET_MAX as i64).contains(&value) {
            return Err(DiagnosticKind::OffsetOutOfRange(value));
        }
        Ok(value as i32)
    }
}

fn operand<'a>(line: &Line<'a>, index: usize) -> Result<&'a str, DiagnosticKind> {
    line.arg(index).ok_or(DiagnosticKind::MissingOperand { index })
}

fn register(line: &Line<'_>, index: usize) -> Result<u8, DiagnosticKind> {
    let arg = operand(line, index)?;
    let v = parse_number(arg).ok_or_else(|| DiagnosticKind::NotANumber(arg.to_string()))?;
    if !(0..NUM_REGS as i32).contains(&v) {
        return Err(DiagnosticKind::RegisterOutOfRange(v));
    }
    Ok(v as u8)
}

/// Machine-code text: one decimal word per line.
pub fn write_machine_code<W: Write>(out: &mut W, words: &[i32]) -> io::Result<()> {
    for w in words {
        writeln!(out, "{}", w)?;
    }
    Ok(())
}
