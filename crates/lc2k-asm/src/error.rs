use std::fmt;

/// Conditions that end the whole run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("error: line {line} too long (limit {max} characters including the newline)")]
    LineTooLong { line: usize, max: usize },
    #[error("{} line(s) failed to assemble", .diagnostics.len())]
    Rejected { diagnostics: Vec<Diagnostic> },
}

/// Per-line problems. The offending line still occupies its address.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("unrecognized opcode {0:?}")]
    UnknownOpcode(String),
    #[error("missing opcode")]
    MissingOpcode,
    #[error("missing operand {index}")]
    MissingOperand { index: usize },
    #[error("{0:?} is not an integer")]
    NotANumber(String),
    #[error("register {0} outside 0..=7")]
    RegisterOutOfRange(i32),
    #[error("offset {0} outside -32768..=32767")]
    OffsetOutOfRange(i64),
    #[error("undefined label {0:?}")]
    UndefinedLabel(String),
    #[error("label {0:?} cannot be used as a lw/sw offset")]
    LabelNotAllowed(String),
    #[error("label {name:?} already defined at address {first}")]
    DuplicateLabel { name: String, first: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub address: u32,
    /// 1-based line in the source file.
    pub line: usize,
    pub opcode: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (address {}, line {}): {}",
            self.opcode, self.address, self.line, self.kind
        )
    }
}
