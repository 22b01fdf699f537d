pub mod assemble;
pub mod error;
pub mod labels;
pub mod parser;

// Re-export the driver surface used by the CLIs and tests
pub use assemble::{assemble, write_machine_code, AsmOptions, Assembler, Assembly};
pub use error::{AsmError, Diagnostic, DiagnosticKind};
pub use labels::{LabelEntry, LabelName, LabelTable, MAX_LABEL_LEN};
pub use parser::{parse_line, parse_number, Line, LineParser, MAX_LINE_LENGTH};
