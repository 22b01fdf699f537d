use lc2k_rs::instructions::is_reserved;

use crate::error::AsmError;

/// Buffer size for one source line; the newline must arrive before the
/// last byte of the buffer.
pub const MAX_LINE_LENGTH: usize = 1000;

/// One non-blank source line split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the source text.
    pub number: usize,
    pub label: Option<&'a str>,
    /// Empty when the line holds only a label.
    pub opcode: &'a str,
    pub args: [Option<&'a str>; 3],
}

impl<'a> Line<'a> {
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied().flatten()
    }
}

fn is_sep(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split one line. A token in column 0 is the label, unless it is a
/// mnemonic. Tokens after the third argument are a comment.
pub fn parse_line(number: usize, text: &str) -> Option<Line<'_>> {
    let labelled = !text.starts_with(is_sep);
    let mut tokens = text.split(is_sep).filter(|t| !t.is_empty());
    let first = tokens.next()?;
    let (label, opcode) = if labelled && !is_reserved(first) {
        (Some(first), tokens.next().unwrap_or(""))
    } else {
        (None, first)
    };
    let args = [tokens.next(), tokens.next(), tokens.next()];
    Some(Line { number, label, opcode, args })
}

/// Integer operand: optional sign followed by decimal digits.
pub fn parse_number(text: &str) -> Option<i32> {
    text.parse::<i32>().ok()
}

/// Iterates the non-blank lines of a source text. Yields one error and then
/// stops if a line is too long; `None` marks the end of input.
pub struct LineParser<'a> {
    rest: std::str::SplitInclusive<'a, char>,
    number: usize,
    failed: bool,
}

impl<'a> LineParser<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            rest: src.split_inclusive('\n'),
            number: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for LineParser<'a> {
    type Item = Result<Line<'a>, AsmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for raw in self.rest.by_ref() {
            self.number += 1;
            if raw.len() > MAX_LINE_LENGTH - 1 {
                self.failed = true;
                return Some(Err(AsmError::LineTooLong {
                    line: self.number,
                    max: MAX_LINE_LENGTH - 1,
                }));
            }
            if let Some(line) = parse_line(self.number, raw) {
                return Some(Ok(line));
            }
        }
        None
    }
}
