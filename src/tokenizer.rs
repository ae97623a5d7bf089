use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Lines, Read};

use crate::error::ContentError;

/// Whether a block came from between `%` delimiters or was a bare
/// `*`-terminated statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Data,
    Parameter,
}

/// One tokenized block: its text with all whitespace stripped (parameter
/// blocks keep their interior `*` statement terminators, data blocks do not
/// include the terminating `*`), plus the tokenizer's line count when the
/// block was terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub line: usize,
}

/// Streaming block scanner over a Gerber byte stream.
///
/// Whitespace (including newlines) is insignificant except for line
/// counting, so blocks may share a physical line or span several. The line
/// counter is incremented after each physical line has been fully consumed;
/// a block is tagged with the counter's value at the moment its terminator
/// is read, which is the numbering the emitted `line="…"` attributes use.
pub struct Tokenizer<T: Read> {
    lines: Lines<BufReader<T>>,
    line_number: usize,
    in_parameter: bool,
    buffer: String,
    param_star_line: usize,
    queue: VecDeque<Block>,
    exhausted: bool,
}

impl<T: Read> Tokenizer<T> {
    pub fn new(reader: BufReader<T>) -> Tokenizer<T> {
        Tokenizer {
            lines: reader.lines(),
            line_number: 0,
            in_parameter: false,
            buffer: String::new(),
            param_star_line: 0,
            queue: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Line count so far (number of fully consumed physical lines).
    pub fn line(&self) -> usize {
        self.line_number
    }

    /// Produce the next block, `None` at end of input.
    pub fn next_block(&mut self) -> Option<Result<Block, ContentError>> {
        loop {
            if let Some(block) = self.queue.pop_front() {
                return Some(Ok(block));
            }
            if self.exhausted {
                return None;
            }

            match self.lines.next() {
                None => {
                    self.exhausted = true;
                    if self.in_parameter {
                        return Some(Err(ContentError::UnterminatedParameterBlock {}));
                    }
                    if !self.buffer.is_empty() {
                        log::warn!(
                            "dropping unterminated trailing text: '{}'",
                            self.buffer
                        );
                        self.buffer.clear();
                    }
                }
                Some(Err(e)) => {
                    self.exhausted = true;
                    return Some(Err(ContentError::IoError(format!(
                        "IO error on line: {}, error: {}",
                        self.line_number + 1,
                        e
                    ))));
                }
                Some(Ok(line)) => {
                    if let Err(e) = self.scan_line(&line) {
                        self.exhausted = true;
                        return Some(Err(e));
                    }
                    self.line_number += 1;
                }
            }
        }
    }

    fn scan_line(&mut self, line: &str) -> Result<(), ContentError> {
        for ch in line.chars() {
            if ch.is_whitespace() {
                continue;
            }
            if self.in_parameter {
                if ch == '%' {
                    self.in_parameter = false;
                    let text = std::mem::take(&mut self.buffer);
                    if !text.is_empty() {
                        self.queue.push_back(Block {
                            kind: BlockKind::Parameter,
                            text,
                            line: self.param_star_line,
                        });
                    }
                } else {
                    if ch == '*' {
                        self.param_star_line = self.line_number;
                    }
                    self.buffer.push(ch);
                }
            } else if ch == '%' {
                if !self.buffer.is_empty() {
                    // Data text ran into a parameter delimiter without a '*'.
                    return Err(ContentError::UnknownCommand {});
                }
                self.in_parameter = true;
                self.param_star_line = self.line_number;
            } else if ch == '*' {
                let text = std::mem::take(&mut self.buffer);
                if !text.is_empty() {
                    self.queue.push_back(Block {
                        kind: BlockKind::Data,
                        text,
                        line: self.line_number,
                    });
                }
            } else {
                self.buffer.push(ch);
            }
        }
        Ok(())
    }
}
