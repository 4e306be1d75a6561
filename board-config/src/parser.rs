//! Option-text lexer and parser
//!
//! The same grammar serves command lines, settings files, `@file`
//! indirections and adapter strings:
//!
//! ```text
//! ; comment to end of line
//! -name value        -name=value        -name:value
//! -flag              value-less switches take no token
//! -text {literal, no escapes}
//! -text "escaped \n text"   -text 'escaped text'
//! @other.conf        parsed as if inlined
//! game.pgn           positional token
//! ```

use crate::decode;
use crate::engine::OptionEngine;
use crate::host::Host;
use crate::inference;
use crate::source::CharSource;
use crate::{ConfigError, Result};
use std::path::PathBuf;
use tracing::warn;

/// How unrecognized option names are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Report, skip the rest of the entry and keep going
    #[default]
    Lenient,
    /// Fail on the first unknown name
    Strict,
}

/// What a parse call skipped and which files it read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Unrecognized option tokens, marker included, in input order
    pub unrecognized: Vec<String>,
    /// Settings and indirection files parsed, in the order they were opened
    pub files: Vec<PathBuf>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.unrecognized.is_empty()
    }

    /// Append the findings of a later parse call
    pub fn merge(&mut self, other: ParseReport) {
        self.unrecognized.extend(other.unrecognized);
        self.files.extend(other.files);
    }
}

/// Settings shared by a parse call and every nested file it opens
pub(crate) struct Scope<'r> {
    pub mode: ParseMode,
    pub depth: usize,
    pub report: &'r mut ParseReport,
}

impl<'r> Scope<'r> {
    pub fn new(mode: ParseMode, report: &'r mut ParseReport) -> Self {
        Self {
            mode,
            depth: 0,
            report,
        }
    }

    /// Scope for a file opened from within this one
    ///
    /// Unknown names inside files are always skipped, whatever the mode of
    /// the text that named the file.
    pub fn nested(&mut self) -> Scope<'_> {
        Scope {
            mode: ParseMode::Lenient,
            depth: self.depth + 1,
            report: &mut *self.report,
        }
    }
}

/// One character of lookahead over a source
struct Cursor<'a> {
    src: &'a mut dyn CharSource,
    ch: Option<char>,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a mut dyn CharSource) -> Self {
        let ch = src.next_char();
        Self { src, ch }
    }

    fn bump(&mut self) {
        self.ch = self.src.next_char();
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.ch.is_some_and(&pred) {
            self.bump();
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.ch, None | Some('\n'))
    }

    /// Switch token up to the next delimiter, marker included
    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.ch {
            if matches!(c, ' ' | '=' | ':' | '\n' | '\t') {
                break;
            }
            name.push(c);
            self.bump();
        }
        name
    }

    fn read_value(&mut self, literal_backslash: bool, positional: bool, label: &str) -> Result<String> {
        let mut value = String::new();

        match self.ch {
            Some('{') => {
                self.bump();
                while let Some(c) = self.ch {
                    self.bump();
                    if c == '}' {
                        break;
                    }
                    value.push(c);
                }
            }
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                while let Some(c) = self.ch {
                    self.bump();
                    match c {
                        c if c == quote => break,
                        '\\' if !literal_backslash => self.read_escape(&mut value, label)?,
                        c => value.push(c),
                    }
                }
            }
            _ => {
                // Positional tokens are file names and may contain spaces
                while let Some(c) = self.ch {
                    if c == '\t' || c == '\n' || (c == ' ' && !positional) {
                        break;
                    }
                    value.push(c);
                    self.bump();
                }
            }
        }

        Ok(value)
    }

    /// Decode the escape following a backslash
    fn read_escape(&mut self, value: &mut String, label: &str) -> Result<()> {
        let c = self
            .ch
            .ok_or_else(|| ConfigError::IncompleteEscape(label.to_string()))?;

        let control = match c {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            _ => None,
        };
        if let Some(control) = control {
            value.push(control);
            self.bump();
            return Ok(());
        }

        let mut octal = 0u32;
        let mut digits = 0;
        while digits < 3 {
            match self.ch.and_then(|d| d.to_digit(8)) {
                Some(d) => {
                    octal = octal * 8 + d;
                    digits += 1;
                    self.bump();
                }
                None => break,
            }
        }

        if digits > 0 {
            value.push(char::from((octal & 0xff) as u8));
        } else {
            value.push(c);
            self.bump();
        }
        Ok(())
    }

    /// Drop the rest of an unrecognized entry
    ///
    /// The cursor sits on the delimiter after the name. If the character
    /// after it opens a brace block the skip runs to the closing brace,
    /// otherwise to end of line.
    fn skip_entry(&mut self) {
        let end = if self.at_line_end() {
            '\n'
        } else {
            self.bump();
            if self.ch == Some('{') {
                '}'
            } else {
                '\n'
            }
        };
        self.skip_while(|c| c != end);
        if self.ch == Some('}') {
            self.bump();
        }
    }
}

/// Parse every entry of `src` into `state`
pub(crate) fn parse<S, H: Host<S>>(
    engine: &OptionEngine<S, H>,
    state: &mut S,
    src: &mut dyn CharSource,
    scope: &mut Scope<'_>,
) -> Result<()> {
    let schema = engine.schema();
    let dialect = engine.config().dialect;
    let mut cur = Cursor::new(src);
    let mut next_slot = 0;

    loop {
        cur.skip_while(|c| matches!(c, ' ' | '\n' | '\t'));
        let Some(c) = cur.ch else {
            return Ok(());
        };

        let (label, descriptor, positional) = if c == ';' {
            cur.skip_while(|c| c != '\n');
            continue;
        } else if dialect.is_switch(c) {
            let token = cur.read_name();
            match schema.get(&token[c.len_utf8()..]) {
                Some(d) => (token, d, false),
                None => {
                    if scope.mode == ParseMode::Strict {
                        return Err(ConfigError::UnrecognizedOption(token));
                    }
                    warn!("Unrecognized argument {}", token);
                    cur.skip_entry();
                    scope.report.unrecognized.push(token);
                    continue;
                }
            }
        } else if c == '@' {
            cur.bump();
            ("@".to_string(), schema.indirection(), false)
        } else {
            let slot = schema.positional_slot(next_slot);
            next_slot += 1;
            (slot.name.to_string(), slot, true)
        };

        if descriptor.kind.is_valueless() {
            decode::apply(engine, state, descriptor, "", scope)?;
            continue;
        }

        cur.skip_while(|c| matches!(c, ' ' | '=' | ':' | '\t'));
        if cur.at_line_end() {
            return Err(ConfigError::MissingValue(label));
        }

        let value = cur.read_value(descriptor.kind.is_path(), positional, &label)?;
        let descriptor = if positional {
            inference::resolve(schema, engine.host(), state, descriptor, &value)
        } else {
            descriptor
        };

        decode::apply(engine, state, descriptor, &value, scope)?;
    }
}
