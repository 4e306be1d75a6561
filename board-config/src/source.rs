//! Character sources feeding the parser

use crate::Result;
use std::path::Path;

/// Yields one character at a time, `None` at the end
pub trait CharSource {
    fn next_char(&mut self) -> Option<char>;
}

/// Source over an in-memory string
#[derive(Debug, Clone)]
pub struct TextSource<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> TextSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharSource for TextSource<'_> {
    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }
}

/// Source over the contents of a file
///
/// A carriage return is dropped and the character after it returned instead,
/// so CRLF files read like LF files. Invalid UTF-8 is replaced rather than
/// rejected.
#[derive(Debug, Clone)]
pub struct FileSource {
    text: Vec<char>,
    pos: usize,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).chars().collect(),
            pos: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.text.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }
}

impl CharSource for FileSource {
    fn next_char(&mut self) -> Option<char> {
        match self.bump() {
            Some('\r') => self.bump(),
            c => c,
        }
    }
}
