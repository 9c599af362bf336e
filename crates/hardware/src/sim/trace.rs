//! Trace readers.
//!
//! Two formats are understood:
//!
//! - **Address traces**, one access per line: `R <addr>` or `W <addr>`, with the
//!   address in hexadecimal (`0x` prefix optional). A bare address is a read.
//! - **Way traces**, one decimal way index per line, used to drive replacement
//!   policies without a cache around them.
//!
//! Blank lines and `#` comments are ignored. Any other line that does not parse,
//! including one that is not valid UTF-8, is skipped with a warning; only I/O
//! failures are reported as errors.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::common::data::AccessType;
use crate::common::error::TraceError;

/// Largest way index accepted from a way trace (16-way sets).
pub const MAX_TRACE_WAY: usize = 15;

/// One access from an address trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// Byte address.
    pub address: u64,
    /// Read or write.
    pub kind: AccessType,
}

impl TraceEntry {
    /// Creates a read entry.
    pub const fn read(address: u64) -> Self {
        Self {
            address,
            kind: AccessType::Read,
        }
    }

    /// Creates a write entry.
    pub const fn write(address: u64) -> Self {
        Self {
            address,
            kind: AccessType::Write,
        }
    }
}

/// Parses a hexadecimal address with an optional `0x`/`0X` prefix.
fn parse_hex(text: &str) -> Option<u64> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u64::from_str_radix(digits, 16).ok()
}

/// Parses one address-trace line.
///
/// Returns `None` for blank lines, comments, and malformed lines alike.
pub fn parse_line(line: &str) -> Option<TraceEntry> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut fields = line.split_whitespace();
    let first = fields.next()?;
    let entry = match fields.next() {
        Some(addr) => TraceEntry {
            kind: first.parse().ok()?,
            address: parse_hex(addr)?,
        },
        None => TraceEntry::read(parse_hex(first)?),
    };
    if fields.next().is_some() {
        return None;
    }
    Some(entry)
}

fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Streaming address-trace reader.
///
/// Yields one [`TraceEntry`] per well-formed line and skips the rest.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line_no: usize,
    skipped: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            skipped: 0,
            buf: Vec::new(),
        }
    }

    /// Number of malformed lines skipped so far.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;
            let Ok(line) = std::str::from_utf8(&self.buf) else {
                self.skipped += 1;
                tracing::warn!(line = self.line_no, "skipping non-UTF-8 trace line");
                continue;
            };
            if is_blank_or_comment(line) {
                continue;
            }
            if let Some(entry) = parse_line(line) {
                return Some(Ok(entry));
            }
            self.skipped += 1;
            tracing::warn!(
                line = self.line_no,
                content = line.trim_end(),
                "skipping malformed trace line"
            );
        }
    }
}

fn open(path: &Path) -> Result<Box<dyn BufRead>, TraceError> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Reads a whole address trace. `-` reads stdin.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened or read.
pub fn read_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEntry>, TraceError> {
    TraceReader::new(open(path.as_ref())?).collect()
}

/// Parses a way trace from a reader.
///
/// Indices above [`MAX_TRACE_WAY`], non-numeric lines, and lines that are not
/// valid UTF-8 are skipped with a warning.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if reading from `reader` fails.
pub fn parse_way_trace(mut reader: impl BufRead) -> Result<Vec<usize>, TraceError> {
    let mut ways = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!(line = line_no, "skipping non-UTF-8 way trace line");
            continue;
        };
        if is_blank_or_comment(line) {
            continue;
        }
        match line.trim().parse::<usize>() {
            Ok(way) if way <= MAX_TRACE_WAY => ways.push(way),
            _ => tracing::warn!(
                line = line_no,
                content = line.trim(),
                "skipping invalid way number"
            ),
        }
    }
    Ok(ways)
}

/// Reads a way trace file. `-` reads stdin.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened or read.
pub fn read_way_trace(path: impl AsRef<Path>) -> Result<Vec<usize>, TraceError> {
    parse_way_trace(open(path.as_ref())?)
}
