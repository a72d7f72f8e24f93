//! wc: newline, word, character, byte and longest-line counts.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::error::GilchristError;

const PREFIX: &str = "gilchrist wc";

/// Counts for one input, or the running total across inputs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    /// Number of `\n` bytes.
    pub lines: u64,
    /// Maximal runs of non-whitespace characters.
    pub words: u64,
    /// Unicode scalar values; each invalid UTF-8 sequence counts as one.
    pub chars: u64,
    pub bytes: u64,
    /// Longest line in characters, newline excluded.
    pub max_line: u64,
}

impl Counts {
    /// Fold `other` into a running total. `max_line` takes the maximum.
    pub fn add(&mut self, other: &Counts) {
        self.lines += other.lines;
        self.words += other.words;
        self.chars += other.chars;
        self.bytes += other.bytes;
        self.max_line = self.max_line.max(other.max_line);
    }
}

/// Count everything `reader` yields, one line at a time.
pub fn count_reader<R: BufRead>(mut reader: R) -> io::Result<Counts> {
    let mut counts = Counts::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            break;
        }
        counts.bytes += n as u64;

        let body = match line.last() {
            Some(b'\n') => {
                counts.lines += 1;
                counts.chars += 1;
                &line[..n - 1]
            }
            _ => &line[..],
        };

        let text = String::from_utf8_lossy(body);
        let width = text.chars().count() as u64;
        counts.chars += width;
        counts.words += text.split_whitespace().count() as u64;
        counts.max_line = counts.max_line.max(width);
    }

    Ok(counts)
}

/// Which columns to print. With nothing selected, lines, words and bytes are
/// printed, like the classic tool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WcOptions {
    pub lines:    bool,
    pub words:    bool,
    pub chars:    bool,
    pub bytes:    bool,
    pub max_line: bool,
}

impl WcOptions {
    /// Apply the default column set when no column was requested.
    pub fn or_default_columns(self) -> Self {
        if self.lines || self.words || self.chars || self.bytes || self.max_line {
            return self;
        }
        Self {
            lines: true,
            words: true,
            bytes: true,
            ..self
        }
    }

    /// One output line: selected columns, each right-aligned to width 8, in
    /// the order newline, word, character, byte, longest line; then the name.
    pub fn format(&self, counts: &Counts, name: Option<&str>) -> String {
        let columns = [
            (self.lines, counts.lines),
            (self.words, counts.words),
            (self.chars, counts.chars),
            (self.bytes, counts.bytes),
            (self.max_line, counts.max_line),
        ];

        let mut line: String = columns
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, n)| format!("{n:>8}"))
            .collect();

        if let Some(name) = name {
            line.push(' ');
            line.push_str(name);
        }
        line
    }
}

/// Totals of a `wc` run.
#[derive(Debug, Default)]
pub struct WcReport {
    pub total:     Counts,
    /// Inputs that were counted and printed.
    pub processed: usize,
    /// Inputs that could not be opened or read.
    pub errors:    Vec<GilchristError>,
}

impl WcReport {
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.errors.is_empty())
    }
}

/// Count each of `files` (or `stdin` when there are none), printing one line
/// per input and a `total` line when more than one input was counted.
///
/// `-` names standard input. A file that cannot be read is reported on
/// `diag` and skipped.
///
/// # Errors
///
/// Only a failed write to `out` or `diag` is returned.
pub fn run_wc<R: Read, W: Write, E: Write>(
    files:    &[PathBuf],
    options:  WcOptions,
    mut stdin: R,
    mut out:  W,
    mut diag: E,
) -> Result<WcReport, GilchristError> {
    let options = options.or_default_columns();
    let mut report = WcReport::default();

    let lone_stdin = files.is_empty() || (files.len() == 1 && files[0].as_os_str() == "-");
    if lone_stdin {
        match count_reader(BufReader::new(&mut stdin)) {
            Ok(counts) => {
                writeln!(out, "{}", options.format(&counts, None))?;
                report.total.add(&counts);
                report.processed += 1;
            }
            Err(source) => {
                let err = GilchristError::Io { path: "-".into(), source };
                writeln!(diag, "{PREFIX}: {err}")?;
                report.errors.push(err);
            }
        }
        return Ok(report);
    }

    for path in files {
        let counted = if path.as_os_str() == "-" {
            count_reader(BufReader::new(&mut stdin))
        } else {
            File::open(path).and_then(|f| count_reader(BufReader::new(f)))
        };

        match counted {
            Ok(counts) => {
                debug!(path = %path.display(), ?counts, "counted");
                writeln!(out, "{}", options.format(&counts, Some(&path.to_string_lossy())))?;
                report.total.add(&counts);
                report.processed += 1;
            }
            Err(source) => {
                let err = GilchristError::Io { path: path.clone(), source };
                writeln!(diag, "{PREFIX}: {err}")?;
                report.errors.push(err);
            }
        }
    }

    if report.processed > 1 {
        writeln!(out, "{}", options.format(&report.total, Some("total")))?;
    }

    Ok(report)
}
