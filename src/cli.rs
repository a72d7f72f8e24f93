//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use gilchrist::rm::RmOptions;
use gilchrist::wc::WcOptions;
use gilchrist::KindFilter;

/// Small file-management tools.
#[derive(Parser, Debug)]
#[command(name = "gilchrist")]
#[command(version)]
#[command(about = "Count, find and remove files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print newline, word, byte, and character counts.
    Wc(WcArgs),

    /// Search for files in a directory hierarchy.
    Find(FindArgs),

    /// Remove files or directories.
    Rm(RmArgs),
}

/// Print newline, word, character, byte, and/or maximum line length counts
/// for each FILE, and a total line if more than one FILE is specified. With
/// no FILE, or when FILE is -, read standard input.
#[derive(Args, Debug)]
pub struct WcArgs {
    /// Print the newline counts.
    #[arg(short = 'l', long)]
    pub lines: bool,

    /// Print the word counts.
    #[arg(short = 'w', long)]
    pub words: bool,

    /// Print the byte counts.
    #[arg(short = 'c', long)]
    pub bytes: bool,

    /// Print the character counts.
    #[arg(short = 'm', long)]
    pub chars: bool,

    /// Print the length of the longest line.
    #[arg(short = 'L', long = "max-line-length")]
    pub max_line: bool,

    /// Files to count.
    pub files: Vec<PathBuf>,
}

impl WcArgs {
    pub fn options(&self) -> WcOptions {
        WcOptions {
            lines:    self.lines,
            words:    self.words,
            chars:    self.chars,
            bytes:    self.bytes,
            max_line: self.max_line,
        }
    }
}

/// Entry type accepted by `find --type`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TypeArg {
    /// Regular file.
    F,
    /// Directory.
    D,
}

impl From<TypeArg> for KindFilter {
    fn from(t: TypeArg) -> Self {
        match t {
            TypeArg::F => KindFilter::File,
            TypeArg::D => KindFilter::Dir,
        }
    }
}

/// Search for files in a directory hierarchy. Default path is '.'.
#[derive(Args, Debug)]
#[command(after_help = "Examples:\n  \
    gilchrist find . --name '*.txt'\n  \
    gilchrist find /tmp --type d --iname 'cache*'\n  \
    gilchrist find . --maxdepth 1 --name '*.log' --delete")]
pub struct FindArgs {
    /// Starting points.
    pub paths: Vec<PathBuf>,

    /// Glob for the file name, case-sensitive.
    #[arg(long, value_name = "GLOB")]
    pub name: Option<String>,

    /// Glob for the file name, case-insensitive. Wins over --name.
    #[arg(long, value_name = "GLOB")]
    pub iname: Option<String>,

    /// Restrict results to regular files (f) or directories (d).
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub kind: Option<TypeArg>,

    /// Delete found files and directories. Use with caution.
    #[arg(long)]
    pub delete: bool,

    /// Descend at most N levels below the starting points.
    #[arg(long, value_name = "N")]
    pub maxdepth: Option<usize>,

    /// Ignore entries shallower than N levels (0 is the starting points).
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub mindepth: usize,
}

/// Remove (unlink) the FILE(s). Use with caution, especially with -r and -f.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Remove directories and their contents recursively.
    #[arg(short = 'r', short_alias = 'R', long)]
    pub recursive: bool,

    /// Ignore nonexistent files and arguments, never prompt.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Prompt before every removal.
    #[arg(short = 'i')]
    pub interactive: bool,

    /// Explain what is being done.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Files to remove.
    pub targets: Vec<PathBuf>,
}

impl RmArgs {
    pub fn options(&self) -> RmOptions {
        RmOptions {
            recursive:   self.recursive,
            force:       self.force,
            interactive: self.interactive,
            verbose:     self.verbose,
        }
    }
}
