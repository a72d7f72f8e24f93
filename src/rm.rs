//! rm: remove files and directories.

use std::fs;
use std::io::{BufRead, ErrorKind, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::error::GilchristError;

const PREFIX: &str = "gilchrist rm";

/// Safety flags for [`run_rm`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RmOptions {
    /// Remove directories and their contents (`-r`, `-R`).
    pub recursive:   bool,
    /// Ignore missing targets, never prompt, suppress error status (`-f`).
    pub force:       bool,
    /// Prompt before every removal (`-i`). Overridden by `force`.
    pub interactive: bool,
    /// Print each removal (`-v`).
    pub verbose:     bool,
}

/// Outcome of an `rm` run.
#[derive(Debug, Default)]
pub struct RmReport {
    pub removed:  usize,
    /// Targets the user declined at the prompt.
    pub declined: usize,
    /// Failures that count toward the exit status. Failures hidden by
    /// `force` are not recorded.
    pub failures: usize,
}

impl RmReport {
    pub fn exit_code(&self) -> u8 {
        u8::from(self.failures > 0)
    }
}

/// Remove each of `targets` in order.
///
/// Prompts (with `interactive`) and verbose messages go to `out`; answers
/// are read from `input`. Errors go to `diag`. A directory without
/// `recursive` is always reported, but only counts as a failure without
/// `force`.
///
/// # Errors
///
/// [`GilchristError::MissingOperand`] when `targets` is empty and `force` is
/// off; [`GilchristError::Output`] when writing to `out` or `diag` fails.
pub fn run_rm<R: BufRead, W: Write, E: Write>(
    targets:   &[PathBuf],
    options:   RmOptions,
    mut input: R,
    mut out:   W,
    mut diag:  E,
) -> Result<RmReport, GilchristError> {
    let mut report = RmReport::default();

    if targets.is_empty() {
        if options.force {
            return Ok(report);
        }
        return Err(GilchristError::MissingOperand);
    }

    for target in targets {
        let shown = target.display();

        let meta = match fs::symlink_metadata(target) {
            Ok(meta) => meta,
            Err(e) => {
                if !options.force {
                    if e.kind() == ErrorKind::NotFound {
                        writeln!(diag, "{PREFIX}: cannot remove '{shown}': No such file or directory")?;
                    } else {
                        writeln!(diag, "{PREFIX}: cannot access '{shown}': {e}")?;
                    }
                    report.failures += 1;
                }
                continue;
            }
        };

        let is_dir = meta.is_dir();
        if is_dir && !options.recursive {
            writeln!(diag, "{PREFIX}: cannot remove '{shown}': Is a directory")?;
            if !options.force {
                report.failures += 1;
            }
            continue;
        }

        if options.interactive && !options.force {
            let what = if is_dir { "remove directory" } else { "remove" };
            write!(out, "{PREFIX}: {what} '{shown}'? ")?;
            out.flush()?;

            let mut answer = String::new();
            // EOF or an unreadable answer is a "no".
            if input.read_line(&mut answer).is_err() {
                answer.clear();
            }
            if !answer.trim().eq_ignore_ascii_case("y") {
                if options.verbose {
                    writeln!(out, "not removing '{shown}'")?;
                }
                report.declined += 1;
                continue;
            }
        }

        let removed = if is_dir {
            fs::remove_dir_all(target)
        } else {
            fs::remove_file(target)
        };

        match removed {
            Ok(()) => {
                debug!(path = %shown, is_dir, "removed");
                report.removed += 1;
                if options.verbose {
                    writeln!(out, "removed '{shown}'")?;
                }
            }
            Err(e) => {
                if !options.force {
                    writeln!(diag, "{PREFIX}: failed to remove '{shown}': {e}")?;
                    report.failures += 1;
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn rm(targets: &[PathBuf], options: RmOptions, answers: &str) -> (RmReport, String, String) {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let report = run_rm(targets, options, answers.as_bytes(), &mut out, &mut diag).unwrap();
        (
            report,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn removes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let (report, _, diag) = rm(&[file.clone()], RmOptions::default(), "");
        assert_eq!(report.removed, 1);
        assert_eq!(report.exit_code(), 0);
        assert!(diag.is_empty());
        assert!(!file.exists());
    }

    #[test]
    fn refuses_directory_without_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let (report, _, diag) = rm(&[sub.clone()], RmOptions::default(), "");
        assert_eq!(report.exit_code(), 1);
        assert!(diag.contains("Is a directory"));
        assert!(sub.exists());
    }

    #[test]
    fn force_keeps_directory_warning_but_not_status() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let opts = RmOptions { force: true, ..Default::default() };
        let (report, _, diag) = rm(&[sub.clone()], opts, "");
        assert_eq!(report.exit_code(), 0);
        assert!(diag.contains("Is a directory"));
        assert!(sub.exists());
    }

    #[test]
    fn recursive_removes_tree() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(sub.join("deep")).unwrap();
        fs::write(sub.join("deep/f"), "x").unwrap();

        let opts = RmOptions { recursive: true, verbose: true, ..Default::default() };
        let (report, out, _) = rm(&[sub.clone()], opts, "");
        assert_eq!(report.removed, 1);
        assert!(out.contains("removed '"));
        assert!(!sub.exists());
    }

    #[test]
    fn missing_target_is_an_error_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = dir.path().join("ghost");

        let (report, _, diag) = rm(&[ghost.clone()], RmOptions::default(), "");
        assert_eq!(report.exit_code(), 1);
        assert!(diag.contains("No such file or directory"));

        let opts = RmOptions { force: true, ..Default::default() };
        let (report, _, diag) = rm(&[ghost], opts, "");
        assert_eq!(report.exit_code(), 0);
        assert!(diag.is_empty());
    }

    #[test]
    fn missing_operand() {
        let err = run_rm(&[], RmOptions::default(), io::empty(), io::sink(), io::sink()).unwrap_err();
        assert!(matches!(err, GilchristError::MissingOperand));

        let opts = RmOptions { force: true, ..Default::default() };
        let report = run_rm(&[], opts, io::empty(), io::sink(), io::sink()).unwrap();
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn interactive_honours_answers() {
        let dir = tempfile::tempdir().unwrap();
        let keep = dir.path().join("keep");
        let gone = dir.path().join("gone");
        fs::write(&keep, "x").unwrap();
        fs::write(&gone, "x").unwrap();

        let opts = RmOptions { interactive: true, verbose: true, ..Default::default() };
        let (report, out, _) = rm(&[keep.clone(), gone.clone()], opts, "n\n Y \n");
        assert_eq!(report.removed, 1);
        assert_eq!(report.declined, 1);
        assert!(out.contains("remove '"));
        assert!(out.contains("not removing '"));
        assert!(keep.exists());
        assert!(!gone.exists());
    }

    #[test]
    fn unreadable_answer_is_a_no() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "terminal went away"))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();

        let opts = RmOptions { interactive: true, ..Default::default() };
        let mut out = Vec::new();
        let report = run_rm(
            &[file.clone()],
            opts,
            io::BufReader::new(Broken),
            &mut out,
            io::sink(),
        )
        .unwrap();

        assert_eq!(report.declined, 1);
        assert_eq!(report.removed, 0);
        assert_eq!(report.exit_code(), 0);
        assert!(file.exists());
    }

    #[test]
    fn force_overrides_interactive() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();

        let opts = RmOptions { interactive: true, force: true, ..Default::default() };
        let (report, out, _) = rm(&[file.clone()], opts, "");
        assert_eq!(report.removed, 1);
        assert!(out.is_empty());
        assert!(!file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn removes_symlink_not_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inside"), "x").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let (report, _, _) = rm(&[link.clone()], RmOptions::default(), "");
        assert_eq!(report.removed, 1);
        assert!(!link.exists());
        assert!(target.join("inside").exists());
    }
}
