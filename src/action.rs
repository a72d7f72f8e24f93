//! What happens to a node once the filter pipeline accepts it.

use std::fs;
use std::io::{self, Write};

use tracing::debug;

use crate::entry::{Node, NodeKind};
use crate::error::GilchristError;
use crate::results::WalkReport;
use crate::traits::{Outcome, Visitor};

const PREFIX: &str = "gilchrist find";

/// Result of acting on one node.
#[derive(Debug, Default)]
pub struct ActionResult {
    /// The node no longer exists.
    pub deleted: bool,

    /// Deletion was requested and failed.
    pub error: Option<GilchristError>,
}

/// Prints each emitted node and optionally deletes it.
///
/// Paths go to `out`, one per line. Deletion confirmations, deletion
/// failures and traversal errors go to `diag`, prefixed with the tool name.
///
/// A write failure on either stream does not stop the walk; the first one is
/// kept and can be retrieved with [`take_write_error`](Executor::take_write_error).
pub struct Executor<W: Write, E: Write> {
    out:         W,
    diag:        E,
    delete:      bool,
    write_error: Option<io::Error>,
}

impl<W: Write, E: Write> Executor<W, E> {
    pub fn new(out: W, diag: E) -> Self {
        Self {
            out,
            diag,
            delete: false,
            write_error: None,
        }
    }

    /// Remove every emitted node after printing it.
    pub fn delete(mut self, yes: bool) -> Self {
        self.delete = yes;
        self
    }

    /// Print `node` and, if deletion is enabled, remove it.
    pub fn act(&mut self, node: &Node) -> ActionResult {
        let printed = writeln!(self.out, "{}", node.path.display());
        self.note(printed);

        if !self.delete {
            return ActionResult::default();
        }

        let removed = match node.kind {
            NodeKind::Dir => fs::remove_dir_all(&node.path),
            _             => fs::remove_file(&node.path),
        };

        match removed {
            Ok(()) => {
                debug!(path = %node.path.display(), kind = ?node.kind, "deleted");
                let line = writeln!(self.diag, "{PREFIX}: deleted {}", node.path.display());
                self.note(line);
                ActionResult { deleted: true, error: None }
            }
            Err(source) => ActionResult {
                deleted: false,
                error: Some(GilchristError::DeletionFailed {
                    path: node.path.clone(),
                    source,
                }),
            },
        }
    }

    /// Flush both streams and hand back the first write failure, if any.
    pub fn take_write_error(&mut self) -> Option<io::Error> {
        let flushed = self.out.flush();
        self.note(flushed);
        let flushed = self.diag.flush();
        self.note(flushed);
        self.write_error.take()
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.diag)
    }

    fn note(&mut self, res: io::Result<()>) {
        if let Err(e) = res {
            self.write_error.get_or_insert(e);
        }
    }
}

impl<W: Write, E: Write> Visitor for Executor<W, E> {
    fn visit(&mut self, node: &Node, report: &mut WalkReport) -> Outcome {
        let result = self.act(node);

        if result.deleted {
            report.deleted += 1;
            // Nothing left to descend into.
            return if node.is_dir() { Outcome::PruneSubtree } else { Outcome::Continue };
        }

        if let Some(err) = result.error {
            self.error(&err);
            report.errors.push(err);
        }
        Outcome::Continue
    }

    fn error(&mut self, err: &GilchristError) {
        let line = writeln!(self.diag, "{PREFIX}: {err}");
        self.note(line);
    }
}
