use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use path_clean::PathClean;
use tracing::{debug, trace, warn};

use crate::entry::{Node, NodeKind};
use crate::error::GilchristError;
use crate::filter::FilterSpec;
use crate::results::WalkReport;
use crate::traits::{Outcome, Visitor};

// ---------------------------------------------------------------------------
// Pending
// ---------------------------------------------------------------------------

/// A node waiting on the work stack.
///
/// Its kind is read with `lstat` only when it is popped, so an entry that
/// vanished after its parent was listed fails here instead of being emitted.
struct Pending {
    path:  PathBuf,
    depth: usize,
}

impl Pending {
    fn resolve(self) -> std::io::Result<Node> {
        let kind = NodeKind::from(fs::symlink_metadata(&self.path)?.file_type());
        Ok(Node {
            name: node_name(&self.path),
            path: self.path,
            kind,
            depth: self.depth,
        })
    }
}

// ---------------------------------------------------------------------------
// walk()
// ---------------------------------------------------------------------------

/// Walk every root in order, pre-order depth-first, one root at a time.
///
/// A root that cannot be reached is reported and skipped; the remaining
/// roots are still walked. Every recoverable error lands in the returned
/// report and is also passed to [`Visitor::error`] as it happens.
pub fn walk<P: AsRef<Path>>(roots: &[P], spec: &FilterSpec, visitor: &mut dyn Visitor) -> WalkReport {
    let mut report = WalkReport::new();
    let start = Instant::now();

    for root in roots {
        walk_root(root.as_ref(), spec, visitor, &mut report);
    }

    report.stats.duration = start.elapsed();
    report
}

/// Walk a single root, adding to `report`.
///
/// The root is made absolute and lexically cleaned (symlinks are not
/// resolved) and becomes depth 0. Only `stats.files` and `stats.dirs` are
/// updated here; duration is measured by [`walk`].
pub fn walk_root(root: &Path, spec: &FilterSpec, visitor: &mut dyn Visitor, report: &mut WalkReport) {
    let root = match std::path::absolute(root) {
        Ok(abs) => abs.clean(),
        Err(source) => {
            fail(visitor, report, GilchristError::RootUnreachable {
                path: root.to_path_buf(),
                source,
            });
            return;
        }
    };

    debug!(root = %root.display(), "walking root");

    let mut stack = vec![Pending { path: root, depth: 0 }];

    while let Some(pending) = stack.pop() {
        if step(pending, spec, visitor, report, &mut stack) == Outcome::AbortRoot {
            return;
        }
    }
}

// ---------------------------------------------------------------------------
// step()
// ---------------------------------------------------------------------------

/// Handle one node: resolve it, decide it, visit it if emitted, then push its
/// children if it is a directory that should still be entered.
///
/// Children are pushed only after the visitor has run, so a directory the
/// visitor deleted is never listed.
fn step(
    pending: Pending,
    spec:    &FilterSpec,
    visitor: &mut dyn Visitor,
    report:  &mut WalkReport,
    stack:   &mut Vec<Pending>,
) -> Outcome {
    let is_root = pending.depth == 0;
    let path = pending.path.clone();

    let node = match pending.resolve() {
        Ok(node) => node,
        Err(source) => {
            fail(visitor, report, access_error(is_root, path, source));
            return if is_root { Outcome::AbortRoot } else { Outcome::PruneSubtree };
        }
    };

    if node.is_dir() {
        report.stats.dirs += 1;
    } else {
        report.stats.files += 1;
    }

    let decision = spec.decide(&node);
    trace!(path = %node.path.display(), depth = node.depth, ?decision, "visit");

    let outcome = if decision.emit {
        report.emitted += 1;
        visitor.visit(&node, report)
    } else if node.is_dir() && !decision.descend {
        Outcome::PruneSubtree
    } else {
        Outcome::Skip
    };

    let descend = decision.descend && matches!(outcome, Outcome::Continue | Outcome::Skip);
    if !descend {
        if node.is_dir() && outcome == Outcome::PruneSubtree {
            debug!(path = %node.path.display(), depth = node.depth, "pruned");
        }
        return outcome;
    }

    match read_children(&node.path, node.depth + 1, visitor, report) {
        Ok(children) => stack.extend(children.into_iter().rev()),
        Err(source) => {
            fail(visitor, report, access_error(is_root, node.path, source));
            if is_root {
                return Outcome::AbortRoot;
            }
        }
    }

    outcome
}

/// List `dir`, sorted by file name so output is stable across filesystems.
///
/// A failure to open the directory is returned; a failure on one entry is
/// reported and that entry is skipped.
fn read_children(
    dir:     &Path,
    depth:   usize,
    visitor: &mut dyn Visitor,
    report:  &mut WalkReport,
) -> std::io::Result<Vec<Pending>> {
    let mut children = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(source) => {
                fail(visitor, report, GilchristError::NodeUnreadable {
                    path: dir.to_path_buf(),
                    source,
                });
                continue;
            }
        };
        children.push(Pending { path: entry.path(), depth });
    }

    children.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(children)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn access_error(is_root: bool, path: PathBuf, source: std::io::Error) -> GilchristError {
    if is_root {
        GilchristError::RootUnreachable { path, source }
    } else {
        GilchristError::NodeUnreadable { path, source }
    }
}

fn fail(visitor: &mut dyn Visitor, report: &mut WalkReport, err: GilchristError) {
    warn!(error = %err, "walk error");
    visitor.error(&err);
    report.errors.push(err);
}

/// Last segment of `path`, or the whole path when it has none (`/`).
fn node_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None       => path.to_string_lossy().into_owned(),
    }
}
