use std::path::PathBuf;
use std::time::Duration;

use crate::error::GilchristError;

/// Accumulated state of a walk over one or more roots.
///
/// Threaded through the engine by `&mut` so each root adds to the same
/// counters. `paths` is opt-in; enable it with `.collect_paths(true)` on the
/// builder.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Number of nodes handed to the visitor.
    pub emitted: usize,

    /// Number of nodes removed by the action executor.
    pub deleted: usize,

    /// Paths of emitted nodes, in pre-order.
    /// Only populated if `.collect_paths(true)` was set on the builder.
    pub paths: Vec<PathBuf>,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Recoverable errors, in the order they happened.
    pub errors: Vec<GilchristError>,
}

impl WalkReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if any root, node or deletion failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Process exit status for this walk: 0 when every reachable node was
    /// processed without error, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_errors())
    }
}

/// Node counts and timing for a walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanStats {
    /// Non-directories looked at, matched or not.
    pub files: usize,

    /// Directories looked at, roots included.
    pub dirs: usize,

    pub duration: Duration,
}
