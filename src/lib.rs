//! # gilchrist
//!
//! A small file-management toolkit: `wc`, `find` and `rm`.
//!
//! The interesting part is `find`: a single-threaded, pre-order walk over
//! one or more roots that applies depth bounds, a type constraint and a glob
//! name predicate to every node, reports per-node failures without giving up
//! on the rest of the tree, and can delete what it matches. A deleted
//! directory is pruned on the spot so its children are never listed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gilchrist::KindFilter;
//!
//! let report = gilchrist::find()
//!     .root("/var/log")
//!     .name("*.log")
//!     .kind(KindFilter::File)
//!     .max_depth(1)
//!     .collect_paths(true)
//!     .run()
//!     .unwrap();
//!
//! for path in &report.paths {
//!     println!("{}", path.display());
//! }
//! println!("{} errors, exit {}", report.errors.len(), report.exit_code());
//! ```
//!
//! # Printing and deleting
//!
//! [`Executor`] is the action the command-line tool uses: it prints every
//! emitted path and, when asked, removes it.
//!
//! ```rust,no_run
//! let finder = gilchrist::find()
//!     .root("build")
//!     .name("*.o")
//!     .delete(true)
//!     .build()
//!     .unwrap();
//!
//! let mut executor = finder.executor(std::io::stdout(), std::io::stderr());
//! let report = finder.run_with(&mut executor);
//! assert_eq!(report.exit_code(), 0);
//! ```
//!
//! # Custom visitors
//!
//! Implement [`Visitor`] to do something else with each emitted node:
//!
//! ```rust
//! use gilchrist::{Node, Outcome, Visitor, WalkReport};
//!
//! struct Sizes(u64);
//!
//! impl Visitor for Sizes {
//!     fn visit(&mut self, node: &Node, _report: &mut WalkReport) -> Outcome {
//!         self.0 += std::fs::symlink_metadata(&node.path).map(|m| m.len()).unwrap_or(0);
//!         Outcome::Continue
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod pattern;
pub mod rm;
pub mod wc;

mod action;
mod builder;
mod entry;
mod error;
mod filter;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use action::{ActionResult, Executor};
pub use builder::{FindBuilder, Finder};
pub use entry::{Node, NodeKind};
pub use error::GilchristError;
pub use filter::{Decision, FilterSpec, KindFilter};
pub use pattern::GlobPattern;
pub use results::{ScanStats, WalkReport};
pub use traits::{Matcher, Outcome, Visitor};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`FindBuilder`] to configure and run a find.
///
/// # Example
///
/// ```rust
/// let finder = gilchrist::find()
///     .root(".")
///     .name("*.txt")
///     .min_depth(1)
///     .build()
///     .unwrap();
///
/// assert_eq!(finder.roots().len(), 1);
/// assert_eq!(finder.spec().min_depth_limit(), 1);
/// ```
pub fn find() -> FindBuilder {
    FindBuilder::default()
}
