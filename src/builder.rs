use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::walk;
use crate::entry::Node;
use crate::error::GilchristError;
use crate::filter::{FilterSpec, KindFilter};
use crate::pattern::GlobPattern;
use crate::results::WalkReport;
use crate::traits::{Matcher, Outcome, Visitor};

// ---------------------------------------------------------------------------
// FindBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and running a find.
///
/// Created via [`gilchrist::find()`](crate::find). Configure with chained
/// builder methods, then call [`run()`](FindBuilder::run) or
/// [`run_with()`](FindBuilder::run_with).
///
/// Patterns are compiled before any root is touched, so an invalid pattern
/// fails the whole run with nothing emitted or deleted.
///
/// # Example
///
/// ```rust,ignore
/// let report = gilchrist::find()
///     .root("/var/log")
///     .name("*.log")
///     .max_depth(1)
///     .collect_paths(true)
///     .run()?;
/// ```
#[derive(Default)]
pub struct FindBuilder {
    roots:         Vec<PathBuf>,
    pattern:       Option<(String, bool)>,
    matcher:       Option<Arc<dyn Matcher>>,
    kind:          Option<KindFilter>,
    min_depth:     usize,
    max_depth:     Option<usize>,
    delete:        bool,
    collect_paths: bool,
}

impl FindBuilder {
    // ── Roots ─────────────────────────────────────────────────────────────

    /// Add a root to walk. Roots are walked in the order they are added.
    /// With no roots, the current directory is walked.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.roots.push(path.into());
        self
    }

    pub fn roots<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(paths.into_iter().map(Into::into));
        self
    }

    // ── Name ──────────────────────────────────────────────────────────────

    /// Only emit nodes whose name matches the glob `pattern` exactly.
    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some((pattern.into(), false));
        self.matcher = None;
        self
    }

    /// Like [`name()`](FindBuilder::name), ignoring case.
    pub fn iname(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some((pattern.into(), true));
        self.matcher = None;
        self
    }

    /// Use a custom name predicate instead of a glob.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Arc::new(m));
        self.pattern = None;
        self
    }

    // ── Filters ───────────────────────────────────────────────────────────

    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Skip nodes shallower than `d`. Roots are depth 0.
    pub fn min_depth(mut self, d: usize) -> Self {
        self.min_depth = d;
        self
    }

    /// Maximum traversal depth. `0` means the roots only, `1` means one
    /// level of children, and so on. Unlimited by default.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    // ── Actions ───────────────────────────────────────────────────────────

    /// Delete every emitted node.
    ///
    /// Honoured by [`run()`](FindBuilder::run) and by any
    /// [`Executor`](crate::Executor) built with [`Finder::executor`]. A custom
    /// visitor passed to `run_with()` decides for itself what to do.
    pub fn delete(mut self, yes: bool) -> Self {
        self.delete = yes;
        self
    }

    /// Collect emitted paths into [`WalkReport::paths`].
    ///
    /// Disabled by default to avoid allocation when paths are printed instead.
    pub fn collect_paths(mut self, yes: bool) -> Self {
        self.collect_paths = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Compile patterns and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GilchristError::InvalidPattern`] if the name glob cannot be
    /// compiled.
    pub fn build(self) -> Result<Finder, GilchristError> {
        let matcher: Option<Arc<dyn Matcher>> = match (self.pattern, self.matcher) {
            (Some((p, _)), _) if p.is_empty() => None,
            (Some((p, fold)), _) => Some(Arc::new(GlobPattern::compile(&p, fold)?)),
            (None, m) => m,
        };

        let mut spec = FilterSpec::new().name_arc(matcher).min_depth(self.min_depth);
        if let Some(kind) = self.kind {
            spec = spec.kind(kind);
        }
        if let Some(d) = self.max_depth {
            spec = spec.max_depth(d);
        }

        let roots = if self.roots.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.roots
        };

        Ok(Finder {
            roots,
            spec,
            delete: self.delete,
            collect_paths: self.collect_paths,
        })
    }

    /// Walk and return the report without printing anything.
    ///
    /// Emitted paths land in [`WalkReport::paths`] when `.collect_paths(true)`
    /// is set. With `.delete(true)` every emitted node is removed, and
    /// failures are recorded in [`WalkReport::errors`].
    pub fn run(self) -> Result<WalkReport, GilchristError> {
        let finder = self.build()?;
        if finder.delete {
            let mut executor = finder.executor(io::sink(), io::sink());
            return Ok(finder.run_with(&mut executor));
        }
        Ok(finder.run_with(&mut Quiet))
    }

    /// Walk, handing every emitted node to `visitor`.
    pub fn run_with(self, visitor: &mut dyn Visitor) -> Result<WalkReport, GilchristError> {
        Ok(self.build()?.run_with(visitor))
    }
}

// ---------------------------------------------------------------------------
// Finder
// ---------------------------------------------------------------------------

/// A compiled, ready-to-run find.
#[derive(Debug)]
pub struct Finder {
    roots:         Vec<PathBuf>,
    spec:          FilterSpec,
    delete:        bool,
    collect_paths: bool,
}

impl Finder {
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// An executor that prints to `out`/`diag` and deletes if configured.
    pub fn executor<W: std::io::Write, E: std::io::Write>(&self, out: W, diag: E) -> crate::Executor<W, E> {
        crate::Executor::new(out, diag).delete(self.delete)
    }

    pub fn run_with(&self, visitor: &mut dyn Visitor) -> WalkReport {
        if !self.collect_paths {
            return walk(self.roots.as_slice(), &self.spec, visitor);
        }

        let mut collector = Collect { inner: visitor, paths: Vec::new() };
        let mut report = walk(self.roots.as_slice(), &self.spec, &mut collector);
        report.paths = collector.paths;
        report
    }
}

// ---------------------------------------------------------------------------
// Built-in visitors
// ---------------------------------------------------------------------------

/// Accepts every node and does nothing with it.
struct Quiet;

impl Visitor for Quiet {
    fn visit(&mut self, _node: &Node, _report: &mut WalkReport) -> Outcome {
        Outcome::Continue
    }
}

/// Records emitted paths, then delegates.
struct Collect<'a> {
    inner: &'a mut dyn Visitor,
    paths: Vec<PathBuf>,
}

impl Visitor for Collect<'_> {
    fn visit(&mut self, node: &Node, report: &mut WalkReport) -> Outcome {
        self.paths.push(node.path.clone());
        self.inner.visit(node, report)
    }

    fn error(&mut self, err: &GilchristError) {
        self.inner.error(err);
    }
}
