//! Per-node accept/reject/prune decisions.
//!
//! Checks run in a fixed order: depth ceiling, depth floor, type, name. The
//! ceiling is the only check that can stop a descent; every other check only
//! decides whether the node is emitted.

use std::fmt;
use std::sync::Arc;

use crate::entry::{Node, NodeKind};
use crate::traits::Matcher;

/// Restricts results to one kind of node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    /// Regular files only.
    File,
    /// Directories only.
    Dir,
}

impl KindFilter {
    pub fn accepts(self, kind: NodeKind) -> bool {
        match self {
            KindFilter::File => kind == NodeKind::File,
            KindFilter::Dir => kind == NodeKind::Dir,
        }
    }
}

/// The filter pipeline's verdict for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Hand the node to the visitor.
    pub emit: bool,
    /// List the node's children. Only ever true for directories.
    pub descend: bool,
}

/// Depth bounds, type constraint and name predicate, applied to every node.
///
/// Immutable once built; cloning shares the name predicate.
///
/// # Example
///
/// ```rust
/// use gilchrist::{FilterSpec, GlobPattern, KindFilter};
///
/// let spec = FilterSpec::new()
///     .name(GlobPattern::compile("*.log", false).unwrap())
///     .kind(KindFilter::File)
///     .max_depth(1);
///
/// assert_eq!(spec.max_depth_limit(), Some(1));
/// ```
#[derive(Clone, Default)]
pub struct FilterSpec {
    name:      Option<Arc<dyn Matcher>>,
    kind:      Option<KindFilter>,
    min_depth: usize,
    max_depth: Option<usize>,
}

impl FilterSpec {
    /// A spec that emits every node and descends into every directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only emit nodes whose name satisfies `matcher`.
    pub fn name(mut self, matcher: impl Matcher + 'static) -> Self {
        self.name = Some(Arc::new(matcher));
        self
    }

    pub(crate) fn name_arc(mut self, matcher: Option<Arc<dyn Matcher>>) -> Self {
        self.name = matcher;
        self
    }

    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Do not emit nodes shallower than `d`. Shallower directories are still
    /// walked through.
    pub fn min_depth(mut self, d: usize) -> Self {
        self.min_depth = d;
        self
    }

    /// Do not emit nodes deeper than `d`, and never enter a directory deeper
    /// than `d`. `0` means the roots only.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.max_depth = Some(d);
        self
    }

    pub fn min_depth_limit(&self) -> usize {
        self.min_depth
    }

    pub fn max_depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn kind_filter(&self) -> Option<KindFilter> {
        self.kind
    }

    /// Decide whether `node` is emitted and whether its children are listed.
    pub fn decide(&self, node: &Node) -> Decision {
        let descend = node.is_dir();

        if let Some(max) = self.max_depth {
            if node.depth > max {
                return Decision { emit: false, descend: false };
            }
        }

        if node.depth < self.min_depth {
            return Decision { emit: false, descend };
        }

        if let Some(kind) = self.kind {
            if !kind.accepts(node.kind) {
                return Decision { emit: false, descend };
            }
        }

        if let Some(name) = &self.name {
            if !name.is_match(&node.name) {
                return Decision { emit: false, descend };
            }
        }

        Decision { emit: true, descend }
    }
}

impl fmt::Debug for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSpec")
            .field("name", &self.name.as_ref().map(|_| "<matcher>"))
            .field("kind", &self.kind)
            .field("min_depth", &self.min_depth)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::GlobPattern;
    use std::path::PathBuf;

    fn node(name: &str, kind: NodeKind, depth: usize) -> Node {
        Node {
            path: PathBuf::from("/tmp").join(name),
            name: name.to_string(),
            kind,
            depth,
        }
    }

    fn glob(p: &str) -> GlobPattern {
        GlobPattern::compile(p, false).unwrap()
    }

    #[test]
    fn empty_spec_emits_everything() {
        let spec = FilterSpec::new();
        let d = spec.decide(&node("src", NodeKind::Dir, 3));
        assert_eq!(d, Decision { emit: true, descend: true });

        let f = spec.decide(&node("a.rs", NodeKind::File, 0));
        assert_eq!(f, Decision { emit: true, descend: false });
    }

    #[test]
    fn ceiling_prunes_deep_directories() {
        let spec = FilterSpec::new().max_depth(1);
        let d = spec.decide(&node("deep", NodeKind::Dir, 2));
        assert_eq!(d, Decision { emit: false, descend: false });

        let f = spec.decide(&node("deep.txt", NodeKind::File, 2));
        assert!(!f.emit);
    }

    #[test]
    fn ceiling_is_inclusive() {
        let spec = FilterSpec::new().max_depth(1);
        let d = spec.decide(&node("cache", NodeKind::Dir, 1));
        assert_eq!(d, Decision { emit: true, descend: true });
    }

    #[test]
    fn floor_hides_but_still_descends() {
        let spec = FilterSpec::new().min_depth(2);
        let d = spec.decide(&node("shallow", NodeKind::Dir, 1));
        assert_eq!(d, Decision { emit: false, descend: true });

        let ok = spec.decide(&node("deep", NodeKind::File, 2));
        assert!(ok.emit);
    }

    #[test]
    fn ceiling_wins_over_floor() {
        let spec = FilterSpec::new().min_depth(3).max_depth(1);
        let d = spec.decide(&node("x", NodeKind::Dir, 2));
        assert_eq!(d, Decision { emit: false, descend: false });
    }

    #[test]
    fn kind_filter_does_not_stop_descent() {
        let spec = FilterSpec::new().kind(KindFilter::File);
        let d = spec.decide(&node("src", NodeKind::Dir, 1));
        assert_eq!(d, Decision { emit: false, descend: true });

        let dirs = FilterSpec::new().kind(KindFilter::Dir);
        assert!(!dirs.decide(&node("a.txt", NodeKind::File, 1)).emit);
        assert!(dirs.decide(&node("src", NodeKind::Dir, 1)).emit);
    }

    #[test]
    fn symlinks_match_neither_kind() {
        let link = node("link", NodeKind::Symlink, 1);
        assert!(!FilterSpec::new().kind(KindFilter::File).decide(&link).emit);
        assert!(!FilterSpec::new().kind(KindFilter::Dir).decide(&link).emit);
        assert!(!FilterSpec::new().decide(&link).descend);
    }

    #[test]
    fn name_predicate_does_not_stop_descent() {
        let spec = FilterSpec::new().name(glob("*.log"));
        let d = spec.decide(&node("cache", NodeKind::Dir, 1));
        assert_eq!(d, Decision { emit: false, descend: true });

        assert!(spec.decide(&node("a.log", NodeKind::File, 1)).emit);
        assert!(!spec.decide(&node("b.txt", NodeKind::File, 1)).emit);
    }

    #[test]
    fn root_is_subject_to_the_same_rules() {
        let spec = FilterSpec::new().name(glob("*.log"));
        let root = node("project", NodeKind::Dir, 0);
        assert_eq!(spec.decide(&root), Decision { emit: false, descend: true });
    }
}
