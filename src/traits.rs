use crate::entry::Node;
use crate::error::GilchristError;
use crate::results::WalkReport;

/// A predicate over a single path segment (a file or directory name).
///
/// [`GlobPattern`](crate::GlobPattern) is the built-in implementation. Implement
/// this for custom name logic: prefixes, extension sets, anything that can
/// answer from the name alone.
///
/// # Example
///
/// ```rust
/// use gilchrist::Matcher;
///
/// struct ExtensionMatcher(&'static str);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, name: &str) -> bool {
///         name.rsplit_once('.').map(|(_, ext)| ext == self.0).unwrap_or(false)
///     }
/// }
///
/// assert!(ExtensionMatcher("rs").is_match("main.rs"));
/// assert!(!ExtensionMatcher("rs").is_match("Makefile"));
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if `name` satisfies this predicate.
    fn is_match(&self, name: &str) -> bool;
}

/// What the traversal engine should do after handling one node.
///
/// Returned by [`Visitor::visit`] for emitted nodes and produced internally
/// by the engine for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The node was emitted. Descend into it if it is a directory.
    Continue,

    /// The node was not emitted. Descend into it if it is a directory.
    Skip,

    /// Never enumerate this node's children.
    PruneSubtree,

    /// The root could not be reached. Abandon it and move to the next root.
    AbortRoot,
}

/// Receives every emitted node of a walk, in pre-order.
///
/// The engine calls [`visit`](Visitor::visit) only for nodes the
/// [`FilterSpec`](crate::FilterSpec) accepts. Returning
/// [`Outcome::PruneSubtree`] stops the engine from listing a directory's
/// children; this is how a deleted directory is kept out of the rest of the
/// walk.
///
/// `report` is the walk's shared context. Visitors that change the
/// filesystem record their own failures there (see
/// [`Executor`](crate::Executor)) so they count toward the exit status.
pub trait Visitor {
    fn visit(&mut self, node: &Node, report: &mut WalkReport) -> Outcome;

    /// Called for each recoverable error, as it happens.
    ///
    /// The engine also records the error in the
    /// [`WalkReport`](crate::WalkReport); this hook exists so callers can
    /// report it in walk order.
    fn error(&mut self, _err: &GilchristError) {}
}
