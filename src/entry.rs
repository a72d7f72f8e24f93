use std::fs::FileType;
use std::path::PathBuf;

/// A single filesystem entry visited during a walk.
///
/// `depth` counts the path segments strictly between the walk's root and
/// this node, so the root itself is depth 0 and its direct children are
/// depth 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Absolute path to the entry.
    pub path: PathBuf,

    /// Last path segment. For a filesystem root like `/` this is the whole path.
    pub name: String,

    /// What kind of entry this is. Symlinks are never followed.
    pub kind: NodeKind,

    /// Depth relative to the walk's root. Root = 0.
    pub depth: usize,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }
}

/// The kind of a traversed entry, as reported without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl From<FileType> for NodeKind {
    fn from(ft: FileType) -> Self {
        if ft.is_dir() {
            NodeKind::Dir
        } else if ft.is_file() {
            NodeKind::File
        } else if ft.is_symlink() {
            NodeKind::Symlink
        } else {
            NodeKind::Other
        }
    }
}
