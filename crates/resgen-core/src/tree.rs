use std::borrow::Cow;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::TreeError;

/// A node of a scanned resource directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceNode {
    /// A single file.
    Resource { path: PathBuf },
    /// A directory and everything below it, in file-name order.
    Container {
        path: PathBuf,
        children: Vec<ResourceNode>,
    },
}

type OpenDir = (PathBuf, Vec<ResourceNode>);

impl ResourceNode {
    /// Scan `root` into a tree.
    ///
    /// Entries are sorted by file name so that the tree, and everything
    /// generated from it, does not depend on the platform's listing order.
    /// Symbolic links are followed; a link back to one of its own ancestors
    /// fails with [`TreeError::Cycle`].
    pub fn scan(root: &Path) -> Result<Self, TreeError> {
        if !root.is_dir() {
            return Err(TreeError::NotADirectory(root.to_path_buf()));
        }

        let mut open: Vec<OpenDir> = Vec::new();

        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry?;

            while open.len() > entry.depth() {
                fold_last(&mut open);
            }

            if entry.file_type().is_dir() {
                open.push((entry.path().to_path_buf(), Vec::new()));
            } else if let Some((_, siblings)) = open.last_mut() {
                siblings.push(ResourceNode::Resource {
                    path: entry.path().to_path_buf(),
                });
            }
        }

        while open.len() > 1 {
            fold_last(&mut open);
        }

        let (path, children) = open
            .pop()
            .ok_or_else(|| TreeError::NotADirectory(root.to_path_buf()))?;
        log::debug!("scanned {} ({} entries)", path.display(), children.len());

        Ok(ResourceNode::Container { path, children })
    }

    pub fn path(&self) -> &Path {
        match self {
            ResourceNode::Resource { path } | ResourceNode::Container { path, .. } => path,
        }
    }

    /// Final path component, as used for naming.
    pub fn name(&self) -> Cow<'_, str> {
        self.path()
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }

    pub fn children(&self) -> &[ResourceNode] {
        match self {
            ResourceNode::Resource { .. } => &[],
            ResourceNode::Container { children, .. } => children,
        }
    }

    /// A container without children. Resources are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, ResourceNode::Container { children, .. } if children.is_empty())
    }

    /// Number of resources anywhere below this node.
    pub fn resource_count(&self) -> usize {
        match self {
            ResourceNode::Resource { .. } => 1,
            ResourceNode::Container { children, .. } => {
                children.iter().map(ResourceNode::resource_count).sum()
            }
        }
    }
}

/// Close the innermost open directory and attach it to its parent.
fn fold_last(open: &mut Vec<OpenDir>) {
    if open.len() < 2 {
        return;
    }
    if let Some((path, children)) = open.pop()
        && let Some((_, parent)) = open.last_mut()
    {
        parent.push(ResourceNode::Container { path, children });
    }
}
