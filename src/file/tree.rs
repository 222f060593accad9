//! Folder tree reconstruction from flat file records.

use serde::Serialize;

use super::metadata::FileMetadata;

/// A folder in the derived tree.
///
/// The root node has an empty name and path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderNode {
    /// Last path segment.
    pub name: String,
    /// Full folder path from the group root.
    pub path: String,
    /// Child folders in order of first appearance.
    pub folders: Vec<FolderNode>,
    /// Files whose folder is exactly this node's path.
    pub files: Vec<FileMetadata>,
}

impl FolderNode {
    fn child(name: &str, parent_path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: crate::path::join(parent_path, name),
            ..Self::default()
        }
    }

    /// Walk down `folder`, creating missing nodes, and return the terminal node.
    fn descend_mut(&mut self, folder: &str) -> &mut FolderNode {
        let mut node = self;
        for segment in folder.split('/').filter(|s| !s.is_empty()) {
            let idx = match node.folders.iter().position(|f| f.name == segment) {
                Some(idx) => idx,
                None => {
                    let child = FolderNode::child(segment, &node.path);
                    node.folders.push(child);
                    node.folders.len() - 1
                }
            };
            node = &mut node.folders[idx];
        }
        node
    }

    /// Find the node at `folder`, if present.
    pub fn find(&self, folder: &str) -> Option<&FolderNode> {
        let mut node = self;
        for segment in folder.split('/').filter(|s| !s.is_empty()) {
            node = node.folders.iter().find(|f| f.name == segment)?;
        }
        Some(node)
    }

    /// Add folders that exist without files (e.g. freshly created ones).
    ///
    /// Existing nodes keep their position; new ones are appended.
    pub fn with_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for folder in folders {
            self.descend_mut(folder.as_ref());
        }
        self
    }

    #[cfg(test)]
    fn file_count(&self) -> usize {
        self.files.len() + self.folders.iter().map(FolderNode::file_count).sum::<usize>()
    }
}

/// Build the folder tree for a group's files.
///
/// Each file is attached only to the node matching its folder exactly.
/// The result depends only on the input order, so rebuilding from the same
/// list gives the same tree.
pub fn build_tree(files: &[FileMetadata]) -> FolderNode {
    let mut root = FolderNode::default();
    for file in files {
        root.descend_mut(&file.folder).files.push(file.clone());
    }
    root
}
