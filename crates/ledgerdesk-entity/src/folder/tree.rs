//! Folder tree structures for hierarchical display.
//!
//! The tree is rebuilt on every request from `(folder_name, count)`
//! aggregates, so a folder exists exactly as long as some file row
//! references it or one of its descendants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::path;
use crate::file::File;

/// Number of files that sit directly in one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FolderCount {
    /// Normalized folder path.
    pub folder_name: String,
    /// Files whose `folder_name` equals this path.
    pub file_count: i64,
}

/// A node in a folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Last path segment.
    pub name: String,
    /// Full path.
    pub path: String,
    /// Files directly in this folder.
    pub file_count: u64,
    /// Files in this folder and all descendants.
    pub total_files: u64,
    /// Child folders, sorted by name.
    pub children: Vec<FolderNode>,
}

/// The complete virtual folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTree {
    /// Files stored at the root (`folder_name = ""`).
    pub root_file_count: u64,
    /// Files across the whole tree.
    pub total_files: u64,
    /// Number of distinct folders.
    pub total_folders: u64,
    /// Top-level folders.
    pub folders: Vec<FolderNode>,
}

/// A folder entry in a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSummary {
    /// Last path segment.
    pub name: String,
    /// Full path.
    pub path: String,
    /// Files in the subtree.
    pub total_files: u64,
}

/// Contents of one folder: its immediate subfolders and files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListing {
    /// The listed folder.
    pub path: String,
    /// Parent folder, `None` at the root.
    pub parent: Option<String>,
    /// Immediate subfolders.
    pub folders: Vec<FolderSummary>,
    /// Files directly in the folder.
    pub files: Vec<File>,
}

#[derive(Default)]
struct NodeBuilder {
    direct: u64,
    children: BTreeMap<String, NodeBuilder>,
}

impl NodeBuilder {
    fn finish(self, name: String, parent: &str) -> FolderNode {
        let path = path::join(parent, &name);
        let children: Vec<FolderNode> = self
            .children
            .into_iter()
            .map(|(child, builder)| builder.finish(child, &path))
            .collect();
        let total_files = self.direct + children.iter().map(|c| c.total_files).sum::<u64>();

        FolderNode {
            name,
            path,
            file_count: self.direct,
            total_files,
            children,
        }
    }
}

impl FolderTree {
    /// Build a tree from per-folder file counts.
    ///
    /// Intermediate folders that hold no files themselves still appear
    /// (`A/B/C` implies `A` and `A/B`).
    pub fn build(counts: &[FolderCount]) -> Self {
        let mut root = NodeBuilder::default();

        for entry in counts {
            let mut node = &mut root;
            for segment in path::segments(&entry.folder_name) {
                node = node.children.entry(segment.to_string()).or_default();
            }
            node.direct += entry.file_count.max(0) as u64;
        }

        let root_file_count = root.direct;
        let folders: Vec<FolderNode> = root
            .children
            .into_iter()
            .map(|(name, builder)| builder.finish(name, ""))
            .collect();
        let total_files = root_file_count + folders.iter().map(|f| f.total_files).sum::<u64>();
        let total_folders = folders.iter().map(count_nodes).sum();

        Self {
            root_file_count,
            total_files,
            total_folders,
            folders,
        }
    }

    /// Find the node at `path`. The root has no node.
    pub fn find(&self, path: &str) -> Option<&FolderNode> {
        let mut nodes = &self.folders;
        let mut found = None;
        for segment in path::segments(path) {
            let node = nodes.iter().find(|n| n.name == segment)?;
            nodes = &node.children;
            found = Some(node);
        }
        found
    }

    /// Whether a folder exists at `path` (the root always exists).
    pub fn contains(&self, path: &str) -> bool {
        path::is_root(path) || self.find(path).is_some()
    }

    /// Immediate subfolders of `path`, or `None` if the folder does not exist.
    pub fn subfolders(&self, path: &str) -> Option<Vec<FolderSummary>> {
        let nodes = if path::is_root(path) {
            &self.folders
        } else {
            &self.find(path)?.children
        };
        Some(
            nodes
                .iter()
                .map(|n| FolderSummary {
                    name: n.name.clone(),
                    path: n.path.clone(),
                    total_files: n.total_files,
                })
                .collect(),
        )
    }
}

fn count_nodes(node: &FolderNode) -> u64 {
    1 + node.children.iter().map(count_nodes).sum::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, i64)]) -> Vec<FolderCount> {
        entries
            .iter()
            .map(|(name, count)| FolderCount {
                folder_name: name.to_string(),
                file_count: *count,
            })
            .collect()
    }

    #[test]
    fn test_build_nested_tree() {
        let tree = FolderTree::build(&counts(&[
            ("", 2),
            ("Clients/Acme/2024", 3),
            ("Clients/Acme", 1),
            ("Clients/Beta", 4),
            ("Internal", 1),
        ]));

        assert_eq!(tree.root_file_count, 2);
        assert_eq!(tree.total_files, 11);
        assert_eq!(tree.total_folders, 5);
        assert_eq!(tree.folders.len(), 2);
        assert_eq!(tree.folders[0].name, "Clients");
        assert_eq!(tree.folders[1].name, "Internal");

        let clients = &tree.folders[0];
        assert_eq!(clients.file_count, 0);
        assert_eq!(clients.total_files, 8);

        let acme = tree.find("Clients/Acme").unwrap();
        assert_eq!(acme.file_count, 1);
        assert_eq!(acme.total_files, 4);
        assert_eq!(acme.children[0].path, "Clients/Acme/2024");
    }

    #[test]
    fn test_prefix_siblings_stay_separate() {
        let tree = FolderTree::build(&counts(&[("Tax", 1), ("Taxes", 2)]));
        assert_eq!(tree.folders.len(), 2);
        assert_eq!(tree.find("Tax").unwrap().total_files, 1);
        assert_eq!(tree.find("Taxes").unwrap().total_files, 2);
    }

    #[test]
    fn test_children_sorted_and_case_sensitive() {
        let tree = FolderTree::build(&counts(&[("b", 1), ("B", 1), ("a", 1)]));
        let names: Vec<_> = tree.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["B", "a", "b"]);
    }

    #[test]
    fn test_subfolders_and_contains() {
        let tree = FolderTree::build(&counts(&[("A/B", 1), ("A/C/D", 1)]));
        assert!(tree.contains(""));
        assert!(tree.contains("A/C"));
        assert!(!tree.contains("A/X"));

        let subs = tree.subfolders("A").unwrap();
        let paths: Vec<_> = subs.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["A/B", "A/C"]);
        assert!(tree.subfolders("Missing").is_none());
        assert_eq!(tree.subfolders("").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_tree() {
        let tree = FolderTree::build(&[]);
        assert_eq!(tree.total_files, 0);
        assert_eq!(tree.total_folders, 0);
        assert!(tree.folders.is_empty());
    }
}
