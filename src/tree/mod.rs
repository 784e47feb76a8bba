//! Directory tree synthesizer.
//!
//! Converts a flat collection of normalized file records into a nested
//! folder/file hierarchy for progressive disclosure rendering, and
//! normalizes the backend's pre-nested directory tree into the same node
//! shape. All transforms return fresh trees; input trees are never mutated,
//! since downstream change detection keys on new values.

mod path;

pub use path::*;

use std::collections::{HashMap, HashSet};

use crate::models::{DirectoryEntry, DirectoryTree, EntryType, FileRecord, VirtualFile};

/// Node kind in the synthesized tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// One display-ready node of the synthesized file tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTreeNode {
    /// Storage id for files, `folder-` + path for folders
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    /// Full virtual path
    pub path: String,
    /// 0 = top level
    pub depth: usize,
    /// Folders only; files stay collapsed
    pub expanded: bool,
    /// Backing record, files only
    pub file: Option<FileRecord>,
    /// Ordered child nodes, folders only
    pub children: Option<Vec<FileTreeNode>>,
    /// Marker id of an empty-directory placeholder
    pub empty_directory_id: Option<String>,
    /// Recursive descendant file count, folders from the backend tree only
    pub file_count: Option<u64>,
}

impl FileTreeNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    fn folder(name: String, path: String, depth: usize) -> Self {
        Self {
            id: format!("folder-{}", path),
            name,
            kind: NodeKind::Folder,
            path,
            depth,
            expanded: false,
            file: None,
            children: Some(Vec::new()),
            empty_directory_id: None,
            file_count: None,
        }
    }
}

/// Intermediate per-folder accumulator keyed by segment name.
#[derive(Default)]
struct FolderScratch<'a> {
    folders: HashMap<String, FolderScratch<'a>>,
    files: Vec<&'a VirtualFile>,
}

/// Build a hierarchical tree from a flat list of normalized file records.
///
/// One folder node is created per distinct path prefix; repeated prefixes
/// across records collapse onto the same node. Siblings are ordered folders
/// first, then by name, recursively at every level.
pub fn build_file_tree(files: &[VirtualFile]) -> Vec<FileTreeNode> {
    let mut root = FolderScratch::default();

    for file in files {
        let mut level = &mut root;
        if !file.folder.is_empty() {
            for segment in file.folder.split('/').filter(|s| !s.is_empty()) {
                level = level.folders.entry(segment.to_string()).or_default();
            }
        }
        level.files.push(file);
    }

    realize_level(root, "", 0)
}

fn realize_level(scratch: FolderScratch<'_>, parent_path: &str, depth: usize) -> Vec<FileTreeNode> {
    let mut nodes = Vec::with_capacity(scratch.folders.len() + scratch.files.len());

    for (name, sub) in scratch.folders {
        let full_path = if parent_path.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", parent_path, name)
        };
        let children = realize_level(sub, &full_path, depth + 1);
        let mut node = FileTreeNode::folder(name, full_path, depth);
        node.children = Some(children);
        nodes.push(node);
    }

    for file in scratch.files {
        nodes.push(FileTreeNode {
            id: file.record.file_storage_id.clone(),
            name: file.name.clone(),
            kind: NodeKind::File,
            path: file.path(),
            depth,
            expanded: false,
            file: Some(file.record.clone()),
            children: None,
            empty_directory_id: None,
            file_count: None,
        });
    }

    sort_siblings(&mut nodes);
    nodes
}

/// Folders strictly precede files; within each kind, names ascend.
fn sort_siblings(nodes: &mut [FileTreeNode]) {
    nodes.sort_by(|a, b| match (a.kind, b.kind) {
        (NodeKind::Folder, NodeKind::File) => std::cmp::Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => std::cmp::Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
}

/// Relabel the backend's pre-nested directory tree into the synthesized node
/// shape. Directory nodes gain a recursive descendant file count and carry
/// their empty-directory marker forward. Child order is taken from the
/// backend as-is; unlike [`build_file_tree`] this performs no reordering.
pub fn convert_backend_tree(tree: &DirectoryTree) -> Vec<FileTreeNode> {
    tree.children
        .iter()
        .map(|entry| convert_entry(entry, 0))
        .collect()
}

fn convert_entry(entry: &DirectoryEntry, depth: usize) -> FileTreeNode {
    match entry.entry_type {
        EntryType::Directory => {
            let children: Vec<FileTreeNode> = entry
                .children
                .iter()
                .map(|child| convert_entry(child, depth + 1))
                .collect();
            let file_count = children
                .iter()
                .map(|child| match child.kind {
                    NodeKind::File => 1,
                    NodeKind::Folder => child.file_count.unwrap_or(0),
                })
                .sum();

            FileTreeNode {
                id: format!("folder-{}", entry.path),
                name: entry.name.clone(),
                kind: NodeKind::Folder,
                path: entry.path.clone(),
                depth,
                expanded: false,
                file: None,
                children: Some(children),
                empty_directory_id: entry.empty_directory_id.clone(),
                file_count: Some(file_count),
            }
        }
        EntryType::File => FileTreeNode {
            id: entry
                .file
                .as_ref()
                .map(|f| f.file_storage_id.clone())
                .unwrap_or_else(|| entry.path.clone()),
            name: entry.name.clone(),
            kind: NodeKind::File,
            path: entry.path.clone(),
            depth,
            expanded: false,
            file: entry.file.clone(),
            children: None,
            empty_directory_id: None,
            file_count: None,
        },
    }
}

/// Flatten the tree into the ordered list of currently visible nodes.
///
/// Depth-first pre-order walk that descends into a folder's children only
/// when that folder is expanded. Recomputed on every call.
pub fn flatten_tree(nodes: &[FileTreeNode]) -> Vec<&FileTreeNode> {
    fn traverse<'a>(nodes: &'a [FileTreeNode], out: &mut Vec<&'a FileTreeNode>) {
        for node in nodes {
            out.push(node);
            if node.is_folder() && node.expanded {
                if let Some(children) = &node.children {
                    traverse(children, out);
                }
            }
        }
    }

    let mut result = Vec::new();
    traverse(nodes, &mut result);
    result
}

/// Return a structural copy with the expansion flag of one node flipped.
pub fn toggle_node_expansion(nodes: &[FileTreeNode], node_id: &str) -> Vec<FileTreeNode> {
    nodes
        .iter()
        .map(|node| {
            let mut copy = node.clone();
            if copy.id == node_id {
                copy.expanded = !copy.expanded;
            }
            if let Some(children) = &node.children {
                copy.children = Some(toggle_node_expansion(children, node_id));
            }
            copy
        })
        .collect()
}

/// Return a structural copy with every folder expanded.
pub fn expand_all_nodes(nodes: &[FileTreeNode]) -> Vec<FileTreeNode> {
    set_all_expanded(nodes, true)
}

/// Return a structural copy with every folder collapsed.
pub fn collapse_all_nodes(nodes: &[FileTreeNode]) -> Vec<FileTreeNode> {
    set_all_expanded(nodes, false)
}

fn set_all_expanded(nodes: &[FileTreeNode], expanded: bool) -> Vec<FileTreeNode> {
    nodes
        .iter()
        .map(|node| {
            let mut copy = node.clone();
            if copy.is_folder() {
                copy.expanded = expanded;
            }
            if let Some(children) = &node.children {
                copy.children = Some(set_all_expanded(children, expanded));
            }
            copy
        })
        .collect()
}

/// Collect the ids of every expanded folder, for carrying expansion state
/// across a rebuild.
pub fn expanded_node_ids(nodes: &[FileTreeNode]) -> HashSet<String> {
    fn collect(nodes: &[FileTreeNode], out: &mut HashSet<String>) {
        for node in nodes {
            if node.is_folder() {
                if node.expanded {
                    out.insert(node.id.clone());
                }
                if let Some(children) = &node.children {
                    collect(children, out);
                }
            }
        }
    }

    let mut ids = HashSet::new();
    collect(nodes, &mut ids);
    ids
}

/// Return a structural copy with every folder whose id appears in the set
/// expanded. Ids with no matching folder are ignored.
pub fn apply_expansion(nodes: &[FileTreeNode], expanded: &HashSet<String>) -> Vec<FileTreeNode> {
    nodes
        .iter()
        .map(|node| {
            let mut copy = node.clone();
            if copy.is_folder() {
                copy.expanded = expanded.contains(&copy.id);
            }
            if let Some(children) = &node.children {
                copy.children = Some(apply_expansion(children, expanded));
            }
            copy
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::Map;

    fn record(id: &str, name: &str) -> FileRecord {
        FileRecord {
            file_storage_id: id.to_string(),
            file_name: name.to_string(),
            file_format: "gcode".to_string(),
            file_size: 2048,
            file_hash: format!("hash-{}", id),
            created_at: Utc::now(),
            thumbnails: vec![],
            metadata: Map::new(),
        }
    }

    fn virtual_file(id: &str, folder: &str, name: &str) -> VirtualFile {
        VirtualFile {
            folder: folder.to_string(),
            name: name.to_string(),
            record: record(id, name),
        }
    }

    fn sample_tree() -> Vec<FileTreeNode> {
        build_file_tree(&[
            virtual_file("f1", "projects/boats", "hull.gcode"),
            virtual_file("f2", "projects/boats", "deck.gcode"),
            virtual_file("f3", "projects", "notes.gcode"),
            virtual_file("f4", "", "calibration.gcode"),
            virtual_file("f5", "alpha", "a.gcode"),
        ])
    }

    fn count_files(nodes: &[FileTreeNode]) -> usize {
        nodes
            .iter()
            .map(|n| match n.kind {
                NodeKind::File => 1,
                NodeKind::Folder => count_files(n.children.as_deref().unwrap_or(&[])),
            })
            .sum()
    }

    #[test]
    fn test_empty_input_builds_empty_root() {
        assert!(build_file_tree(&[]).is_empty());
    }

    #[test]
    fn test_shared_prefixes_collapse_to_one_folder() {
        let tree = sample_tree();

        let projects = tree.iter().find(|n| n.name == "projects").unwrap();
        assert!(projects.is_folder());
        assert_eq!(projects.depth, 0);
        assert_eq!(projects.path, "projects");

        let children = projects.children.as_ref().unwrap();
        let boats = children.iter().find(|n| n.name == "boats").unwrap();
        assert_eq!(boats.path, "projects/boats");
        assert_eq!(boats.depth, 1);
        assert_eq!(boats.children.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_node_path_extends_parent_path() {
        fn check(nodes: &[FileTreeNode], parent: &str) {
            for node in nodes {
                if parent.is_empty() {
                    assert_eq!(node.path, node.name);
                } else {
                    assert_eq!(node.path, format!("{}/{}", parent, node.name));
                }
                if let Some(children) = &node.children {
                    check(children, &node.path);
                }
            }
        }
        check(&sample_tree(), "");
    }

    #[test]
    fn test_sibling_ordering_folders_first_then_name() {
        fn check(nodes: &[FileTreeNode]) {
            for pair in nodes.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if a.kind == b.kind {
                    assert!(a.name <= b.name, "{} > {}", a.name, b.name);
                } else {
                    assert_eq!(a.kind, NodeKind::Folder);
                    assert_eq!(b.kind, NodeKind::File);
                }
            }
            for node in nodes {
                if let Some(children) = &node.children {
                    check(children);
                }
            }
        }

        let tree = sample_tree();
        // alpha, projects, then the root file
        assert_eq!(tree[0].name, "alpha");
        assert_eq!(tree[1].name, "projects");
        assert_eq!(tree[2].name, "calibration.gcode");
        check(&tree);
    }

    #[test]
    fn test_flatten_fully_expanded_visits_every_record_once() {
        let tree = expand_all_nodes(&sample_tree());
        let flat = flatten_tree(&tree);

        let mut file_ids: Vec<&str> = flat
            .iter()
            .filter(|n| n.kind == NodeKind::File)
            .map(|n| n.id.as_str())
            .collect();
        file_ids.sort();
        assert_eq!(file_ids, vec!["f1", "f2", "f3", "f4", "f5"]);
    }

    #[test]
    fn test_flatten_respects_collapsed_folders() {
        let tree = sample_tree();
        // Everything starts collapsed: only top-level nodes are visible
        assert_eq!(flatten_tree(&tree).len(), 3);

        let projects_id = tree
            .iter()
            .find(|n| n.name == "projects")
            .unwrap()
            .id
            .clone();
        let toggled = toggle_node_expansion(&tree, &projects_id);
        let visible = flatten_tree(&toggled);
        // projects now exposes boats (collapsed) and notes.gcode
        assert_eq!(visible.len(), 5);
        assert!(visible.iter().any(|n| n.name == "boats"));
        assert!(!visible.iter().any(|n| n.name == "hull.gcode"));
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let tree = sample_tree();
        let id = tree[0].id.clone();
        let round_tripped = toggle_node_expansion(&toggle_node_expansion(&tree, &id), &id);
        assert_eq!(round_tripped, tree);
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let tree = sample_tree();
        let id = tree[0].id.clone();
        let toggled = toggle_node_expansion(&tree, &id);
        assert!(!tree[0].expanded);
        assert!(toggled[0].expanded);
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let expanded = expand_all_nodes(&sample_tree());
        fn all_folders(nodes: &[FileTreeNode], want: bool) -> bool {
            nodes.iter().all(|n| {
                (!n.is_folder() || n.expanded == want)
                    && all_folders(n.children.as_deref().unwrap_or(&[]), want)
            })
        }
        assert!(all_folders(&expanded, true));
        assert!(all_folders(&collapse_all_nodes(&expanded), false));
    }

    #[test]
    fn test_expansion_carries_across_rebuild() {
        let tree = sample_tree();
        let projects_id = tree
            .iter()
            .find(|n| n.name == "projects")
            .unwrap()
            .id
            .clone();
        let tree = toggle_node_expansion(&tree, &projects_id);
        let remembered = expanded_node_ids(&tree);

        // Rebuild from scratch, then re-apply the remembered expansion
        let rebuilt = apply_expansion(&sample_tree(), &remembered);
        assert_eq!(expanded_node_ids(&rebuilt), remembered);
        assert!(rebuilt.iter().find(|n| n.name == "projects").unwrap().expanded);
    }

    fn backend_entry(
        name: &str,
        path: &str,
        entry_type: EntryType,
        children: Vec<DirectoryEntry>,
    ) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            path: path.to_string(),
            entry_type,
            children,
            empty_directory_id: None,
            file: None,
        }
    }

    #[test]
    fn test_convert_backend_tree_preserves_order_and_counts_files() {
        // Backend order is deliberately not name-sorted
        let tree = DirectoryTree {
            children: vec![
                backend_entry(
                    "zeta",
                    "zeta",
                    EntryType::Directory,
                    vec![
                        backend_entry("b.gcode", "zeta/b.gcode", EntryType::File, vec![]),
                        backend_entry(
                            "inner",
                            "zeta/inner",
                            EntryType::Directory,
                            vec![backend_entry(
                                "a.gcode",
                                "zeta/inner/a.gcode",
                                EntryType::File,
                                vec![],
                            )],
                        ),
                    ],
                ),
                backend_entry("alpha.gcode", "alpha.gcode", EntryType::File, vec![]),
            ],
        };

        let converted = convert_backend_tree(&tree);
        // Order taken from the backend as-is
        assert_eq!(converted[0].name, "zeta");
        assert_eq!(converted[1].name, "alpha.gcode");

        // Recursive file count excludes folders
        assert_eq!(converted[0].file_count, Some(2));
        let inner = converted[0]
            .children
            .as_ref()
            .unwrap()
            .iter()
            .find(|n| n.name == "inner")
            .unwrap();
        assert_eq!(inner.file_count, Some(1));
    }

    #[test]
    fn test_convert_backend_tree_carries_marker_id() {
        let mut placeholder = backend_entry("drafts", "drafts", EntryType::Directory, vec![]);
        placeholder.empty_directory_id = Some("marker-17".to_string());
        let tree = DirectoryTree {
            children: vec![placeholder],
        };

        let converted = convert_backend_tree(&tree);
        assert_eq!(
            converted[0].empty_directory_id.as_deref(),
            Some("marker-17")
        );
        assert_eq!(converted[0].file_count, Some(0));
    }

    #[test]
    fn test_build_output_counts_match_input() {
        let files: Vec<VirtualFile> = (0..20)
            .map(|i| virtual_file(&format!("f{}", i), "deep/nested/folder", &format!("{}.gcode", i)))
            .collect();
        let tree = build_file_tree(&files);
        assert_eq!(count_files(&tree), 20);
    }
}
