//! Batch drivers for folder-level file operations.
//!
//! A folder move, rename, or delete fans out into one backend call per
//! affected item. The per-item calls have no ordering dependency, so they
//! are all issued concurrently; the driver waits for every call to settle
//! and reports a structured per-item result. Completed items keep their new
//! state when a sibling call fails; the operations are not transactional
//! and no rollback is attempted.

use futures::future::{join, join_all};

use super::ApiClient;
use crate::errors::AppError;
use crate::models::UpdateFileRequest;
use crate::tree::{parent_path, validate_file_name, validate_path, FileTreeNode, NodeKind};

/// What a batch item targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchItemKind {
    File,
    EmptyDirectory,
}

/// Outcome of one call within a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// File storage id, or marker id for empty directories
    pub target: String,
    pub kind: BatchItemKind,
    pub outcome: Result<(), AppError>,
}

/// Per-item results of a settled batch.
#[derive(Debug)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    fn new(items: Vec<BatchItem>) -> Self {
        for item in &items {
            if let Err(err) = &item.outcome {
                tracing::error!(target = %item.target, %err, "Batch item failed");
            }
        }
        Self { items }
    }

    /// Whether every call in the batch settled successfully.
    pub fn is_success(&self) -> bool {
        self.items.iter().all(|item| item.outcome.is_ok())
    }

    /// The items that failed.
    pub fn failures(&self) -> Vec<&BatchItem> {
        self.items
            .iter()
            .filter(|item| item.outcome.is_err())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collect the descendant file nodes and empty-directory markers under a
/// folder, the folder's own marker included.
fn collect_targets<'a>(
    folder: &'a FileTreeNode,
    files: &mut Vec<&'a FileTreeNode>,
    markers: &mut Vec<&'a str>,
) {
    if let Some(marker) = &folder.empty_directory_id {
        markers.push(marker);
    }
    for child in folder.children.as_deref().unwrap_or(&[]) {
        match child.kind {
            NodeKind::File => files.push(child),
            NodeKind::Folder => collect_targets(child, files, markers),
        }
    }
}

/// Rewrite a descendant file's folder from the old folder prefix to the new
/// one, keeping any nested remainder.
fn rebase_folder(file_path: &str, old_folder: &str, new_folder: &str) -> String {
    let current = parent_path(file_path);
    let remainder = current.strip_prefix(old_folder).unwrap_or("");
    format!("{}{}", new_folder, remainder)
}

impl ApiClient {
    /// Move a folder and everything inside it under a new parent path
    /// (`""` moves it to the root). One PATCH per descendant file.
    pub async fn move_folder(
        &self,
        folder: &FileTreeNode,
        new_parent: &str,
    ) -> Result<BatchReport, AppError> {
        if !folder.is_folder() {
            return Err(AppError::Validation(format!(
                "Not a folder: {}",
                folder.path
            )));
        }
        if !validate_path(new_parent) {
            return Err(AppError::Validation(format!(
                "Invalid destination path: {}",
                new_parent
            )));
        }

        let new_folder = if new_parent.is_empty() {
            folder.name.clone()
        } else {
            format!("{}/{}", new_parent, folder.name)
        };

        Ok(self.repath_descendants(folder, &new_folder).await)
    }

    /// Rename a folder in place, rewriting every descendant file's path.
    pub async fn rename_folder(
        &self,
        folder: &FileTreeNode,
        new_name: &str,
    ) -> Result<BatchReport, AppError> {
        if !folder.is_folder() {
            return Err(AppError::Validation(format!(
                "Not a folder: {}",
                folder.path
            )));
        }
        if !validate_file_name(new_name) {
            return Err(AppError::Validation(format!(
                "Invalid folder name: {}",
                new_name
            )));
        }

        let parent = parent_path(&folder.path);
        let new_folder = if parent.is_empty() {
            new_name.to_string()
        } else {
            format!("{}/{}", parent, new_name)
        };

        Ok(self.repath_descendants(folder, &new_folder).await)
    }

    async fn repath_descendants(&self, folder: &FileTreeNode, new_folder: &str) -> BatchReport {
        let mut files = Vec::new();
        let mut markers = Vec::new();
        collect_targets(folder, &mut files, &mut markers);

        let ops = files.iter().map(|file| {
            let target = file.id.clone();
            let updates = UpdateFileRequest {
                path: Some(rebase_folder(&file.path, &folder.path, new_folder)),
                ..Default::default()
            };
            async move {
                let outcome = self
                    .update_file_metadata(&target, &updates)
                    .await
                    .map(|_| ());
                BatchItem {
                    target,
                    kind: BatchItemKind::File,
                    outcome,
                }
            }
        });

        BatchReport::new(join_all(ops).await)
    }

    /// Delete a folder: one DELETE per descendant file plus one per
    /// empty-directory marker underneath it.
    pub async fn delete_folder(&self, folder: &FileTreeNode) -> Result<BatchReport, AppError> {
        if !folder.is_folder() {
            return Err(AppError::Validation(format!(
                "Not a folder: {}",
                folder.path
            )));
        }

        let mut files = Vec::new();
        let mut markers = Vec::new();
        collect_targets(folder, &mut files, &mut markers);

        let file_ops = files.iter().map(|file| {
            let target = file.id.clone();
            async move {
                let outcome = self.delete_file(&target).await;
                BatchItem {
                    target,
                    kind: BatchItemKind::File,
                    outcome,
                }
            }
        });

        let marker_ops = markers.iter().map(|marker| {
            let target = marker.to_string();
            async move {
                let outcome = self.delete_directory(&target).await;
                BatchItem {
                    target,
                    kind: BatchItemKind::EmptyDirectory,
                    outcome,
                }
            }
        });

        let (mut items, marker_items) = join(join_all(file_ops), join_all(marker_ops)).await;
        items.extend(marker_items);
        Ok(BatchReport::new(items))
    }
}
