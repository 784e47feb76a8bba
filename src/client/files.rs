//! File storage endpoints: listing, metadata updates, virtual directories.

use super::{routes, ApiClient};
use crate::errors::AppError;
use crate::models::{
    CreateDirectoryRequest, CreateDirectoryResponse, DirectoryTree, FileRecord, FilesListResponse,
    UpdateFileRequest,
};
use crate::tree::{validate_file_name, validate_path};

impl ApiClient {
    /// List all stored files.
    pub async fn list_files(&self) -> Result<FilesListResponse, AppError> {
        self.get_json(routes::FILE_STORAGE).await
    }

    /// Fetch one file's metadata.
    pub async fn get_file_metadata(&self, file_storage_id: &str) -> Result<FileRecord, AppError> {
        self.get_json(&routes::file(file_storage_id)).await
    }

    /// Delete one stored file.
    pub async fn delete_file(&self, file_storage_id: &str) -> Result<(), AppError> {
        self.delete(&routes::file(file_storage_id)).await
    }

    /// Update a file's name, virtual folder path, or metadata.
    pub async fn update_file_metadata(
        &self,
        file_storage_id: &str,
        updates: &UpdateFileRequest,
    ) -> Result<FileRecord, AppError> {
        if let Some(name) = &updates.file_name {
            if !validate_file_name(name) {
                return Err(AppError::Validation(format!("Invalid file name: {}", name)));
            }
        }
        if let Some(path) = &updates.path {
            if !validate_path(path) {
                return Err(AppError::Validation(format!("Invalid path: {}", path)));
            }
        }
        self.patch_json(&routes::file(file_storage_id), updates).await
    }

    /// Move a file into another virtual folder (`""` is the root).
    pub async fn move_file(
        &self,
        file_storage_id: &str,
        new_folder: &str,
    ) -> Result<FileRecord, AppError> {
        self.update_file_metadata(
            file_storage_id,
            &UpdateFileRequest {
                path: Some(new_folder.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    /// Rename a file, keeping its folder.
    pub async fn rename_file(
        &self,
        file_storage_id: &str,
        new_name: &str,
    ) -> Result<FileRecord, AppError> {
        self.update_file_metadata(
            file_storage_id,
            &UpdateFileRequest {
                file_name: Some(new_name.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    /// Fetch the backend's pre-nested directory tree.
    pub async fn get_directory_tree(&self) -> Result<DirectoryTree, AppError> {
        self.get_json(routes::DIRECTORY_TREE).await
    }

    /// Reserve an empty virtual directory; the returned marker id keeps it
    /// addressable until a file lands in it or it is deleted.
    pub async fn create_directory(&self, path: &str) -> Result<CreateDirectoryResponse, AppError> {
        if path.is_empty() || !validate_path(path) {
            return Err(AppError::Validation(format!(
                "Invalid directory path: {}",
                path
            )));
        }
        self.post_json(
            routes::DIRECTORIES,
            &CreateDirectoryRequest {
                path: path.to_string(),
            },
        )
        .await
    }

    /// Remove an empty-directory marker.
    pub async fn delete_directory(&self, marker_id: &str) -> Result<(), AppError> {
        self.delete(&routes::directory(marker_id)).await
    }
}
