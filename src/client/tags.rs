//! Printer tag endpoints.
//!
//! Tag mutations return the full tag listing, which the backend keeps small.

use super::{routes, ApiClient};
use crate::errors::AppError;
use crate::models::{CreateTagRequest, TagPrinterRequest, TagWithPrinters, UpdateTagNameRequest};

impl ApiClient {
    /// List all tags with their printer bindings.
    pub async fn get_tags_with_printers(&self) -> Result<Vec<TagWithPrinters>, AppError> {
        self.get_json(routes::PRINTER_TAGS).await
    }

    /// Create a new tag.
    pub async fn create_tag(
        &self,
        request: &CreateTagRequest,
    ) -> Result<Vec<TagWithPrinters>, AppError> {
        self.post_json(routes::PRINTER_TAGS, request).await
    }

    /// Rename a tag.
    pub async fn update_tag_name(
        &self,
        tag_id: i64,
        name: &str,
    ) -> Result<Vec<TagWithPrinters>, AppError> {
        self.patch_json(
            &routes::tag_name(tag_id),
            &UpdateTagNameRequest {
                name: name.to_string(),
            },
        )
        .await
    }

    /// Delete a tag.
    pub async fn delete_tag(&self, tag_id: i64) -> Result<Vec<TagWithPrinters>, AppError> {
        self.delete_with_body(&routes::tag(tag_id), &serde_json::json!({})).await
    }

    /// Bind a printer to a tag.
    pub async fn add_printer_to_tag(
        &self,
        tag_id: i64,
        printer_id: i64,
    ) -> Result<Vec<TagWithPrinters>, AppError> {
        self.post_json(&routes::tag_printers(tag_id), &TagPrinterRequest { printer_id })
            .await
    }

    /// Unbind a printer from a tag.
    pub async fn remove_printer_from_tag(
        &self,
        tag_id: i64,
        printer_id: i64,
    ) -> Result<Vec<TagWithPrinters>, AppError> {
        self.delete_with_body(&routes::tag_printers(tag_id), &TagPrinterRequest { printer_id })
            .await
    }
}
