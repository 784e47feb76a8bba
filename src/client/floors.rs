//! Floor endpoints.
//!
//! Every mutation returns the updated floor so the caller can replace its
//! local snapshot copy.

use super::{routes, ApiClient};
use crate::errors::AppError;
use crate::models::{
    AddPrinterToFloorRequest, CreateFloorRequest, Floor, RemovePrinterFromFloorRequest,
};

impl ApiClient {
    /// List all floors.
    pub async fn get_floors(&self) -> Result<Vec<Floor>, AppError> {
        self.get_json(routes::FLOORS).await
    }

    /// Create a new floor.
    pub async fn create_floor(&self, request: &CreateFloorRequest) -> Result<Floor, AppError> {
        self.post_json(routes::FLOORS, request).await
    }

    /// Rename a floor.
    pub async fn update_floor_name(&self, floor_id: i64, name: &str) -> Result<Floor, AppError> {
        self.patch_json(&routes::floor_name(floor_id), &serde_json::json!({ "name": name }))
            .await
    }

    /// Change a floor's tab ordering index.
    pub async fn update_floor_order(&self, floor_id: i64, order: i64) -> Result<Floor, AppError> {
        self.patch_json(&routes::floor_order(floor_id), &serde_json::json!({ "order": order }))
            .await
    }

    /// Delete a floor.
    pub async fn delete_floor(&self, floor_id: i64) -> Result<(), AppError> {
        self.delete(&routes::floor(floor_id)).await
    }

    /// Bind a printer to an (x, y) cell on a floor.
    pub async fn add_printer_to_floor(
        &self,
        floor_id: i64,
        request: &AddPrinterToFloorRequest,
    ) -> Result<Floor, AppError> {
        self.post_json(&routes::floor_printers(floor_id), request)
            .await
    }

    /// Unbind a printer from a floor.
    pub async fn remove_printer_from_floor(
        &self,
        floor_id: i64,
        printer_id: i64,
    ) -> Result<Floor, AppError> {
        self.delete_with_body(
            &routes::floor_printers(floor_id),
            &RemovePrinterFromFloorRequest { printer_id },
        )
        .await
    }
}
