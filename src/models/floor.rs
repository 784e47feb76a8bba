//! Floor and position models.
//!
//! Floors are owned by the backend; the client mutates them only by issuing
//! an update call and replacing its local copy with the returned floor.

use serde::{Deserialize, Serialize};

/// The binding of one printer to one (x, y) cell on one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub printer_id: i64,
    pub floor_id: i64,
}

/// A named, ordered 2-D layout surface onto which printers are placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: i64,
    pub name: String,
    /// Tab ordering index
    pub order: i64,
    #[serde(default)]
    pub printers: Vec<Position>,
}

impl Floor {
    /// Whether the given printer has a position on this floor.
    pub fn contains_printer(&self, printer_id: i64) -> bool {
        self.printers.iter().any(|p| p.printer_id == printer_id)
    }

    /// The stored position of a printer on this floor, if any.
    pub fn position_of(&self, printer_id: i64) -> Option<&Position> {
        self.printers.iter().find(|p| p.printer_id == printer_id)
    }
}

/// Request body for creating a new floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFloorRequest {
    pub name: String,
    pub order: i64,
    #[serde(default)]
    pub printers: Vec<Position>,
}

/// Request body for binding a printer to a floor cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPrinterToFloorRequest {
    pub printer_id: i64,
    pub x: u32,
    pub y: u32,
}

/// Request body for unbinding a printer from a floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePrinterFromFloorRequest {
    pub printer_id: i64,
}
