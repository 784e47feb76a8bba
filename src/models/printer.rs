//! Printer catalog model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One printer in the fleet catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printer {
    pub id: i64,
    pub name: String,
    /// Vendor/firmware family discriminator used by the type filter
    pub printer_type: i64,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer_url: Option<String>,
}
