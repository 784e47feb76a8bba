//! Printer catalog endpoint.

use super::{routes, ApiClient};
use crate::errors::AppError;
use crate::models::Printer;

impl ApiClient {
    /// List the full printer catalog.
    pub async fn list_printers(&self) -> Result<Vec<Printer>, AppError> {
        self.get_json(routes::PRINTERS).await
    }
}
