//! In-memory snapshot state mirroring server-pushed data.
//!
//! Snapshots are replaced wholesale from fetch results; the structures here
//! never patch themselves incrementally. Rapid successive fetches resolve
//! as last-write-wins at the owning call site.

use crate::grid::{
    filter_printer_matrix, grid_name_sorted_printers, grid_sorted_printers, PrinterFilter,
    PrinterMatrix, SortDirection, SortMode, TagIndex,
};
use crate::models::{Floor, Printer};

/// Floor snapshot plus the current floor selection.
#[derive(Debug, Default)]
pub struct FloorState {
    floors: Vec<Floor>,
    selected_floor_index: usize,
}

impl FloorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floors in tab order.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// The currently selected floor, if any floors are loaded.
    pub fn selected_floor(&self) -> Option<&Floor> {
        self.floors.get(self.selected_floor_index)
    }

    pub fn floor(&self, floor_id: i64) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == floor_id)
    }

    pub fn floor_names(&self) -> Vec<&str> {
        self.floors.iter().map(|f| f.name.as_str()).collect()
    }

    /// The floor a printer is placed on, if any.
    pub fn floor_of_printer(&self, printer_id: i64) -> Option<&Floor> {
        self.floors.iter().find(|f| f.contains_printer(printer_id))
    }

    /// Printers from the catalog that are placed on no floor at all.
    pub fn floorless_printers<'a>(&self, printers: &'a [Printer]) -> Vec<&'a Printer> {
        printers
            .iter()
            .filter(|p| self.floor_of_printer(p.id).is_none())
            .collect()
    }

    /// Replace the snapshot with a freshly fetched floor list, sorted by
    /// tab order. The selection follows the previously selected floor's id
    /// when it still exists, and falls back to the first floor otherwise.
    /// An empty fetch result leaves the current snapshot alone.
    pub fn save_floors(&mut self, mut floors: Vec<Floor>) {
        if floors.is_empty() {
            return;
        }
        floors.sort_by_key(|f| f.order);

        let selected_id = self.selected_floor().map(|f| f.id);
        self.floors = floors;
        self.selected_floor_index = selected_id
            .and_then(|id| self.floors.iter().position(|f| f.id == id))
            .unwrap_or(0);
    }

    /// Swap in an updated floor returned by a mutation call.
    pub fn replace_floor(&mut self, floor: Floor) {
        if let Some(existing) = self.floors.iter_mut().find(|f| f.id == floor.id) {
            *existing = floor;
        }
    }

    /// Drop a floor after the backend confirms its deletion.
    pub fn remove_floor(&mut self, floor_id: i64) {
        self.floors.retain(|f| f.id != floor_id);
        if self.selected_floor_index >= self.floors.len() {
            self.selected_floor_index = 0;
        }
    }

    /// Select a floor by tab index; out-of-range selections reset to the
    /// first floor.
    pub fn select_floor_by_index(&mut self, index: usize) {
        if index >= self.floors.len() {
            tracing::warn!(index, "Selected floor index exceeds floor list");
            self.selected_floor_index = 0;
            return;
        }
        self.selected_floor_index = index;
    }
}

/// Explicit per-view context for the file explorer.
///
/// Passed down from the owning view rather than shared as a global, so
/// unrelated views cannot couple through it.
#[derive(Debug, Default)]
pub struct ExplorerSession {
    open: bool,
    current_printer_id: Option<i64>,
    loading: bool,
    error: bool,
    last_loaded_printer_id: Option<i64>,
    current_path: String,
}

impl ExplorerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_printer_id(&self) -> Option<i64> {
        self.current_printer_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Open the explorer for a printer. Returns whether the caller should
    /// refresh the listing (first open, or a different printer than last
    /// time).
    pub fn open_for(&mut self, printer_id: i64) -> bool {
        let should_refresh = self.last_loaded_printer_id != Some(printer_id);

        self.open = true;
        self.current_printer_id = Some(printer_id);

        if should_refresh {
            self.error = false;
            self.last_loaded_printer_id = Some(printer_id);
            self.current_path.clear();
        }
        should_refresh
    }

    pub fn close(&mut self) {
        self.open = false;
        self.current_printer_id = None;
        self.error = false;
        self.last_loaded_printer_id = None;
        self.current_path.clear();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    pub fn set_current_path(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
    }

    /// Mark a printer's listing stale, e.g. after a push update, without
    /// touching another printer's session.
    pub fn reset_for_printer(&mut self, printer_id: i64) {
        if self.last_loaded_printer_id == Some(printer_id) {
            self.error = false;
            self.loading = true;
        }
    }
}

/// Grid view state: active filters and placement policy.
#[derive(Debug, Default)]
pub struct GridView {
    pub filter: PrinterFilter,
    pub sort_mode: SortMode,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tag_filter(&mut self, tag_ids: Vec<i64>) {
        self.filter.selected_tags = tag_ids;
    }

    pub fn set_printer_type_filter(&mut self, type_ids: Vec<i64>) {
        self.filter.selected_printer_types = type_ids;
    }

    pub fn toggle_sort_mode(&mut self) {
        self.sort_mode = self.sort_mode.toggle();
    }

    /// Build the display matrix for the selected floor under the active
    /// policy and filters. Position mode places first and blanks filtered
    /// cells in place; name mode narrows the fill list before placement.
    pub fn layout<'a>(
        &self,
        cols: usize,
        rows: usize,
        direction: SortDirection,
        printers: &'a [Printer],
        floor: &Floor,
        tag_index: &TagIndex,
    ) -> PrinterMatrix<'a> {
        match self.sort_mode {
            SortMode::Position => {
                let matrix = grid_sorted_printers(cols, rows, printers, floor);
                filter_printer_matrix(matrix, &self.filter, tag_index)
            }
            SortMode::Name => {
                let subset = self.filter.filter_printers(tag_index, printers);
                grid_name_sorted_printers(cols, rows, direction, printers, floor, Some(&subset))
            }
        }
    }
}
