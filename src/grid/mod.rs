//! Printer grid layout engine.
//!
//! Projects a floor's printers onto a fixed-size 2-D matrix for rendering,
//! either by explicit stored coordinates or by deterministic name-sort fill,
//! and applies tag/type filter predicates over a built matrix without
//! disturbing cell geometry. All functions are pure over their inputs;
//! identical inputs always yield an identical matrix.

use std::collections::{HashMap, HashSet};

use crate::models::{Floor, Printer, TagWithPrinters};

/// Fill direction for name-sorted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Fill row 0 left-to-right, then row 1
    Horizontal,
    /// Fill column 0 top-to-bottom, then column 1
    Vertical,
}

/// Which placement policy the grid view uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Explicit stored (x, y) coordinates
    Position,
    /// Deterministic name-sort fill
    Name,
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::Position
    }
}

impl SortMode {
    pub fn toggle(self) -> Self {
        match self {
            SortMode::Position => SortMode::Name,
            SortMode::Name => SortMode::Position,
        }
    }
}

/// A derived, ephemeral grid of printer references, indexed `[column][row]`.
pub type PrinterMatrix<'a> = Vec<Vec<Option<&'a Printer>>>;

fn empty_matrix<'a>(cols: usize, rows: usize) -> PrinterMatrix<'a> {
    vec![vec![None; rows]; cols]
}

/// Place a floor's printers by their stored coordinates.
///
/// Cell (x, y) holds the printer whose position names exactly that cell, if
/// that printer still exists in the catalog. Stored positions outside the
/// grid bounds are omitted, not clamped; they reappear when the grid grows
/// or the position is corrected. Missing printer references are likewise
/// omitted, since absence is a normal transient state between fetches.
pub fn grid_sorted_printers<'a>(
    cols: usize,
    rows: usize,
    printers: &'a [Printer],
    floor: &Floor,
) -> PrinterMatrix<'a> {
    let by_id: HashMap<i64, &Printer> = printers.iter().map(|p| (p.id, p)).collect();
    let by_cell: HashMap<(u32, u32), i64> = floor
        .printers
        .iter()
        .map(|pos| ((pos.x, pos.y), pos.printer_id))
        .collect();

    let mut matrix = empty_matrix(cols, rows);
    for (x, column) in matrix.iter_mut().enumerate() {
        for (y, cell) in column.iter_mut().enumerate() {
            *cell = by_cell
                .get(&(x as u32, y as u32))
                .and_then(|printer_id| by_id.get(printer_id).copied());
        }
    }
    matrix
}

/// Place a floor's printers by name order.
///
/// Intersects the catalog (or a pre-filtered subset of it) with the floor's
/// membership, sorts by name ascending, and fills the grid in the given
/// direction. Filling stops when either the sorted list or the grid
/// capacity runs out; overflow beyond `cols * rows` is silently truncated.
pub fn grid_name_sorted_printers<'a>(
    cols: usize,
    rows: usize,
    direction: SortDirection,
    printers: &'a [Printer],
    floor: &Floor,
    prefiltered: Option<&[&'a Printer]>,
) -> PrinterMatrix<'a> {
    let membership: HashSet<i64> = floor.printers.iter().map(|pos| pos.printer_id).collect();

    let mut floor_printers: Vec<&Printer> = match prefiltered {
        Some(subset) => subset
            .iter()
            .copied()
            .filter(|p| membership.contains(&p.id))
            .collect(),
        None => printers.iter().filter(|p| membership.contains(&p.id)).collect(),
    };
    floor_printers.sort_by(|a, b| a.name.cmp(&b.name));

    let mut matrix = empty_matrix(cols, rows);
    let mut next = floor_printers.into_iter();

    match direction {
        SortDirection::Vertical => {
            for x in 0..cols {
                for y in 0..rows {
                    match next.next() {
                        Some(printer) => matrix[x][y] = Some(printer),
                        None => return matrix,
                    }
                }
            }
        }
        SortDirection::Horizontal => {
            for y in 0..rows {
                for x in 0..cols {
                    match next.next() {
                        Some(printer) => matrix[x][y] = Some(printer),
                        None => return matrix,
                    }
                }
            }
        }
    }
    matrix
}

/// Printer-id → tag-id membership index.
///
/// Built once per tag snapshot so the filter predicate is O(1) per grid
/// cell; the predicate runs once per cell per re-render and floors can hold
/// dozens of printers with dozens of tags.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_printer: HashMap<i64, HashSet<i64>>,
}

impl TagIndex {
    pub fn build(tags: &[TagWithPrinters]) -> Self {
        let mut by_printer: HashMap<i64, HashSet<i64>> = HashMap::new();
        for tag in tags {
            for binding in &tag.printers {
                by_printer
                    .entry(binding.printer_id)
                    .or_default()
                    .insert(tag.id);
            }
        }
        Self { by_printer }
    }

    /// Whether the printer carries the given tag.
    pub fn printer_has_tag(&self, printer_id: i64, tag_id: i64) -> bool {
        self.by_printer
            .get(&printer_id)
            .is_some_and(|tags| tags.contains(&tag_id))
    }
}

/// Active grid filter selections.
///
/// Tag selection uses AND-semantics (a printer must carry every selected
/// tag); type selection uses OR-semantics (any selected type matches). An
/// empty selection on either axis matches everything on that axis.
#[derive(Debug, Clone, Default)]
pub struct PrinterFilter {
    pub selected_tags: Vec<i64>,
    pub selected_printer_types: Vec<i64>,
}

impl PrinterFilter {
    pub fn matches(&self, index: &TagIndex, printer: &Printer) -> bool {
        self.matches_tags(index, printer.id) && self.matches_printer_type(printer)
    }

    fn matches_tags(&self, index: &TagIndex, printer_id: i64) -> bool {
        self.selected_tags
            .iter()
            .all(|tag_id| index.printer_has_tag(printer_id, *tag_id))
    }

    fn matches_printer_type(&self, printer: &Printer) -> bool {
        self.selected_printer_types.is_empty()
            || self.selected_printer_types.contains(&printer.printer_type)
    }

    pub fn clear(&mut self) {
        self.selected_tags.clear();
        self.selected_printer_types.clear();
    }

    /// Filter a flat printer list, for callers composing the name-sort mode.
    pub fn filter_printers<'a>(&self, index: &TagIndex, printers: &'a [Printer]) -> Vec<&'a Printer> {
        printers
            .iter()
            .filter(|printer| self.matches(index, printer))
            .collect()
    }
}

/// Blank out non-matching cells of an already-built matrix.
///
/// Cell geometry is preserved: a matching printer stays in the cell it
/// occupied, non-matching cells become empty, and the dimensions never
/// change, because grid slots correspond to physical floor positions.
pub fn filter_printer_matrix<'a>(
    matrix: PrinterMatrix<'a>,
    filter: &PrinterFilter,
    index: &TagIndex,
) -> PrinterMatrix<'a> {
    matrix
        .into_iter()
        .map(|column| {
            column
                .into_iter()
                .map(|cell| cell.filter(|printer| filter.matches(index, printer)))
                .collect()
        })
        .collect()
}
