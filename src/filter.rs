//! Cell filtering applied before rendering
//!
//! Preprocessors transform a notebook before it is rendered. They are
//! handed to the exporter through `ExportConfig`, so each conversion
//! carries its own list.

use tracing::debug;

use crate::error::NbpostResult;
use crate::notebook::{Cell, Notebook};

/// A notebook-to-notebook transform run before rendering
pub trait Preprocessor {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Produce the transformed notebook
    fn preprocess(&self, notebook: Notebook) -> NbpostResult<Notebook>;
}

/// Removes blank code cells and trims whitespace around code cell sources
#[derive(Debug, Clone, Copy, Default)]
pub struct StripBlankCodeCells;

impl Preprocessor for StripBlankCodeCells {
    fn name(&self) -> &'static str {
        "strip-blank-code-cells"
    }

    fn preprocess(&self, mut notebook: Notebook) -> NbpostResult<Notebook> {
        let before = notebook.cells.len();
        notebook.cells = filter_cells(&notebook.cells);
        debug!(
            removed = before - notebook.cells.len(),
            kept = notebook.cells.len(),
            "filtered code cells"
        );
        Ok(notebook)
    }
}

/// Rebuild the cell list without blank code cells.
///
/// Code cells whose source is empty after trimming are dropped; the rest get
/// their source trimmed. Markdown and raw cells are copied unchanged, and
/// relative order is preserved.
pub fn filter_cells(cells: &[Cell]) -> Vec<Cell> {
    cells
        .iter()
        .filter_map(|cell| match cell {
            Cell::Code(code) => {
                let trimmed = code.source.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    let mut code = code.clone();
                    code.source = trimmed.to_string();
                    Some(Cell::Code(code))
                }
            }
            other => Some(other.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{CellKind, NotebookMetadata};

    fn notebook(cells: Vec<Cell>) -> Notebook {
        Notebook {
            cells,
            metadata: NotebookMetadata::default(),
            nbformat: 4,
            nbformat_minor: 4,
        }
    }

    #[test]
    fn test_removes_empty_code_cells() {
        let cells = vec![Cell::code(""), Cell::code("x = 1"), Cell::markdown("text")];
        let filtered = filter_cells(&cells);

        assert_eq!(filtered, vec![Cell::code("x = 1"), Cell::markdown("text")]);
    }

    #[test]
    fn test_adjacent_empty_cells_are_all_removed() {
        // Index-based removal while iterating would skip the second blank cell.
        let cells = vec![
            Cell::code("a"),
            Cell::code(""),
            Cell::code(""),
            Cell::code("b"),
        ];
        let filtered = filter_cells(&cells);

        assert_eq!(filtered, vec![Cell::code("a"), Cell::code("b")]);
    }

    #[test]
    fn test_whitespace_only_code_cell_is_removed() {
        let filtered = filter_cells(&[Cell::code("  \n\t\n")]);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_code_source_is_trimmed() {
        let filtered = filter_cells(&[Cell::code("\n\n  import os  \n\n")]);
        assert_eq!(filtered, vec![Cell::code("import os")]);
    }

    #[test]
    fn test_markdown_and_raw_cells_untouched() {
        let cells = vec![Cell::markdown("  spaced  \n"), Cell::raw(""), Cell::markdown("")];
        let filtered = filter_cells(&cells);

        assert_eq!(filtered, cells);
        assert_eq!(filtered[1].kind(), CellKind::Raw);
    }

    #[test]
    fn test_preprocessor_filters_notebook() {
        let nb = notebook(vec![Cell::code(" "), Cell::code(" y ")]);
        let out = StripBlankCodeCells.preprocess(nb).unwrap();

        assert_eq!(out.cells, vec![Cell::code("y")]);
        assert_eq!(out.nbformat, 4);
    }
}
