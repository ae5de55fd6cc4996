//! Property tests for blank code cell filtering.

use proptest::prelude::*;

use nbpost::{filter_cells, Cell, CellKind};

fn cell() -> impl Strategy<Value = Cell> {
    (0u8..3, "[ \t\na-z]{0,6}").prop_map(|(kind, source)| match kind {
        0 => Cell::code(source),
        1 => Cell::markdown(source),
        _ => Cell::raw(source),
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: filtering never grows the cell list.
    #[test]
    fn property_filter_never_grows(cells in proptest::collection::vec(cell(), 0..16)) {
        prop_assert!(filter_cells(&cells).len() <= cells.len());
    }

    /// PROPERTY: every surviving code cell has non-empty, trimmed source.
    #[test]
    fn property_code_cells_trimmed_and_non_empty(cells in proptest::collection::vec(cell(), 0..16)) {
        for cell in filter_cells(&cells) {
            if cell.kind() == CellKind::Code {
                prop_assert!(!cell.source().is_empty());
                prop_assert_eq!(cell.source(), cell.source().trim());
            }
        }
    }

    /// PROPERTY: non-code cells are kept unchanged and in order.
    #[test]
    fn property_non_code_cells_preserved(cells in proptest::collection::vec(cell(), 0..16)) {
        let expected: Vec<Cell> = cells
            .iter()
            .filter(|c| c.kind() != CellKind::Code)
            .cloned()
            .collect();
        let actual: Vec<Cell> = filter_cells(&cells)
            .into_iter()
            .filter(|c| c.kind() != CellKind::Code)
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: filtering is idempotent.
    #[test]
    fn property_filter_idempotent(cells in proptest::collection::vec(cell(), 0..16)) {
        let once = filter_cells(&cells);
        prop_assert_eq!(filter_cells(&once), once);
    }
}
