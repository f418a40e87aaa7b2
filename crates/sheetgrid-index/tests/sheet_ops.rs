use pretty_assertions::assert_eq;
use sheetgrid_index::{
    build, Cell, IndexError, Row, RowIndexer, SheetData, SheetIndexer, Strategy,
};
use sheetgrid_model::MAX_ROWS;

const STRATEGIES: [Strategy; 3] = [Strategy::Dense, Strategy::Map, Strategy::List];

fn make_row(index: u32) -> Row {
    Row::with_cells(
        index,
        vec![
            Cell::new(format!("A{index}"), format!("a{index}")),
            Cell::new(format!("C{index}"), format!("c{index}")),
        ],
    )
}

fn make_sheet(indices: &[u32]) -> SheetData {
    SheetData::with_rows(indices.iter().map(|&i| make_row(i)).collect())
}

fn snapshot(indexer: &dyn SheetIndexer) -> Vec<(u32, Vec<(String, String)>)> {
    indexer
        .rows()
        .map(|row| {
            (
                row.index(),
                row.cells()
                    .map(|c| (c.reference().to_string(), c.value().to_string()))
                    .collect(),
            )
        })
        .collect()
}

#[test]
fn append_on_empty_sheet() {
    for strategy in STRATEGIES {
        let mut indexer = build(SheetData::new(), strategy).unwrap();
        assert!(indexer.is_empty());
        assert_eq!(indexer.max_row_index(), Err(IndexError::EmptySheet));

        indexer.append_row(make_row(1)).unwrap();
        assert_eq!(indexer.count(), 1, "{strategy:?}");
        assert_eq!(indexer.max_row_index().unwrap(), 1);
    }
}

#[test]
fn append_matches_insert_after_max() {
    for strategy in STRATEGIES {
        let mut appended = build(make_sheet(&[1, 2]), strategy).unwrap();
        appended.append_row(make_row(99)).unwrap();

        let mut inserted = build(make_sheet(&[1, 2]), strategy).unwrap();
        inserted.insert_row(make_row(99), 3, false).unwrap();

        assert_eq!(snapshot(appended.as_ref()), snapshot(inserted.as_ref()));
        // The appended row was renumbered to 3, references resynchronized.
        let last = appended.row(3).unwrap().unwrap();
        assert_eq!(last.cell(1).unwrap().unwrap().reference(), "A3");
    }
}

#[test]
fn removing_the_max_row_recomputes_without_shift() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[1, 2, 3, 4, 5]), strategy).unwrap();
        assert!(indexer.remove_row(5, false).unwrap());
        assert_eq!(indexer.count(), 4, "{strategy:?}");
        assert_eq!(indexer.max_row_index().unwrap(), 4);
    }
}

#[test]
fn shift_up_renumbers_and_resynchronizes() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[1, 2, 3, 4, 5]), strategy).unwrap();
        assert!(indexer.remove_row(1, true).unwrap());
        assert_eq!(indexer.count(), 4, "{strategy:?}");
        assert_eq!(indexer.max_row_index().unwrap(), 4);

        let expected: Vec<(u32, Vec<(String, String)>)> = (1..=4)
            .map(|i| {
                (
                    i,
                    vec![
                        // Values travel with the shifted rows (old rows 2..=5).
                        (format!("A{i}"), format!("a{}", i + 1)),
                        (format!("C{i}"), format!("c{}", i + 1)),
                    ],
                )
            })
            .collect();
        assert_eq!(snapshot(indexer.as_ref()), expected);
    }
}

#[test]
fn shift_down_insert_frees_the_slot() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[1, 2, 3]), strategy).unwrap();
        indexer
            .insert_row(Row::with_cells(7, vec![Cell::new("B7", "new")]), 2, true)
            .unwrap();

        assert_eq!(indexer.count(), 4, "{strategy:?}");
        assert_eq!(indexer.max_row_index().unwrap(), 4);
        let row2 = indexer.row(2).unwrap().unwrap();
        assert_eq!(row2.cell(2).unwrap().unwrap().reference(), "B2");
        // Old rows 2 and 3 moved to 3 and 4.
        assert_eq!(
            indexer.row(3).unwrap().unwrap().cell(1).unwrap().unwrap().value(),
            "a2"
        );
        assert_eq!(
            indexer.row(4).unwrap().unwrap().cell(1).unwrap().unwrap().value(),
            "a3"
        );
    }
}

#[test]
fn plain_insert_replaces_occupied_slots() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[1, 2, 3]), strategy).unwrap();
        indexer
            .insert_row(Row::with_cells(2, vec![Cell::new("D2", "swap")]), 2, false)
            .unwrap();

        assert_eq!(indexer.count(), 3, "replace keeps the count");
        assert_eq!(indexer.max_row_index().unwrap(), 3);
        let row2 = indexer.row(2).unwrap().unwrap();
        assert_eq!(row2.cell_count(), 1);
        assert_eq!(row2.cell(4).unwrap().unwrap().value(), "swap");
    }
}

#[test]
fn plain_insert_fills_gaps_without_renumbering() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[2, 9]), strategy).unwrap();
        indexer.insert_row(make_row(5), 5, false).unwrap();

        assert_eq!(indexer.count(), 3, "{strategy:?}");
        assert_eq!(indexer.max_row_index().unwrap(), 9);
        let indices: Vec<u32> = indexer.rows().map(RowIndexer::index).collect();
        assert_eq!(indices, vec![2, 5, 9]);
    }
}

#[test]
fn out_of_bounds_fails_before_mutating() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[1, 2, 3]), strategy).unwrap();
        let before = snapshot(indexer.as_ref());

        assert!(matches!(
            indexer.insert_row(make_row(1), 0, false),
            Err(IndexError::RowOutOfBounds { index: 0, .. })
        ));
        assert!(matches!(
            indexer.insert_row(make_row(1), MAX_ROWS + 1, true),
            Err(IndexError::RowOutOfBounds { .. })
        ));
        assert!(matches!(
            indexer.remove_row(0, true),
            Err(IndexError::RowOutOfBounds { .. })
        ));
        assert!(matches!(
            indexer.row(MAX_ROWS + 1),
            Err(IndexError::RowOutOfBounds { .. })
        ));

        assert_eq!(snapshot(indexer.as_ref()), before, "{strategy:?}");
        assert_eq!(indexer.count(), 3);
    }
}

#[test]
fn capacity_is_enforced_at_the_last_row() {
    // The dense strategy would allocate a slot per row up to the maximum;
    // the sparse strategies cover the same contract cheaply.
    for strategy in [Strategy::Map, Strategy::List] {
        let mut indexer = build(make_sheet(&[1, MAX_ROWS]), strategy).unwrap();
        let before = snapshot(indexer.as_ref());

        assert!(matches!(
            indexer.append_row(make_row(7)),
            Err(IndexError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            indexer.insert_row(make_row(7), 1, true),
            Err(IndexError::CapacityExceeded { .. })
        ));
        assert_eq!(snapshot(indexer.as_ref()), before, "{strategy:?}");

        // Replacing or gap-filling below the maximum still works.
        indexer.insert_row(make_row(5), 5, false).unwrap();
        assert_eq!(indexer.count(), 3);
        assert_eq!(indexer.max_row_index().unwrap(), MAX_ROWS);
    }
}

#[test]
fn removing_an_absent_row_is_a_noop() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[2, 9]), strategy).unwrap();
        assert!(!indexer.remove_row(5, true).unwrap());
        assert_eq!(indexer.count(), 2, "{strategy:?}");
        assert_eq!(indexer.max_row_index().unwrap(), 9);
    }
}

#[test]
fn cell_values_are_editable_in_place() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[2, 9]), strategy).unwrap();
        let row = indexer.row_mut(9).unwrap().unwrap();
        let cell = row.cell_mut(3).unwrap().unwrap();
        cell.set_value("edited");

        assert_eq!(
            indexer.row(9).unwrap().unwrap().cell(3).unwrap().unwrap().value(),
            "edited",
            "{strategy:?}"
        );
        assert!(indexer.row_mut(5).unwrap().is_none());
        assert!(matches!(
            indexer.row_mut(0),
            Err(IndexError::RowOutOfBounds { .. })
        ));
    }
}

#[test]
fn clone_row_is_a_deep_copy() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[1, 2]), strategy).unwrap();
        let cloned = indexer.clone_row(2).unwrap().unwrap();
        assert_eq!(cloned, make_row(2));
        assert_eq!(indexer.clone_row(5).unwrap(), None);

        // Mutating the clone leaves the indexer untouched.
        let mut mutated = cloned;
        mutated.cells[0].value = "changed".to_string();
        indexer.insert_row(mutated, 5, false).unwrap();
        assert_eq!(
            indexer.row(2).unwrap().unwrap().cell(1).unwrap().unwrap().value(),
            "a2"
        );
        assert_eq!(
            indexer.row(5).unwrap().unwrap().cell(1).unwrap().unwrap().value(),
            "changed"
        );
    }
}

#[test]
fn rows_iteration_is_strictly_ascending_and_restartable() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[8, 1, 4]), strategy).unwrap();
        indexer.insert_row(make_row(6), 6, false).unwrap();
        assert!(indexer.remove_row(4, false).unwrap());

        for _ in 0..2 {
            let indices: Vec<u32> = indexer.rows().map(RowIndexer::index).collect();
            assert_eq!(indices, vec![1, 6, 8], "{strategy:?}");
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn into_inner_round_trips_the_tree() {
    for strategy in STRATEGIES {
        let mut indexer = build(make_sheet(&[3, 1]), strategy).unwrap();
        indexer.append_row(make_row(1)).unwrap(); // lands at row 4
        let sheet = indexer.into_inner();
        let indices: Vec<u32> = sheet.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 3, 4]);
        // The appended row's references follow its assigned index.
        assert_eq!(sheet.rows[2].cells[0].reference, "A4");
    }
}

#[test]
fn corrupt_rows_are_rejected() {
    for strategy in STRATEGIES {
        // Two cells resolving to the same column is caller corruption.
        let corrupt = SheetData::with_rows(vec![Row::with_cells(
            1,
            vec![Cell::new("B1", "x"), Cell::new("B1", "y")],
        )]);
        assert!(matches!(
            build(corrupt, strategy),
            Err(IndexError::DuplicateReference { .. })
        ));

        let malformed = SheetData::with_rows(vec![Row::with_cells(
            1,
            vec![Cell::new("totally wrong", "x")],
        )]);
        assert!(matches!(
            build(malformed, strategy),
            Err(IndexError::InvalidReference(_))
        ));

        // A bare column name is rejected up front: admitting it would make
        // a later shift fail mid-renumber, after rows already moved.
        let bare = SheetData::with_rows(vec![
            make_row(1),
            Row::with_cells(2, vec![Cell::new("C", "x")]),
            make_row(3),
        ]);
        assert!(matches!(
            build(bare, strategy),
            Err(IndexError::InvalidReference(_))
        ));
    }
}
