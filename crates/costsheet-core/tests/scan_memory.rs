//! End-to-end scans over the in-memory grid

use costsheet_core::{
    CellValue, Highlight, MemoryGrid, SheetScanner, FIRST_DATA_ROW, PERIOD_SHEET, SCHEDULE_SHEET,
    UNIT_SHEET,
};
use pretty_assertions::assert_eq;

const HEADER_ROW: u32 = FIRST_DATA_ROW - 1;

/// A small three-row schedule with every recognized column present
fn schedule_fixture() -> MemoryGrid {
    let mut grid = MemoryGrid::with_sheets(3);

    // populated-range probe column
    for row in FIRST_DATA_ROW..FIRST_DATA_ROW + 3 {
        grid.set_cell(
            SCHEDULE_SHEET,
            3,
            row,
            CellValue::text(format!("работа {}", row)),
        );
    }

    // headers: D=Раз, E=Периодичность, F=Объем, G=Расценка, H=Ед.изм., I=Годовая стоимость
    grid.set_cell(SCHEDULE_SHEET, 4, HEADER_ROW, CellValue::text("Раз"));
    grid.set_cell(
        SCHEDULE_SHEET,
        5,
        HEADER_ROW,
        CellValue::text("Периодичность"),
    );
    grid.set_cell(SCHEDULE_SHEET, 6, HEADER_ROW, CellValue::text("Объем"));
    grid.set_cell(SCHEDULE_SHEET, 7, HEADER_ROW, CellValue::text("Расценка"));
    grid.set_cell(SCHEDULE_SHEET, 8, HEADER_ROW, CellValue::text("Ед.изм."));
    grid.set_cell(
        SCHEDULE_SHEET,
        9,
        HEADER_ROW,
        CellValue::text("Годовая стоимость"),
    );

    for (offset, (count, period, quantity, rate, unit)) in [
        ("1", "Ежемесячно", "10", "150", "шт."),
        ("2", "Ежегодно", "5", "80", "м2"),
        ("1", "Ежеквартально", "3", "40", "шт."),
    ]
    .iter()
    .enumerate()
    {
        let row = FIRST_DATA_ROW + offset as u32;
        grid.set_cell(SCHEDULE_SHEET, 4, row, CellValue::text(*count));
        grid.set_cell(SCHEDULE_SHEET, 5, row, CellValue::text(*period));
        grid.set_cell(SCHEDULE_SHEET, 6, row, CellValue::text(*quantity));
        grid.set_cell(SCHEDULE_SHEET, 7, row, CellValue::text(*rate));
        grid.set_cell(SCHEDULE_SHEET, 8, row, CellValue::text(*unit));
    }

    // reference vocabularies
    for (row, phrase) in ["Ежемесячно", "Ежегодно", "Ежеквартально"]
        .iter()
        .enumerate()
    {
        grid.set_cell(PERIOD_SHEET, 1, row as u32 + 1, CellValue::text(*phrase));
    }
    for (row, unit) in ["шт.", "м2"].iter().enumerate() {
        grid.set_cell(UNIT_SHEET, 1, row as u32 + 1, CellValue::text(*unit));
    }

    grid
}

#[test]
fn test_comma_decimal_is_rewritten_and_saved() {
    let mut grid = schedule_fixture();
    grid.set_cell(SCHEDULE_SHEET, 4, 6, CellValue::text("1,5"));

    let scanner = SheetScanner::open(grid, false).unwrap();
    let (outcome, grid) = scanner.scan().unwrap();

    assert!(outcome.numeric_modified);
    assert!(outcome.saved);
    assert_eq!(grid.cell(SCHEDULE_SHEET, 4, 6), CellValue::Number(1.5));
    assert_eq!(grid.save_count(), 1);
}

#[test]
fn test_out_of_set_unit_is_highlighted() {
    let mut grid = schedule_fixture();
    grid.set_cell(SCHEDULE_SHEET, 8, 7, CellValue::text("бочка"));

    let scanner = SheetScanner::open(grid, false).unwrap();
    let (outcome, grid) = scanner.scan().unwrap();

    assert!(outcome.other_modified);
    assert!(outcome.saved);
    assert_eq!(
        grid.cell_highlight(SCHEDULE_SHEET, 8, 7),
        Some(Highlight::UnitError)
    );
}

#[test]
fn test_derived_column_receives_formulas() {
    let grid = schedule_fixture();

    let scanner = SheetScanner::open(grid, false).unwrap();
    assert_eq!(scanner.end_row(), 7);
    let (outcome, grid) = scanner.scan().unwrap();

    assert_eq!(
        grid.cell(SCHEDULE_SHEET, 9, 5),
        CellValue::Formula("=D5*12*F5*G5/1000".into())
    );
    assert_eq!(
        grid.cell(SCHEDULE_SHEET, 9, 6),
        CellValue::Formula("=D6*1*F6*G6/1000".into())
    );
    assert_eq!(
        grid.cell(SCHEDULE_SHEET, 9, 7),
        CellValue::Formula("=D7*4*F7*G7/1000".into())
    );
    assert!(outcome.numeric_modified);
    assert!(outcome.saved);
}

#[test]
fn test_unassignable_row_is_left_untouched() {
    let mut grid = schedule_fixture();
    // row 6: periodicity outside the vocabulary -> no multiplier -> no formula
    grid.set_cell(
        SCHEDULE_SHEET,
        5,
        6,
        CellValue::text("по мере необходимости"),
    );
    grid.set_cell(SCHEDULE_SHEET, 9, 6, CellValue::Number(99.0));

    let scanner = SheetScanner::open(grid, false).unwrap();
    let (outcome, grid) = scanner.scan().unwrap();

    assert_eq!(grid.cell(SCHEDULE_SHEET, 9, 6), CellValue::Number(99.0));
    // the out-of-vocabulary phrase itself is highlighted
    assert_eq!(
        grid.cell_highlight(SCHEDULE_SHEET, 5, 6),
        Some(Highlight::PeriodError)
    );
    assert!(outcome.other_modified);
}

#[test]
fn test_clean_workbook_is_not_saved() {
    let grid = schedule_fixture();

    // first scan writes the derived formulas and persists
    let scanner = SheetScanner::open(grid, false).unwrap();
    let (outcome, grid) = scanner.scan().unwrap();
    assert!(outcome.saved);
    assert_eq!(grid.save_count(), 1);

    // second scan finds nothing left to repair and leaves the workbook alone
    let scanner = SheetScanner::open(grid, false).unwrap();
    let (outcome, grid) = scanner.scan().unwrap();
    assert!(!outcome.numeric_modified);
    assert!(!outcome.other_modified);
    assert!(!outcome.saved);
    assert_eq!(grid.save_count(), 1);
}

#[test]
fn test_validator_request_forces_save_and_attaches_dropdowns() {
    let grid = schedule_fixture();

    // run once so the second pass has no repairs left of its own
    let (_, grid) = SheetScanner::open(grid, false).unwrap().scan().unwrap();

    let scanner = SheetScanner::open(grid, true).unwrap();
    let (outcome, grid) = scanner.scan().unwrap();

    assert!(!outcome.numeric_modified);
    assert!(!outcome.other_modified);
    assert!(outcome.saved);

    let validators = grid.validators(SCHEDULE_SHEET);
    assert_eq!(validators.len(), 2);
    assert_eq!(validators[0].sqref(), "E5:E7");
    assert_eq!(
        validators[0].entries,
        ["Ежемесячно", "Ежегодно", "Ежеквартально"]
    );
    assert_eq!(validators[1].sqref(), "H5:H7");
    assert_eq!(validators[1].entries, ["шт.", "м2"]);
}

#[test]
fn test_unknown_columns_pass_through() {
    let mut grid = schedule_fixture();
    grid.set_cell(
        SCHEDULE_SHEET,
        10,
        HEADER_ROW,
        CellValue::text("Примечание"),
    );
    grid.set_cell(SCHEDULE_SHEET, 10, 5, CellValue::text("не число, и ладно"));

    let scanner = SheetScanner::open(grid, false).unwrap();
    let (_, grid) = scanner.scan().unwrap();

    assert_eq!(grid.cell_highlight(SCHEDULE_SHEET, 10, 5), None);
    assert_eq!(
        grid.cell(SCHEDULE_SHEET, 10, 5),
        CellValue::text("не число, и ладно")
    );
}
