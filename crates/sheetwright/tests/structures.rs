//! End-to-end tests for tables, merges and column/row properties

use pretty_assertions::assert_eq;
use sheetwright::prelude::*;
use sheetwright::{FormatId, RowColOptions, SheetId};
use sheetwright_engine::memory::{Extent, StoredValue};

fn build<F>(f: F) -> (MemoryEngine, SheetId)
where
    F: FnOnce(&mut Workbook<&mut MemoryEngine>) -> SheetId,
{
    let mut engine = MemoryEngine::new();
    let id = {
        let mut workbook = Workbook::new(&mut engine, "structures.xlsx").unwrap();
        let id = f(&mut workbook);
        workbook.close().unwrap();
        id
    };
    (engine, id)
}

#[test]
fn test_total_function_extends_table_by_one_row() {
    let (engine, sheet) = build(|workbook| {
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet
            .add_table_with_headers("A1:A10", None, &["Amount"], &[], &[TotalFunction::Sum])
            .unwrap();
        sheet.id()
    });

    let table = &engine.sheet(sheet).unwrap().tables[0];
    assert_eq!(table.range, CellRange::new(0, 0, 10, 0));
    assert!(table.total_row);
    assert_eq!(
        engine.cell_value(sheet, 10, 0),
        Some(&StoredValue::Formula("SUBTOTAL(109,[Amount])".into()))
    );
}

#[test]
fn test_no_totals_keeps_range() {
    let (engine, sheet) = build(|workbook| {
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet
            .add_table_with_headers("A1:A10", None, &["Amount"], &[], &[])
            .unwrap();
        sheet.id()
    });

    let table = &engine.sheet(sheet).unwrap().tables[0];
    assert_eq!(table.range, CellRange::new(0, 0, 9, 0));
    assert!(!table.total_row);
}

#[test]
fn test_empty_column_list_sends_null_table() {
    let (engine, sheet) = build(|workbook| {
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet
            .add_table("B2:D6", &[], &TableOptions::default())
            .unwrap();
        sheet.id()
    });

    let table = &engine.sheet(sheet).unwrap().tables[0];
    assert!(!table.column_table_present);
    assert_eq!(table.supplied_columns, 0);
    assert_eq!(table.range, CellRange::new(1, 1, 5, 3));
    assert_eq!(
        table
            .columns
            .iter()
            .map(|c| c.header.as_str())
            .collect::<Vec<_>>(),
        vec!["Column1", "Column2", "Column3"]
    );
}

#[test]
fn test_table_columns_and_options_arrive_intact() {
    let mut header_format = None;
    let (engine, sheet) = build(|workbook| {
        let bold = workbook.add_format(&Format::new().bold()).unwrap();
        header_format = Some(bold);
        let mut sheet = workbook.add_worksheet(Some("Budget")).unwrap();
        let columns = [
            TableColumn::new("Item")
                .with_header_format(bold)
                .with_total_label("Total"),
            TableColumn::new("Cost")
                .with_header_format(bold)
                .with_total(TotalFunction::Average),
            TableColumn::new("Tax").with_formula("[@Cost]*0.2"),
        ];
        let options = TableOptions {
            style: TableStyle::Light(9),
            banded_rows: false,
            ..TableOptions::named("Costs")
        };
        sheet.add_table("A1:C4", &columns, &options).unwrap();
        sheet.id()
    });

    let table = &engine.sheet(sheet).unwrap().tables[0];
    assert_eq!(table.name, "Costs");
    assert_eq!(table.style, TableStyle::Light(9));
    assert!(!table.banded_rows);
    assert!(table.header_row);
    assert_eq!(table.range, CellRange::new(0, 0, 4, 2));
    assert_eq!(table.supplied_columns, 3);
    assert_eq!(table.columns[0].header_format, header_format);
    assert_eq!(table.columns[0].total_string.as_deref(), Some("Total"));
    assert_eq!(table.columns[1].total_function, TotalFunction::Average);
    assert_eq!(table.columns[2].formula.as_deref(), Some("[@Cost]*0.2"));

    assert_eq!(
        engine.cell_value(sheet, 4, 0),
        Some(&StoredValue::String("Total".into()))
    );
    assert_eq!(
        engine.cell_value(sheet, 4, 1),
        Some(&StoredValue::Formula("SUBTOTAL(101,[Cost])".into()))
    );
}

#[test]
fn test_header_formats_reach_header_cells() {
    let mut bold = None;
    let (engine, sheet) = build(|workbook| {
        let format = workbook.add_format(&Format::new().bold()).unwrap();
        bold = Some(format);
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet
            .add_table_with_headers("A1:B5", None, &["Region", "Sales"], &[Some(format)], &[])
            .unwrap();
        sheet.id()
    });

    let record = engine.sheet(sheet).unwrap();
    let table = &record.tables[0];
    assert_eq!(table.columns[0].header_format, bold);
    assert_eq!(table.columns[0].format, None);
    assert_eq!(table.columns[1].header_format, None);

    let header = record.cell(0, 0).unwrap();
    assert_eq!(header.value, StoredValue::String("Region".into()));
    assert_eq!(header.format, bold);
    assert_eq!(record.cell(0, 1).unwrap().format, None);
}

#[test]
fn test_overlong_lists_are_rejected_before_engine() {
    let (engine, sheet) = build(|workbook| {
        let mut sheet = workbook.add_worksheet(None).unwrap();
        let err = sheet
            .add_table_with_headers(
                "A1:B5",
                None,
                &["A", "B"],
                &[None, None, None],
                &[],
            )
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::ColumnCountMismatch {
                field: "formats",
                expected: 2,
                found: 3
            }
        ));

        let totals = [TotalFunction::Sum; 3];
        let err = sheet
            .add_table_with_headers("A1:B5", None, &["A", "B"], &[], &totals)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::ColumnCountMismatch { field: "totals", .. }
        ));
        sheet.id()
    });

    let record = engine.sheet(sheet).unwrap();
    assert!(record.tables.is_empty());
    assert_eq!(record.cell_count(), 0);
}

#[test]
fn test_duplicate_headers_report_engine_status() {
    build(|workbook| {
        let mut sheet = workbook.add_worksheet(None).unwrap();
        let err = sheet
            .add_table_with_headers("A1:B5", None, &["Name", "name"], &[], &[])
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::Write(sheetwright::WriteError {
                code: sheetwright::Status::PARAMETER_VALIDATION,
                ..
            })
        ));
        sheet.id()
    });
}

#[test]
fn test_pixels_and_units_are_not_converted() {
    let (engine, sheet) = build(|workbook| {
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet
            .set_column_properties("B:C", Dimension::Pixels(120), None, false)
            .unwrap()
            .set_column_properties("E", Dimension::Units(20.0), None, false)
            .unwrap()
            .set_row_properties(3, Dimension::Pixels(40), None, false)
            .unwrap()
            .set_row_properties(4, Dimension::Units(30.0), None, true)
            .unwrap();
        sheet.id()
    });

    let record = engine.sheet(sheet).unwrap();
    assert_eq!(record.column(1).unwrap().size, Extent::Pixels(120));
    assert_eq!(record.column(2).unwrap().size, Extent::Pixels(120));
    assert_eq!(record.column(4).unwrap().size, Extent::Units(20.0));
    assert!(record.column(3).is_none());
    assert_eq!(record.row(3).unwrap().size, Extent::Pixels(40));
    assert_eq!(record.row(4).unwrap().size, Extent::Units(30.0));
    assert!(record.row(4).unwrap().options.hidden);
}

#[test]
fn test_hide_column_and_outline_options() {
    let (engine, sheet) = build(|workbook| {
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet
            .hide_column("D", Dimension::default())
            .unwrap()
            .hide_column("H:I", Dimension::Pixels(90))
            .unwrap();
        let grouped = RowColOptions {
            hidden: false,
            level: 2,
            collapsed: true,
        };
        sheet
            .set_column_options((5, 6), Dimension::Units(10.0), None, &grouped)
            .unwrap();
        sheet.id()
    });

    let record = engine.sheet(sheet).unwrap();
    let hidden = record.column(3).unwrap();
    assert!(hidden.options.hidden);
    assert_eq!(hidden.size, Extent::Units(8.43));
    assert_eq!(record.column(6).unwrap().options.level, 2);
    for col in [7, 8] {
        let column = record.column(col).unwrap();
        assert!(column.options.hidden);
        assert_eq!(column.size, Extent::Pixels(90));
    }
}

#[test]
fn test_merge_writes_text_once() {
    let mut title: Option<FormatId> = None;
    let (engine, sheet) = build(|workbook| {
        let format = workbook.add_format(&Format::new().bold().center()).unwrap();
        title = Some(format);
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet.merge_range("A1:D1", "Title", Some(format)).unwrap();
        sheet.id()
    });

    let record = engine.sheet(sheet).unwrap();
    assert_eq!(record.merges, vec![CellRange::new(0, 0, 0, 3)]);
    assert_eq!(
        record.cell(0, 0).unwrap().value,
        StoredValue::String("Title".into())
    );
    assert_eq!(record.cell(0, 3).unwrap().value, StoredValue::Blank);
    assert_eq!(record.cell(0, 3).unwrap().format, title);
}

#[test]
fn test_print_area_autofilter_and_chart() {
    let (engine, sheet) = build(|workbook| {
        let chart = workbook.add_chart(ChartType::Pie).unwrap();
        let mut sheet = workbook.add_worksheet(None).unwrap();
        sheet
            .set_print_area("A1:F20")
            .unwrap()
            .set_autofilter("A1:F1")
            .unwrap()
            .insert_chart_scaled("H2", chart, 2.0, 0.5)
            .unwrap();
        sheet.id()
    });

    let record = engine.sheet(sheet).unwrap();
    assert_eq!(record.print_area, Some(CellRange::new(0, 0, 19, 5)));
    assert_eq!(record.autofilter, Some(CellRange::new(0, 0, 0, 5)));
    let placed = record.charts[0];
    assert_eq!(placed.at, Coordinate::new(1, 7));
    assert_eq!(placed.options.x_scale, 2.0);
    assert_eq!(placed.options.y_scale, 0.5);
}
