//! Example: Build a small sales report with a table and a chart

use sheetwright::prelude::*;
use sheetwright_engine::memory::StoredValue;

fn main() -> Result<()> {
    let mut engine = MemoryEngine::new();
    let sheet_id = {
        let mut workbook = Workbook::new(&mut engine, "/tmp/report.xlsx")?;
        let money = workbook.add_format(&Format::new().number_format("#,##0.00"))?;
        let title = workbook.add_format(&Format::new().bold().font_size(14.0).center())?;
        let chart = workbook.add_chart(ChartType::Column)?;

        let mut sheet = workbook.add_worksheet(Some("Sales"))?;
        sheet.merge_range("A1:C1", "Quarterly sales", Some(title))?;

        // Data rows under the table header on row 2
        let rows = [("North", 1250.0, 14), ("South", 980.5, 11), ("West", 1410.0, 17)];
        for (i, (region, amount, units)) in rows.iter().enumerate() {
            let row = 2 + i as u32;
            sheet.write((row, 0), *region, None)?;
            sheet.write((row, 1), *amount, Some(money))?;
            sheet.write((row, 2), *units, None)?;
        }

        let columns = [
            TableColumn::new("Region").with_total_label("Total"),
            TableColumn::new("Amount")
                .with_total(TotalFunction::Sum)
                .with_format(money),
            TableColumn::new("Units").with_total(TotalFunction::Sum),
        ];
        sheet.add_table("A2:C5", &columns, &TableOptions::named("Sales"))?;
        sheet.set_column_properties("A:C", Dimension::Units(14.0), None, false)?;
        sheet.insert_chart_scaled("E2", chart, 1.5, 1.0)?;
        sheet.freeze_panes("A3")?;

        let id = sheet.id();
        workbook.close()?;
        id
    };

    let sheet = engine.sheet(sheet_id).expect("sheet exists");
    for row in 0..7 {
        let cells: Vec<String> = (0..3)
            .map(|col| match sheet.cell(row, col).map(|cell| &cell.value) {
                Some(StoredValue::String(text)) => text.clone(),
                Some(StoredValue::Number(n)) => n.to_string(),
                Some(StoredValue::Formula(f)) => format!("={}", f),
                _ => String::new(),
            })
            .collect();
        println!("{}", cells.join("\t"));
    }

    Ok(())
}
