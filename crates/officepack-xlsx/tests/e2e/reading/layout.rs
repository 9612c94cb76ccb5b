//! Tests for reading the modeled sheet layout.

use std::io::Cursor;

use crate::{worksheet, PackageBuilder};
use officepack_core::{ColumnAttributes, ColumnFilter, Freeze, Sheet};
use officepack_xlsx::XlsxReader;
use pretty_assertions::assert_eq;

fn read_sheet(body: &str, sheet_data: &str) -> Sheet {
    let bytes = PackageBuilder::spreadsheet()
        .part("xl/worksheets/sheet1.xml", worksheet(body, sheet_data))
        .build();
    let document = XlsxReader::read(Cursor::new(bytes)).expect("Failed to read package");
    document
        .spreadsheet()
        .and_then(|s| s.workbook().sheet(0))
        .cloned()
        .expect("No worksheet")
}

const TWO_BY_TWO: &str = r#"<row r="1"><c r="A1"><v>1</v></c><c r="B1"><v>2</v></c></row>
<row r="2"><c r="A2"><v>3</v></c><c r="B2"><v>4</v></c></row>"#;

#[test]
fn test_frozen_top_rows() {
    let sheet = read_sheet(
        r#"<sheetViews><sheetView workbookViewId="0">
<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>
</sheetView></sheetViews>"#,
        TWO_BY_TWO,
    );
    assert_eq!(sheet.freeze(), Freeze::top(1));
}

#[test]
fn test_frozen_left_columns() {
    let sheet = read_sheet(
        r#"<sheetViews><sheetView workbookViewId="0">
<pane xSplit="1" topLeftCell="B1" activePane="topRight" state="frozen"/>
</sheetView></sheetViews>"#,
        TWO_BY_TWO,
    );
    assert_eq!(sheet.freeze(), Freeze::left(1));
}

#[test]
fn test_no_pane() {
    let sheet = read_sheet("", TWO_BY_TWO);
    assert_eq!(sheet.freeze(), Freeze::none());
    assert_eq!(sheet.filter(), None);
    assert_eq!(sheet.default_row_height(), 14.4);
}

#[test]
fn test_row_height_columns_and_filter() {
    let sheet = read_sheet(
        r#"<sheetFormatPr defaultRowHeight="20"/>
<cols><col min="1" max="2" width="12.5" bestFit="1" customWidth="1"/></cols>"#,
        TWO_BY_TWO,
    );
    assert_eq!(sheet.default_row_height(), 20.0);
    assert_eq!(
        sheet.columns(),
        &[ColumnAttributes::new(12.5, true), ColumnAttributes::new(12.5, true)]
    );

    // autoFilter follows sheetData
    let xml = format!(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>{}</sheetData>
<autoFilter ref="B1:B2"/>
</worksheet>"#,
        TWO_BY_TWO
    );
    let bytes = PackageBuilder::spreadsheet()
        .part("xl/worksheets/sheet1.xml", xml)
        .build();
    let document = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = document.spreadsheet().unwrap().workbook().sheet(0).unwrap();
    assert_eq!(sheet.filter(), Some(ColumnFilter::new(1, 1)));
}
