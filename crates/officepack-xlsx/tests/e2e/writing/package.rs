//! Tests for the package `XlsxWriter` produces.

use std::io::Cursor;

use chrono::{TimeZone, Utc};
use crate::read_parts;
use officepack_core::{
    Cell, ColumnAttributes, ColumnFilter, Document, DocumentKind, Expression, Freeze, Row, Sheet,
    Spreadsheet,
};
use officepack_xlsx::{XlsxError, XlsxReader, XlsxWriteOptions, XlsxWriter};
use pretty_assertions::assert_eq;

fn write(document: &mut Document) -> Vec<u8> {
    XlsxWriter::write(document, Cursor::new(Vec::new()))
        .expect("Failed to write document")
        .into_inner()
}

fn single_sheet(sheet: Sheet) -> Document {
    let mut spreadsheet = Spreadsheet::new();
    spreadsheet.workbook_mut().add_sheet(&sheet);
    Document::from_spreadsheet(spreadsheet)
}

#[test]
fn test_package_entries() {
    let mut document = single_sheet(Sheet::new("Sheet1"));
    let parts = read_parts(&write(&mut document));

    let names: Vec<&str> = parts.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/sharedStrings.xml",
            "xl/styles.xml",
            "xl/theme/theme1.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );
    assert!(parts["docProps/app.xml"].contains("<Application>Microsoft Excel</Application>"));
}

#[test]
fn test_repeated_text_is_shared_once() {
    let mut spreadsheet = Spreadsheet::new();
    spreadsheet.workbook_mut().add_sheet(&Sheet::new("Sheet1"));
    spreadsheet.set_cell_text(0, 0, 0, "Hello");
    spreadsheet.set_cell_text(0, 1, 0, "Hello");
    spreadsheet.set_cell_text(0, 1, 1, "World");
    let mut document = Document::from_spreadsheet(spreadsheet);

    let parts = read_parts(&write(&mut document));
    let sst = &parts["xl/sharedStrings.xml"];
    assert!(sst.contains(r#"count="2" uniqueCount="2""#));
    assert_eq!(sst.matches("<si>").count(), 2);

    let sheet = &parts["xl/worksheets/sheet1.xml"];
    assert!(sheet.contains(r#"<c r="A1" t="s"><v>0</v></c>"#));
    assert!(sheet.contains(r#"<c r="A2" t="s"><v>0</v></c>"#));
    assert!(sheet.contains(r#"<c r="B2" t="s"><v>1</v></c>"#));
}

#[test]
fn test_unused_strings_are_dropped() {
    let mut spreadsheet = Spreadsheet::new();
    spreadsheet.workbook_mut().add_sheet(&Sheet::new("Sheet1"));
    spreadsheet.strings_mut().insert("orphan");
    spreadsheet.set_cell_text(0, 0, 0, "kept");
    let mut document = Document::from_spreadsheet(spreadsheet);

    let parts = read_parts(&write(&mut document));
    let sst = &parts["xl/sharedStrings.xml"];
    assert!(!sst.contains("orphan"));
    assert!(sst.contains("<si><t>kept</t></si>"));

    // The document itself was renumbered
    let spreadsheet = document.spreadsheet().unwrap();
    assert_eq!(spreadsheet.strings().len(), 1);
    assert_eq!(spreadsheet.workbook().sheet(0).unwrap().cell(0, 0), Some(&Cell::Reference(0)));
}

#[test]
fn test_dangling_reference_is_written_as_empty_text() {
    let mut sheet = Sheet::new("Sheet1");
    sheet.add_row(&Row::from(vec![Cell::reference(42)]));
    let mut document = single_sheet(sheet);

    let bytes = write(&mut document);
    let read_back = XlsxReader::read(Cursor::new(bytes)).unwrap();
    assert_eq!(read_back.spreadsheet().unwrap().cell_text(0, 0, 0), Some(""));
}

#[test]
fn test_fixed_timestamp_and_creator() {
    let options = XlsxWriteOptions {
        creator: "Ada".into(),
        last_modified_by: "Grace".into(),
        timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 17, 8, 0, 0).unwrap()),
        ..XlsxWriteOptions::default()
    };
    let mut document = single_sheet(Sheet::new("Sheet1"));
    let bytes = XlsxWriter::write_with_options(&mut document, Cursor::new(Vec::new()), &options)
        .unwrap()
        .into_inner();
    let core = &read_parts(&bytes)["docProps/core.xml"];

    assert!(core.contains("<dc:creator>Ada</dc:creator>"));
    assert!(core.contains("<cp:lastModifiedBy>Grace</cp:lastModifiedBy>"));
    assert_eq!(core.matches("2024-05-17T08:00:00Z").count(), 2);
}

#[test]
fn test_output_is_reproducible_with_fixed_timestamp() {
    let options = XlsxWriteOptions {
        timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ..XlsxWriteOptions::default()
    };
    let mut first = single_sheet(Sheet::new("Sheet1"));
    let mut second = first.clone();

    let a = XlsxWriter::write_with_options(&mut first, Cursor::new(Vec::new()), &options)
        .unwrap()
        .into_inner();
    let b = XlsxWriter::write_with_options(&mut second, Cursor::new(Vec::new()), &options)
        .unwrap()
        .into_inner();
    assert_eq!(read_parts(&a), read_parts(&b));
}

#[test]
fn test_layout_roundtrip() {
    let mut sheet = Sheet::new("Layout");
    for r in 0..3 {
        let cells: Vec<Cell> = (0..3).map(|c| Cell::number(f64::from(r * 3 + c))).collect();
        sheet.add_row(&Row::from(cells));
    }
    sheet.set_freeze(Freeze::top(1));
    sheet.set_filter(ColumnFilter::new(0, 2));
    sheet.set_default_row_height(18.0);
    sheet.set_column(1, ColumnAttributes::new(30.0, false));
    let mut document = single_sheet(sheet);

    let read_back = XlsxReader::read(Cursor::new(write(&mut document))).unwrap();
    let sheet = read_back.spreadsheet().unwrap().workbook().sheet(0).unwrap();

    assert_eq!(sheet.name(), "Layout");
    assert_eq!(sheet.freeze(), Freeze::top(1));
    assert_eq!(sheet.filter(), Some(ColumnFilter::new(0, 2)));
    assert_eq!(sheet.default_row_height(), 18.0);
    assert_eq!(
        sheet.columns(),
        &[
            ColumnAttributes::default(),
            ColumnAttributes::new(30.0, false),
            ColumnAttributes::default(),
        ]
    );
    assert_eq!(sheet.cell(2, 2), Some(&Cell::Number(8.0)));
}

#[test]
fn test_left_freeze_roundtrip() {
    let mut sheet = Sheet::new("Sheet1");
    sheet.add_row(&Row::from(vec![Cell::number(1.0), Cell::number(2.0), Cell::number(3.0)]));
    sheet.set_freeze(Freeze::left(2));
    let mut document = single_sheet(sheet);

    let bytes = write(&mut document);
    assert!(read_parts(&bytes)["xl/worksheets/sheet1.xml"].contains(r#"topLeftCell="C1""#));

    let read_back = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = read_back.spreadsheet().unwrap().workbook().sheet(0).unwrap();
    assert_eq!(sheet.freeze(), Freeze::left(2));
}

#[test]
fn test_expression_text_roundtrip() {
    let cells = vec![
        Cell::expression(Expression::new("\"a\u{1}b\"", Some("a\u{1}b".into()))),
        Cell::expression(Expression::cached("_x0041_\r")),
        Cell::expression(Expression::default()),
        Cell::expression(Expression::new("NOW()", None)),
    ];
    let mut sheet = Sheet::new("Sheet1");
    sheet.add_row(&Row::from(cells.clone()));
    let mut document = single_sheet(sheet);

    let bytes = write(&mut document);
    let xml = &read_parts(&bytes)["xl/worksheets/sheet1.xml"];
    assert!(!xml.contains(|c: char| c.is_control() && c != '\n'));
    assert!(xml.contains("<v>a_x0001_b</v>"));
    assert!(xml.contains(r#"<c r="C1" t="str"/>"#));

    let read_back = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = read_back.spreadsheet().unwrap().workbook().sheet(0).unwrap();
    assert_eq!(sheet.rows()[0].cells(), cells.as_slice());
}

#[test]
fn test_sheet_ids_are_positional() {
    let mut spreadsheet = Spreadsheet::new();
    let mut first = Sheet::new("First");
    first.set_id(40);
    first.set_rel_id("rId99");
    spreadsheet.workbook_mut().push_sheet(first);
    spreadsheet.workbook_mut().push_sheet(Sheet::new("Second"));
    let mut document = Document::from_spreadsheet(spreadsheet);

    let parts = read_parts(&write(&mut document));
    assert!(parts["xl/workbook.xml"].contains(r#"<sheet name="First" sheetId="1" r:id="rId4"/>"#));
    assert!(parts["xl/workbook.xml"].contains(r#"<sheet name="Second" sheetId="2" r:id="rId5"/>"#));
    assert!(parts.contains_key("xl/worksheets/sheet2.xml"));

    let workbook = document.spreadsheet().unwrap().workbook();
    assert_eq!(workbook.sheet(0).unwrap().id(), 1);
    assert_eq!(workbook.sheet(0).unwrap().rel_id(), "rId4");
}

#[test]
fn test_invalid_sheet_name() {
    let mut document = single_sheet(Sheet::new("Q1/Q2"));
    let result = XlsxWriter::write(&mut document, Cursor::new(Vec::new()));
    assert!(matches!(result, Err(XlsxError::InvalidSheetName(name)) if name == "Q1/Q2"));

    let mut document = single_sheet(Sheet::new("Tab\u{7}"));
    let result = XlsxWriter::write(&mut document, Cursor::new(Vec::new()));
    assert!(matches!(result, Err(XlsxError::InvalidSheetName(name)) if name == "Tab\u{7}"));
}

#[test]
fn test_only_spreadsheets_are_written() {
    for kind in [DocumentKind::None, DocumentKind::Text, DocumentKind::Presentation] {
        let mut document = Document::with_kind(kind);
        let result = XlsxWriter::write(&mut document, Cursor::new(Vec::new()));
        assert!(
            matches!(result, Err(XlsxError::UnsupportedDocumentKind(_))),
            "{kind:?}"
        );
    }
}

#[test]
fn test_write_file_records_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    let mut document = single_sheet(Sheet::new("Sheet1"));

    XlsxWriter::write_file(&mut document, &path).unwrap();
    assert_eq!(document.path(), Some(path.as_path()));

    let read_back = XlsxReader::read_file(&path).unwrap();
    assert_eq!(read_back.path(), Some(path.as_path()));
    assert_eq!(read_back.kind(), DocumentKind::Spreadsheet);
}
