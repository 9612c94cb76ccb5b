//! Tests for recognising the package and its document kind.

use std::io::Cursor;

use crate::{app_props, workbook, PackageBuilder};
use officepack_core::DocumentKind;
use officepack_xlsx::{XlsxError, XlsxReadOptions, XlsxReader};

#[test]
fn test_minimal_spreadsheet() {
    let bytes = PackageBuilder::spreadsheet().build();
    let document = XlsxReader::read(Cursor::new(bytes)).expect("read package");

    assert_eq!(document.kind(), DocumentKind::Spreadsheet);
    assert_eq!(document.path(), None);
    let spreadsheet = document.spreadsheet().expect("spreadsheet body");
    assert_eq!(spreadsheet.workbook().sheet_count(), 1);
    assert_eq!(spreadsheet.workbook().sheet(0).unwrap().name(), "Sheet1");
    assert!(spreadsheet.strings().is_empty());
}

#[test]
fn test_missing_markers() {
    for marker in ["docProps/core.xml", "docProps/app.xml"] {
        let bytes = PackageBuilder::spreadsheet().without(marker).build();
        match XlsxReader::read(Cursor::new(bytes)) {
            Err(XlsxError::NotAContainer(msg)) => assert!(msg.contains(marker), "{msg}"),
            other => panic!("Expected NotAContainer, got {other:?}"),
        }
    }
}

#[test]
fn test_not_a_zip() {
    let bytes = b"name,value\nalpha,1\n".repeat(8);
    let result = XlsxReader::read(Cursor::new(bytes));
    assert!(matches!(result, Err(XlsxError::NotAContainer(_))));
}

#[test]
fn test_other_office_kinds_are_unsupported() {
    for application in ["Microsoft Office Word", "Microsoft Office PowerPoint"] {
        let bytes = PackageBuilder::spreadsheet()
            .part("docProps/app.xml", app_props(application))
            .build();
        let result = XlsxReader::read(Cursor::new(bytes));
        assert!(
            matches!(result, Err(XlsxError::UnsupportedDocumentKind(_))),
            "{application}: {result:?}"
        );
    }
}

#[test]
fn test_unknown_application() {
    let bytes = PackageBuilder::spreadsheet()
        .part("docProps/app.xml", app_props("LibreOffice/7.6"))
        .build();

    let result = XlsxReader::read(Cursor::new(bytes.clone()));
    assert!(matches!(result, Err(XlsxError::UnsupportedDocumentKind(_))));

    let options = XlsxReadOptions { strict_kind: false };
    let document = XlsxReader::read_with_options(Cursor::new(bytes), &options)
        .expect("lenient read");
    assert_eq!(document.kind(), DocumentKind::Spreadsheet);
}

#[test]
fn test_lenient_read_still_needs_a_workbook() {
    let bytes = PackageBuilder::spreadsheet()
        .part("docProps/app.xml", app_props("LibreOffice/7.6"))
        .without("xl/workbook.xml")
        .build();
    let options = XlsxReadOptions { strict_kind: false };
    let result = XlsxReader::read_with_options(Cursor::new(bytes), &options);
    assert!(matches!(result, Err(XlsxError::UnsupportedDocumentKind(_))));
}

#[test]
fn test_missing_application() {
    let bytes = PackageBuilder::spreadsheet()
        .part(
            "docProps/app.xml",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"/>"#,
        )
        .build();
    let result = XlsxReader::read(Cursor::new(bytes));
    assert!(matches!(result, Err(XlsxError::UnsupportedDocumentKind(_))));
}

#[test]
fn test_missing_workbook_part() {
    let bytes = PackageBuilder::spreadsheet().without("xl/workbook.xml").build();
    match XlsxReader::read(Cursor::new(bytes)) {
        Err(XlsxError::MissingPart(part)) => assert_eq!(part, "xl/workbook.xml"),
        other => panic!("Expected MissingPart, got {other:?}"),
    }
}

#[test]
fn test_missing_worksheet_part() {
    let bytes = PackageBuilder::spreadsheet()
        .without("xl/worksheets/sheet1.xml")
        .build();
    match XlsxReader::read(Cursor::new(bytes)) {
        Err(XlsxError::MissingPart(part)) => assert_eq!(part, "xl/worksheets/sheet1.xml"),
        other => panic!("Expected MissingPart, got {other:?}"),
    }
}

#[test]
fn test_malformed_workbook_part() {
    let bytes = PackageBuilder::spreadsheet()
        .part("xl/workbook.xml", "<workbook><sheets></workbook>")
        .build();
    match XlsxReader::read(Cursor::new(bytes)) {
        Err(XlsxError::MalformedPart { part, .. }) => assert_eq!(part, "xl/workbook.xml"),
        other => panic!("Expected MalformedPart, got {other:?}"),
    }
}

#[test]
fn test_sheets_resolved_through_relationships() {
    let bytes = PackageBuilder::spreadsheet()
        .part(
            "xl/workbook.xml",
            workbook(&[("Summary", 7, "rId9"), ("Data", 3, "rId4")]),
        )
        .part(
            "xl/_rels/workbook.xml.rels",
            crate::workbook_rels(&[
                ("rId4", "worksheets/sheet1.xml"),
                ("rId9", "/xl/worksheets/summary.xml"),
            ]),
        )
        .part(
            "xl/worksheets/summary.xml",
            crate::worksheet("", r#"<row r="1"><c r="A1"><v>1</v></c></row>"#),
        )
        .build();

    let document = XlsxReader::read(Cursor::new(bytes)).expect("read package");
    let workbook = document.spreadsheet().unwrap().workbook();

    let names: Vec<&str> = workbook.sheets().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Summary", "Data"]);

    let summary = workbook.sheet(0).unwrap();
    assert_eq!(summary.id(), 7);
    assert_eq!(summary.rel_id(), "rId9");
    assert_eq!(summary.row_count(), 1);

    let data = workbook.sheet_by_name("Data").unwrap();
    assert_eq!(data.id(), 3);
    assert_eq!(data.row_count(), 0);
}

#[test]
fn test_missing_relationships_fall_back_to_positional_parts() {
    let bytes = PackageBuilder::spreadsheet()
        .without("xl/_rels/workbook.xml.rels")
        .with_sheet_data(r#"<row r="1"><c r="A1"><v>5</v></c></row>"#)
        .build();
    let document = XlsxReader::read(Cursor::new(bytes)).expect("read package");
    let sheet = document.spreadsheet().unwrap().workbook().sheet(0).unwrap();
    assert_eq!(sheet.row_count(), 1);
}
