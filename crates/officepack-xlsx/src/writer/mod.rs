//! XLSX writer

mod templates;

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{XlsxError, XlsxResult};
use crate::options::XlsxWriteOptions;
use crate::package::PackageWriter;
use crate::parts::{self, content_type, rel_type};
use officepack_core::sheet::DEFAULT_ROW_HEIGHT;
use officepack_core::workbook::sheet_rel_id;
use officepack_core::{
    format_address, format_column, format_range, Cell, Document, FreezeKind, Sheet,
    StringTable, Workbook, MAX_SHEET_NAME_LEN,
};

use templates::{STYLES_XML, THEME_XML};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Cached values that are error literals rather than text
const ERROR_VALUES: [&str; 7] = [
    "#NULL!", "#DIV/0!", "#VALUE!", "#REF!", "#NAME?", "#NUM!", "#N/A",
];

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a document to a file path
    pub fn write_file<P: AsRef<Path>>(document: &mut Document, path: P) -> XlsxResult<()> {
        Self::write_file_with_options(document, path, &XlsxWriteOptions::default())
    }

    /// Write a document to a file path with custom options
    pub fn write_file_with_options<P: AsRef<Path>>(
        document: &mut Document,
        path: P,
        options: &XlsxWriteOptions,
    ) -> XlsxResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = Self::write_with_options(document, BufWriter::new(file), options)?;
        writer.flush()?;
        document.set_path(path);
        Ok(())
    }

    /// Write a document to a writer.
    ///
    /// The document is mutated before anything is emitted: shared strings are
    /// renumbered, sheet ids are made positional, and every logical column gets
    /// width attributes.
    pub fn write<W: Write + Seek>(document: &mut Document, writer: W) -> XlsxResult<W> {
        Self::write_with_options(document, writer, &XlsxWriteOptions::default())
    }

    /// Write a document to a writer with custom options
    pub fn write_with_options<W: Write + Seek>(
        document: &mut Document,
        writer: W,
        options: &XlsxWriteOptions,
    ) -> XlsxResult<W> {
        let kind = document.kind();
        let spreadsheet = match document.spreadsheet_mut() {
            Some(spreadsheet) => spreadsheet,
            None => {
                return Err(XlsxError::UnsupportedDocumentKind(format!(
                    "cannot write {:?} documents",
                    kind
                )))
            }
        };

        validate_sheet_names(spreadsheet.workbook())?;

        let report = spreadsheet.renumber_strings();
        if report.dangling > 0 {
            log::warn!(
                "{} cells referenced missing shared strings, written as empty text",
                report.dangling
            );
        }

        for (i, sheet) in spreadsheet.workbook_mut().sheets_mut().enumerate() {
            sheet.set_id(i as u32 + 1);
            sheet.set_rel_id(sheet_rel_id(i));
            sheet.materialize();
            sheet.ensure_column_defaults();
        }

        let workbook = spreadsheet.workbook();
        let strings = spreadsheet.strings();
        let timestamp = options.timestamp.unwrap_or_else(Utc::now);
        let mut package = PackageWriter::create(writer, options.compression);

        package.write_part(
            parts::CONTENT_TYPES,
            content_types_xml(workbook.sheet_count()).as_bytes(),
        )?;
        package.write_part(parts::ROOT_RELS, root_rels_xml().as_bytes())?;
        package.write_part(parts::APP_PROPS, app_props_xml(workbook).as_bytes())?;
        package.write_part(
            parts::CORE_PROPS,
            core_props_xml(options, &timestamp).as_bytes(),
        )?;
        package.write_part(parts::THEME, THEME_XML.as_bytes())?;
        package.write_part(parts::STYLES, STYLES_XML.as_bytes())?;
        package.write_part(parts::WORKBOOK, workbook_xml(workbook).as_bytes())?;
        package.write_part(
            parts::WORKBOOK_RELS,
            workbook_rels_xml(workbook.sheet_count()).as_bytes(),
        )?;
        for (i, sheet) in workbook.sheets().iter().enumerate() {
            package.write_part(&parts::worksheet(i), worksheet_xml(sheet, i == 0).as_bytes())?;
        }
        package.write_part(parts::SHARED_STRINGS, shared_strings_xml(strings).as_bytes())?;

        log::debug!(
            "wrote workbook with {} sheets and {} shared strings",
            workbook.sheet_count(),
            strings.len()
        );
        package.finish()
    }
}

/// Names must be non-empty, short, free of `[]:*?/\` and control characters,
/// and unique ignoring case
fn validate_sheet_names(workbook: &Workbook) -> XlsxResult<()> {
    let mut seen: Vec<String> = Vec::with_capacity(workbook.sheet_count());
    for sheet in workbook.sheets() {
        let name = sheet.name();
        let invalid = name.trim().is_empty()
            || name.chars().count() > MAX_SHEET_NAME_LEN
            || name.contains(['[', ']', ':', '*', '?', '/', '\\'])
            || name.contains(char::is_control);
        let folded = name.to_lowercase();
        if invalid || seen.contains(&folded) {
            return Err(XlsxError::InvalidSheetName(name.to_string()));
        }
        seen.push(folded);
    }
    Ok(())
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut content = format!(
        r#"{}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="{}"/>
    <Default Extension="xml" ContentType="{}"/>
    <Override PartName="/{}" ContentType="{}"/>"#,
        XML_DECLARATION,
        content_type::RELATIONSHIPS,
        content_type::XML,
        parts::WORKBOOK,
        content_type::WORKBOOK,
    );

    // One override per worksheet
    for i in 0..sheet_count {
        content.push_str(&format!(
            r#"
    <Override PartName="/{}" ContentType="{}"/>"#,
            parts::worksheet(i),
            content_type::WORKSHEET
        ));
    }

    for (part, media_type) in [
        (parts::THEME, content_type::THEME),
        (parts::STYLES, content_type::STYLES),
        (parts::SHARED_STRINGS, content_type::SHARED_STRINGS),
        (parts::CORE_PROPS, content_type::CORE_PROPS),
        (parts::APP_PROPS, content_type::APP_PROPS),
    ] {
        content.push_str(&format!(
            r#"
    <Override PartName="/{}" ContentType="{}"/>"#,
            part, media_type
        ));
    }

    content.push_str("\n</Types>");
    content
}

fn root_rels_xml() -> String {
    format!(
        r#"{}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="{}" Target="{}"/>
    <Relationship Id="rId2" Type="{}" Target="{}"/>
    <Relationship Id="rId3" Type="{}" Target="{}"/>
</Relationships>"#,
        XML_DECLARATION,
        rel_type::OFFICE_DOCUMENT,
        parts::WORKBOOK,
        rel_type::CORE_PROPS,
        parts::CORE_PROPS,
        rel_type::APP_PROPS,
        parts::APP_PROPS,
    )
}

fn app_props_xml(workbook: &Workbook) -> String {
    let mut titles = String::new();
    for sheet in workbook.sheets() {
        titles.push_str(&format!(
            "\n            <vt:lpstr>{}</vt:lpstr>",
            escape_xml(sheet.name())
        ));
    }

    format!(
        r#"{}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>Microsoft Excel</Application>
    <DocSecurity>0</DocSecurity>
    <ScaleCrop>false</ScaleCrop>
    <HeadingPairs>
        <vt:vector size="2" baseType="variant">
            <vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>
            <vt:variant><vt:i4>{count}</vt:i4></vt:variant>
        </vt:vector>
    </HeadingPairs>
    <TitlesOfParts>
        <vt:vector size="{count}" baseType="lpstr">{titles}
        </vt:vector>
    </TitlesOfParts>
    <LinksUpToDate>false</LinksUpToDate>
    <SharedDoc>false</SharedDoc>
    <HyperlinksChanged>false</HyperlinksChanged>
    <AppVersion>16.0300</AppVersion>
</Properties>"#,
        XML_DECLARATION,
        count = workbook.sheet_count(),
        titles = titles,
    )
}

fn core_props_xml(options: &XlsxWriteOptions, timestamp: &DateTime<Utc>) -> String {
    let stamp = timestamp.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"{}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:creator>{}</dc:creator>
    <cp:lastModifiedBy>{}</cp:lastModifiedBy>
    <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
        XML_DECLARATION,
        escape_xml(&options.creator),
        escape_xml(&options.last_modified_by),
        stamp,
        stamp,
    )
}

fn workbook_xml(workbook: &Workbook) -> String {
    let mut content = format!(
        r#"{}
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        XML_DECLARATION
    );

    for (i, sheet) in workbook.sheets().iter().enumerate() {
        content.push_str(&format!(
            r#"
        <sheet name="{}" sheetId="{}" r:id="{}"/>"#,
            escape_xml(sheet.name()),
            i + 1,
            sheet_rel_id(i)
        ));
    }

    content.push_str(
        r#"
    </sheets>
    <calcPr calcId="0"/>
</workbook>"#,
    );
    content
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut content = format!(
        r#"{}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="{}" Target="theme/theme1.xml"/>
    <Relationship Id="rId2" Type="{}" Target="styles.xml"/>
    <Relationship Id="rId3" Type="{}" Target="sharedStrings.xml"/>"#,
        XML_DECLARATION,
        rel_type::THEME,
        rel_type::STYLES,
        rel_type::SHARED_STRINGS,
    );

    for i in 0..sheet_count {
        content.push_str(&format!(
            r#"
    <Relationship Id="{}" Type="{}" Target="worksheets/sheet{}.xml"/>"#,
            sheet_rel_id(i),
            rel_type::WORKSHEET,
            i + 1
        ));
    }

    content.push_str("\n</Relationships>");
    content
}

fn worksheet_xml(sheet: &Sheet, selected: bool) -> String {
    let rows = sheet.row_count();
    let cols = sheet.column_count();

    let mut content = format!(
        r#"{}
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:x14ac="http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac" mc:Ignorable="x14ac">"#,
        XML_DECLARATION
    );

    // Dimension
    let dimension = if rows > 0 && cols > 0 {
        format_range(0, 0, rows as u32 - 1, cols as u32 - 1)
    } else {
        "A1".to_string()
    };
    content.push_str(&format!("\n    <dimension ref=\"{}\"/>", dimension));

    // Sheet view, with the frozen pane if any
    content.push_str(&format!(
        "\n    <sheetViews>\n        <sheetView{} workbookViewId=\"0\">",
        if selected { " tabSelected=\"1\"" } else { "" }
    ));
    let freeze = sheet.freeze();
    if freeze.is_active() {
        let (split, top_left, pane) = match freeze.kind {
            FreezeKind::Left => (
                "xSplit",
                format_address(0, freeze.count),
                "topRight",
            ),
            _ => ("ySplit", format_address(freeze.count, 0), "bottomLeft"),
        };
        content.push_str(&format!(
            r#"
            <pane {}="{}" topLeftCell="{}" activePane="{}" state="frozen"/>
            <selection pane="{}"/>"#,
            split, freeze.count, top_left, pane, pane
        ));
    }
    content.push_str("\n        </sheetView>\n    </sheetViews>");

    // Default row height
    let height = sheet.default_row_height();
    if height > 0.0 {
        content.push_str(&format!(
            "\n    <sheetFormatPr defaultRowHeight=\"{}\" customHeight=\"1\" x14ac:dyDescent=\"0.3\"/>",
            height
        ));
    } else {
        content.push_str(&format!(
            "\n    <sheetFormatPr defaultRowHeight=\"{}\" x14ac:dyDescent=\"0.3\"/>",
            DEFAULT_ROW_HEIGHT
        ));
    }

    // Column widths
    if cols > 0 {
        content.push_str("\n    <cols>");
        for col in 0..cols {
            let attributes = sheet.column(col);
            content.push_str(&format!(
                "\n        <col min=\"{n}\" max=\"{n}\" width=\"{}\" bestFit=\"{}\" customWidth=\"1\"/>",
                attributes.width,
                u8::from(attributes.autowidth),
                n = col + 1,
            ));
        }
        content.push_str("\n    </cols>");
    }

    // Cell data
    content.push_str("\n    <sheetData>");
    for (r, row) in sheet.rows().iter().enumerate() {
        content.push_str(&format!("\n        <row r=\"{}\"", r + 1));
        if cols > 0 {
            content.push_str(&format!(" spans=\"1:{}\"", cols));
        }
        if height > 0.0 {
            content.push_str(&format!(" ht=\"{}\" customHeight=\"1\"", height));
        }
        content.push_str(" x14ac:dyDescent=\"0.3\">");

        for (c, cell) in row.cells().iter().enumerate() {
            content.push_str("\n            ");
            write_cell(&mut content, &format_address(r as u32, c as u32), cell);
        }

        content.push_str("\n        </row>");
    }
    content.push_str("\n    </sheetData>");

    // Filter over the used rows
    if let Some(filter) = sheet.filter() {
        let last_row = rows.max(1) as u32;
        let first = format_column(filter.first_column);
        let last = format_column(filter.last_column);
        content.push_str(&format!(
            "\n    <autoFilter ref=\"{}1:{}{}\">",
            first, last, last_row
        ));
        if last_row >= 2 {
            content.push_str(&format!(
                "<sortState ref=\"{}2:{}{}\"/>",
                first, last, last_row
            ));
        }
        content.push_str("</autoFilter>");
    }

    content.push_str(
        r#"
    <pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>
</worksheet>"#,
    );
    content
}

fn write_cell(content: &mut String, address: &str, cell: &Cell) {
    match cell {
        Cell::Empty => content.push_str(&format!("<c r=\"{}\"/>", address)),
        Cell::Reference(id) => {
            content.push_str(&format!("<c r=\"{}\" t=\"s\"><v>{}</v></c>", address, id))
        }
        Cell::Number(n) if n.is_finite() => {
            content.push_str(&format!("<c r=\"{}\"><v>{}</v></c>", address, n))
        }
        Cell::Number(n) => {
            log::warn!("{}: {} cannot be stored, writing #NUM!", address, n);
            content.push_str(&format!("<c r=\"{}\" t=\"e\"><v>#NUM!</v></c>", address));
        }
        Cell::Expression(expr) => {
            let (formula, value) = (expr.formula(), expr.value());
            // a cached value that is not a number needs a type
            let cell_type = match value {
                Some(v) if ERROR_VALUES.contains(&v) => " t=\"e\"",
                Some(v) if v.trim().parse::<f64>().is_err() => " t=\"str\"",
                _ if formula.is_none() => " t=\"str\"",
                _ => "",
            };
            if formula.is_none() && value.is_none() {
                content.push_str(&format!("<c r=\"{}\" t=\"str\"/>", address));
                return;
            }
            content.push_str(&format!("<c r=\"{}\"{}>", address, cell_type));
            if let Some(formula) = formula {
                content.push_str(&format!("<f>{}</f>", xml_text(formula)));
            }
            if let Some(value) = value {
                content.push_str(&format!("<v>{}</v>", xml_text(value)));
            }
            content.push_str("</c>");
        }
    }
}

fn shared_strings_xml(strings: &StringTable) -> String {
    let mut content = format!(
        r#"{}
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{count}" uniqueCount="{count}">"#,
        XML_DECLARATION,
        count = strings.len()
    );

    for (_, text) in strings.iter() {
        let preserve = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
        content.push_str(&format!(
            "\n    <si><t{}>{}</t></si>",
            if preserve { " xml:space=\"preserve\"" } else { "" },
            xml_text(text)
        ));
    }

    content.push_str("\n</sst>");
    content
}

/// Escape characters XML text cannot carry as `_xHHHH_`, and protect literal
/// `_xHHHH_` sequences by escaping their underscore.
fn encode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '\t' | '\n' => result.push(c),
            c if (c as u32) < 0x20 => result.push_str(&format!("_x{:04X}_", c as u32)),
            '_' if looks_like_escape(&s[i..]) => result.push_str("_x005F_"),
            c => result.push(c),
        }
    }
    result
}

fn looks_like_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// Text content as written inside `<t>`, `<f>` and `<v>`
fn xml_text(s: &str) -> String {
    escape_xml(&encode_excel_escapes(s))
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
