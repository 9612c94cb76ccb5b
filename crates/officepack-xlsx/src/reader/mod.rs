//! XLSX reader

mod shared_strings;
mod worksheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::options::XlsxReadOptions;
use crate::package::PackageReader;
use crate::parts;
use officepack_core::workbook::sheet_rel_id;
use officepack_core::{Document, DocumentKind, Spreadsheet, StringTable, Workbook};

use shared_strings::read_shared_strings;
use worksheet::read_worksheet;

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a document from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Document> {
        Self::read_file_with_options(path, &XlsxReadOptions::default())
    }

    /// Read a document from a file path with custom options
    pub fn read_file_with_options<P: AsRef<Path>>(
        path: P,
        options: &XlsxReadOptions,
    ) -> XlsxResult<Document> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut document = Self::read_with_options(BufReader::new(file), options)?;
        document.set_path(path);
        Ok(document)
    }

    /// Read a document from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Document> {
        Self::read_with_options(reader, &XlsxReadOptions::default())
    }

    /// Read a document from a reader with custom options
    pub fn read_with_options<R: Read + Seek>(
        reader: R,
        options: &XlsxReadOptions,
    ) -> XlsxResult<Document> {
        let mut package = PackageReader::open(reader)?;

        // Both property parts mark an office document
        for marker in [parts::CORE_PROPS, parts::APP_PROPS] {
            if !package.contains(marker) {
                return Err(XlsxError::NotAContainer(format!("missing {}", marker)));
            }
        }

        let app = package.read_part(parts::APP_PROPS)?;
        let application = read_application(&app)?;
        let kind = match kind_for_application(application.as_deref()) {
            DocumentKind::None if !options.strict_kind && package.contains(parts::WORKBOOK) => {
                log::warn!(
                    "unknown application {:?}, reading as a spreadsheet",
                    application
                );
                DocumentKind::Spreadsheet
            }
            kind => kind,
        };

        match kind {
            DocumentKind::Spreadsheet => {
                let spreadsheet = Self::read_spreadsheet(&mut package)?;
                Ok(Document::from_spreadsheet(spreadsheet))
            }
            DocumentKind::None => Err(XlsxError::UnsupportedDocumentKind(match application {
                Some(name) => format!("unknown application {:?}", name),
                None => "no application declared".into(),
            })),
            other => Err(XlsxError::UnsupportedDocumentKind(format!("{:?}", other))),
        }
    }

    fn read_spreadsheet<R: Read + Seek>(
        package: &mut PackageReader<R>,
    ) -> XlsxResult<Spreadsheet> {
        // Shared strings first, so inline strings are appended after them
        let mut strings = StringTable::new();
        if let Some(bytes) = package.read_optional_part(parts::SHARED_STRINGS)? {
            read_shared_strings(&bytes, &mut strings)?;
        }

        let entries = read_workbook_xml(&package.read_part(parts::WORKBOOK)?)?;
        let sheet_paths = match package.read_optional_part(parts::WORKBOOK_RELS)? {
            Some(bytes) => read_workbook_rels(&bytes)?,
            None => HashMap::new(),
        };

        let mut workbook = Workbook::new();
        for (i, entry) in entries.into_iter().enumerate() {
            let path = match sheet_paths.get(&entry.rel_id) {
                Some(path) => path.clone(),
                None => {
                    let fallback = parts::worksheet(i);
                    log::warn!(
                        "sheet {:?}: relationship {:?} not found, using {}",
                        entry.name,
                        entry.rel_id,
                        fallback
                    );
                    fallback
                }
            };

            let bytes = package.read_part(&path)?;
            let mut sheet = read_worksheet(&path, &bytes, &entry.name, &mut strings)?;
            sheet.set_id(entry.sheet_id.unwrap_or(i as u32 + 1));
            sheet.set_rel_id(entry.rel_id);
            workbook.push_sheet(sheet);
        }

        log::debug!(
            "read workbook with {} sheets and {} shared strings",
            workbook.sheet_count(),
            strings.len()
        );
        Ok(Spreadsheet::from_parts(workbook, strings))
    }
}

/// Map `Properties/Application` to a document kind
pub(crate) fn kind_for_application(application: Option<&str>) -> DocumentKind {
    match application.map(str::trim) {
        Some("Microsoft Excel") | Some("Microsoft Macintosh Excel") => DocumentKind::Spreadsheet,
        Some("Microsoft Word") | Some("Microsoft Office Word") | Some("Microsoft Macintosh Word") => {
            DocumentKind::Text
        }
        Some("Microsoft PowerPoint")
        | Some("Microsoft Office PowerPoint")
        | Some("Microsoft Macintosh PowerPoint") => DocumentKind::Presentation,
        _ => DocumentKind::None,
    }
}

/// Text of the `Application` child of the `Properties` root
fn read_application(bytes: &[u8]) -> XlsxResult<Option<String>> {
    let part = parts::APP_PROPS;
    let mut xml_reader = Reader::from_reader(bytes);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut in_properties = false;
    let mut in_application = false;
    let mut application: Option<String> = None;

    loop {
        match xml_reader
            .read_event_into(&mut buf)
            .map_err(|e| XlsxError::malformed(part, e))?
        {
            Event::Start(e) => {
                depth += 1;
                match (depth, e.local_name().as_ref()) {
                    (1, b"Properties") => in_properties = true,
                    (2, b"Application") if in_properties => {
                        in_application = true;
                        application.get_or_insert_with(String::new);
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                in_application = false;
                depth = depth.saturating_sub(1);
            }
            Event::Text(e) if in_application => {
                if let Some(app) = application.as_mut() {
                    app.push_str(&xml_text(part, &e)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(application.map(|a| a.trim().to_string()))
}

/// A `sheet` element of `xl/workbook.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
struct SheetEntry {
    name: String,
    sheet_id: Option<u32>,
    rel_id: String,
}

/// Declared sheets, in file order
fn read_workbook_xml(bytes: &[u8]) -> XlsxResult<Vec<SheetEntry>> {
    let part = parts::WORKBOOK;
    let mut xml_reader = Reader::from_reader(bytes);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml_reader
            .read_event_into(&mut buf)
            .map_err(|e| XlsxError::malformed(part, e))?
        {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr_value(&e, b"name")
                    .ok_or_else(|| XlsxError::malformed(part, "sheet without a name"))?;
                let sheet_id = attr_value(&e, b"sheetId").and_then(|v| v.trim().parse().ok());
                let rel_id = attr_value(&e, b"id").unwrap_or_else(|| {
                    let generated = sheet_rel_id(sheets.len());
                    log::warn!("sheet {:?} has no r:id, assuming {}", name, generated);
                    generated
                });
                sheets.push(SheetEntry {
                    name,
                    sheet_id,
                    rel_id,
                });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Worksheet relationship ids mapped to archive entry names
fn read_workbook_rels(bytes: &[u8]) -> XlsxResult<HashMap<String, String>> {
    let part = parts::WORKBOOK_RELS;
    let mut xml_reader = Reader::from_reader(bytes);

    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match xml_reader
            .read_event_into(&mut buf)
            .map_err(|e| XlsxError::malformed(part, e))?
        {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id");
                let target = attr_value(&e, b"Target");
                let rel_type = attr_value(&e, b"Type");

                // Only worksheet relationships matter here
                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    if rel_type.ends_with("/worksheet") {
                        rels.insert(id, resolve_target(&target));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Targets are relative to `xl/` unless absolute
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

/// Unescaped value of the attribute with this local name
pub(crate) fn attr_value(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Unescaped character data
pub(crate) fn xml_text(part: &str, e: &BytesText) -> XlsxResult<String> {
    e.unescape()
        .map(|text| text.into_owned())
        .map_err(|err| XlsxError::malformed(part, err))
}

/// Decode `_xHHHH_` escape sequences.
///
/// Spreadsheet applications use them for characters XML cannot carry, such as
/// `_x000d_` for CR; `_x005f_` escapes a literal underscore.
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}
