//! `xl/sharedStrings.xml`

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::{decode_excel_escapes, xml_text};
use crate::error::{XlsxError, XlsxResult};
use crate::parts;
use officepack_core::StringTable;

/// Append every `si` entry to `strings`, in file order.
///
/// Rich-text runs are concatenated and phonetic runs (`rPh`) skipped. Entries
/// are pushed rather than interned so that each one keeps its file position
/// as its id.
pub(crate) fn read_shared_strings(bytes: &[u8], strings: &mut StringTable) -> XlsxResult<()> {
    let part = parts::SHARED_STRINGS;
    let mut xml_reader = Reader::from_reader(bytes);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader
            .read_event_into(&mut buf)
            .map_err(|e| XlsxError::malformed(part, e))?
        {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" if in_si => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                strings.push(String::new());
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(decode_excel_escapes(&current));
                    current.clear();
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Text(e) if in_t => {
                current.push_str(&xml_text(part, &e)?);
            }
            Event::CData(e) if in_t => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("read {} shared strings", strings.len());
    Ok(())
}
