//! Backup document serialization.
//!
//! Turns an ordered sequence of stream records into the portable XML backup
//! document. The document shape is fixed for interop with documents written
//! by earlier builds: a single `backup` root, one `uri` element per record,
//! and one child element per attribute named after the attribute key.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::{BACKUP_ENCODING, RECORD_ELEMENT_TAG_NAME, ROOT_ELEMENT_TAG_NAME};
use crate::error_handling::SerializeError;
use crate::models::StreamRecord;

/// Serializes records into the backup document text.
///
/// Attributes are written in each record's own insertion order, so the same
/// logical content always produces the same document. Attribute values are
/// escaped for markup-special characters (`<`, `>`, `&`); a null value
/// becomes an empty element. Attribute keys are used as element names and
/// must already be valid identifiers, which holds for keys coming from the
/// store's attribute namespace.
///
/// Serialization is all-or-nothing: any writer fault aborts the backup and
/// no partial document is returned.
pub fn write_document(records: &[StreamRecord]) -> Result<String, SerializeError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some(BACKUP_ENCODING),
        Some("yes"),
    )))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT_TAG_NAME)))?;

    for record in records {
        writer.write_event(Event::Start(BytesStart::new(RECORD_ELEMENT_TAG_NAME)))?;

        for (key, value) in record.iter() {
            writer.write_event(Event::Start(BytesStart::new(key)))?;
            writer.write_event(Event::Text(BytesText::new(value.unwrap_or(""))))?;
            writer.write_event(Event::End(BytesEnd::new(key)))?;
        }

        writer.write_event(Event::End(BytesEnd::new(RECORD_ELEMENT_TAG_NAME)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT_TAG_NAME)))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}
