//! Backup document parsing.
//!
//! Parses a backup document back into stream records. The document may have
//! been written by an older or newer build, or truncated or corrupted on
//! disk, so the reader is deliberately tolerant: it walks the token stream
//! with a small state machine and keeps every record it managed to fully
//! close before any fault. A corrupted trailing record never discards an
//! otherwise valid backup.
//!
//! The state machine has three states, encoded in two option slots:
//! - outside any record: `current` is `None`
//! - inside a record: `current` is `Some`, `attribute` is `None`
//! - inside an attribute: both are `Some`, text accumulates in `accumulator`

use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::config::RECORD_ELEMENT_TAG_NAME;
use crate::models::StreamRecord;

/// Result of parsing a backup document.
///
/// `fault` carries the description of the tokenizer error or truncation that
/// stopped parsing early, if any; `records` still holds every record that
/// was fully closed before the fault.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    /// Fully parsed records, in document order.
    pub records: Vec<StreamRecord>,
    /// Description of the fault that stopped parsing early, if any.
    pub fault: Option<String>,
}

/// Parses the backup document text into stream records.
///
/// Attribute keys are preserved as-is, whether or not the current schema
/// knows them, so documents written by a newer build restore cleanly.
/// Elements that are neither a record nor an attribute of the current record
/// are ignored; a nested record element (a structural anomaly the format
/// does not define) is skipped wholesale without disturbing the record being
/// accumulated.
pub fn parse_document(text: &str) -> ParseOutcome {
    let mut reader = Reader::from_str(text);
    let mut outcome = ParseOutcome::default();

    let mut current: Option<StreamRecord> = None;
    let mut attribute: Option<String> = None;
    let mut accumulator = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == RECORD_ELEMENT_TAG_NAME {
                    if current.is_none() {
                        current = Some(StreamRecord::new());
                    } else {
                        // A record element inside a record has no meaning in
                        // the backup format. Skip the whole element so the
                        // record being accumulated survives intact.
                        warn!(
                            "Skipping nested <{}> element at byte {}",
                            RECORD_ELEMENT_TAG_NAME,
                            reader.buffer_position()
                        );
                        let end = e.to_end().into_owned();
                        if let Err(err) = reader.read_to_end(end.name()) {
                            outcome.fault = Some(err.to_string());
                            break;
                        }
                    }
                } else if current.is_some() && attribute.is_none() {
                    attribute = Some(name);
                    accumulator.clear();
                }
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == RECORD_ELEMENT_TAG_NAME {
                    if current.is_none() {
                        outcome.records.push(StreamRecord::new());
                    }
                } else if attribute.is_none() {
                    if let Some(record) = current.as_mut() {
                        record.set(name, Some(String::new()));
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if attribute.is_some() {
                    // Tokenizers may deliver text in several chunks; always
                    // append, never replace.
                    match t.unescape() {
                        Ok(chunk) => accumulator.push_str(&chunk),
                        Err(e) => {
                            outcome.fault = Some(e.to_string());
                            break;
                        }
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if attribute.is_some() {
                    accumulator.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok(Event::End(e)) => {
                let qname = e.name();
                let name = String::from_utf8_lossy(qname.as_ref());
                if attribute.as_deref() == Some(name.as_ref()) {
                    let key = attribute.take().unwrap_or_default();
                    if let Some(record) = current.as_mut() {
                        record.set(key, Some(std::mem::take(&mut accumulator)));
                    }
                } else if name == RECORD_ELEMENT_TAG_NAME {
                    if let Some(record) = current.take() {
                        outcome.records.push(record);
                    }
                }
            }
            Ok(Event::Eof) => {
                if current.is_some() || attribute.is_some() {
                    outcome.fault = Some("unexpected end of document".to_string());
                }
                break;
            }
            // Declarations, comments, and processing instructions carry no
            // record data.
            Ok(_) => {}
            Err(e) => {
                outcome.fault = Some(e.to_string());
                break;
            }
        }
    }

    if let Some(fault) = &outcome.fault {
        warn!(
            "Backup document could not be fully parsed ({}); keeping {} record(s)",
            fault,
            outcome.records.len()
        );
    }

    outcome
}
