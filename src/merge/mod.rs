//! Restore-side merge of parsed records into the stream store.
//!
//! Restore never overwrites: a record whose URL already exists in the store
//! is left alone. Records are merged one at a time with independent
//! outcomes, so one unusable record or one failed insert does not stop the
//! rest of the restore, and there is no rollback.

use log::warn;

use crate::models::StreamRecord;
use crate::storage::RecordStore;

/// Per-record tallies from one merge pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Records inserted into the store.
    pub inserted: usize,
    /// Records skipped because the store already has their URL.
    pub skipped_existing: usize,
    /// Records skipped because they carry no usable URL.
    pub skipped_invalid: usize,
    /// Records whose store lookup or insert failed.
    pub failed: usize,
}

/// Merges records into the store, in order, deduplicating by URL.
///
/// A record without a usable URL cannot be matched against the store and is
/// never inserted; it is counted as invalid rather than silently dropped.
pub async fn merge_records(records: &[StreamRecord], store: &dyn RecordStore) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for record in records {
        let Some(url) = record.url() else {
            warn!("Skipping restored record without a usable url attribute");
            outcome.skipped_invalid += 1;
            continue;
        };

        match store.find_by_url(url).await {
            Ok(Some(_)) => outcome.skipped_existing += 1,
            Ok(None) => match store.insert(record).await {
                Ok(()) => outcome.inserted += 1,
                Err(e) => {
                    warn!("Failed to insert restored record for {url}: {e}");
                    outcome.failed += 1;
                }
            },
            Err(e) => {
                warn!("Failed to look up {url} in the store: {e}");
                outcome.failed += 1;
            }
        }
    }

    outcome
}
