/*!
 * Batch translation processing.
 *
 * Each text runs through its own full pipeline call. Calls run concurrently
 * up to a limit, results come back in input order, and a failed item never
 * prevents the others from completing.
 */

use futures::stream::{self, StreamExt};
use log::{error, info};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use super::core::{TerminologyTranslator, TranslationOutput};

/// Outcome of one batch item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchRecord {
    Translated(TranslationOutput),
    Failed { original: String, error: String },
}

impl BatchRecord {
    pub fn is_failed(&self) -> bool {
        matches!(self, BatchRecord::Failed { .. })
    }

    pub fn original(&self) -> &str {
        match self {
            BatchRecord::Translated(output) => &output.original,
            BatchRecord::Failed { original, .. } => original,
        }
    }
}

/// Batch translator for processing many texts
pub struct BatchTranslator<'a> {
    /// The translator to use for each item
    translator: &'a TerminologyTranslator,

    /// Maximum number of concurrent requests
    max_concurrent_requests: usize,
}

impl<'a> BatchTranslator<'a> {
    /// Create a new batch translator
    pub fn new(translator: &'a TerminologyTranslator, max_concurrent_requests: usize) -> Self {
        Self {
            translator,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Translate every text, returning one record per input in input order
    ///
    /// `progress_callback` receives `(completed, total)` after each item.
    pub async fn translate_all<S: AsRef<str>>(
        &self,
        texts: &[S],
        progress_callback: impl Fn(usize, usize),
    ) -> Vec<BatchRecord> {
        let total = texts.len();
        let completed = AtomicUsize::new(0);
        let start_time = Instant::now();

        let records: Vec<BatchRecord> = stream::iter(texts.iter().enumerate())
            .map(|(index, text)| {
                let text = text.as_ref();
                async move {
                    match self.translator.translate(text).await {
                        Ok(result) => BatchRecord::Translated(result.into()),
                        Err(e) => {
                            error!("Item {} of {} failed: {}", index + 1, total, e);
                            BatchRecord::Failed {
                                original: text.to_string(),
                                error: e.to_string(),
                            }
                        }
                    }
                }
            })
            // Ordered buffering keeps records aligned with the input
            .buffered(self.max_concurrent_requests)
            .inspect(|_| {
                let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress_callback(current, total);
            })
            .collect()
            .await;

        let failed = records.iter().filter(|r| r.is_failed()).count();
        info!(
            "Translated {} of {} items in {:?}",
            total - failed,
            total,
            start_time.elapsed()
        );

        records
    }
}
