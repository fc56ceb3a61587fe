//! In-place batch driver for segment translation.
//!
//! [`translate_segments`] partitions the ordered segment list into
//! contiguous batches, issues one remote call per batch, and applies the
//! results. It never returns an error: every failure is absorbed at the
//! batch boundary with a verbatim-text fallback, so the caller always gets
//! a list in which every segment is speakable.
//!
//! Each segment belongs to exactly one batch (`chunks_mut` on the ordered
//! list), so no two batches ever write the same segment's `translation`.

use std::collections::HashMap;

use crate::cancel::CancelToken;
use crate::segment::Segment;

use super::client::{BatchItem, Translator};

// ---------------------------------------------------------------------------
// TranslateReport
// ---------------------------------------------------------------------------

/// Outcome of a translation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateReport {
    /// Number of batches the list was partitioned into.
    pub batches_total: usize,
    /// Batches whose remote call succeeded.
    pub batches_completed: usize,
    /// Batches that failed and fell back wholesale.
    pub batches_failed: usize,
    /// Segments that received the verbatim-text fallback.
    pub fallback_segments: usize,
    /// `true` when the run stopped early on a cancellation request.
    /// Finished batches keep their translations; unfinished segments stay
    /// untranslated.
    pub cancelled: bool,
}

// ---------------------------------------------------------------------------
// Batch driver
// ---------------------------------------------------------------------------

/// Translate `segments` in place.
///
/// Segments that already carry a non-empty translation are left alone and
/// not re-sent — running the batcher twice is a no-op for them. Everything
/// else either gets a genuine translation or, as last resort, a verbatim
/// copy of its source text.
pub async fn translate_segments(
    segments: &mut [Segment],
    translator: &dyn Translator,
    batch_size: usize,
    cancel: &CancelToken,
) -> TranslateReport {
    let batch_size = batch_size.max(1);
    let mut report = TranslateReport {
        batches_total: segments.len().div_ceil(batch_size),
        ..TranslateReport::default()
    };

    for (batch_index, batch) in segments.chunks_mut(batch_size).enumerate() {
        if cancel.is_cancelled() {
            log::info!(
                "translation cancelled after {}/{} batches",
                batch_index,
                report.batches_total
            );
            report.cancelled = true;
            break;
        }

        let items: Vec<BatchItem> = batch
            .iter()
            .filter(|seg| !seg.has_translation())
            .map(|seg| BatchItem {
                id: seg.id,
                english: seg.text.clone(),
            })
            .collect();

        if items.is_empty() {
            report.batches_completed += 1;
            continue;
        }

        match translator.translate_batch(&items).await {
            Ok(map) => {
                apply_batch(batch, &map, &mut report);
                report.batches_completed += 1;
            }
            Err(e) => {
                log::warn!("translation batch {} failed: {e} — falling back", batch_index);
                report.batches_failed += 1;
                for seg in batch.iter_mut() {
                    apply_fallback(seg, &mut report);
                }
            }
        }
    }

    report
}

/// Assign translations from `map`; ids the reply dropped fall back verbatim.
fn apply_batch(batch: &mut [Segment], map: &HashMap<i64, String>, report: &mut TranslateReport) {
    for seg in batch.iter_mut() {
        if seg.has_translation() {
            continue;
        }
        match map.get(&seg.id) {
            Some(translation) => seg.translation = Some(translation.clone()),
            None => apply_fallback(seg, report),
        }
    }
}

/// Verbatim-copy fallback. Never overwrites an existing translation.
fn apply_fallback(seg: &mut Segment, report: &mut TranslateReport) {
    if seg.has_translation() {
        return;
    }
    seg.translation = Some(seg.text.clone());
    report.fallback_segments += 1;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::TranslateError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Translates every requested id to `"vi:<english>"` and counts calls.
    struct EchoTranslator {
        calls: Arc<AtomicUsize>,
    }

    impl EchoTranslator {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate_batch(
            &self,
            batch: &[BatchItem],
        ) -> Result<HashMap<i64, String>, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(batch
                .iter()
                .map(|item| (item.id, format!("vi:{}", item.english)))
                .collect())
        }
    }

    /// Always fails with a transport error.
    struct FailTranslator;

    #[async_trait]
    impl Translator for FailTranslator {
        async fn translate_batch(
            &self,
            _batch: &[BatchItem],
        ) -> Result<HashMap<i64, String>, TranslateError> {
            Err(TranslateError::Request("connection refused".into()))
        }
    }

    /// Fails on the first call, then behaves like `EchoTranslator`.
    struct FailFirstTranslator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Translator for FailFirstTranslator {
        async fn translate_batch(
            &self,
            batch: &[BatchItem],
        ) -> Result<HashMap<i64, String>, TranslateError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(TranslateError::Timeout);
            }
            Ok(batch
                .iter()
                .map(|item| (item.id, format!("vi:{}", item.english)))
                .collect())
        }
    }

    /// Drops the requested ids from its reply (translates nothing).
    struct AmnesiacTranslator;

    #[async_trait]
    impl Translator for AmnesiacTranslator {
        async fn translate_batch(
            &self,
            _batch: &[BatchItem],
        ) -> Result<HashMap<i64, String>, TranslateError> {
            let mut map = HashMap::new();
            map.insert(-999, "không ai hỏi".to_string());
            Ok(map)
        }
    }

    /// Requests cancellation from inside its first call.
    struct CancellingTranslator {
        token: CancelToken,
    }

    #[async_trait]
    impl Translator for CancellingTranslator {
        async fn translate_batch(
            &self,
            batch: &[BatchItem],
        ) -> Result<HashMap<i64, String>, TranslateError> {
            self.token.cancel();
            Ok(batch
                .iter()
                .map(|item| (item.id, format!("vi:{}", item.english)))
                .collect())
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn make_segments(n: usize) -> Vec<Segment> {
        (0..n)
            .map(|i| Segment {
                id: i as i64 + 1,
                start: i as f64,
                end: i as f64 + 1.0,
                text: format!("line {}", i + 1),
                translation: None,
                audio_path: None,
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn every_segment_ends_up_translated() {
        let mut segments = make_segments(5);
        let (translator, _) = EchoTranslator::new();
        let report =
            translate_segments(&mut segments, &translator, 2, &CancelToken::new()).await;

        assert_eq!(report.batches_total, 3);
        assert_eq!(report.batches_completed, 3);
        assert_eq!(report.fallback_segments, 0);
        for seg in &segments {
            assert_eq!(seg.translation.as_deref(), Some(&*format!("vi:{}", seg.text)));
        }
    }

    #[tokio::test]
    async fn total_failure_falls_back_to_verbatim_text() {
        let mut segments = make_segments(4);
        let report =
            translate_segments(&mut segments, &FailTranslator, 2, &CancelToken::new()).await;

        assert_eq!(report.batches_failed, 2);
        assert_eq!(report.fallback_segments, 4);
        for seg in &segments {
            assert_eq!(seg.translation.as_deref(), Some(seg.text.as_str()));
        }
    }

    #[tokio::test]
    async fn one_failed_batch_does_not_abort_the_run() {
        let mut segments = make_segments(4);
        let translator = FailFirstTranslator {
            calls: AtomicUsize::new(0),
        };
        let report =
            translate_segments(&mut segments, &translator, 2, &CancelToken::new()).await;

        assert_eq!(report.batches_failed, 1);
        assert_eq!(report.batches_completed, 1);
        // First batch fell back verbatim, second got genuine translations.
        assert_eq!(segments[0].translation.as_deref(), Some("line 1"));
        assert_eq!(segments[1].translation.as_deref(), Some("line 2"));
        assert_eq!(segments[2].translation.as_deref(), Some("vi:line 3"));
        assert_eq!(segments[3].translation.as_deref(), Some("vi:line 4"));
    }

    #[tokio::test]
    async fn ids_missing_from_reply_fall_back() {
        let mut segments = make_segments(3);
        let report =
            translate_segments(&mut segments, &AmnesiacTranslator, 10, &CancelToken::new())
                .await;

        assert_eq!(report.fallback_segments, 3);
        for seg in &segments {
            assert_eq!(seg.translation.as_deref(), Some(seg.text.as_str()));
        }
    }

    #[tokio::test]
    async fn existing_translation_is_never_overwritten_by_fallback() {
        let mut segments = make_segments(2);
        segments[0].translation = Some("đã dịch rồi".into());

        translate_segments(&mut segments, &FailTranslator, 10, &CancelToken::new()).await;

        assert_eq!(segments[0].translation.as_deref(), Some("đã dịch rồi"));
        assert_eq!(segments[1].translation.as_deref(), Some("line 2"));
    }

    #[tokio::test]
    async fn second_run_is_a_no_op_for_translated_segments() {
        let mut segments = make_segments(3);
        let (translator, calls) = EchoTranslator::new();

        translate_segments(&mut segments, &translator, 10, &CancelToken::new()).await;
        let first_pass = segments.clone();
        let calls_after_first = calls.load(Ordering::SeqCst);

        let report =
            translate_segments(&mut segments, &translator, 10, &CancelToken::new()).await;

        assert_eq!(calls.load(Ordering::SeqCst), calls_after_first);
        assert_eq!(report.batches_completed, 1);
        for (before, after) in first_pass.iter().zip(&segments) {
            assert_eq!(before.translation, after.translation);
        }
    }

    #[tokio::test]
    async fn cancellation_leaves_later_batches_untouched() {
        let mut segments = make_segments(3);
        let token = CancelToken::new();
        let translator = CancellingTranslator {
            token: token.clone(),
        };

        let report = translate_segments(&mut segments, &translator, 1, &token).await;

        assert!(report.cancelled);
        assert_eq!(report.batches_completed, 1);
        // First batch finished before the cancel took effect.
        assert_eq!(segments[0].translation.as_deref(), Some("vi:line 1"));
        assert!(segments[1].translation.is_none());
        assert!(segments[2].translation.is_none());
    }

    #[tokio::test]
    async fn empty_list_reports_zero_batches() {
        let mut segments: Vec<Segment> = Vec::new();
        let (translator, _) = EchoTranslator::new();
        let report =
            translate_segments(&mut segments, &translator, 20, &CancelToken::new()).await;

        assert_eq!(report, TranslateReport::default());
    }
}
