// Bulk upload of an ordered item sequence into a single remote page.
//
// Every create/append call accepts at most `MAX_ITEMS_PER_CALL` items, so
// the sequence is cut into consecutive slices: the head slice seeds the page
// on creation and each tail slice is appended in order.
//
// Failure policy:
// - create fails: the job stops, no page exists, `UploadError::CreateFailed`.
// - an append fails: the failure is recorded with its item range and the
//   next slice is still sent.
//
// Calls are strictly sequential. The page id from the create call is needed
// by every append, and append order is the reading order.

use std::ops::Range;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::api::{Container, DocumentApi};
use crate::blocks::ContentItem;
use crate::error::{ApiError, UploadError};
use crate::template::Document;

/// Per-call item cap of the document API.
pub const MAX_ITEMS_PER_CALL: usize = 100;

/// Order-preserving split of `0..len` into windows of at most `cap` items.
///
/// The first range is the head slice and is always present, even when empty.
/// Concatenating the ranges reproduces `0..len`.
pub fn slice_ranges(len: usize, cap: usize) -> Vec<Range<usize>> {
    assert!(cap > 0, "slice cap must be positive");
    let head_end = len.min(cap);
    let mut ranges = vec![0..head_end];
    let mut start = head_end;
    while start < len {
        let end = (start + cap).min(len);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// The calls an upload would make, without making them.
#[derive(Debug, Serialize)]
pub struct UploadPlan<'a> {
    pub title: &'a str,
    /// Items sent with the create call.
    pub create: &'a [ContentItem],
    /// Items sent with each append call, in call order.
    pub append: Vec<&'a [ContentItem]>,
}

/// Lay out the create and append calls for `items` under `title`.
pub fn plan<'a>(title: &'a str, items: &'a [ContentItem]) -> UploadPlan<'a> {
    let ranges = slice_ranges(items.len(), MAX_ITEMS_PER_CALL);
    UploadPlan {
        title,
        create: &items[ranges[0].clone()],
        append: ranges[1..].iter().map(|r| &items[r.clone()]).collect(),
    }
}

/// An append slice that did not make it into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceFailure {
    /// Position of the slice among all slices; the head slice is 0.
    pub index: usize,
    /// Item positions covered by the slice.
    pub range: Range<usize>,
    pub error: ApiError,
}

/// Outcome of a job whose create call succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub container: Container,
    /// Number of top-level items the caller asked to upload.
    pub items_intended: usize,
    /// Head slice included.
    pub slices_total: usize,
    pub slices_succeeded: usize,
    /// Failed append slices in document order.
    pub failures: Vec<SliceFailure>,
}

impl UploadReport {
    /// True only when the create call and every append call succeeded.
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Items known to be on the page.
    pub fn items_uploaded(&self) -> usize {
        let lost: usize = self.failures.iter().map(|f| f.range.len()).sum();
        self.items_intended - lost
    }
}

/// Callbacks fired as the upload moves through its slices.
pub trait UploadProgress {
    /// The page exists and holds the head slice.
    fn created(&self, container: &Container, head: &Range<usize>);
    /// An append slice was accepted.
    fn slice_appended(&self, index: usize, range: &Range<usize>);
    /// An append slice was rejected; the upload carries on.
    fn slice_failed(&self, failure: &SliceFailure);
    fn finished(&self, report: &UploadReport);
}

/// No-op progress for headless and test use.
pub struct SilentProgress;

impl UploadProgress for SilentProgress {
    fn created(&self, _container: &Container, _head: &Range<usize>) {}
    fn slice_appended(&self, _index: usize, _range: &Range<usize>) {}
    fn slice_failed(&self, _failure: &SliceFailure) {}
    fn finished(&self, _report: &UploadReport) {}
}

/// Drives the create-then-append sequence against a [`DocumentApi`].
pub struct BulkUploader<A> {
    api: A,
}

impl<A: DocumentApi> BulkUploader<A> {
    pub fn new(api: A) -> Self {
        BulkUploader { api }
    }

    /// Upload `items` under a new page titled `title`.
    pub fn upload(&self, title: &str, items: &[ContentItem]) -> Result<UploadReport, UploadError> {
        self.upload_with_progress(title, items, &SilentProgress)
    }

    /// Upload a whole assembled document.
    pub fn upload_document(
        &self,
        document: &Document,
        progress: &dyn UploadProgress,
    ) -> Result<UploadReport, UploadError> {
        self.upload_with_progress(&document.title, &document.items, progress)
    }

    #[instrument(skip_all, fields(title = %title, items = items.len()))]
    pub fn upload_with_progress(
        &self,
        title: &str,
        items: &[ContentItem],
        progress: &dyn UploadProgress,
    ) -> Result<UploadReport, UploadError> {
        if title.trim().is_empty() {
            return Err(UploadError::EmptyTitle);
        }

        let ranges = slice_ranges(items.len(), MAX_ITEMS_PER_CALL);
        let (head, tail) = (&ranges[0], &ranges[1..]);
        info!(slices = ranges.len(), "starting upload");

        let container = self
            .api
            .create_container(title, &items[head.clone()])
            .map_err(|source| {
                warn!(error = %source, "create call failed, aborting");
                UploadError::CreateFailed { source }
            })?;
        info!(page_id = %container.id, head = head.len(), "page created");
        progress.created(&container, head);

        let mut failures = Vec::new();
        for (offset, range) in tail.iter().enumerate() {
            let index = offset + 1;
            match self.api.append_items(&container.id, &items[range.clone()]) {
                Ok(()) => {
                    info!(index, start = range.start, end = range.end, "slice appended");
                    progress.slice_appended(index, range);
                }
                Err(error) => {
                    warn!(index, start = range.start, end = range.end, %error, "slice failed, continuing");
                    let failure = SliceFailure {
                        index,
                        range: range.clone(),
                        error,
                    };
                    progress.slice_failed(&failure);
                    failures.push(failure);
                }
            }
        }

        let report = UploadReport {
            container,
            items_intended: items.len(),
            slices_total: ranges.len(),
            slices_succeeded: ranges.len() - failures.len(),
            failures,
        };
        info!(
            succeeded = report.succeeded(),
            slices_succeeded = report.slices_succeeded,
            slices_total = report.slices_total,
            "upload finished"
        );
        progress.finished(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens(ranges: &[Range<usize>]) -> Vec<usize> {
        ranges.iter().map(|r| r.len()).collect()
    }

    #[test]
    fn empty_sequence_still_has_a_head_slice() {
        assert_eq!(slice_ranges(0, 100), vec![0..0]);
    }

    #[test]
    fn exactly_one_cap_has_no_tail() {
        assert_eq!(slice_ranges(100, 100), vec![0..100]);
        assert_eq!(slice_ranges(37, 100), vec![0..37]);
    }

    #[test]
    fn remainder_lands_in_a_short_last_slice() {
        assert_eq!(lens(&slice_ranges(250, 100)), vec![100, 100, 50]);
        assert_eq!(lens(&slice_ranges(101, 100)), vec![100, 1]);
        assert_eq!(lens(&slice_ranges(300, 100)), vec![100, 100, 100]);
    }

    #[test]
    fn ranges_are_contiguous_and_cover_everything() {
        for len in [0, 1, 99, 100, 101, 199, 200, 201, 1234] {
            let ranges = slice_ranges(len, 100);
            let mut next = 0;
            for r in &ranges {
                assert_eq!(r.start, next);
                assert!(r.len() <= 100);
                next = r.end;
            }
            assert_eq!(next, len);
            let appends = ranges.len() - 1;
            assert_eq!(appends, len.saturating_sub(100).div_ceil(100));
        }
    }

    #[test]
    #[should_panic(expected = "slice cap must be positive")]
    fn zero_cap_is_a_programming_error() {
        slice_ranges(10, 0);
    }

    #[test]
    fn plan_mirrors_the_calls_an_upload_makes() {
        let items: Vec<_> = (0..250).map(|i| crate::blocks::paragraph(i.to_string())).collect();
        let plan = plan("Dashboard", &items);
        assert_eq!(plan.create.len(), 100);
        assert_eq!(plan.append.iter().map(|s| s.len()).collect::<Vec<_>>(), vec![100, 50]);
        assert_eq!(plan.append[1][0], items[200]);

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["title"], "Dashboard");
        assert_eq!(json["append"][1].as_array().unwrap().len(), 50);
    }

    #[test]
    fn report_counts_lost_items() {
        let report = UploadReport {
            container: Container {
                id: "p".into(),
                url: None,
            },
            items_intended: 250,
            slices_total: 3,
            slices_succeeded: 2,
            failures: vec![SliceFailure {
                index: 1,
                range: 100..200,
                error: ApiError::Transport("reset".into()),
            }],
        };
        assert!(!report.succeeded());
        assert_eq!(report.items_uploaded(), 150);
    }
}
