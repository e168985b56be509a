// UI layer: terminal output for an upload run.
// A progress bar tracks items as slices land; the final report lists what
// made it and which ranges did not.

use std::io::Write;
use std::ops::Range;

use indicatif::{ProgressBar, ProgressStyle};

use crate::api::Container;
use crate::template::Document;
use crate::upload::{plan, SliceFailure, UploadProgress, UploadReport};

/// Progress bar over the document's top-level items.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    pub fn new(total_items: usize) -> Self {
        let bar = ProgressBar::new(total_items as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} items {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("creating page...");
        CliProgress { bar }
    }

    /// Remove the bar when the upload ends without a report.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl UploadProgress for CliProgress {
    fn created(&self, container: &Container, head: &Range<usize>) {
        self.bar.inc(head.len() as u64);
        self.bar.set_message(format!("page {}", container.id));
    }

    fn slice_appended(&self, _index: usize, range: &Range<usize>) {
        self.bar.inc(range.len() as u64);
    }

    fn slice_failed(&self, failure: &SliceFailure) {
        self.bar.println(format!(
            "Slice {} (items {}..{}) failed: {}",
            failure.index, failure.range.start, failure.range.end, failure.error
        ));
        self.bar.inc(failure.range.len() as u64);
    }

    fn finished(&self, _report: &UploadReport) {
        self.bar.finish_and_clear();
    }
}

/// Write the human-readable summary of a finished upload.
pub fn write_report(out: &mut impl Write, report: &UploadReport) -> std::io::Result<()> {
    if report.succeeded() {
        writeln!(out, "Template created successfully!")?;
    } else {
        writeln!(out, "Template created with missing content.")?;
    }
    writeln!(out, "Page ID: {}", report.container.id)?;
    writeln!(
        out,
        "Page URL: {}",
        report.container.url.as_deref().unwrap_or("N/A")
    )?;
    writeln!(
        out,
        "Items: {} of {} uploaded, slices: {} of {} succeeded",
        report.items_uploaded(),
        report.items_intended,
        report.slices_succeeded,
        report.slices_total
    )?;
    for failure in &report.failures {
        let status = failure
            .error
            .status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into());
        writeln!(
            out,
            "  failed slice {} items {}..{} status {}: {}",
            failure.index, failure.range.start, failure.range.end, status, failure.error
        )?;
    }
    Ok(())
}

/// Print the calls an upload of `document` would make, as JSON.
pub fn write_dry_run(out: &mut impl Write, document: &Document) -> std::io::Result<()> {
    let plan = plan(&document.title, &document.items);
    serde_json::to_writer_pretty(&mut *out, &plan).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn report(failures: Vec<SliceFailure>) -> UploadReport {
        UploadReport {
            container: Container {
                id: "page-1".into(),
                url: Some("https://www.notion.so/page-1".into()),
            },
            items_intended: 250,
            slices_total: 3,
            slices_succeeded: 3 - failures.len(),
            failures,
        }
    }

    #[test]
    fn clean_report_lists_page_and_counts() {
        let mut out = Vec::new();
        write_report(&mut out, &report(Vec::new())).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Template created successfully!"));
        assert!(text.contains("Page URL: https://www.notion.so/page-1"));
        assert!(text.contains("Items: 250 of 250 uploaded, slices: 3 of 3 succeeded"));
    }

    #[test]
    fn failed_ranges_are_listed_with_status() {
        let mut out = Vec::new();
        let failures = vec![SliceFailure {
            index: 1,
            range: 100..200,
            error: ApiError::Status {
                status: 429,
                code: Some("rate_limited".into()),
                message: "slow down".into(),
            },
        }];
        write_report(&mut out, &report(failures)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Template created with missing content."));
        assert!(text.contains("Items: 150 of 250 uploaded, slices: 2 of 3 succeeded"));
        assert!(text.contains("failed slice 1 items 100..200 status 429: remote returned 429: slow down"));
    }

    #[test]
    fn dry_run_prints_call_layout() {
        let document = crate::template::build_document("Plan");
        let mut out = Vec::new();
        write_dry_run(&mut out, &document).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["title"], "Plan");
        let create = json["create"].as_array().unwrap().len();
        let appended: usize = json["append"]
            .as_array()
            .unwrap()
            .iter()
            .map(|slice| slice.as_array().unwrap().len())
            .sum();
        assert_eq!(create + appended, document.items.len());
    }
}
