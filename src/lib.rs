// Library root
// -----------
// This crate builds the Life Design Dashboard and uploads it into a Notion
// workspace. The binary (`main.rs`) wires these modules into a one-shot CLI.
//
// Module responsibilities:
// - `blocks`: Typed content items and their Notion block JSON shape.
// - `template`: Assembles the ordered dashboard body from static data.
// - `api`: Blocking HTTP client for the two Notion calls we need (create
//   page, append children) behind the `DocumentApi` trait.
// - `upload`: Splits a document into per-call slices and drives the
//   create/append sequence, collecting per-slice failures.
// - `config`: Resolves credentials from flags, env, disk or prompts.
// - `ui`: Terminal progress and the final report.
//
// The uploader only talks to `DocumentApi`, so tests can swap the network
// client for a recording fake.
pub mod api;
pub mod blocks;
pub mod config;
pub mod error;
pub mod template;
pub mod ui;
pub mod upload;

pub use api::{Container, DocumentApi, NotionClient};
pub use blocks::ContentItem;
pub use error::{ApiError, ConfigError, UploadError};
pub use template::{build_document, build_document_body, Document};
pub use upload::{BulkUploader, SliceFailure, UploadReport, MAX_ITEMS_PER_CALL};
