//! # file_parse
//!
//! Demonstrates the file boundary: a data file parsed through
//! `try_parse_path`, plus the "absence is not failure" policy for a path
//! that does not exist. Structured logging goes through `tracing`.
//!
//! Run with:
//! ```sh
//! cargo run --bin file_parse
//! ```

use anyhow::Result;
use linecodec_batch::BatchEngine;
use linecodec_core::{
    ColumnSpec, ConvertError, FieldConvert, FileRecord, OperationResult, ParseOptions,
    RecordSchema,
};
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
struct FullName {
    first: String,
    last: Option<String>,
}

impl FieldConvert for FullName {
    fn convert(raw: &str) -> Result<Self, ConvertError> {
        let mut parts: Vec<&str> = raw.split_whitespace().collect();
        match parts.len() {
            0 | 1 => Ok(Self {
                first: raw.trim().to_string(),
                last: None,
            }),
            _ => {
                let last = parts.pop().map(str::to_string);
                Ok(Self {
                    first: parts.join(" "),
                    last,
                })
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
struct MemberLine {
    index: usize,
    errors: Vec<String>,
    id: u32,
    name: FullName,
    is_member: bool,
}

impl FileRecord for MemberLine {
    fn index(&self) -> usize {
        self.index
    }
    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
    fn errors(&self) -> &[String] {
        &self.errors
    }
    fn push_error(&mut self, error: String) {
        self.errors.push(error);
    }
}

impl RecordSchema for MemberLine {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::generic(0, "Id", |r| &mut r.id),
            ColumnSpec::generic(1, "Name", |r| &mut r.name),
            ColumnSpec::generic(2, "IsMember", |r| &mut r.is_member),
        ]
    }
}

fn data_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("data");
    p.push(name);
    p
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let engine = BatchEngine::with_options(ParseOptions::with_delimiter('|'));
    tracing::info!("parsing member files with '|' delimiter");

    // ── A real file ──────────────────────────────────────────────────────────
    match engine.try_parse_path::<MemberLine>(data_path("members.txt")) {
        OperationResult::Success(report) => {
            println!(
                "✓ members.txt: {} records ({} ok, {} with errors)",
                report.total_records(),
                report.success_count(),
                report.error_count()
            );
            for record in report.parsed_values() {
                if record.has_errors() {
                    println!("  [{}] ERRORS: {:?}", record.index, record.errors());
                } else {
                    println!(
                        "  [{}] #{} {} {} member={}",
                        record.index,
                        record.id,
                        record.name.first,
                        record.name.last.as_deref().unwrap_or(""),
                        record.is_member
                    );
                }
            }
        }
        OperationResult::Failure(errors) => {
            eprintln!("✗ members.txt failed: {errors:?}");
        }
    }

    // ── A missing file: absence is not failure ───────────────────────────────
    match engine.try_parse_path::<MemberLine>(data_path("nowhere.txt")) {
        OperationResult::Success(report) => {
            println!(
                "✓ nowhere.txt: missing file parsed as empty success ({} records)",
                report.total_records()
            );
        }
        OperationResult::Failure(errors) => {
            eprintln!("✗ unexpected failure: {errors:?}");
        }
    }

    // ── The same file through the async task-per-line strategy ──────────────
    let report = engine
        .parse_path_async::<MemberLine>(data_path("members.txt"))
        .await?;
    println!(
        "✓ async parse: {} records, {} with errors (identical to sync)",
        report.total_records(),
        report.error_count()
    );

    Ok(())
}
