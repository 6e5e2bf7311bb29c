//! # batch_parse
//!
//! Demonstrates batch parsing of pipe-delimited subscriber lines with the
//! parallel strategy, error containment, and the aggregated report.
//!
//! Run with:
//! ```sh
//! cargo run --bin batch_parse
//! ```

use anyhow::Result;
use linecodec_batch::{BatchEngine, ParseRequest, Strategy};
use linecodec_core::{
    ColumnSpec, ConvertError, CustomField, EnumField, FieldConvert, FileRecord, ParseOptions,
    RecordSchema,
};

// ── 1. The record type and its column declarations ───────────────────────────

#[derive(Debug, Default, Clone)]
struct Code {
    batch: String,
    serial_no: u32,
}

impl CustomField for Code {
    fn parse(raw: &str) -> Result<Self, ConvertError> {
        let invalid = || ConvertError::Other(format!("invalid code format: {raw}"));
        let (batch, serial) = raw.split_once('-').ok_or_else(invalid)?;
        let serial_no = serial.parse().map_err(|_| invalid())?;
        Ok(Self {
            batch: batch.to_string(),
            serial_no,
        })
    }
}

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tier {
    #[default]
    None,
    Paid,
    Free,
}

impl EnumField for Tier {
    fn variants() -> &'static [(&'static str, i64)] {
        &[("None", 0), ("Paid", 1), ("Free", 2)]
    }

    fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Tier::None),
            1 => Some(Tier::Paid),
            2 => Some(Tier::Free),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct SubscriberLine {
    index: usize,
    errors: Vec<String>,
    code: Code,
    name: FullName,
    is_active: bool,
    tier: Tier,
}

impl FileRecord for SubscriberLine {
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

impl RecordSchema for SubscriberLine {
    fn columns() -> Vec<ColumnSpec<Self>> {
        vec![
            ColumnSpec::custom(0, "Code", |r| &mut r.code),
            ColumnSpec::generic(1, "Name", |r| &mut r.name),
            ColumnSpec::generic(2, "IsActive", |r| &mut r.is_active),
            ColumnSpec::enumeration(3, "Tier", |r: &mut Self| &mut r.tier).with_default("None"),
        ]
    }
}

fn main() -> Result<()> {
    // ── 2. A batch of raw lines: 4 good + 2 broken ───────────────────────────
    let lines: Vec<String> = [
        "GB-01|Bob Marley|True|Free",
        "UH-02|John Walsh McKinsey|False|Paid",
        "no delimiters at all",
        "XX-99|Ada Lovelace|True|Gold",
        "GB-07|Grace Hopper|True|2",
        "KL-11|Alan Turing|False|",
    ]
    .iter()
    .map(|l| l.to_string())
    .collect();

    println!("✓ Prepared {} raw lines (4 good + 2 broken)", lines.len());

    // ── 3. Parse with the parallel strategy ──────────────────────────────────
    let engine = BatchEngine::with_options(ParseOptions::with_delimiter('|'));
    let result = engine
        .parse::<SubscriberLine>(ParseRequest::new(lines).strategy(Strategy::Parallel));

    // ── 4. Print the report ──────────────────────────────────────────────────
    println!("\n─── Batch Result ────────────────────────────────────────");
    println!("  total records:  {}", result.total_records());
    println!("  successes:      {}", result.success_count());
    println!("  with errors:    {}", result.error_count());

    println!("\n─── Parsed Records ──────────────────────────────────────");
    for record in result.successful_records() {
        println!(
            "  [{}] {}-{:02} {} {} active={} tier={:?}",
            record.index,
            record.code.batch,
            record.code.serial_no,
            record.name.first,
            record.name.last.as_deref().unwrap_or(""),
            record.is_active,
            record.tier,
        );
    }

    println!("\n─── Errors ──────────────────────────────────────────────");
    for record in record_errors(&result) {
        println!("  {record}");
    }

    println!("\n✓ Batch parse complete");
    Ok(())
}

fn record_errors(result: &linecodec_core::BatchResult<SubscriberLine>) -> Vec<String> {
    result
        .failed_records()
        .flat_map(|r| r.errors().iter().cloned())
        .collect()
}
