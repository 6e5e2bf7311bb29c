//! The line mapper — one raw line in, one record with attached errors out.
//!
//! Per-line state machine: split, validate the segment count, validate the
//! schema match, then convert every field independently. A structural
//! failure stops the line with exactly one error; a field failure is
//! appended and conversion continues with the remaining fields. The mapper
//! never raises — every failure mode is data on the record.

use crate::catalog::MessageCatalog;
use crate::convert::is_blank;
use crate::error::{ConvertError, StructuralError};
use crate::options::ParseOptions;
use crate::record::FileRecord;
use crate::schema::{ColumnSpec, RecordSchema};

/// Split `line` on the configured delimiter, trimming each segment when
/// enabled. Whitespace-only segments trim to empty, never to a missing value.
pub fn split_line<'a>(line: &'a str, options: &ParseOptions) -> Vec<&'a str> {
    line.split(options.delimiter)
        .map(|segment| {
            if options.trim_field_values {
                segment.trim()
            } else {
                segment
            }
        })
        .collect()
}

/// Map one raw line into a record.
///
/// `line_no` is the 0-based position within the filtered batch; the caller
/// assigns the record's index.
pub fn map_line<T: RecordSchema>(
    line: &str,
    line_no: usize,
    columns: &[ColumnSpec<T>],
    options: &ParseOptions,
    catalog: &MessageCatalog,
) -> T {
    let mut record = T::default();

    let segments = split_line(line, options);
    if segments.len() <= 1 {
        record.push_error(catalog.structural(line_no, &StructuralError::NotDelimited));
        return record;
    }

    if columns.is_empty() {
        record.push_error(catalog.structural(
            line_no,
            &StructuralError::NoColumns {
                type_name: std::any::type_name::<T>(),
            },
        ));
        return record;
    }

    if columns.len() != segments.len() {
        record.push_error(catalog.structural(
            line_no,
            &StructuralError::ColumnCountMismatch {
                expected: columns.len(),
                found: segments.len(),
            },
        ));
        return record;
    }

    for column in columns {
        let raw = match segments.get(column.value_index()) {
            Some(segment) => *segment,
            None => {
                record.push_error(catalog.field_failure(
                    line_no,
                    column.name(),
                    &ConvertError::MissingValue {
                        index: column.value_index(),
                    },
                ));
                continue;
            }
        };

        let raw = match column.default_raw() {
            Some(default) if is_blank(raw) => default,
            _ => raw,
        };

        if let Err(error) = column.assign(&mut record, raw) {
            record.push_error(catalog.field_failure(line_no, column.name(), &error));
        }
    }

    record
}
