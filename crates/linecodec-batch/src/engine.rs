//! `BatchEngine` — orchestrates batch line mapping across scheduling
//! strategies.
//!
//! Output position `i` always holds the mapping of filtered input line `i`,
//! regardless of strategy: the sequential path appends in order, the Rayon
//! path collects an indexed parallel iterator into pre-assigned slots, and
//! the async path joins spawned tasks in spawn order. Only the one-time
//! schema build is shared state; each line-mapping unit owns its slot
//! exclusively, so the result needs no locking.

use crate::request::{CancelToken, ParseRequest, Strategy};
use crate::source;
use linecodec_core::{
    catalog::MessageCatalog,
    error::ParseError,
    mapper,
    options::ParseOptions,
    record::FileRecord,
    result::{BatchResult, OperationResult},
    schema::{self, ColumnSpec, RecordSchema},
};
use rayon::prelude::*;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Batch parse engine. Holds the default options and message catalog;
/// individual requests may override the options per call.
pub struct BatchEngine {
    options: ParseOptions,
    catalog: Arc<MessageCatalog>,
}

impl BatchEngine {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            catalog: Arc::new(MessageCatalog::default()),
        }
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Execute a parse request with the strategy it selects.
    ///
    /// Never fails: malformed content surfaces as errors attached to the
    /// affected records, and batch-scoped conditions (early termination,
    /// cancellation) as global errors on the result.
    pub fn parse<T: RecordSchema + Send>(&self, request: ParseRequest) -> BatchResult<T> {
        let options = request.options.unwrap_or_else(|| self.options.clone());
        let lines = source::prepare_lines(request.lines, &options);
        let columns = schema::resolve::<T>();

        info!(
            "BatchEngine: parsing {} lines (strategy={:?}, chunk_size={})",
            lines.len(),
            request.strategy,
            options.buffer_size
        );

        let result = match request.strategy {
            Strategy::Sequential => {
                self.run_sequential(&lines, &options, &columns, request.cancel.as_ref())
            }
            Strategy::Parallel => {
                self.run_parallel(&lines, &options, &columns, request.cancel.as_ref())
            }
        };

        info!(
            "BatchEngine: complete — {} records, {} with errors",
            result.total_records(),
            result.error_count()
        );
        result
    }

    /// Parse pre-read lines sequentially with the engine's options.
    pub fn parse_lines<T: RecordSchema + Send>(&self, lines: Vec<String>) -> BatchResult<T> {
        self.parse(ParseRequest::new(lines))
    }

    /// Execute a parse request as one Tokio task per line, in windows of
    /// `buffer_size` concurrently scheduled tasks. Suspension happens only
    /// around the per-line mapping work; results are joined in input order.
    pub async fn parse_async<T>(&self, request: ParseRequest) -> BatchResult<T>
    where
        T: RecordSchema + Send + 'static,
    {
        let options = request.options.unwrap_or_else(|| self.options.clone());
        let lines = source::prepare_lines(request.lines, &options);
        let columns = schema::resolve::<T>();
        let total = lines.len();
        let chunk_size = options.buffer_size.max(1);
        let options = Arc::new(options);
        let catalog = Arc::clone(&self.catalog);

        info!(
            "BatchEngine: parsing {} lines (strategy=Async, chunk_size={})",
            total, chunk_size
        );

        let mut records: Vec<T> = Vec::with_capacity(total);
        let mut with_errors = 0usize;
        let mut global_errors = Vec::new();
        let mut remaining = lines.into_iter();
        let mut offset = 0usize;

        while offset < total {
            if let Some(message) =
                self.stop_notice(request.cancel.as_ref(), &options, with_errors, total - offset)
            {
                global_errors.push(message);
                break;
            }

            let window: Vec<String> = remaining.by_ref().take(chunk_size).collect();
            let mut handles = Vec::with_capacity(window.len());
            for (i, line) in window.into_iter().enumerate() {
                let line_no = offset + i;
                let columns = Arc::clone(&columns);
                let options = Arc::clone(&options);
                let catalog = Arc::clone(&catalog);
                handles.push((
                    line_no,
                    tokio::spawn(async move {
                        let mut record =
                            mapper::map_line::<T>(&line, line_no, &columns, &options, &catalog);
                        record.set_index(line_no);
                        record
                    }),
                ));
            }

            for (line_no, handle) in handles {
                let record = match handle.await {
                    Ok(record) => record,
                    Err(join_error) => {
                        // A panicked mapping task still yields its slot.
                        let mut record = T::default();
                        record.set_index(line_no);
                        record.push_error(format!("line mapping task failed: {join_error}"));
                        record
                    }
                };
                if record.has_errors() {
                    with_errors += 1;
                }
                records.push(record);
            }
            offset = records.len();
        }

        fill_missing(&mut records, total);
        let result = BatchResult::new(records, global_errors);
        info!(
            "BatchEngine: complete — {} records, {} with errors",
            result.total_records(),
            result.error_count()
        );
        result
    }

    /// Parse the lines of a text file, sequentially, with the engine's
    /// options. A missing path is absence, not failure, and yields an empty
    /// result; read failures propagate.
    pub fn parse_path<T: RecordSchema + Send>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<BatchResult<T>, ParseError> {
        let lines = source::read_path(path.as_ref())?;
        Ok(self.parse(ParseRequest::new(lines)))
    }

    /// Parse every line from a buffered reader.
    pub fn parse_reader<T: RecordSchema + Send, R: BufRead>(
        &self,
        reader: R,
    ) -> Result<BatchResult<T>, ParseError> {
        let lines = source::read_lines(reader)?;
        Ok(self.parse(ParseRequest::new(lines)))
    }

    /// File parse wrapped in an [`OperationResult`]: collaborator failures
    /// (I/O, decoding) become `Failure`; everything else, including a batch
    /// full of malformed lines, is a `Success` carrying the report.
    pub fn try_parse_path<T: RecordSchema + Send>(
        &self,
        path: impl AsRef<Path>,
    ) -> OperationResult<BatchResult<T>> {
        match self.parse_path(path) {
            Ok(result) => OperationResult::success(result),
            Err(error) => OperationResult::failure(error.to_string()),
        }
    }

    /// Reader parse wrapped in an [`OperationResult`].
    pub fn try_parse_reader<T: RecordSchema + Send, R: BufRead>(
        &self,
        reader: R,
    ) -> OperationResult<BatchResult<T>> {
        match self.parse_reader(reader) {
            Ok(result) => OperationResult::success(result),
            Err(error) => OperationResult::failure(error.to_string()),
        }
    }

    /// Async file parse; the file is read with Tokio and mapped with the
    /// task-per-line strategy. A missing path yields an empty result.
    pub async fn parse_path_async<T>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<BatchResult<T>, ParseError>
    where
        T: RecordSchema + Send + 'static,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(BatchResult::new(Vec::new(), Vec::new()));
        }
        let content = tokio::fs::read_to_string(path).await?;
        let lines = source::split_text(&content);
        Ok(self.parse_async(ParseRequest::new(lines)).await)
    }

    /// Async file parse wrapped in an [`OperationResult`].
    pub async fn try_parse_path_async<T>(
        &self,
        path: impl AsRef<Path>,
    ) -> OperationResult<BatchResult<T>>
    where
        T: RecordSchema + Send + 'static,
    {
        match self.parse_path_async(path).await {
            Ok(result) => OperationResult::success(result),
            Err(error) => OperationResult::failure(error.to_string()),
        }
    }

    fn run_sequential<T: RecordSchema>(
        &self,
        lines: &[String],
        options: &ParseOptions,
        columns: &[ColumnSpec<T>],
        cancel: Option<&CancelToken>,
    ) -> BatchResult<T> {
        let total = lines.len();
        let mut records: Vec<T> = Vec::with_capacity(total);
        let mut with_errors = 0usize;
        let mut global_errors = Vec::new();

        for (line_no, line) in lines.iter().enumerate() {
            if let Some(message) = self.stop_notice(cancel, options, with_errors, total - line_no)
            {
                global_errors.push(message);
                break;
            }
            let mut record = mapper::map_line::<T>(line, line_no, columns, options, &self.catalog);
            record.set_index(line_no);
            if record.has_errors() {
                with_errors += 1;
            }
            records.push(record);
        }

        fill_missing(&mut records, total);
        BatchResult::new(records, global_errors)
    }

    fn run_parallel<T: RecordSchema + Send>(
        &self,
        lines: &[String],
        options: &ParseOptions,
        columns: &[ColumnSpec<T>],
        cancel: Option<&CancelToken>,
    ) -> BatchResult<T> {
        let total = lines.len();
        let chunk_size = options.buffer_size.max(1);
        let mut records: Vec<T> = Vec::with_capacity(total);
        let mut with_errors = 0usize;
        let mut global_errors = Vec::new();
        let mut offset = 0usize;

        for chunk in lines.chunks(chunk_size) {
            if let Some(message) = self.stop_notice(cancel, options, with_errors, total - offset) {
                global_errors.push(message);
                break;
            }

            // Indexed parallel collect writes each record into its
            // pre-assigned slot; no lock on the result.
            let mut mapped: Vec<T> = chunk
                .par_iter()
                .enumerate()
                .map(|(i, line)| {
                    let line_no = offset + i;
                    let mut record =
                        mapper::map_line::<T>(line, line_no, columns, options, &self.catalog);
                    record.set_index(line_no);
                    record
                })
                .collect();

            with_errors += mapped.iter().filter(|r| r.has_errors()).count();
            records.append(&mut mapped);
            offset += chunk.len();
        }

        fill_missing(&mut records, total);
        BatchResult::new(records, global_errors)
    }

    /// Returns the global-error message when scheduling must stop, checking
    /// cancellation first, then the `max_errors` threshold.
    fn stop_notice(
        &self,
        cancel: Option<&CancelToken>,
        options: &ParseOptions,
        with_errors: usize,
        unprocessed: usize,
    ) -> Option<String> {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                warn!("BatchEngine: cancelled with {} lines unprocessed", unprocessed);
                return Some(self.catalog.cancelled(unprocessed));
            }
        }
        if let Some(max) = options.max_errors {
            if with_errors >= max {
                warn!(
                    "BatchEngine: error threshold {} reached, {} lines unprocessed",
                    max, unprocessed
                );
                return Some(self.catalog.max_errors_reached(max, unprocessed));
            }
        }
        None
    }
}

impl Default for BatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Unprocessed slots stay default-constructed with only their index set.
fn fill_missing<T: FileRecord>(records: &mut Vec<T>, total: usize) {
    for index in records.len()..total {
        let mut record = T::default();
        record.set_index(index);
        records.push(record);
    }
}
