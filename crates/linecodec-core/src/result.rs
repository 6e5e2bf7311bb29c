//! Batch and operation result envelopes.

use crate::record::FileRecord;

/// Aggregated report over a completed batch: the parsed records in input
/// order plus any batch-scoped errors. Derived, never mutated.
#[derive(Debug, Clone)]
pub struct BatchResult<T> {
    parsed_values: Vec<T>,
    global_errors: Vec<String>,
    error_count: usize,
}

impl<T: FileRecord> BatchResult<T> {
    pub fn new(parsed_values: Vec<T>, global_errors: Vec<String>) -> Self {
        let error_count = parsed_values.iter().filter(|r| r.has_errors()).count();
        Self {
            parsed_values,
            global_errors,
            error_count,
        }
    }

    pub fn parsed_values(&self) -> &[T] {
        &self.parsed_values
    }

    pub fn into_parsed_values(self) -> Vec<T> {
        self.parsed_values
    }

    pub fn global_errors(&self) -> &[String] {
        &self.global_errors
    }

    pub fn total_records(&self) -> usize {
        self.parsed_values.len()
    }

    /// Number of records carrying at least one error, regardless of how many
    /// errors each record holds.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn success_count(&self) -> usize {
        self.total_records() - self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || !self.global_errors.is_empty()
    }

    pub fn successful_records(&self) -> impl Iterator<Item = &T> {
        self.parsed_values.iter().filter(|r| !r.has_errors())
    }

    pub fn failed_records(&self) -> impl Iterator<Item = &T> {
        self.parsed_values.iter().filter(|r| r.has_errors())
    }

    /// Global errors followed by every record error, in record order.
    pub fn all_errors(&self) -> Vec<String> {
        let mut errors = self.global_errors.clone();
        for record in &self.parsed_values {
            errors.extend(record.errors().iter().cloned());
        }
        errors
    }
}

/// Success/failure wrapper for a fallible top-level call.
///
/// A `Success` never carries errors and a `Failure` never carries a value;
/// the tagged representation makes the invariant structural.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult<T> {
    Success(T),
    Failure(Vec<String>),
}

impl<T> OperationResult<T> {
    pub fn success(value: T) -> Self {
        OperationResult::Success(value)
    }

    pub fn failure(error: impl Into<String>) -> Self {
        OperationResult::Failure(vec![error.into()])
    }

    pub fn failure_all(errors: Vec<String>) -> Self {
        OperationResult::Failure(errors)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            OperationResult::Success(value) => Some(value),
            OperationResult::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            OperationResult::Success(value) => Some(value),
            OperationResult::Failure(_) => None,
        }
    }

    /// Failure messages; empty for a success.
    pub fn errors(&self) -> &[String] {
        match self {
            OperationResult::Success(_) => &[],
            OperationResult::Failure(errors) => errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Line {
        index: usize,
        errors: Vec<String>,
    }

    impl FileRecord for Line {
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

    fn line(index: usize, errors: &[&str]) -> Line {
        Line {
            index,
            errors: errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn counts_records_with_errors_not_error_messages() {
        let result = BatchResult::new(
            vec![
                line(0, &[]),
                line(1, &["Error 1"]),
                line(2, &["Error 2", "Error 3"]),
                line(3, &[]),
            ],
            Vec::new(),
        );
        assert_eq!(result.total_records(), 4);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.success_count(), 2);
        assert!(result.has_errors());
    }

    #[test]
    fn global_errors_alone_set_has_errors() {
        let result = BatchResult::new(
            vec![line(0, &[]), line(1, &[])],
            vec!["Global error".to_string()],
        );
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.success_count(), 2);
        assert!(result.has_errors());
    }

    #[test]
    fn no_errors_at_all() {
        let result = BatchResult::new(vec![line(0, &[]), line(1, &[])], Vec::new());
        assert!(!result.has_errors());
    }

    #[test]
    fn empty_batch() {
        let result = BatchResult::<Line>::new(Vec::new(), Vec::new());
        assert_eq!(result.total_records(), 0);
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.success_count(), 0);
        assert!(!result.has_errors());
    }

    #[test]
    fn partitions_successful_and_failed_records() {
        let ok = line(0, &[]);
        let bad = line(1, &["Record error"]);
        let result = BatchResult::new(vec![ok.clone(), bad.clone()], Vec::new());

        let successful: Vec<_> = result.successful_records().collect();
        assert_eq!(successful, vec![&ok]);

        let failed: Vec<_> = result.failed_records().collect();
        assert_eq!(failed, vec![&bad]);
    }

    #[test]
    fn all_errors_combines_global_and_record_errors() {
        let result = BatchResult::new(
            vec![line(0, &["Record error 1", "Record error 2"])],
            vec!["Global error 1".to_string(), "Global error 2".to_string()],
        );
        let all = result.all_errors();
        assert_eq!(all.len(), 4);
        assert!(all.contains(&"Global error 1".to_string()));
        assert!(all.contains(&"Record error 2".to_string()));
    }

    #[test]
    fn operation_result_success_has_no_errors() {
        let result = OperationResult::success(7);
        assert!(result.is_success());
        assert!(!result.is_failure());
        assert_eq!(result.value(), Some(&7));
        assert!(result.errors().is_empty());
    }

    #[test]
    fn operation_result_failure_has_no_value() {
        let result: OperationResult<i32> = OperationResult::failure("boom");
        assert!(result.is_failure());
        assert_eq!(result.value(), None);
        assert_eq!(result.errors(), ["boom".to_string()]);
        assert_eq!(result.into_value(), None);
    }
}
