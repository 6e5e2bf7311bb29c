//! Batch parse request configuration.

use linecodec_core::options::ParseOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Synchronous scheduling strategy for a batch parse. The async task-per-line
/// model is the third strategy, selected by calling
/// [`BatchEngine::parse_async`] instead.
///
/// [`BatchEngine::parse_async`]: crate::engine::BatchEngine::parse_async
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Map lines one after another on the calling thread.
    #[default]
    Sequential,
    /// Fan line mapping out across the Rayon pool, chunked by `buffer_size`.
    Parallel,
}

/// Cooperative cancellation signal, checked between line-mapping units.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Configuration for one batch parse job.
pub struct ParseRequest {
    /// Raw input lines, still unfiltered (header and blank-line handling is
    /// applied according to the options).
    pub lines: Vec<String>,
    /// Per-call option override; the engine's defaults apply when `None`.
    pub options: Option<ParseOptions>,
    pub strategy: Strategy,
    pub cancel: Option<CancelToken>,
}

impl ParseRequest {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            options: None,
            strategy: Strategy::Sequential,
            cancel: None,
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(Into::into).collect())
    }

    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_uncancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let observer = token.clone();
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn builder_defaults() {
        let request = ParseRequest::from_lines(["a,b"]);
        assert_eq!(request.strategy, Strategy::Sequential);
        assert!(request.options.is_none());
        assert!(request.cancel.is_none());
    }
}
