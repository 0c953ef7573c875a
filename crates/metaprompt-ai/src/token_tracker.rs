//! Token usage tracking for one chat session.

use crate::TokenUsage;

/// Cumulative and most recent token usage of a session.
#[derive(Debug, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    last: Option<TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from one successful API call.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.last = Some(*usage);
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    /// Usage of the latest call; the prompt count grows with the history.
    pub fn last(&self) -> Option<&TokenUsage> {
        self.last.as_ref()
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}
