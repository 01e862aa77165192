//! Search input debouncing.

/// Tracks keystrokes so only the last one in a quiet window is sent.
///
/// Each keystroke gets a generation; after the quiet period the caller asks
/// whether its generation is still the newest and, if so, takes the text.
#[derive(Debug, Clone, Default)]
pub struct SearchDebounce {
    generation: u64,
    pending: Option<String>,
}

impl SearchDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keystroke and return its generation.
    pub fn record(&mut self, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.pending = Some(text.into());
        self.generation
    }

    /// Take the pending text if `generation` is still the newest keystroke.
    pub fn settle(&mut self, generation: u64) -> Option<String> {
        if generation == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
