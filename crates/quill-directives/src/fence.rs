//! Code fence tracking.
//!
//! Directive syntax inside fenced code blocks is literal text, not a
//! directive, so the processor tracks fences line by line.

/// Tracks code fence state during line-by-line processing.
///
/// Fences open with three or more backticks or tildes. The closing fence
/// must use the same character, be at least as long, and carry no info
/// string.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        match self.open {
            Some((ch, len)) => {
                let closes = fence_run(trimmed)
                    .is_some_and(|(c, n)| c == ch && n >= len && trimmed[n..].trim().is_empty());
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = fence_run(trimmed);
                self.open.is_some()
            }
        }
    }
}

/// Fence character and run length at the start of a trimmed line.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}
