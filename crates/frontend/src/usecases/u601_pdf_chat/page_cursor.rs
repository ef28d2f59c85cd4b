//! Page cursor of the document viewer

/// Current page (1-based) and the total page count once the renderer has
/// parsed the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: u32,
    total: Option<u32>,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            current: 1,
            total: None,
        }
    }
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> Option<u32> {
        self.total
    }

    /// Forget the page count, back to page 1. Used when a new document is selected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record the page count reported by the renderer. A count of zero is
    /// treated as unknown.
    pub fn set_total(&mut self, total: u32) {
        self.total = (total > 0).then_some(total);
        self.current = self.current.clamp(1, self.total.unwrap_or(1));
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 1
    }

    /// Forward navigation stays disabled until the page count is known.
    pub fn can_go_next(&self) -> bool {
        self.total.is_some_and(|total| self.current < total)
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    pub fn next(&mut self) {
        if let Some(total) = self.total {
            self.current = (self.current + 1).min(total);
        }
    }

    pub fn label(&self) -> String {
        match self.total {
            Some(total) => format!("Page {} of {}", self.current, total),
            None => format!("Page {} of …", self.current),
        }
    }
}
