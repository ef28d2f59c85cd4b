//! Tunables of the PDF chat page

/// Timing and layout constants of the upload animation and the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfChatConfig {
    /// Period of the simulated progress tick, ms
    pub tick_interval_ms: u32,
    /// Progress shown as soon as an upload starts
    pub initial_progress: f64,
    /// The simulated progress never passes this value before the server answers
    pub progress_ceiling: f64,
    pub min_increment: f64,
    pub max_increment: f64,
    /// Delay after the upload resolves before the progress bar is hidden, ms
    pub settle_delay_ms: u32,
    /// Rendered page width, CSS px
    pub page_width: u32,
}

impl PdfChatConfig {
    /// Map a uniform sample in `[0, 1)` onto the increment range.
    pub fn increment_from_unit(&self, unit: f64) -> f64 {
        let unit = unit.clamp(0.0, 1.0);
        self.min_increment + (self.max_increment - self.min_increment) * unit
    }
}

impl Default for PdfChatConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            initial_progress: 10.0,
            progress_ceiling: 90.0,
            min_increment: 5.0,
            max_increment: 10.0,
            settle_delay_ms: 1000,
            page_width: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_stays_in_range() {
        let cfg = PdfChatConfig::default();
        assert_eq!(cfg.increment_from_unit(0.0), 5.0);
        assert_eq!(cfg.increment_from_unit(0.5), 7.5);
        assert_eq!(cfg.increment_from_unit(1.0), 10.0);
        assert_eq!(cfg.increment_from_unit(-3.0), 5.0);
        assert_eq!(cfg.increment_from_unit(42.0), 10.0);
    }
}
