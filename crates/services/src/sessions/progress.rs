/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Completion percentage for the progress bar, 0–100.
    ///
    /// An empty session counts as fully complete.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.answered as f64 / self.total as f64 * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_saturates() {
        let view = SessionProgress {
            total: 3,
            answered: 1,
            remaining: 2,
            is_complete: false,
        };
        assert_eq!(view.percent(), 33);

        let done = SessionProgress {
            total: 3,
            answered: 3,
            remaining: 0,
            is_complete: true,
        };
        assert_eq!(done.percent(), 100);

        let empty = SessionProgress {
            total: 0,
            answered: 0,
            remaining: 0,
            is_complete: true,
        };
        assert_eq!(empty.percent(), 100);
    }
}
