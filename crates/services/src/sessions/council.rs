use estude_core::model::COUNCIL_REVEAL_TICKS;

/// What a council-mode tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouncilTick {
    /// Countdown still running; carries the ticks left before auto-reveal.
    Counting(u32),
    /// The countdown just elapsed; the answer is now revealed.
    AutoRevealed,
    /// The answer is already revealed; ticks are ignored until the next card.
    Idle,
}

/// Per-card countdown for timed ("council") sessions.
///
/// Council mode wraps the same session sequence with presentation pacing:
/// if the countdown elapses before the user reveals the answer, the answer
/// is revealed for them. Scheduling state is never touched from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouncilPacer {
    ticks_per_card: u32,
    remaining: u32,
    revealed: bool,
}

impl CouncilPacer {
    /// Pacer with the standard countdown.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ticks(COUNCIL_REVEAL_TICKS)
    }

    /// Pacer with a custom countdown, mostly for tests.
    #[must_use]
    pub fn with_ticks(ticks_per_card: u32) -> Self {
        Self {
            ticks_per_card,
            remaining: ticks_per_card,
            revealed: false,
        }
    }

    /// Ticks left before the current card auto-reveals.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the current card's answer is showing.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Advances the countdown by one tick.
    pub fn tick(&mut self) -> CouncilTick {
        if self.revealed {
            return CouncilTick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.revealed = true;
            CouncilTick::AutoRevealed
        } else {
            CouncilTick::Counting(self.remaining)
        }
    }

    /// The user revealed the answer themselves; the countdown stops.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Re-arms the countdown for the next card.
    pub fn next_card(&mut self) {
        self.remaining = self.ticks_per_card;
        self.revealed = false;
    }
}

impl Default for CouncilPacer {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_runs_down_then_auto_reveals() {
        let mut pacer = CouncilPacer::with_ticks(3);

        assert_eq!(pacer.tick(), CouncilTick::Counting(2));
        assert_eq!(pacer.tick(), CouncilTick::Counting(1));
        assert_eq!(pacer.tick(), CouncilTick::AutoRevealed);
        assert!(pacer.is_revealed());
        assert_eq!(pacer.tick(), CouncilTick::Idle);
    }

    #[test]
    fn manual_reveal_stops_the_countdown() {
        let mut pacer = CouncilPacer::with_ticks(30);
        pacer.tick();
        pacer.reveal();

        assert!(pacer.is_revealed());
        assert_eq!(pacer.tick(), CouncilTick::Idle);
    }

    #[test]
    fn next_card_rearms_the_full_countdown() {
        let mut pacer = CouncilPacer::with_ticks(2);
        pacer.tick();
        pacer.tick();
        assert!(pacer.is_revealed());

        pacer.next_card();
        assert!(!pacer.is_revealed());
        assert_eq!(pacer.remaining(), 2);
        assert_eq!(pacer.tick(), CouncilTick::Counting(1));
    }

    #[test]
    fn default_pacer_uses_the_standard_countdown() {
        let pacer = CouncilPacer::new();
        assert_eq!(pacer.remaining(), COUNCIL_REVEAL_TICKS);
    }
}
