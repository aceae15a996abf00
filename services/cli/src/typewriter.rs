use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const TYPE_DELAY: Duration = Duration::from_millis(120);
const DELETE_DELAY: Duration = Duration::from_millis(40);
const HOLD_DELAY: Duration = Duration::from_millis(2_500);

/// Phrases cycled by the session banner.
pub(crate) const BANNER_PHRASES: [&str; 2] = ["Your Dream.", "Our Concern."];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypewriterPhase {
    Typing,
    Holding,
    Deleting,
}

/// Decorative headline effect: types a phrase character by character, holds
/// it, deletes it, then moves on to the next phrase. Self-contained and
/// timer-driven; it knows nothing about the session core.
#[derive(Debug)]
pub(crate) struct Typewriter {
    phrases: Vec<String>,
    index: usize,
    visible: usize,
    phase: TypewriterPhase,
}

impl Typewriter {
    pub(crate) fn new(phrases: Vec<String>) -> Self {
        assert!(!phrases.is_empty(), "typewriter needs at least one phrase");
        Self {
            phrases,
            index: 0,
            visible: 0,
            phase: TypewriterPhase::Typing,
        }
    }

    pub(crate) fn text(&self) -> String {
        self.phrases[self.index].chars().take(self.visible).collect()
    }

    pub(crate) fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Advances one frame and returns the delay before the next one.
    pub(crate) fn advance(&mut self) -> Duration {
        let phrase_len = self.phrases[self.index].chars().count();
        match self.phase {
            TypewriterPhase::Typing => {
                self.visible += 1;
                if self.visible >= phrase_len {
                    self.phase = TypewriterPhase::Holding;
                    HOLD_DELAY
                } else {
                    TYPE_DELAY
                }
            }
            TypewriterPhase::Holding => {
                self.phase = TypewriterPhase::Deleting;
                DELETE_DELAY
            }
            TypewriterPhase::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible == 0 {
                    self.phase = TypewriterPhase::Typing;
                    self.index = (self.index + 1) % self.phrases.len();
                }
                DELETE_DELAY
            }
        }
    }
}

/// Types the first banner phrase once and leaves it on screen. The hold and
/// delete phases are skipped so the prompt appears promptly.
pub(crate) fn play_banner() {
    let mut effect = Typewriter::new(
        BANNER_PHRASES
            .iter()
            .map(|phrase| phrase.to_string())
            .collect(),
    );
    loop {
        let delay = effect.advance();
        print!("\r{}", effect.text());
        let _ = io::stdout().flush();
        if effect.phase() == TypewriterPhase::Holding {
            break;
        }
        thread::sleep(delay);
    }
    println!();
}
