//! Flashcard state machine
//!
//! Pure reducer over the filtered catalog: navigation, flip/reveal, grading
//! and the pending auto-advance that follows a grade.

use crate::catalog::{self, CategoryFilter, MuscleRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How cards are studied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    /// Click the card to flip between picture and answer
    #[default]
    Flashcard,
    /// Reveal the answer, then grade yourself
    Quiz,
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyMode::Flashcard => f.write_str("flashcard"),
            StudyMode::Quiz => f.write_str("quiz"),
        }
    }
}

impl FromStr for StudyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flashcard" | "flashcards" => Ok(StudyMode::Flashcard),
            "quiz" => Ok(StudyMode::Quiz),
            other => Err(format!("Unknown study mode '{}'", other)),
        }
    }
}

/// Default pause after a grade before the next card is shown
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

/// Running quiz score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    /// Rounded percentage correct, `None` before the first grade
    pub fn percentage(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        Some(((self.correct as f64 / self.total as f64) * 100.0).round() as u32)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage() {
            Some(pct) => write!(f, "{}/{} ({}%)", self.correct, self.total, pct),
            None => write!(f, "{}/{}", self.correct, self.total),
        }
    }
}

/// Identifies one scheduled auto-advance.
///
/// The front-end hands the ticket back when its timer fires; tickets from
/// cancelled or superseded advances are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(u64);

/// Card position for the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current card
    pub position: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.position as f64 / self.total as f64
        }
    }
}

/// State of one flashcard view
#[derive(Debug, Clone)]
pub struct FlashcardState {
    records: &'static [MuscleRecord],
    filter: CategoryFilter,
    cards: Vec<&'static MuscleRecord>,
    current_index: usize,
    is_flipped: bool,
    show_answer: bool,
    mode: StudyMode,
    score: Score,
    pending_advance: Option<AdvanceTicket>,
    next_ticket: u64,
}

impl Default for FlashcardState {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashcardState {
    /// Start on the full built-in catalog
    pub fn new() -> Self {
        Self::with_catalog(catalog::catalog())
    }

    /// Start on an arbitrary record table
    pub fn with_catalog(records: &'static [MuscleRecord]) -> Self {
        Self {
            records,
            filter: CategoryFilter::All,
            cards: catalog::filter(records, CategoryFilter::All),
            current_index: 0,
            is_flipped: false,
            show_answer: false,
            mode: StudyMode::default(),
            score: Score::default(),
            pending_advance: None,
            next_ticket: 0,
        }
    }

    // ---- read side ----

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// The filtered sequence, in catalog order
    pub fn cards(&self) -> &[&'static MuscleRecord] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// An empty filtered sequence renders nothing
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&'static MuscleRecord> {
        self.cards.get(self.current_index).copied()
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending_advance
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: if self.is_empty() { 0 } else { self.current_index + 1 },
            total: self.cards.len(),
        }
    }

    // ---- reducers ----

    /// Narrow the deck to one category and go back to the first card
    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.cards = catalog::filter(self.records, filter);
        self.current_index = 0;
        self.clear_card_state();
        self.cancel_advance();
        tracing::debug!(filter = %filter, cards = self.cards.len(), "Category selected");
    }

    pub fn next(&mut self) {
        self.cancel_advance();
        self.step_forward();
    }

    pub fn previous(&mut self) {
        self.cancel_advance();
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
        self.clear_card_state();
    }

    /// Dot navigation. Out-of-range indexes are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            return false;
        }
        self.cancel_advance();
        self.current_index = index;
        self.clear_card_state();
        true
    }

    /// Toggle the card face. Only valid in flashcard mode.
    pub fn flip(&mut self) -> bool {
        if self.mode != StudyMode::Flashcard || self.is_empty() {
            return false;
        }
        self.is_flipped = !self.is_flipped;
        true
    }

    /// Show the answer panel. Only valid in quiz mode.
    pub fn reveal(&mut self) -> bool {
        if self.mode != StudyMode::Quiz || self.is_empty() {
            return false;
        }
        self.show_answer = true;
        true
    }

    pub fn set_mode(&mut self, mode: StudyMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.clear_card_state();
        self.cancel_advance();
    }

    /// Record a self-assessment and schedule the advance to the next card.
    ///
    /// Returns the ticket the caller must hand to [`complete_advance`] after
    /// the advance delay. While an advance is already pending the grade is
    /// ignored and `None` is returned.
    ///
    /// [`complete_advance`]: FlashcardState::complete_advance
    pub fn grade(&mut self, is_correct: bool) -> Option<AdvanceTicket> {
        if self.pending_advance.is_some() {
            tracing::debug!("Grade ignored, advance already pending");
            return None;
        }

        self.score.total += 1;
        if is_correct {
            self.score.correct += 1;
        }

        let ticket = AdvanceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_advance = Some(ticket);
        Some(ticket)
    }

    /// Apply a scheduled advance. Stale tickets do nothing.
    pub fn complete_advance(&mut self, ticket: AdvanceTicket) -> bool {
        if self.pending_advance != Some(ticket) {
            return false;
        }
        self.pending_advance = None;
        self.step_forward();
        true
    }

    /// Drop any pending advance (navigation, teardown)
    pub fn cancel_advance(&mut self) {
        self.pending_advance = None;
    }

    pub fn reset_score(&mut self) {
        self.score = Score::default();
    }

    fn step_forward(&mut self) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % len;
        self.clear_card_state();
    }

    fn clear_card_state(&mut self) {
        self.is_flipped = false;
        self.show_answer = false;
    }
}
