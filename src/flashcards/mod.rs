//! Flashcard View
//!
//! Study the muscle catalog one card at a time.
//!
//! ## Architecture
//!
//! - **FlashcardState**: pure reducer (filter, navigation, flip, quiz, score)
//! - **AdvanceTimer**: cancellable delay that follows a grade (native only;
//!   the browser front-end uses a gloo timer for the same ticket protocol)

mod state;

#[cfg(feature = "native")]
mod advance;

pub use state::{AdvanceTicket, FlashcardState, Progress, Score, StudyMode, DEFAULT_ADVANCE_DELAY};

#[cfg(feature = "native")]
pub use advance::AdvanceTimer;
