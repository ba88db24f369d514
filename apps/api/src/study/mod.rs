// Study library: persisted notes, completed quiz runs, flashcard decks,
// and the per-user activity counters behind the dashboard.

pub mod decks;
pub mod handlers;
pub mod notes;
pub mod quizzes;
pub mod stats;
