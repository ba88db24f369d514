// AI tutor capabilities: text simplification, study plans, chat, quiz and
// flashcard generation, step-by-step solving, career exploration.
// All model calls go through crate::ai — no direct Gemini calls here.

pub mod capabilities;
pub mod handlers;
pub mod models;
pub mod prompts;
