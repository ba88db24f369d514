//! One function per tutor capability. Each fills its prompt template, runs
//! it through the shared [`AiClient`], and names the placeholder to use
//! when the completion is unusable. Nothing here touches the network or
//! the database directly.

use chrono::NaiveDate;

use crate::ai::{AiClient, AiError, AiOutcome};

use super::models::{
    fallback_cards, fallback_plan, CareerExploration, Flashcard, Quiz, Simplification, Solution,
    StudyPlanWeek, CHAT_FALLBACK_REPLY,
};
use super::prompts::{
    CAREERS_PROMPT_TEMPLATE, CHAT_PROMPT_TEMPLATE, CHAT_SYSTEM, FLASHCARDS_PROMPT_TEMPLATE,
    QUIZ_PROMPT_TEMPLATE, SIMPLIFY_PROMPT_TEMPLATE, SOLVE_PROMPT_TEMPLATE,
    STUDY_PLAN_PROMPT_TEMPLATE, TUTOR_JSON_SYSTEM,
};

pub async fn simplify_text(
    ai: &AiClient,
    api_key: Option<&str>,
    text: &str,
) -> Result<AiOutcome<Simplification>, AiError> {
    let prompt = SIMPLIFY_PROMPT_TEMPLATE.replace("{text}", text);
    ai.generate(api_key, &prompt, TUTOR_JSON_SYSTEM, Simplification::fallback)
        .await
}

/// `weeks_available` is advisory: it shapes the prompt but the model's
/// plan is returned as-is, so the number of weeks in the result may
/// differ from it.
pub async fn generate_study_plan(
    ai: &AiClient,
    api_key: Option<&str>,
    topics: &[String],
    target_date: NaiveDate,
    weeks_available: u32,
) -> Result<AiOutcome<Vec<StudyPlanWeek>>, AiError> {
    let prompt = STUDY_PLAN_PROMPT_TEMPLATE
        .replace("{topics}", &topics.join(", "))
        .replace("{target_date}", &target_date.to_string())
        .replace("{weeks_available}", &weeks_available.to_string());
    ai.generate(api_key, &prompt, TUTOR_JSON_SYSTEM, |_| fallback_plan(topics))
        .await
}

pub async fn chat_reply(
    ai: &AiClient,
    api_key: Option<&str>,
    message: &str,
) -> Result<AiOutcome<String>, AiError> {
    let prompt = CHAT_PROMPT_TEMPLATE.replace("{message}", message);
    ai.complete_text(api_key, &prompt, CHAT_SYSTEM, CHAT_FALLBACK_REPLY)
        .await
}

pub async fn generate_quiz(
    ai: &AiClient,
    api_key: Option<&str>,
    text: &str,
) -> Result<AiOutcome<Quiz>, AiError> {
    let prompt = QUIZ_PROMPT_TEMPLATE.replace("{text}", text);
    ai.generate(api_key, &prompt, TUTOR_JSON_SYSTEM, |_| Quiz::fallback())
        .await
}

pub async fn generate_flashcards(
    ai: &AiClient,
    api_key: Option<&str>,
    text: &str,
) -> Result<AiOutcome<Vec<Flashcard>>, AiError> {
    let prompt = FLASHCARDS_PROMPT_TEMPLATE.replace("{text}", text);
    ai.generate(api_key, &prompt, TUTOR_JSON_SYSTEM, |_| fallback_cards())
        .await
}

pub async fn solve_step_by_step(
    ai: &AiClient,
    api_key: Option<&str>,
    problem: &str,
) -> Result<AiOutcome<Solution>, AiError> {
    let prompt = SOLVE_PROMPT_TEMPLATE.replace("{problem}", problem);
    ai.generate(api_key, &prompt, TUTOR_JSON_SYSTEM, |_| {
        Solution::fallback(problem)
    })
    .await
}

pub async fn explore_career_paths(
    ai: &AiClient,
    api_key: Option<&str>,
    concept: &str,
) -> Result<AiOutcome<CareerExploration>, AiError> {
    let prompt = CAREERS_PROMPT_TEMPLATE.replace("{concept}", concept);
    ai.generate(api_key, &prompt, TUTOR_JSON_SYSTEM, |_| {
        CareerExploration::fallback(concept)
    })
    .await
}

/// Whole weeks between today and the target date, rounding any partial
/// week up. Dates in the past (or today) yield 0. The value guides the
/// model; it is never enforced against the returned plan.
pub fn advisory_weeks(target_date: NaiveDate, today: NaiveDate) -> u32 {
    let days = (target_date - today).num_days();
    if days <= 0 {
        0
    } else {
        ((days + 6) / 7) as u32
    }
}
