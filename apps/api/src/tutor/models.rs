//! Payload shapes the tutor capabilities ask the model to produce, plus the
//! placeholder value each capability substitutes when a completion is
//! unusable. Placeholders are fixed literals — a completion either decodes
//! and passes its contract in full, or is discarded in full.

use serde::{Deserialize, Serialize};

use crate::ai::AiPayload;

/// Reply used when the chat model produces nothing usable.
pub const CHAT_FALLBACK_REPLY: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Simplification
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simplification {
    pub summary: String,
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<String>,
}

const FALLBACK_KEY_POINTS: [&str; 5] = [
    "Main concept from the original text",
    "Supporting details and evidence",
    "Key terminology and definitions",
    "Practical applications",
    "Important conclusions",
];

impl Simplification {
    /// When the completion held text that just wasn't the requested JSON,
    /// that text still serves as the summary; the key points are canned.
    pub fn fallback(completion: Option<&str>) -> Self {
        Self {
            summary: completion
                .map(str::to_string)
                .unwrap_or_else(|| "Unable to simplify this text at this time.".to_string()),
            key_points: FALLBACK_KEY_POINTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AiPayload for Simplification {}

// ────────────────────────────────────────────────────────────────────────────
// Study plan
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlanWeek {
    pub week: u32,
    pub topic: String,
    pub hours: f64,
    pub tasks: Vec<String>,
}

impl AiPayload for StudyPlanWeek {
    /// Weeks are numbered from 1 and hours never go negative.
    fn conforms(&self) -> bool {
        self.week >= 1 && self.hours >= 0.0
    }
}

/// One placeholder week per requested topic, numbered in input order.
pub fn fallback_plan(topics: &[String]) -> Vec<StudyPlanWeek> {
    topics
        .iter()
        .enumerate()
        .map(|(index, topic)| StudyPlanWeek {
            week: (index + 1) as u32,
            topic: topic.clone(),
            hours: 8.0,
            tasks: vec![
                format!("Review fundamentals of {topic}"),
                "Practice exercises and problems".to_string(),
                "Complete assignments and projects".to_string(),
                "Take practice tests and review".to_string(),
            ],
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Quiz
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn fallback() -> Self {
        Self {
            title: "Quiz: Understanding Key Concepts".to_string(),
            questions: vec![QuizQuestion {
                question: "What is the main topic discussed in this text?".to_string(),
                options: vec![
                    "Option A".to_string(),
                    "Option B".to_string(),
                    "Option C".to_string(),
                    "Option D".to_string(),
                ],
                correct: 0,
                explanation: Some("This is a sample question.".to_string()),
            }],
        }
    }

    /// Number of answers matching their question's correct index. Missing
    /// answers (a shorter slice) and out-of-range picks simply don't score.
    pub fn score(&self, answers: &[usize]) -> usize {
        self.questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.correct == **answer)
            .count()
    }
}

impl AiPayload for Quiz {
    /// Every correct-answer index must point inside its own options.
    fn conforms(&self) -> bool {
        self.questions
            .iter()
            .all(|q| !q.options.is_empty() && q.correct < q.options.len())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flashcards
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl AiPayload for Flashcard {
    fn conforms(&self) -> bool {
        !self.front.trim().is_empty() && !self.back.trim().is_empty()
    }
}

pub fn fallback_cards() -> Vec<Flashcard> {
    vec![
        Flashcard {
            front: "Sample Question".to_string(),
            back: "Sample Answer".to_string(),
        },
        Flashcard {
            front: "Key Term".to_string(),
            back: "Definition".to_string(),
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Step-by-step solution
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub step: u32,
    pub description: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub problem: String,
    pub answer: String,
    pub steps: Vec<SolutionStep>,
    pub concepts: Vec<String>,
    pub tips: Vec<String>,
}

impl Solution {
    pub fn fallback(problem: &str) -> Self {
        Self {
            problem: problem.to_string(),
            answer: "Sample answer".to_string(),
            steps: vec![SolutionStep {
                step: 1,
                description: "Analyze the problem".to_string(),
                explanation: "First we need to understand what's being asked".to_string(),
                formula: None,
            }],
            concepts: vec!["Problem solving".to_string()],
            tips: vec!["Take it step by step".to_string()],
        }
    }
}

impl AiPayload for Solution {
    /// Steps must count 1, 2, 3, ... with no gaps or reordering.
    fn conforms(&self) -> bool {
        self.steps
            .iter()
            .enumerate()
            .all(|(index, step)| step.step as usize == index + 1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career exploration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub salary_range: String,
    pub growth_outlook: String,
    pub education_requirements: String,
    pub related_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerExploration {
    pub career_paths: Vec<CareerPath>,
    pub industry_trends: Vec<String>,
    pub skill_recommendations: Vec<String>,
    pub certification_suggestions: Vec<String>,
}

impl CareerExploration {
    pub fn fallback(concept: &str) -> Self {
        Self {
            career_paths: vec![CareerPath {
                title: format!("{concept} Specialist"),
                description: format!("Work with {concept} technologies and applications"),
                skills_required: vec![
                    concept.to_string(),
                    "Problem solving".to_string(),
                    "Communication".to_string(),
                ],
                salary_range: "$50,000 - $80,000".to_string(),
                growth_outlook: "Positive".to_string(),
                education_requirements: "Bachelor's degree or equivalent experience".to_string(),
                related_fields: vec!["Technology".to_string(), "Engineering".to_string()],
            }],
            industry_trends: vec![format!("Growing demand for {concept} expertise")],
            skill_recommendations: vec![concept.to_string(), "Critical thinking".to_string()],
            certification_suggestions: vec![format!("{concept} certification")],
        }
    }
}

impl AiPayload for CareerExploration {}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_with_answers(correct: &[usize]) -> Quiz {
        Quiz {
            title: "t".to_string(),
            questions: correct
                .iter()
                .map(|&c| QuizQuestion {
                    question: "q".to_string(),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct: c,
                    explanation: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_quiz_score_counts_exact_matches() {
        let quiz = quiz_with_answers(&[0, 1, 2]);
        assert_eq!(quiz.score(&[0, 1, 3]), 2);
    }

    #[test]
    fn test_quiz_score_with_missing_answers() {
        let quiz = quiz_with_answers(&[0, 1, 2]);
        assert_eq!(quiz.score(&[0]), 1, "unanswered questions score nothing");
        assert_eq!(quiz.score(&[]), 0);
    }

    #[test]
    fn test_quiz_score_ignores_extra_answers() {
        let quiz = quiz_with_answers(&[0, 1]);
        assert_eq!(
            quiz.score(&[0, 1, 2, 3, 0]),
            2,
            "answers past the last question are ignored"
        );
    }

    #[test]
    fn test_quiz_conforms_rejects_out_of_range_correct_index() {
        let mut quiz = quiz_with_answers(&[0, 1]);
        assert!(quiz.conforms());
        quiz.questions[1].correct = 4; // only four options, indices 0..=3
        assert!(!quiz.conforms());
    }

    #[test]
    fn test_study_plan_week_contract() {
        let week = StudyPlanWeek {
            week: 1,
            topic: "Algebra".to_string(),
            hours: 8.0,
            tasks: vec![],
        };
        assert!(week.conforms());
        assert!(!StudyPlanWeek { week: 0, ..week.clone() }.conforms());
        assert!(!StudyPlanWeek { hours: -1.0, ..week }.conforms());
    }

    #[test]
    fn test_solution_steps_must_be_sequential_from_one() {
        let step = |n: u32| SolutionStep {
            step: n,
            description: "d".to_string(),
            explanation: "e".to_string(),
            formula: None,
        };
        let mut solution = Solution {
            problem: "p".to_string(),
            answer: "a".to_string(),
            steps: vec![step(1), step(2), step(3)],
            concepts: vec![],
            tips: vec![],
        };
        assert!(solution.conforms());
        solution.steps = vec![step(1), step(3)];
        assert!(!solution.conforms());
        solution.steps = vec![step(2), step(1)];
        assert!(!solution.conforms());
    }

    #[test]
    fn test_flashcard_rejects_blank_faces() {
        let card = Flashcard {
            front: "Term".to_string(),
            back: "  ".to_string(),
        };
        assert!(!card.conforms());
    }

    #[test]
    fn test_simplification_fallback_keeps_raw_completion_as_summary() {
        let fallback = Simplification::fallback(Some("plain prose reply"));
        assert_eq!(fallback.summary, "plain prose reply");
        assert_eq!(fallback.key_points.len(), 5);
        assert_eq!(fallback.key_points[0], "Main concept from the original text");
    }

    #[test]
    fn test_simplification_serializes_key_points_in_camel_case() {
        let json = serde_json::to_value(Simplification::fallback(None)).unwrap();
        assert!(json.get("keyPoints").is_some());
        assert!(json.get("key_points").is_none());
    }

    #[test]
    fn test_fallback_plan_numbers_weeks_in_topic_order() {
        let topics = vec!["Algebra".to_string(), "Geometry".to_string()];
        let plan = fallback_plan(&topics);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].week, 1);
        assert_eq!(plan[1].week, 2);
        assert_eq!(plan[1].topic, "Geometry");
        assert_eq!(plan[0].tasks[0], "Review fundamentals of Algebra");
    }

    #[test]
    fn test_quiz_fallback_is_a_single_sample_question() {
        let quiz = Quiz::fallback();
        assert_eq!(quiz.title, "Quiz: Understanding Key Concepts");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct, 0);
        assert!(quiz.conforms());
    }

    #[test]
    fn test_career_fallback_names_the_concept() {
        let exploration = CareerExploration::fallback("Rust");
        assert_eq!(exploration.career_paths[0].title, "Rust Specialist");
        assert_eq!(exploration.skill_recommendations[0], "Rust");
    }
}
