// All prompt constants for the tutor module. Each capability has one
// template with `{placeholder}` slots filled in before sending.

/// System prompt for structured capabilities — enforces JSON-only output.
pub const TUTOR_JSON_SYSTEM: &str = "You are an educational AI assistant for students. \
    You MUST respond with valid JSON only, exactly matching the requested format. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for the conversational tutor.
pub const CHAT_SYSTEM: &str = "You are LearnMate, an intelligent educational AI assistant. \
    Your purpose is to help students learn better by:\n\
    - Explaining complex concepts in simple terms\n\
    - Providing step-by-step solutions\n\
    - Offering study tips and strategies\n\
    - Answering academic questions across all subjects\n\
    - Being encouraging and supportive\n\n\
    Keep responses clear, educational, and helpful. Use examples when appropriate.";

/// Chat prompt template. Replace `{message}` before sending.
pub const CHAT_PROMPT_TEMPLATE: &str = "Student question: {message}";

/// Simplification prompt template. Replace `{text}` before sending.
pub const SIMPLIFY_PROMPT_TEMPLATE: &str = r#"Your task is to simplify complex text while preserving important information.

Return your response in this exact JSON format:
{
  "summary": "A clear, simplified version of the text that's easy to understand",
  "keyPoints": ["Point 1", "Point 2", "Point 3", "Point 4", "Point 5"]
}

Make the summary concise but comprehensive. Extract 3-5 key points as separate items.

Please simplify this text: {text}"#;

/// Study plan prompt template.
/// Replace: `{topics}`, `{target_date}`, `{weeks_available}`
pub const STUDY_PLAN_PROMPT_TEMPLATE: &str = r#"You create personalized study plans.

Return your response as a JSON array with this exact format:
[
  {
    "week": 1,
    "topic": "Topic name",
    "hours": 8,
    "tasks": ["Task 1", "Task 2", "Task 3", "Task 4"]
  }
]

Create a realistic study plan that distributes topics evenly across the available weeks.
Each week should have 4-6 specific, actionable tasks.
Hours should be reasonable (5-15 per week depending on topic complexity).

Create a study plan for these topics: {topics}.
Target completion date: {target_date}.
Available weeks: {weeks_available}.
Make it realistic and well-structured."#;

/// Quiz prompt template. Replace `{text}` before sending.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Create a quiz from this text: "{text}"

Return JSON in this exact format:
{
  "title": "Quiz Title",
  "questions": [
    {
      "question": "Question text?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct": 0,
      "explanation": "Brief explanation of why this is correct"
    }
  ]
}

Create 5-10 multiple choice questions that test understanding of the key concepts."#;

/// Flashcard prompt template. Replace `{text}` before sending.
pub const FLASHCARDS_PROMPT_TEMPLATE: &str = r#"Create flashcards from this text: "{text}"

Return JSON array in this exact format:
[
  {
    "front": "Question or term",
    "back": "Answer or definition"
  }
]

Create 5-15 flashcards that help memorize key concepts, terms, and facts."#;

/// Step-by-step solver prompt template. Replace `{problem}` before sending.
pub const SOLVE_PROMPT_TEMPLATE: &str = r#"Solve this problem step by step: "{problem}"

Return JSON in this exact format:
{
  "problem": "Restated problem",
  "answer": "Final answer",
  "steps": [
    {
      "step": 1,
      "description": "What we're doing in this step",
      "explanation": "Why we're doing this",
      "formula": "Any formula used (optional)"
    }
  ],
  "concepts": ["Concept 1", "Concept 2"],
  "tips": ["Tip 1", "Tip 2"]
}

Provide detailed step-by-step solution with explanations."#;

/// Career exploration prompt template. Replace `{concept}` before sending.
pub const CAREERS_PROMPT_TEMPLATE: &str = r#"Explore career paths related to: "{concept}"

Return JSON in this exact format:
{
  "career_paths": [
    {
      "title": "Job Title",
      "description": "What this role involves",
      "skills_required": ["Skill 1", "Skill 2"],
      "salary_range": "$XX,000 - $YY,000",
      "growth_outlook": "Positive/Strong/Moderate",
      "education_requirements": "Degree requirements",
      "related_fields": ["Field 1", "Field 2"]
    }
  ],
  "industry_trends": ["Trend 1", "Trend 2"],
  "skill_recommendations": ["Skill 1", "Skill 2"],
  "certification_suggestions": ["Cert 1", "Cert 2"]
}

Provide 3-5 relevant career paths with current market information."#;
