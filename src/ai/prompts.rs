use crate::models::{ContentKind, LessonRequest};

pub const SYSTEM_PROMPT: &str =
    "You are a patient study tutor. Follow the requested output format exactly.";

fn lesson_context(request: &LessonRequest) -> String {
    format!(
        "Subject: {}\nTopic: {}\nLanguage: {}\nStudent Level: {}\n",
        request.subject, request.topic, request.language, request.level
    )
}

/// Build the instruction sent to the model for one kind of content.
pub fn build_prompt(kind: ContentKind, request: &LessonRequest) -> String {
    let context = lesson_context(request);
    let task = match kind {
        ContentKind::Explanation => explanation_task(),
        ContentKind::Resources => resources_task(),
        ContentKind::Roadmap => roadmap_task(),
        ContentKind::Quiz => quiz_task(&request.language),
    };
    format!("{}\n{}", context, task)
}

fn explanation_task() -> String {
    "Task: Write a clear, friendly, step-by-step explanation of the topic. \
     Use short paragraphs, numbered steps where helpful, and examples. \
     Keep it concise but thorough. Reply in the specified language only."
        .to_string()
}

fn resources_task() -> String {
    "Task: Recommend at least 3 quality learning resources (mix of articles, videos, documentation). \
     Return a markdown bulleted list with one resource per line, formatted exactly as:\n\
     - [Title](URL) (Article|Video|Docs) - one-line reason why it is useful\n\
     Every item must include a real URL. Reply in the specified language only."
        .to_string()
}

fn roadmap_task() -> String {
    "Task: Produce a structured learning roadmap for this topic and level. \
     Organize it into stages, one markdown bullet per stage, formatted exactly as:\n\
     - Stage name | Effort: estimated effort | Outcome: key outcome\n\
     Then add a line `Mistakes:` followed by a short bulleted list of common mistakes to avoid.\n\
     Keep the labels Effort, Outcome and Mistakes in English; write everything else \
     in the specified language only."
        .to_string()
}

fn quiz_task(language: &str) -> String {
    format!(
        "Task: Create a short multiple-choice quiz with 3 to 5 questions, each with exactly one correct option. \
         Return STRICT JSON only with this schema:\n\
         {{\n  \"questions\": [\n    {{\n      \"question\": \"string\",\n      \"options\": [\"A\", \"B\", \"C\", \"D\"],\n      \"answer_index\": 0\n    }}\n  ]\n}}\n\
         Requirements:\n\
         - options length 3-5\n\
         - answer_index is an integer index into the options array\n\
         - No additional commentary or code fences\n\
         - Write the question text and options in {}.",
        language
    )
}
