use crate::error::TutorError;
use crate::models::{ContentKind, Question, ResourceItem, Roadmap, RoadmapStage};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

pub const MIN_QUIZ_QUESTIONS: usize = 3;
pub const MAX_QUIZ_QUESTIONS: usize = 5;

lazy_static::lazy_static! {
    static ref BULLET_RE: Regex = Regex::new(r"^\s*(?:[-*•+]|\d+[.)])\s+").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").unwrap();
    static ref URL_RE: Regex = Regex::new(r#"https?://[^\s)\]>"'<]+"#).unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref MEDIA_RE: Regex = Regex::new(
        r"(?i)[(\[]\s*(article|video|docs|documentation|course|book|tutorial|podcast)\s*[)\]]"
    )
    .unwrap();
    static ref LABEL_RE: Regex = Regex::new(r"(?i)\b(url|link|type|why|reason)\s*:").unwrap();
    static ref STAGE_RE: Regex = Regex::new(
        r"(?i)^(?P<stage>.+?)\W*\beffort\s*:\s*(?P<effort>.+?)\W*\boutcomes?\s*:\s*(?P<outcome>.+)$"
    )
    .unwrap();
    static ref MISTAKES_RE: Regex = Regex::new(
        r"(?i)^[#*\s]*(?:common\s+)?mistakes(?:\s+to\s+avoid)?[\s*:]*$"
    )
    .unwrap();
}

/// Structured form of one completion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedContent {
    Explanation(String),
    Resources(Vec<ResourceItem>),
    Roadmap(Roadmap),
    Quiz(Vec<Question>),
}

pub fn parse_completion(kind: ContentKind, raw: &str) -> Result<ParsedContent, TutorError> {
    match kind {
        ContentKind::Explanation => parse_explanation(raw).map(ParsedContent::Explanation),
        ContentKind::Resources => parse_resources(raw).map(ParsedContent::Resources),
        ContentKind::Roadmap => parse_roadmap(raw).map(ParsedContent::Roadmap),
        ContentKind::Quiz => parse_quiz(raw).map(ParsedContent::Quiz),
    }
}

pub fn parse_explanation(raw: &str) -> Result<String, TutorError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TutorError::format("the explanation was empty"));
    }
    Ok(text.to_string())
}

pub fn parse_resources(raw: &str) -> Result<Vec<ResourceItem>, TutorError> {
    let resources: Vec<ResourceItem> = raw.lines().filter_map(parse_resource_line).collect();
    if resources.is_empty() {
        return Err(TutorError::format("no resources with a URL were found"));
    }
    Ok(resources)
}

fn parse_resource_line(line: &str) -> Option<ResourceItem> {
    let body = BULLET_RE.replace(line.trim(), "").to_string();
    if !URL_RE.is_match(&body) {
        return None;
    }

    let media = MEDIA_RE
        .captures(&body)
        .map(|caps| normalize_media(&caps[1]));
    let body = if media.is_some() {
        MEDIA_RE.replace(&body, " ").to_string()
    } else {
        body
    };

    let (title, url, rest) = if let Some(caps) = LINK_RE.captures(&body) {
        let whole = caps.get(0)?;
        let rest = format!("{} {}", &body[..whole.start()], &body[whole.end()..]);
        (clean_title(&caps[1]), trim_url(&caps[2]), rest)
    } else {
        let found = URL_RE.find(&body)?;
        let without_url = format!("{} {}", &body[..found.start()], &body[found.end()..]);
        let (title, rest) = split_title(&without_url);
        (title, trim_url(found.as_str()), rest)
    };

    let title = if title.is_empty() { url.clone() } else { title };
    Some(ResourceItem {
        title,
        url,
        media,
        reason: clean_reason(&rest),
    })
}

fn split_title(text: &str) -> (String, String) {
    if let Some(caps) = BOLD_RE.captures(text)
        && let Some(whole) = caps.get(0)
    {
        let rest = format!("{} {}", &text[..whole.start()], &text[whole.end()..]);
        return (clean_title(&caps[1]), rest);
    }

    let separators = [" - ", " – ", " — ", ": ", " | "];
    let split_at = separators
        .iter()
        .filter_map(|sep| text.find(sep).map(|pos| (pos, sep.len())))
        .min_by_key(|(pos, _)| *pos);

    match split_at {
        Some((pos, len)) => (clean_title(&text[..pos]), text[pos + len..].to_string()),
        None => (clean_title(text), String::new()),
    }
}

fn normalize_media(label: &str) -> String {
    match label.to_lowercase().as_str() {
        "docs" | "documentation" => "Docs".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches(['.', ',', ';', ':', '!']).to_string()
}

fn clean_title(title: &str) -> String {
    title
        .trim()
        .trim_matches(['*', '"', '\'', ':', '-', ' '])
        .to_string()
}

fn clean_reason(text: &str) -> String {
    let without_labels = LABEL_RE.replace_all(text, " ");
    let collapsed = without_labels.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(['-', '–', '—', ':', '|', '*', ',', '(', ')', ' '])
        .to_string()
}

fn strip_bullet(line: &str) -> Option<&str> {
    BULLET_RE
        .find(line)
        .map(|m| line[m.end()..].trim())
        .filter(|rest| !rest.is_empty())
}

pub fn parse_roadmap(raw: &str) -> Result<Roadmap, TutorError> {
    let mut roadmap = Roadmap::default();
    let mut in_mistakes = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if MISTAKES_RE.is_match(trimmed) {
            in_mistakes = true;
            continue;
        }
        if in_mistakes {
            if let Some(item) = strip_bullet(trimmed) {
                roadmap.mistakes.push(item.replace("**", ""));
            }
            continue;
        }
        if let Some(stage) = parse_stage_line(trimmed) {
            roadmap.stages.push(stage);
        }
    }

    if roadmap.stages.is_empty() {
        return Err(TutorError::format(
            "no roadmap stages with effort and outcome were found",
        ));
    }
    Ok(roadmap)
}

fn parse_stage_line(line: &str) -> Option<RoadmapStage> {
    let body = BULLET_RE.replace(line, "").replace("**", "");
    let caps = STAGE_RE.captures(&body)?;
    let field = |name: &str| {
        caps[name]
            .trim()
            .trim_matches(['(', ')', '|', '-', ':', ',', ';', ' '])
            .to_string()
    };
    let stage = RoadmapStage {
        stage: field("stage"),
        effort: field("effort"),
        outcome: field("outcome"),
    };
    if stage.stage.is_empty() || stage.effort.is_empty() || stage.outcome.is_empty() {
        return None;
    }
    Some(stage)
}

#[derive(Debug, Deserialize)]
struct RawQuiz {
    questions: Vec<Value>,
}

pub fn parse_quiz(raw: &str) -> Result<Vec<Question>, TutorError> {
    let raw_quiz = quiz_candidates(raw)
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<RawQuiz>(&candidate).ok())
        .ok_or_else(|| TutorError::format("no quiz JSON with a \"questions\" list was found"))?;

    let questions: Vec<Question> = raw_quiz
        .questions
        .iter()
        .filter_map(question_from_value)
        .take(MAX_QUIZ_QUESTIONS)
        .collect();

    if questions.len() < MIN_QUIZ_QUESTIONS {
        return Err(TutorError::Format(format!(
            "expected at least {} valid questions, found {}",
            MIN_QUIZ_QUESTIONS,
            questions.len()
        )));
    }
    Ok(questions)
}

fn quiz_candidates(raw: &str) -> Vec<String> {
    let mut candidates = vec![raw.trim().to_string(), strip_code_fence(raw)];
    if let Some(object) = extract_first_json_object(raw) {
        candidates.push(object.to_string());
    }
    candidates
}

fn question_from_value(value: &Value) -> Option<Question> {
    let prompt = value.get("question")?.as_str()?.trim();
    let options: Vec<String> = value
        .get("options")?
        .as_array()?
        .iter()
        .map(|option| match option {
            Value::String(text) => text.trim().to_string(),
            other => other.to_string(),
        })
        .collect();
    let correct_index = usize::try_from(value.get("answer_index")?.as_u64()?).ok()?;
    Question::new(prompt, options, correct_index).ok()
}

fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();
    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() > 2 {
            return lines[1..lines.len() - 1].join("\n").trim().to_string();
        }
    }
    trimmed.to_string()
}

/// First balanced `{...}` block, ignoring braces inside JSON strings.
fn extract_first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ_JSON: &str = r#"{
        "questions": [
            {"question": "2+2?", "options": ["3", "4", "5"], "answer_index": 1},
            {"question": "Capital of France?", "options": ["Paris", "Rome", "Lima"], "answer_index": 0},
            {"question": "Largest planet?", "options": ["Mars", "Jupiter", "Venus", "Earth"], "answer_index": 1}
        ]
    }"#;

    #[test]
    fn test_parse_quiz_direct_json() {
        let quiz = parse_quiz(QUIZ_JSON).unwrap();
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz[0].prompt(), "2+2?");
        assert_eq!(quiz[0].correct_option(), "4");
        assert_eq!(quiz[2].options().len(), 4);
    }

    #[test]
    fn test_parse_quiz_with_code_fence() {
        let fenced = format!("```json\n{}\n```", QUIZ_JSON);
        assert_eq!(parse_quiz(&fenced).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_quiz_embedded_in_text() {
        let chatty = format!("Sure! Here is your quiz:\n{}\nGood luck {{you}}!", QUIZ_JSON);
        assert_eq!(parse_quiz(&chatty).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_quiz_drops_invalid_entries() {
        let raw = r#"{"questions": [
            {"question": "ok 1", "options": ["a", "b", "c"], "answer_index": 2},
            {"question": "bad index", "options": ["a", "b", "c"], "answer_index": 3},
            {"question": "negative", "options": ["a", "b", "c"], "answer_index": -1},
            {"question": "too few", "options": ["a"], "answer_index": 0},
            {"options": ["a", "b"], "answer_index": 0},
            {"question": "ok 2", "options": ["a", "b"], "answer_index": 1},
            {"question": "ok 3", "options": [1, 2, 3], "answer_index": 0}
        ]}"#;
        let quiz = parse_quiz(raw).unwrap();
        let prompts: Vec<&str> = quiz.iter().map(|q| q.prompt()).collect();
        assert_eq!(prompts, vec!["ok 1", "ok 2", "ok 3"]);
        assert_eq!(quiz[2].options()[0], "1");
    }

    #[test]
    fn test_parse_quiz_keeps_at_most_five() {
        let items: Vec<String> = (0..7)
            .map(|i| format!(r#"{{"question": "q{}", "options": ["a", "b", "c"], "answer_index": 0}}"#, i))
            .collect();
        let raw = format!(r#"{{"questions": [{}]}}"#, items.join(","));
        assert_eq!(parse_quiz(&raw).unwrap().len(), MAX_QUIZ_QUESTIONS);
    }

    #[test]
    fn test_parse_quiz_too_few_questions_is_format_error() {
        let raw = r#"{"questions": [
            {"question": "only", "options": ["a", "b", "c"], "answer_index": 0}
        ]}"#;
        assert!(matches!(parse_quiz(raw), Err(TutorError::Format(_))));
    }

    #[test]
    fn test_parse_quiz_garbage_is_format_error() {
        assert!(matches!(
            parse_quiz("I cannot make a quiz about that."),
            Err(TutorError::Format(_))
        ));
        assert!(parse_quiz(r#"{"quiz": []}"#).is_err());
    }

    #[test]
    fn test_extract_first_json_object_respects_strings() {
        let text = r#"prefix {"a": "brace } in \" string", "b": {"c": 1}} suffix {"d": 2}"#;
        assert_eq!(
            extract_first_json_object(text),
            Some(r#"{"a": "brace } in \" string", "b": {"c": 1}}"#)
        );
        assert_eq!(extract_first_json_object("no json here"), None);
        assert_eq!(extract_first_json_object("{ unbalanced"), None);
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_resources_markdown_links() {
        let raw = "Here are some resources:\n\
            - [MDN Guide](https://developer.mozilla.org/en-US/docs/Web) (Docs) - The canonical reference.\n\
            - [Calculus Intro](https://www.youtube.com/watch?v=abc123) (Video) - Visual walkthrough\n\
            - A book without a link - still useful\n";
        let resources = parse_resources(raw).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].title, "MDN Guide");
        assert_eq!(resources[0].url, "https://developer.mozilla.org/en-US/docs/Web");
        assert_eq!(resources[0].media.as_deref(), Some("Docs"));
        assert_eq!(resources[0].reason, "The canonical reference.");
        assert_eq!(resources[1].media.as_deref(), Some("Video"));
        assert_eq!(resources[1].reason, "Visual walkthrough");
    }

    #[test]
    fn test_parse_resources_bold_title_and_bare_url() {
        let raw = "1. **Khan Academy: Derivatives** (video) - Friendly walkthroughs. URL: https://www.khanacademy.org/math/calculus.";
        let resources = parse_resources(raw).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].title, "Khan Academy: Derivatives");
        assert_eq!(resources[0].url, "https://www.khanacademy.org/math/calculus");
        assert_eq!(resources[0].media.as_deref(), Some("Video"));
        assert_eq!(resources[0].reason, "Friendly walkthroughs.");
    }

    #[test]
    fn test_parse_resources_plain_separator() {
        let raw = "- Paul's Online Notes - clear worked examples https://tutorial.math.lamar.edu";
        let resources = parse_resources(raw).unwrap();
        assert_eq!(resources[0].title, "Paul's Online Notes");
        assert_eq!(resources[0].reason, "clear worked examples");
        assert_eq!(resources[0].media, None);
    }

    #[test]
    fn test_parse_resources_without_urls_is_format_error() {
        let raw = "- Read a textbook\n- Watch some videos";
        assert!(matches!(parse_resources(raw), Err(TutorError::Format(_))));
    }

    #[test]
    fn test_parse_roadmap_stages_and_mistakes() {
        let raw = "### Roadmap\n\
            - **Foundations** | Effort: 1 week | Outcome: Know the unit circle\n\
            - Rules | Effort: 2 weeks | Outcome: Differentiate sin and cos\n\
            2. Practice (Effort: 3 days) - Outcome: Solve exam problems\n\
            \n\
            **Common mistakes to avoid:**\n\
            - Forgetting the chain rule\n\
            - Mixing degrees and radians\n";
        let roadmap = parse_roadmap(raw).unwrap();
        assert_eq!(roadmap.stages.len(), 3);
        assert_eq!(
            roadmap.stages[0],
            RoadmapStage {
                stage: "Foundations".to_string(),
                effort: "1 week".to_string(),
                outcome: "Know the unit circle".to_string(),
            }
        );
        assert_eq!(roadmap.stages[2].stage, "Practice");
        assert_eq!(roadmap.stages[2].effort, "3 days");
        assert_eq!(roadmap.stages[2].outcome, "Solve exam problems");
        assert_eq!(
            roadmap.mistakes,
            vec!["Forgetting the chain rule", "Mixing degrees and radians"]
        );
    }

    #[test]
    fn test_parse_roadmap_without_stages_is_format_error() {
        let raw = "Just study a lot.\nMistakes:\n- Giving up";
        assert!(matches!(parse_roadmap(raw), Err(TutorError::Format(_))));
    }

    #[test]
    fn test_parse_explanation() {
        assert_eq!(parse_explanation("  Step 1.\n").unwrap(), "Step 1.");
        assert!(parse_explanation(" \n ").is_err());
    }

    #[test]
    fn test_parse_completion_dispatches_by_kind() {
        let parsed = parse_completion(ContentKind::Explanation, "Hello").unwrap();
        assert_eq!(parsed, ParsedContent::Explanation("Hello".to_string()));
        assert!(matches!(
            parse_completion(ContentKind::Quiz, QUIZ_JSON),
            Ok(ParsedContent::Quiz(q)) if q.len() == 3
        ));
    }
}
