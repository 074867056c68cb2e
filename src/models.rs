use crate::error::TutorError;
use std::fmt;

pub const LANGUAGE_PRESETS: [&str; 11] = [
    "English",
    "Urdu",
    "Mandarin Chinese",
    "Hindi",
    "Spanish",
    "Standard Arabic",
    "French",
    "Bengali",
    "Portuguese",
    "Russian",
    "Indonesian",
];

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }

    pub fn next(self) -> Level {
        match self {
            Level::Beginner => Level::Intermediate,
            Level::Intermediate => Level::Advanced,
            Level::Advanced => Level::Beginner,
        }
    }

    pub fn previous(self) -> Level {
        match self {
            Level::Beginner => Level::Advanced,
            Level::Intermediate => Level::Beginner,
            Level::Advanced => Level::Intermediate,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four validated setup values every prompt is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonRequest {
    pub subject: String,
    pub topic: String,
    pub language: String,
    pub level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Explanation,
    Resources,
    Roadmap,
    Quiz,
}

impl ContentKind {
    pub fn title(&self) -> &'static str {
        match self {
            ContentKind::Explanation => "Explanation",
            ContentKind::Resources => "Resources",
            ContentKind::Roadmap => "Roadmap",
            ContentKind::Quiz => "Quiz",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceItem {
    pub title: String,
    pub url: String,
    /// Article, Video, Docs... when the model labelled it.
    pub media: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapStage {
    pub stage: String,
    pub effort: String,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roadmap {
    pub stages: Vec<RoadmapStage>,
    pub mistakes: Vec<String>,
}

/// A multiple-choice question. Always holds 2..=5 options and a valid answer index.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, TutorError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(TutorError::format("question text is empty"));
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(TutorError::Format(format!(
                "question has {} options, expected {} to {}",
                options.len(),
                MIN_OPTIONS,
                MAX_OPTIONS
            )));
        }
        if correct_index >= options.len() {
            return Err(TutorError::Format(format!(
                "answer index {} is out of range for {} options",
                correct_index,
                options.len()
            )));
        }
        Ok(Self {
            prompt,
            options,
            correct_index,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total: usize,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Setup,
    Explanation,
    Resources,
    Roadmap,
    Quiz,
    Results,
}

impl Stage {
    /// The content generated when the user asks to move on from this stage.
    pub fn next_generation(&self) -> Option<ContentKind> {
        match self {
            Stage::Setup => Some(ContentKind::Explanation),
            Stage::Explanation => Some(ContentKind::Resources),
            Stage::Resources => Some(ContentKind::Roadmap),
            Stage::Roadmap => Some(ContentKind::Quiz),
            Stage::Quiz | Stage::Results => None,
        }
    }
}

impl From<ContentKind> for Stage {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Explanation => Stage::Explanation,
            ContentKind::Resources => Stage::Resources,
            ContentKind::Roadmap => Stage::Roadmap,
            ContentKind::Quiz => Stage::Quiz,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Tutor,
    RestartConfirm,
}
