use crate::ai::{CompletionProvider, ParsedContent, build_prompt, parse_completion};
use crate::error::TutorError;
use crate::logger;
use crate::models::{
    AppState, ContentKind, LANGUAGE_PRESETS, LessonRequest, Level, Question, ResourceItem,
    Roadmap, ScoreResult, Stage,
};
use crate::scorer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::{BTreeMap, HashMap};

const SCROLL_PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Subject,
    Topic,
    Language,
    Level,
}

impl SetupField {
    pub const ALL: [SetupField; 4] = [
        SetupField::Subject,
        SetupField::Topic,
        SetupField::Language,
        SetupField::Level,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SetupField::Subject => "Subject",
            SetupField::Topic => "Topic",
            SetupField::Language => "Language",
            SetupField::Level => "Level",
        }
    }

    fn next(self) -> SetupField {
        match self {
            SetupField::Subject => SetupField::Topic,
            SetupField::Topic => SetupField::Language,
            SetupField::Language => SetupField::Level,
            SetupField::Level => SetupField::Subject,
        }
    }

    fn previous(self) -> SetupField {
        match self {
            SetupField::Subject => SetupField::Level,
            SetupField::Topic => SetupField::Subject,
            SetupField::Language => SetupField::Topic,
            SetupField::Level => SetupField::Language,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupForm {
    pub subject: String,
    pub topic: String,
    pub language: String,
    pub level: Level,
    pub focused: SetupField,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            subject: String::new(),
            topic: String::new(),
            language: LANGUAGE_PRESETS[0].to_string(),
            level: Level::default(),
            focused: SetupField::Subject,
        }
    }
}

impl SetupForm {
    pub fn validate(&self) -> Result<LessonRequest, TutorError> {
        let mut missing = Vec::new();
        if self.subject.trim().is_empty() {
            missing.push(SetupField::Subject.label());
        }
        if self.topic.trim().is_empty() {
            missing.push(SetupField::Topic.label());
        }
        if self.language.trim().is_empty() {
            missing.push(SetupField::Language.label());
        }
        if !missing.is_empty() {
            return Err(TutorError::Validation(missing));
        }

        Ok(LessonRequest {
            subject: self.subject.trim().to_string(),
            topic: self.topic.trim().to_string(),
            language: self.language.trim().to_string(),
            level: self.level,
        })
    }

    pub fn value(&self, field: SetupField) -> String {
        match field {
            SetupField::Subject => self.subject.clone(),
            SetupField::Topic => self.topic.clone(),
            SetupField::Language => self.language.clone(),
            SetupField::Level => self.level.to_string(),
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            SetupField::Subject => Some(&mut self.subject),
            SetupField::Topic => Some(&mut self.topic),
            SetupField::Language => Some(&mut self.language),
            SetupField::Level => None,
        }
    }

    fn cycle_language(&mut self, forward: bool) {
        let len = LANGUAGE_PRESETS.len();
        let next = match LANGUAGE_PRESETS
            .iter()
            .position(|preset| preset.eq_ignore_ascii_case(self.language.trim()))
        {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.language = LANGUAGE_PRESETS[next].to_string();
    }
}

/// What the event loop should do after a key has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// Paint the pending notice, then block on `run_generation`.
    Generate,
    Quit,
}

/// One user's tutoring run, from setup to results. Never persisted.
#[derive(Debug, Default)]
pub struct Session {
    pub setup: SetupForm,
    pub stage: Stage,
    pub explanation: Option<String>,
    pub resources: Option<Vec<ResourceItem>>,
    pub roadmap: Option<Roadmap>,
    pub quiz: Option<Vec<Question>>,
    pub answers: BTreeMap<usize, usize>,
    pub score: Option<ScoreResult>,
    /// Last failure of each generation step, shown in that step's panel only.
    pub errors: HashMap<ContentKind, String>,
    pub validation_error: Option<String>,
    pub pending: Option<ContentKind>,
    pub focused_question: usize,
    pub scroll_y: u16,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restart(&mut self) {
        logger::log("Restarting with a fresh session");
        *self = Session::new();
    }

    pub fn error_for(&self, kind: ContentKind) -> Option<&str> {
        self.errors.get(&kind).map(String::as_str)
    }

    /// Validate the setup and mark the next stage as pending.
    pub fn request_next_generation(&mut self) -> Action {
        let Some(kind) = self.stage.next_generation() else {
            return Action::None;
        };
        if let Err(e) = self.setup.validate() {
            logger::log(&format!("Setup incomplete: {}", e));
            self.validation_error = Some(e.to_string());
            return Action::None;
        }
        self.validation_error = None;
        self.pending = Some(kind);
        Action::Generate
    }

    fn store(&mut self, content: ParsedContent) {
        let kind = match content {
            ParsedContent::Explanation(text) => {
                self.explanation = Some(text);
                ContentKind::Explanation
            }
            ParsedContent::Resources(items) => {
                self.resources = Some(items);
                ContentKind::Resources
            }
            ParsedContent::Roadmap(roadmap) => {
                self.roadmap = Some(roadmap);
                ContentKind::Roadmap
            }
            ParsedContent::Quiz(questions) => {
                self.quiz = Some(questions);
                self.answers.clear();
                self.focused_question = 0;
                ContentKind::Quiz
            }
        };
        self.errors.remove(&kind);
        self.stage = Stage::from(kind);
        self.scroll_y = 0;
    }

    pub fn select_option(&mut self, question_index: usize, option_index: usize) {
        let Some(question) = self.quiz.as_ref().and_then(|q| q.get(question_index)) else {
            return;
        };
        if option_index < question.options().len() {
            self.answers.insert(question_index, option_index);
        }
    }

    fn cycle_option(&mut self, forward: bool) {
        let index = self.focused_question;
        let Some(count) = self
            .quiz
            .as_ref()
            .and_then(|q| q.get(index))
            .map(|q| q.options().len())
        else {
            return;
        };
        let next = match self.answers.get(&index) {
            Some(&current) if forward => (current + 1) % count,
            Some(&current) => (current + count - 1) % count,
            None if forward => 0,
            None => count - 1,
        };
        self.answers.insert(index, next);
    }

    pub fn evaluate(&mut self) {
        let Some(quiz) = &self.quiz else {
            return;
        };
        let result = scorer::evaluate(quiz, &self.answers);
        logger::log(&format!(
            "Evaluated quiz: {}/{} correct",
            result.correct_count, result.total
        ));
        self.score = Some(result);
        self.stage = Stage::Results;
        self.scroll_y = 0;
    }

    fn scroll(&mut self, code: KeyCode) {
        self.scroll_y = match code {
            KeyCode::Up => self.scroll_y.saturating_sub(1),
            KeyCode::Down => self.scroll_y.saturating_add(1),
            KeyCode::PageUp => self.scroll_y.saturating_sub(SCROLL_PAGE),
            KeyCode::PageDown => self.scroll_y.saturating_add(SCROLL_PAGE),
            _ => self.scroll_y,
        };
    }
}

/// Run the pending generation step against `provider` and store its result.
///
/// On failure the error is recorded for that step only; everything produced
/// by earlier steps stays as it was and the step can be retried.
pub async fn run_generation(
    session: &mut Session,
    provider: &dyn CompletionProvider,
) -> Result<(), TutorError> {
    let Some(kind) = session.stage.next_generation() else {
        session.pending = None;
        return Ok(());
    };

    let result = generate(kind, &session.setup, provider).await;
    session.pending = None;

    match result {
        Ok(content) => {
            session.store(content);
            Ok(())
        }
        Err(e) => {
            logger::error(&format!("{} generation failed: {}", kind.title(), e));
            match e {
                TutorError::Validation(_) => session.validation_error = Some(e.to_string()),
                _ => {
                    session.errors.insert(kind, e.to_string());
                }
            }
            Err(e)
        }
    }
}

async fn generate(
    kind: ContentKind,
    setup: &SetupForm,
    provider: &dyn CompletionProvider,
) -> Result<ParsedContent, TutorError> {
    let request = setup.validate()?;
    let prompt = build_prompt(kind, &request);
    logger::log(&format!(
        "Requesting {} for {} / {} ({}, {})",
        kind.title(),
        request.subject,
        request.topic,
        request.language,
        request.level
    ));

    let raw = provider.complete(&prompt).await?;
    logger::log(&format!(
        "Received {} characters for {}",
        raw.len(),
        kind.title()
    ));

    parse_completion(kind, &raw).inspect_err(|e| {
        logger::error(&format!("Unparseable {}: {}\nRaw: {}", kind.title(), e, raw));
    })
}

pub fn handle_tutor_input(
    session: &mut Session,
    key: KeyEvent,
    app_state: &mut AppState,
) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Action::Quit,
            KeyCode::Char('r') => {
                *app_state = AppState::RestartConfirm;
                return Action::None;
            }
            _ => return Action::None,
        }
    }

    match session.stage {
        Stage::Setup => handle_setup_input(session, key),
        Stage::Explanation | Stage::Resources | Stage::Roadmap => {
            handle_content_input(session, key)
        }
        Stage::Quiz => handle_quiz_input(session, key),
        Stage::Results => handle_results_input(session, key),
    }
}

fn handle_setup_input(session: &mut Session, key: KeyEvent) -> Action {
    let form = &mut session.setup;
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Down => {
            form.focused = form.focused.next();
            Action::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focused = form.focused.previous();
            Action::None
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            match form.focused {
                SetupField::Language => form.cycle_language(forward),
                SetupField::Level => {
                    form.level = if forward {
                        form.level.next()
                    } else {
                        form.level.previous()
                    }
                }
                _ => {}
            }
            Action::None
        }
        KeyCode::Backspace => {
            if let Some(text) = form.focused_text_mut() {
                text.pop();
            }
            Action::None
        }
        KeyCode::Char(c) => {
            if let Some(text) = form.focused_text_mut() {
                text.push(c);
            }
            Action::None
        }
        KeyCode::Enter => session.request_next_generation(),
        _ => Action::None,
    }
}

fn handle_content_input(session: &mut Session, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('n') | KeyCode::Enter => session.request_next_generation(),
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
            session.scroll(key.code);
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_quiz_input(session: &mut Session, key: KeyEvent) -> Action {
    let question_count = session.quiz.as_ref().map_or(0, Vec::len);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::BackTab => {
            session.focused_question = session.focused_question.saturating_sub(1);
            Action::None
        }
        KeyCode::Down | KeyCode::Tab => {
            if session.focused_question < question_count.saturating_sub(1) {
                session.focused_question += 1;
            }
            Action::None
        }
        KeyCode::Left => {
            session.cycle_option(false);
            Action::None
        }
        KeyCode::Right => {
            session.cycle_option(true);
            Action::None
        }
        KeyCode::Char(c @ '1'..='5') => {
            let option_index = c as usize - '1' as usize;
            session.select_option(session.focused_question, option_index);
            Action::None
        }
        KeyCode::Enter => {
            session.evaluate();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_results_input(session: &mut Session, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('r') => {
            session.restart();
            Action::None
        }
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
            session.scroll(key.code);
            Action::None
        }
        _ => Action::None,
    }
}

pub fn handle_restart_confirm(
    session: &mut Session,
    key: KeyEvent,
    app_state: &mut AppState,
) -> Action {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            session.restart();
            *app_state = AppState::Tutor;
            Action::None
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            *app_state = AppState::Tutor;
            Action::None
        }
        _ => Action::None,
    }
}
