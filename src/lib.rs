pub mod ai;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod scorer;
pub mod session;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use ai::{
    CompletionProvider, OpenRouterClient, ParsedContent, UnconfiguredClient, build_prompt,
    build_provider, parse_completion,
};
pub use config::{ClientConfig, DEFAULT_MODEL, ModelConfig};
pub use error::TutorError;
pub use models::{
    AppState, ContentKind, LessonRequest, Level, Question, ResourceItem, Roadmap, RoadmapStage,
    ScoreResult, Stage,
};
pub use scorer::evaluate;
pub use session::{Action, Session, handle_restart_confirm, handle_tutor_input, run_generation};
pub use ui::draw;
