pub mod client;
pub mod parser;
pub mod prompts;

// Public API exports
pub use client::{CompletionProvider, OpenRouterClient, UnconfiguredClient, build_provider};
pub use parser::{ParsedContent, parse_completion};
pub use prompts::build_prompt;
