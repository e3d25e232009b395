//! Prompt text: the shared standards preamble, role instructions and
//! per-operation request templates.

pub mod instructions;
mod template;

pub use instructions::RoleInstructions;
pub use template::PromptTemplate;

/// Standards applied to every agent, below role instructions in precedence.
pub const STANDARDS_PREAMBLE: &str = r#"All code shown or accepted must be production quality:
- Type annotations on every function signature
- Explicit error handling with specific, meaningful error types
- Small functions with clear names; no clever one-liners
- Tests for the happy path and at least one failure path
- Modern, widely used libraries over legacy equivalents
Be direct and concrete. Reference the learner's actual code whenever it is available."#;
