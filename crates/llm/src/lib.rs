//! LLM integration crate for the UXsearch service.
//!
//! Provides a provider-agnostic abstraction over text-completion services
//! and a [`Completer`] facade used by request handlers.
//!
//! # Providers
//! - **OpenAI**: Chat Completions API (default)
//! - **Ollama**: Local LLM runtime
//! - **Scripted**: In-memory replay for tests
//!
//! # Example
//! ```no_run
//! use uxsearch_llm::{create_client, Completer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client("ollama", None, None)?;
//! let completer = Completer::new(client, "llama3.2").with_max_tokens(800);
//! let text = completer.complete("Hello, world!").await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod completer;
pub mod factory;
pub mod lines;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmStream, LlmStreamChunk, LlmUsage};
pub use completer::{Completer, TextStream};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient, ScriptedClient};
pub use types::ProviderType;
