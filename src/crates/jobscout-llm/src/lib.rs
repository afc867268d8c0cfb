//! Multi-provider LLM access for jobscout.
//!
//! This crate is the orchestration core's lower half: it turns one
//! normalized [`CompletionRequest`] into the provider-specific HTTP call
//! a given [`ModelConfig`] describes, and hands raw assistant text back.
//!
//! # Backends
//!
//! Three structurally different API families sit behind the one
//! [`CompletionModel`] trait:
//!
//! - **Gemini** - Google's generative-language API: inline binary parts
//!   for vision, a native structured-output schema, and a grounded
//!   web-search tool.
//! - **Anthropic** - header-authenticated messages API (`x-api-key` +
//!   version header); no structured-output mode, so JSON requests are
//!   turned into an explicit instruction in the message text.
//! - **OpenAI-compatible family** - OpenAI, OpenRouter, Groq, Deepseek,
//!   and user-supplied custom endpoints, all speaking
//!   `POST {base}/chat/completions`.
//!
//! Dispatch is an exhaustive match over the closed [`Provider`] enum:
//! adding a backend is a compile-time-checked addition, not a new
//! string comparison.
//!
//! # Example
//!
//! ```rust,ignore
//! use jobscout_llm::{CompletionRequest, GlobalSettings, TaskKind, providers};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = GlobalSettings::default();
//!     let config = settings.effective(Some(TaskKind::Matching));
//!     let model = providers::model_for(&config);
//!
//!     let request = CompletionRequest::new("Say hello in one word.");
//!     let text = model.complete(request).await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod providers;
pub mod request;

pub use catalog::{list_models, ModelInfo};
pub use config::{GlobalSettings, ModelConfig, TaskKind};
pub use error::{LlmError, Result};
pub use provider::Provider;
pub use providers::{model_for, CompletionModel};
pub use request::{Attachment, CompletionRequest};
