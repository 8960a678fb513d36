#![deny(missing_docs)]

//! Core library for the ClearClause legal-text gateway.

/// Analysis pipeline tying prompts, completions, and risk formatting together.
pub mod analysis;
/// HTTP routing and REST handlers.
pub mod api;
/// Chat-completion client abstraction and the OpenAI-compatible adapter.
pub mod completion;
/// Environment-driven configuration management.
pub mod config;
/// Document-to-text extraction.
pub mod extraction;
/// Structured logging and tracing setup.
pub mod logging;
/// Prompt templates sent to the completion provider.
pub mod prompts;
/// Parsing of the model's risk listing into structured entries.
pub mod risks;
