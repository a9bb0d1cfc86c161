//! Speech output for short text snippets with a two-tier fallback.
//!
//! [`PlaybackOrchestrator`](domain::speech::PlaybackOrchestrator) asks a remote
//! synthesis endpoint for audio and plays it; if either step fails it speaks
//! the text with the local speech engine instead.

pub mod domain;
pub mod error;
pub mod infrastructure;
