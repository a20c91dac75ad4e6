//! # genui edit
//!
//! Model-backed editing of generated UIs.
//!
//! - [`ModelFallbackInvoker`] tries an ordered list of model candidates, each
//!   under its own timeout, and returns the first non-blank reply
//! - [`HtmlPatcher`] and [`stream_to_surface`] paint streamed HTML without
//!   ever showing a half-written tag, at most once per frame; chunks may be
//!   text or raw bytes
//! - [`HtmlEditor`] ties both request building and reply cleanup together
//!
//! ## Example
//! ```ignore
//! use std::sync::Arc;
//! use genui_edit::{EditConfig, HtmlEditor, ModelFallbackInvoker};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = EditConfig::load("edit.yaml")?;
//! let invoker = ModelFallbackInvoker::new(config.candidates(), Arc::new(my_backend));
//! let editor = HtmlEditor::new(invoker, config);
//! let outcome = editor.edit("<p>hi</p>", "make it red", &CancellationToken::new()).await?;
//! ```

pub mod config;
pub mod decode;
pub mod editor;
pub mod error;
pub mod html_patcher;
pub mod invoker;
pub mod painter;
pub mod prompt;

pub use config::{CandidateConfig, EditConfig};
pub use decode::{TextChunk, Utf8StreamDecoder};
pub use editor::{EditOutcome, HtmlEditor};
pub use error::{BackendError, EditError, EditResult};
pub use html_patcher::{safe_paint_prefix, HtmlPatcher, PaintSurface};
pub use invoker::{Candidate, CandidateFailure, FailureReason, Invocation, ModelBackend, ModelFallbackInvoker};
pub use painter::{stream_to_surface, StreamOutcome};
pub use prompt::{clean_model_html, html_edit_request, tree_edit_request, EditRequest, HTML_EDIT_SYSTEM_PROMPT};
