//! # genui tree
//!
//! Incrementally assembled UI trees and their export to a source project.
//!
//! ## Features
//! - Streamed JSONL patch protocol that tolerates truncated and malformed lines
//! - Depth-first walker with cycle truncation
//! - Analysis passes for component usage, data bindings and actions
//! - Prop serializer producing JSX attribute syntax
//! - Deterministic Next.js project generation from a fixed template catalog
//! - Edit-session bracketing of a tree inside prompt text
//!
//! ## Example
//! ```ignore
//! use genui_tree::{apply_text, generate_project, UiTree};
//!
//! let mut tree = UiTree::new();
//! apply_text(&mut tree, r#"
//! {"op":"set","path":"/root","value":"card"}
//! {"op":"add","path":"/elements/card","value":{"key":"card","type":"Card","props":{"title":"Hi"}}}
//! "#);
//!
//! for file in generate_project(&tree) {
//!     println!("{}", file.path);
//! }
//! ```

pub mod analyzer;
pub mod boilerplate;
pub mod catalog;
pub mod condition;
pub mod context;
pub mod error;
pub mod generator;
pub mod patch;
pub mod serialize;
pub mod tree;
pub mod walker;

// --- Core types ---
pub use condition::{CompareOp, Condition, Operand};
pub use error::{TreeError, TreeResult};
pub use tree::{UiElement, UiTree};

// --- Streaming ---
pub use patch::{apply_line, apply_lines, apply_text, parse_operation, ApplyStats, Operation, StreamPatcher};

// --- Traversal and analysis ---
pub use analyzer::{analyze, collect_actions, collect_data_paths, collect_used_components, TreeAnalysis};
pub use walker::{traverse, TraversalReport};

// --- Code generation ---
pub use catalog::ComponentKind;
pub use generator::{generate_project, generate_project_with, render_page_body, GeneratedFile};
pub use serialize::{escape_string, serialize_optional, serialize_props, serialize_value, QuoteStyle, SerializeOptions, SerializedValue};

// --- Edit sessions ---
pub use context::{build_tree_edit_prompt, extract_context, require_context, wrap_context, EditContext};
