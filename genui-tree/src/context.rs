//! Edit-session bracketing.
//!
//! An edit instruction travels with the current tree serialized between two
//! fixed delimiters: `<<<CONTEXT>>>{tree}<<<END_CONTEXT>>>make the button red`.
//! Only substring extraction happens here; the tree text is not parsed.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{TreeError, TreeResult};
use crate::tree::UiTree;

pub const CONTEXT_START: &str = "<<<CONTEXT>>>";
pub const CONTEXT_END: &str = "<<<END_CONTEXT>>>";

pub const TREE_EDIT_SYSTEM_PROMPT: &str = r#"You are a UI EDITOR. You receive an EXISTING UI tree and a modification request.
Your job is to OUTPUT the MODIFIED version of the SAME tree with the user's changes applied.

DO NOT generate new designs. DO NOT reimagine the layout. KEEP the existing structure.
Only change what the user specifically asks for.

MODIFICATION RULES:
- To change colors/styling: Add or modify className array with Tailwind classes
- To make something bigger: Add size classes like "text-xl", "p-8", "w-64", etc.
- To move something: Change the order in children arrays, or add positioning classes like "ml-auto", "mr-4"
- To change text: Modify the relevant props (text, label, content, title)
- To add/remove elements: Add/remove from the elements object and children arrays

OUTPUT FORMAT (JSONL - one line per operation):
{"op":"set","path":"/root","value":"element-key"}
{"op":"add","path":"/elements/key","value":{"key":"...","type":"...","props":{...},"children":[...]}}

Output the COMPLETE tree as JSONL operations. Start with setting /root, then add each element.

AVAILABLE TAILWIND CLASSES (examples):
- Size: w-32, w-48, w-64, w-full, h-16, h-32, p-2, p-4, p-8, m-2, m-4
- Text: text-sm, text-base, text-lg, text-xl, text-2xl, font-bold, font-semibold
- Colors: text-blue-500, text-red-500, bg-blue-100, bg-green-100, border-blue-500
- Layout: flex, justify-center, justify-between, items-center, ml-auto, mr-auto, mx-auto
- Spacing: gap-2, gap-4, space-x-2, space-y-4

FORBIDDEN CLASSES:
- min-h-screen, h-screen, h-full, min-h-full (breaks container)
- bg-gray-50, bg-slate-50 (container has background)
"#;

/// The two halves of a bracketed edit prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditContext {
    /// Serialized tree exactly as it appeared between the delimiters
    pub tree_text: String,
    /// Everything outside the bracketed section, trimmed
    pub instruction: String,
}

impl EditContext {
    pub fn parse_tree(&self) -> TreeResult<UiTree> {
        UiTree::from_json(&self.tree_text)
    }
}

fn context_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            "(?s){}(.*?){}",
            regex::escape(CONTEXT_START),
            regex::escape(CONTEXT_END)
        );
        Regex::new(&pattern).expect("context delimiter pattern is valid")
    })
}

/// Prefix `instruction` with the bracketed, serialized tree
pub fn wrap_context(tree: &UiTree, instruction: &str) -> TreeResult<String> {
    Ok(format!(
        "{}{}{}{}",
        CONTEXT_START,
        tree.to_json()?,
        CONTEXT_END,
        instruction
    ))
}

/// Split a prompt into its bracketed tree and the remaining instruction.
/// Only the first bracketed section is taken.
pub fn extract_context(prompt: &str) -> Option<EditContext> {
    let caps = context_regex().captures(prompt)?;
    let whole = caps.get(0)?;
    let tree_text = caps.get(1)?.as_str().to_string();
    let instruction = prompt.replacen(whole.as_str(), "", 1).trim().to_string();
    Some(EditContext {
        tree_text,
        instruction,
    })
}

/// Like [`extract_context`], failing when the prompt carries no tree
pub fn require_context(prompt: &str) -> TreeResult<EditContext> {
    extract_context(prompt).ok_or(TreeError::MissingContext {
        start: CONTEXT_START,
        end: CONTEXT_END,
    })
}

/// The user-facing half of a tree edit request
pub fn build_tree_edit_prompt(context: &EditContext) -> String {
    format!(
        "EXISTING UI TREE TO EDIT:\n{}\n\nUSER'S EDIT REQUEST: \"{}\"\n\nApply ONLY this change to the existing tree. Keep everything else the same.\nOutput the complete modified tree as JSONL.",
        context.tree_text, context.instruction
    )
}
