use regex::Regex;
use std::sync::OnceLock;

use genui_tree::context::{build_tree_edit_prompt, extract_context, TREE_EDIT_SYSTEM_PROMPT};

use crate::error::{EditError, EditResult};

pub const DEFAULT_TEMPERATURE: f32 = 0.3;

pub const HTML_EDIT_SYSTEM_PROMPT: &str = r#"You are an HTML editor. Output ONLY modified HTML. No markdown fences, no explanations.

RULES:
- Modify Tailwind CSS classes to achieve the requested change
- Keep structure intact, only change styling classes
- For "black background": add bg-black and text-white classes
- For colors: use bg-{color}-{shade}, text-{color}-{shade}
- Output raw HTML only, nothing else"#;

/// One completion request as handed to a model backend
#[derive(Debug, Clone, PartialEq)]
pub struct EditRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

impl EditRequest {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Request that rewrites `html` according to `instruction`
pub fn html_edit_request(html: &str, instruction: &str) -> EditResult<EditRequest> {
    if html.trim().is_empty() || instruction.trim().is_empty() {
        return Err(EditError::MissingInput);
    }

    let prompt = format!(
        "Current HTML to modify:\n```html\n{}\n```\n\nUser's edit request: \"{}\"\n\nOutput the COMPLETE modified HTML below (no code fences, no explanation):",
        html, instruction
    );
    Ok(EditRequest {
        system: HTML_EDIT_SYSTEM_PROMPT.to_string(),
        prompt,
        temperature: DEFAULT_TEMPERATURE,
    })
}

/// Request that rewrites the tree bracketed inside `prompt`
pub fn tree_edit_request(prompt: &str) -> EditResult<EditRequest> {
    let context = extract_context(prompt).ok_or(EditError::MissingContext)?;
    Ok(EditRequest {
        system: TREE_EDIT_SYSTEM_PROMPT.to_string(),
        prompt: build_tree_edit_prompt(&context),
        temperature: DEFAULT_TEMPERATURE,
    })
}

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:html?)?\n?").unwrap())
}

/// Strip markdown code fences from a model reply and trim it
pub fn clean_model_html(text: &str) -> String {
    if !text.contains("```") {
        return text.trim().to_string();
    }
    fence_regex().replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_request_embeds_fenced_input() {
        let req = html_edit_request("<p>hi</p>", "make it red").unwrap();
        assert_eq!(req.system, HTML_EDIT_SYSTEM_PROMPT);
        assert!(req.prompt.starts_with("Current HTML to modify:\n```html\n<p>hi</p>\n```\n"));
        assert!(req.prompt.contains("User's edit request: \"make it red\""));
        assert_eq!(req.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn html_request_needs_both_inputs() {
        assert!(matches!(html_edit_request("", "x"), Err(EditError::MissingInput)));
        assert!(matches!(html_edit_request("<p/>", "  "), Err(EditError::MissingInput)));
    }

    #[test]
    fn tree_request_needs_context() {
        assert!(matches!(tree_edit_request("make it red"), Err(EditError::MissingContext)));

        let req = tree_edit_request("<<<CONTEXT>>>{\"root\":null,\"elements\":{}}<<<END_CONTEXT>>>make it red").unwrap();
        assert_eq!(req.system, TREE_EDIT_SYSTEM_PROMPT);
        assert!(req.prompt.contains("USER'S EDIT REQUEST: \"make it red\""));
    }

    #[test]
    fn fences_are_stripped() {
        assert_eq!(clean_model_html("```html\n<p>a</p>\n```\n"), "<p>a</p>");
        assert_eq!(clean_model_html("```htm\n<p>a</p>```"), "<p>a</p>");
        assert_eq!(clean_model_html("```\n<b>x</b>\n```"), "<b>x</b>");
        assert_eq!(clean_model_html("  <i>plain</i>\n"), "<i>plain</i>");
    }
}
