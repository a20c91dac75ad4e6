use tokio_util::sync::CancellationToken;

use crate::config::EditConfig;
use crate::error::EditResult;
use crate::invoker::ModelFallbackInvoker;
use crate::prompt::{clean_model_html, html_edit_request};

/// Edited HTML and the candidate that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub candidate: String,
    pub html: String,
}

/// Instruction-driven HTML rewriting over a fallback invoker
pub struct HtmlEditor {
    invoker: ModelFallbackInvoker,
    config: EditConfig,
}

impl HtmlEditor {
    pub fn new(invoker: ModelFallbackInvoker, config: EditConfig) -> Self {
        Self { invoker, config }
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub async fn edit(&self, html: &str, instruction: &str, cancel: &CancellationToken) -> EditResult<EditOutcome> {
        let request = html_edit_request(html, instruction)?.with_temperature(self.config.temperature);
        tracing::debug!(
            "Editing {} byte(s) of HTML: \"{}\"",
            html.len(),
            instruction
        );

        let invocation = self.invoker.invoke(&request, cancel).await?;
        Ok(EditOutcome {
            candidate: invocation.candidate,
            html: clean_model_html(&invocation.text),
        })
    }
}
