use async_trait::async_trait;
use genui_edit::{
    stream_to_surface, tree_edit_request, BackendError, Candidate, EditConfig, EditError, EditRequest, HtmlEditor,
    ModelBackend, ModelFallbackInvoker, StreamOutcome,
};
use genui_tree::{apply_text, wrap_context, UiElement, UiTree};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

/// Backend that fails for every id except `winner`, which answers `reply`
struct OnlyOne {
    winner: &'static str,
    reply: String,
    requests: Mutex<Vec<(String, EditRequest)>>,
}

impl OnlyOne {
    fn new(winner: &'static str, reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            winner,
            reply: reply.into(),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ModelBackend for OnlyOne {
    async fn complete(&self, candidate_id: &str, request: &EditRequest) -> Result<String, BackendError> {
        self.requests
            .lock()
            .unwrap()
            .push((candidate_id.to_string(), request.clone()));
        if candidate_id == self.winner {
            Ok(self.reply.clone())
        } else {
            Err(format!("{} is overloaded", candidate_id).into())
        }
    }
}

#[tokio::test]
async fn test_html_edit_falls_back_and_cleans_reply() {
    let backend = OnlyOne::new("gemini-2.5-pro", "```html\n<div class=\"bg-black text-white\">hi</div>\n```");
    let config = EditConfig::from_yaml_str("temperature: 0.5\n").unwrap();
    let invoker = ModelFallbackInvoker::new(config.candidates(), backend.clone());
    let editor = HtmlEditor::new(invoker, config);

    let outcome = editor
        .edit("<div>hi</div>", "black background", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome.candidate, "gemini-2.5-pro");
    assert_eq!(outcome.html, "<div class=\"bg-black text-white\">hi</div>");

    let requests = backend.requests.lock().unwrap();
    let asked: Vec<&str> = requests.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(asked, vec!["gemini-2.5-flash", "gemini-2.0-flash", "gemini-2.5-pro"]);
    assert!(requests.iter().all(|(_, r)| r.temperature == 0.5));
}

#[tokio::test]
async fn test_html_edit_reports_exhaustion() {
    let backend = OnlyOne::new("nobody", "");
    let config = EditConfig::default();
    let editor = HtmlEditor::new(ModelFallbackInvoker::new(config.candidates(), backend), config);

    let err = editor
        .edit("<p>a</p>", "bigger", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "All AI models failed: gemini-3.0-pro is overloaded");
}

#[tokio::test]
async fn test_html_edit_rejects_missing_input_before_calling_models() {
    let backend = OnlyOne::new("a", "<p/>");
    let editor = HtmlEditor::new(
        ModelFallbackInvoker::new(vec![Candidate::new("a", Duration::from_secs(1))], backend.clone()),
        EditConfig::default(),
    );

    let err = editor.edit("  ", "bigger", &CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, EditError::MissingInput));
    assert!(backend.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_tree_edit_reply_applies_to_a_copy() {
    let mut tree = UiTree::new();
    tree.root = Some("btn".to_string());
    tree.insert(UiElement::new("btn", "Button").with_prop("label", json!("Go")));

    let reply = concat!(
        "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"btn\"}\n",
        "{\"op\":\"add\",\"path\":\"/elements/btn\",\"value\":{\"key\":\"btn\",\"type\":\"Button\",",
        "\"props\":{\"label\":\"Go\",\"className\":[\"bg-red-500\"]}}}\n",
    );
    let backend = OnlyOne::new("m", reply);
    let invoker = ModelFallbackInvoker::new(vec![Candidate::new("m", Duration::from_secs(5))], backend);

    let prompt = wrap_context(&tree, "make the button red").unwrap();
    let request = tree_edit_request(&prompt).unwrap();
    let invocation = invoker.invoke(&request, &CancellationToken::new()).await.unwrap();

    let mut edited = tree.fork();
    apply_text(&mut edited, &invocation.text);
    assert_eq!(edited.get("btn").unwrap().props["className"], json!(["bg-red-500"]));
    assert!(tree.get("btn").unwrap().props.get("className").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_edited_html_streams_to_surface() {
    let (tx, rx) = mpsc::channel::<Result<String, String>>(8);
    tokio::spawn(async move {
        tx.send(Ok("<div><p>a</p><sp".to_string())).await.unwrap();
        sleep(Duration::from_millis(20)).await;
        tx.send(Ok("an>hi</span".to_string())).await.unwrap();
        sleep(Duration::from_millis(20)).await;
        tx.send(Ok("></div>".to_string())).await.unwrap();
    });

    let mut surface: Vec<String> = Vec::new();
    let frame = EditConfig::default().frame_interval();
    let outcome = stream_to_surface(ReceiverStream::new(rx), &mut surface, frame, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, StreamOutcome::Completed("<div><p>a</p><span>hi</span></div>".to_string()));
    // the frame that saw "</span" without its ">" painted nothing
    assert_eq!(surface, vec!["<div><p>a</p>", "<div><p>a</p><span>hi</span></div>"]);
}
