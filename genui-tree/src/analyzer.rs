use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::tree::UiTree;
use crate::walker::traverse;

/// Prefix marking a string prop as an action reference (`"action:submit"`)
pub const ACTION_PREFIX: &str = "action:";

/// Prop names whose string value is always a data path
const BINDING_PROPS: &[&str] = &["bindPath", "dataPath"];

/// Everything the three analysis passes extract from a tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeAnalysis {
    pub components: BTreeSet<String>,
    pub data_paths: BTreeSet<String>,
    pub actions: BTreeSet<String>,
}

pub fn analyze(tree: &UiTree) -> TreeAnalysis {
    TreeAnalysis {
        components: collect_used_components(tree),
        data_paths: collect_data_paths(tree),
        actions: collect_actions(tree),
    }
}

/// Every component kind reachable from the root
pub fn collect_used_components(tree: &UiTree) -> BTreeSet<String> {
    let mut components = BTreeSet::new();
    traverse(tree, None, |element, _, _| {
        components.insert(element.kind.clone());
    });
    components
}

/// Data paths bound by props (`*Path`, `bindPath`, `dataPath`, `{path}` objects)
/// and referenced by visibility conditions
pub fn collect_data_paths(tree: &UiTree) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    traverse(tree, None, |element, _, _| {
        for (name, value) in &element.props {
            if let Value::String(s) = value {
                if name.ends_with("Path") || BINDING_PROPS.contains(&name.as_str()) {
                    paths.insert(s.clone());
                }
            }
            if let Some(path) = string_field(value, "path") {
                paths.insert(path.to_string());
            }
        }
        if let Some(visible) = &element.visible {
            visible.collect_paths(&mut paths);
        }
    });
    paths
}

/// Action names referenced by props
pub fn collect_actions(tree: &UiTree) -> BTreeSet<String> {
    let mut actions = BTreeSet::new();
    traverse(tree, None, |element, _, _| {
        for value in element.props.values() {
            if let Some(name) = value.as_str().and_then(|s| s.strip_prefix(ACTION_PREFIX)) {
                actions.insert(name.to_string());
            }
            if let Some(name) = string_field(value, "name") {
                actions.insert(name.to_string());
            }
        }
        if let Some(Value::String(action)) = element.props.get("action") {
            actions.insert(action.clone());
        }
    });
    actions
}

fn string_field<'v>(value: &'v Value, field: &str) -> Option<&'v str> {
    value.as_object()?.get(field)?.as_str()
}
