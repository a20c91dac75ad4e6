use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::condition::Condition;
use crate::error::TreeResult;

/// A keyed UI description streamed in by a generative backend.
///
/// Elements reference their children by key, so a child may be named before it
/// arrives. `root` may likewise point at a key that is not there yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default)]
    pub elements: IndexMap<String, UiElement>,
    /// Number of operations applied to this instance
    #[serde(skip)]
    pub version: u64,
}

/// One node of a [`UiTree`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiElement {
    #[serde(default)]
    pub key: String,
    /// Component kind, e.g. `Card`. Not interpreted by the tree itself.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Condition>,
}

impl UiElement {
    pub fn new(key: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: kind.into(),
            props: Map::new(),
            children: None,
            visible: None,
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = Some(children.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_visible(mut self, condition: Condition) -> Self {
        self.visible = Some(condition);
        self
    }

    /// Child keys in declaration order (empty when absent)
    pub fn child_keys(&self) -> &[String] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children(&self) -> bool {
        !self.child_keys().is_empty()
    }
}

impl UiTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.elements.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&UiElement> {
        self.elements.get(key)
    }

    /// The root element, if `root` is set and already resolved
    pub fn root_element(&self) -> Option<&UiElement> {
        self.root.as_deref().and_then(|key| self.elements.get(key))
    }

    /// Insert an element under its own key, replacing any previous one
    pub fn insert(&mut self, element: UiElement) {
        self.elements.insert(element.key.clone(), element);
    }

    /// Copy used as the starting point of a new edit session
    pub fn fork(&self) -> Self {
        Self {
            root: self.root.clone(),
            elements: self.elements.clone(),
            version: 0,
        }
    }

    pub fn from_json(json: &str) -> TreeResult<Self> {
        let mut tree: UiTree = serde_json::from_str(json)?;
        for (key, element) in tree.elements.iter_mut() {
            if element.key != *key {
                element.key = key.clone();
            }
        }
        Ok(tree)
    }

    pub fn to_json(&self) -> TreeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> TreeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
