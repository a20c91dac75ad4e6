use std::collections::HashSet;

use crate::tree::{UiElement, UiTree};

/// Summary of one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalReport {
    pub visited: usize,
    /// Child keys that pointed back at an ancestor; their branch was not entered
    pub truncated_cycles: Vec<String>,
}

/// Depth-first, pre-order walk starting at `start_key` (or the tree root).
///
/// The visitor receives `(element, depth, parent)`; depth is 0 and parent is
/// `None` at the start element. Keys missing from `elements` are skipped. A
/// child that is already on the current ancestor path is reported in
/// [`TraversalReport::truncated_cycles`] instead of being descended into.
///
/// The walk keeps its own stack, so depth is bounded by memory rather than by
/// the thread stack.
pub fn traverse<'t, F>(tree: &'t UiTree, start_key: Option<&str>, mut visitor: F) -> TraversalReport
where
    F: FnMut(&'t UiElement, usize, Option<&'t UiElement>),
{
    let mut report = TraversalReport::default();
    let Some(root) = tree.root.as_deref() else {
        return report;
    };
    let Some((key, start)) = tree.elements.get_key_value(start_key.unwrap_or(root)) else {
        return report;
    };

    let mut ancestors: HashSet<&'t str> = HashSet::new();
    let mut stack: Vec<Frame<'t>> = Vec::new();

    visitor(start, 0, None);
    report.visited += 1;
    ancestors.insert(key.as_str());
    stack.push(Frame::new(key, start, 0));

    while let Some(frame) = stack.last_mut() {
        let parent = frame.element;
        let Some(child) = parent.child_keys().get(frame.next_child) else {
            ancestors.remove(frame.key);
            stack.pop();
            continue;
        };
        frame.next_child += 1;
        let (parent_key, depth) = (frame.key, frame.depth + 1);

        if ancestors.contains(child.as_str()) {
            tracing::warn!(
                "Cycle detected at '{}' -> '{}', branch truncated",
                parent_key,
                child
            );
            report.truncated_cycles.push(child.clone());
            continue;
        }
        let Some((child_key, element)) = tree.elements.get_key_value(child.as_str()) else {
            continue;
        };

        visitor(element, depth, Some(parent));
        report.visited += 1;
        ancestors.insert(child_key.as_str());
        stack.push(Frame::new(child_key, element, depth));
    }

    report
}

/// An element on the current path and the index of its next child to enter
struct Frame<'t> {
    key: &'t str,
    element: &'t UiElement,
    depth: usize,
    next_child: usize,
}

impl<'t> Frame<'t> {
    fn new(key: &'t str, element: &'t UiElement, depth: usize) -> Self {
        Self {
            key,
            element,
            depth,
            next_child: 0,
        }
    }
}
