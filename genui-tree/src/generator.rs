//! Turns a finished tree into a standalone Next.js project.

use serde::Serialize;

use crate::analyzer::collect_used_components;
use crate::boilerplate;
use crate::catalog::ComponentKind;
use crate::serialize::{serialize_props, SerializeOptions};
use crate::tree::UiTree;
use crate::walker::traverse;

pub const INDEX_PATH: &str = "components/ui/index.ts";
pub const PAGE_PATH: &str = "app/page.tsx";

/// Nesting level of the root element inside the page component
/// (`function` body → `return (` → wrapper `<div>` → root)
const PAGE_BASE_DEPTH: usize = 3;

/// One output file, path relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Generate the project with default serializer options
pub fn generate_project(tree: &UiTree) -> Vec<GeneratedFile> {
    generate_project_with(tree, &SerializeOptions::default())
}

/// Generate the project files for `tree`.
///
/// Order: boilerplate, one file per supported component kind (by name), the
/// component index, the entry page, README. A tree without a root produces
/// no files.
pub fn generate_project_with(tree: &UiTree, options: &SerializeOptions) -> Vec<GeneratedFile> {
    if tree.root.is_none() {
        return Vec::new();
    }

    let kinds = emitted_kinds(tree);
    let mut files = boilerplate::leading_files();

    for kind in &kinds {
        files.push(GeneratedFile::new(kind.source_path(), kind.template()));
    }
    files.push(GeneratedFile::new(INDEX_PATH, render_index(&kinds)));
    files.push(GeneratedFile::new(PAGE_PATH, render_page(tree, &kinds, options)));
    files.extend(boilerplate::trailing_files());

    files
}

/// Used kinds that have a template, sorted by name
fn emitted_kinds(tree: &UiTree) -> Vec<ComponentKind> {
    let mut kinds: Vec<ComponentKind> = collect_used_components(tree)
        .iter()
        .filter_map(|name| {
            let kind = ComponentKind::from_name(name);
            if kind.is_none() {
                tracing::debug!("No template for component '{}', omitting", name);
            }
            kind
        })
        .collect();
    kinds.sort_by_key(|k| k.name());
    kinds
}

fn render_index(kinds: &[ComponentKind]) -> String {
    let exports: Vec<String> = kinds
        .iter()
        .map(|k| format!("export {{ {} }} from \"./{}\";", k.name(), k.file_stem()))
        .collect();
    format!("{}\n", exports.join("\n"))
}

fn render_page(tree: &UiTree, kinds: &[ComponentKind], options: &SerializeOptions) -> String {
    let unit = " ".repeat(options.indent);
    let body = render_page_body(tree, options);

    let mut page = String::from("\"use client\";\n\n");
    if !kinds.is_empty() {
        let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
        page.push_str(&format!(
            "import {{ {} }} from \"@/components/ui\";\n\n",
            names.join(", ")
        ));
    }
    page.push_str("export default function Page() {\n");
    page.push_str(&format!("{}return (\n", unit));
    page.push_str(&format!(
        "{0}{0}<div className=\"min-h-screen p-8 flex items-center justify-center\">\n",
        unit
    ));
    if !body.is_empty() {
        page.push_str(&body);
        page.push('\n');
    }
    page.push_str(&format!("{0}{0}</div>\n", unit));
    page.push_str(&format!("{});\n", unit));
    page.push_str("}\n");
    page
}

/// JSX for the element tree alone, one tag per line.
///
/// Childless elements self-close. Children that are not in the tree are
/// skipped, so an element whose children are all missing renders as an empty
/// open/close pair.
pub fn render_page_body(tree: &UiTree, options: &SerializeOptions) -> String {
    let pad = |depth: usize| " ".repeat(options.indent * (depth + PAGE_BASE_DEPTH));
    let mut lines: Vec<String> = Vec::new();
    let mut open: Vec<(usize, &str)> = Vec::new();

    traverse(tree, None, |element, depth, _| {
        while let Some(&(open_depth, kind)) = open.last() {
            if open_depth < depth {
                break;
            }
            lines.push(format!("{}</{}>", pad(open_depth), kind));
            open.pop();
        }

        let props = serialize_props(&element.props, options);
        let attrs = if props.is_empty() {
            String::new()
        } else {
            format!(" {}", props)
        };

        if element.has_children() {
            lines.push(format!("{}<{}{}>", pad(depth), element.kind, attrs));
            open.push((depth, element.kind.as_str()));
        } else {
            lines.push(format!("{}<{}{} />", pad(depth), element.kind, attrs));
        }
    });

    while let Some((open_depth, kind)) = open.pop() {
        lines.push(format!("{}</{}>", pad(open_depth), kind));
    }

    lines.join("\n")
}
