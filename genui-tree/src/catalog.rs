//! The closed set of component kinds the project generator can emit.
//!
//! The tree keeps `type` as an opaque string; a kind only becomes a
//! [`ComponentKind`] here, when a matching template exists. Adding a kind means
//! adding a variant, a name and a template file.

/// Component kinds with a source template
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    Badge,
    Button,
    Card,
    Checkbox,
    Divider,
    Form,
    Grid,
    Heading,
    Input,
    Radio,
    Rating,
    Select,
    Stack,
    Switch,
    Text,
    Textarea,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 16] = [
        ComponentKind::Badge,
        ComponentKind::Button,
        ComponentKind::Card,
        ComponentKind::Checkbox,
        ComponentKind::Divider,
        ComponentKind::Form,
        ComponentKind::Grid,
        ComponentKind::Heading,
        ComponentKind::Input,
        ComponentKind::Radio,
        ComponentKind::Rating,
        ComponentKind::Select,
        ComponentKind::Stack,
        ComponentKind::Switch,
        ComponentKind::Text,
        ComponentKind::Textarea,
    ];

    /// Exact (case-sensitive) lookup of a tree `type`
    pub fn from_name(name: &str) -> Option<Self> {
        ComponentKind::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Badge => "Badge",
            ComponentKind::Button => "Button",
            ComponentKind::Card => "Card",
            ComponentKind::Checkbox => "Checkbox",
            ComponentKind::Divider => "Divider",
            ComponentKind::Form => "Form",
            ComponentKind::Grid => "Grid",
            ComponentKind::Heading => "Heading",
            ComponentKind::Input => "Input",
            ComponentKind::Radio => "Radio",
            ComponentKind::Rating => "Rating",
            ComponentKind::Select => "Select",
            ComponentKind::Stack => "Stack",
            ComponentKind::Switch => "Switch",
            ComponentKind::Text => "Text",
            ComponentKind::Textarea => "Textarea",
        }
    }

    /// Lower-cased name, used as the component's file stem
    pub fn file_stem(&self) -> String {
        self.name().to_lowercase()
    }

    /// Path of the emitted component source, relative to the project root
    pub fn source_path(&self) -> String {
        format!("components/ui/{}.tsx", self.file_stem())
    }

    pub fn template(&self) -> &'static str {
        match self {
            ComponentKind::Badge => include_str!("../templates/components/badge.tsx"),
            ComponentKind::Button => include_str!("../templates/components/button.tsx"),
            ComponentKind::Card => include_str!("../templates/components/card.tsx"),
            ComponentKind::Checkbox => include_str!("../templates/components/checkbox.tsx"),
            ComponentKind::Divider => include_str!("../templates/components/divider.tsx"),
            ComponentKind::Form => include_str!("../templates/components/form.tsx"),
            ComponentKind::Grid => include_str!("../templates/components/grid.tsx"),
            ComponentKind::Heading => include_str!("../templates/components/heading.tsx"),
            ComponentKind::Input => include_str!("../templates/components/input.tsx"),
            ComponentKind::Radio => include_str!("../templates/components/radio.tsx"),
            ComponentKind::Rating => include_str!("../templates/components/rating.tsx"),
            ComponentKind::Select => include_str!("../templates/components/select.tsx"),
            ComponentKind::Stack => include_str!("../templates/components/stack.tsx"),
            ComponentKind::Switch => include_str!("../templates/components/switch.tsx"),
            ComponentKind::Text => include_str!("../templates/components/text.tsx"),
            ComponentKind::Textarea => include_str!("../templates/components/textarea.tsx"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        assert_eq!(ComponentKind::from_name("Card"), Some(ComponentKind::Card));
        assert_eq!(ComponentKind::from_name("card"), None);
        assert_eq!(ComponentKind::from_name("Metric"), None);
    }

    #[test]
    fn every_template_exports_its_component() {
        for kind in ComponentKind::ALL {
            let export = format!("export function {}(", kind.name());
            assert!(
                kind.template().contains(&export),
                "template for {} does not export it",
                kind.name()
            );
            assert!(kind.template().starts_with("\"use client\";"));
        }
    }

    #[test]
    fn all_is_sorted_by_name() {
        let names: Vec<&str> = ComponentKind::ALL.iter().map(|k| k.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
