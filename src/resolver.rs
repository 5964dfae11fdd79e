//! Tag input resolution.
//!
//! A single text field supports both picking an existing tag and defining a
//! new one inline with a chosen color. The resolver reconciles the typed
//! text against the palette on every change; it is pure and keeps no state
//! of its own.

use crate::Tag;

/// The outcome of resolving typed tag input against the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSelection {
    /// Palette entries whose label contains the typed text, shown as
    /// suggestions (not the selection itself)
    pub suggestions: Vec<Tag>,
    /// The active selection
    pub selected: Tag,
}

/// Resolves typed text `input` and chosen color `color` against `palette`.
///
/// An exact (case-insensitive) label match selects the existing tag, so its
/// established color wins over `color`. Otherwise non-empty input selects a
/// synthesized tag which is only committed to the palette upon successful
/// note creation. Empty input leaves the prior selection unchanged.
pub fn resolve_tag_input(palette: &[Tag], input: &str, color: &str, prior: &Tag) -> TagSelection {
    let needle = input.to_lowercase();
    let suggestions: Vec<Tag> = palette
        .iter()
        .filter(|t| t.label.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let exact = palette.iter().find(|t| t.matches_label(input));
    let selected = match exact {
        Some(tag) => tag.clone(),
        None if !input.trim().is_empty() => Tag::new(input.trim(), color),
        None => prior.clone(),
    };

    TagSelection {
        suggestions,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_palette;

    #[test]
    fn filters_suggestions_case_insensitively() {
        let palette = default_palette();
        let prior = palette[0].clone();
        let sel = resolve_tag_input(&palette, "OR", "#888888", &prior);
        let labels: Vec<_> = sel.suggestions.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Work"]);
    }

    #[test]
    fn exact_match_wins_over_chosen_color() {
        let palette = default_palette();
        let prior = palette[3].clone();
        let sel = resolve_tag_input(&palette, "urgent", "#000000", &prior);
        assert_eq!(sel.selected.label, "Urgent");
        assert_eq!(sel.selected.color, "#ea4335");
    }

    #[test]
    fn novel_input_synthesizes_a_tag_with_the_chosen_color() {
        let palette = default_palette();
        let prior = palette[0].clone();
        let sel = resolve_tag_input(&palette, "  Reading ", "#112233", &prior);
        assert_eq!(sel.selected, Tag::new("Reading", "#112233"));
        assert!(sel.suggestions.is_empty());
    }

    #[test]
    fn empty_input_keeps_the_prior_selection() {
        let palette = default_palette();
        let prior = Tag::new("Reading", "#112233");
        let sel = resolve_tag_input(&palette, "   ", "#000000", &prior);
        assert_eq!(sel.selected, prior);
    }

    #[test]
    fn empty_input_suggests_the_whole_palette() {
        let palette = default_palette();
        let prior = palette[0].clone();
        let sel = resolve_tag_input(&palette, "", "#888888", &prior);
        assert_eq!(sel.suggestions.len(), palette.len());
    }
}
