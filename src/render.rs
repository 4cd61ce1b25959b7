// DevFinder - render.rs
//
// Plain-text rendering of the filtered view for the terminal.
// Binary-side only; the library never formats output for humans.

use devfinder::app::state::AppState;
use devfinder::core::model::Record;
use std::io::{self, Write};

/// Print the result header, the active filter, and one line per person.
pub fn render_people<W: Write>(state: &AppState, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", state.status_message)?;
    writeln!(out, "{}", describe_filter(state))?;

    for record in state.visible_records() {
        writeln!(out, "  {}", describe_record(state, record))?;
    }
    out.flush()
}

/// Print every catalog tag with its selection state and logo, then any
/// selected tags the catalog does not know.
pub fn render_tags<W: Write>(state: &AppState, mut out: W) -> io::Result<()> {
    for tag in state.catalog.iter() {
        let mark = if state.is_tag_active(&tag.id) { 'x' } else { ' ' };
        match state.catalog.image_for(&tag.id) {
            Some(image) => writeln!(out, "  [{mark}] {:<12} {:<12} {image}", tag.id, tag.label)?,
            None => writeln!(out, "  [{mark}] {:<12} {}", tag.id, tag.label)?,
        }
    }
    for id in state.active_tags_in_catalog_order() {
        if !state.catalog.contains(id) {
            writeln!(out, "  [x] {id:<12} (not in catalog)")?;
        }
    }
    out.flush()
}

/// One-line summary of the current filter parameters.
fn describe_filter(state: &AppState) -> String {
    let filter = state.filter();
    let labels: Vec<&str> = state
        .active_tags_in_catalog_order()
        .into_iter()
        .map(|id| state.catalog.label_for(id))
        .collect();
    let languages = if labels.is_empty() {
        "(none)".to_string()
    } else {
        labels.join(", ")
    };

    if filter.search_term.is_empty() {
        format!("Languages: {languages} [{}]", filter.match_mode)
    } else {
        format!(
            "Languages: {languages} [{}] | name contains \"{}\"",
            filter.match_mode, filter.search_term
        )
    }
}

/// "Name [Label, Label]" using catalog labels for known tags.
fn describe_record(state: &AppState, record: &Record) -> String {
    let labels: Vec<&str> = record
        .language_tags()
        .iter()
        .map(|tag| state.catalog.label_for(tag))
        .collect();
    format!("{} [{}]", record.name(), labels.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use devfinder::core::catalog::load_builtin_catalog;
    use devfinder::core::model::{FilterParameters, MatchMode, RawLanguage, RawRecord};

    fn state() -> AppState {
        let catalog = load_builtin_catalog();
        let filter = FilterParameters::new(["java"], MatchMode::Any, "");
        let mut state = AppState::new(catalog, filter);
        state.on_dataset_loaded(vec![RawRecord {
            name: "Bruno".to_string(),
            picture: String::new(),
            programming_languages: ["Python", "Java", "Go"]
                .iter()
                .map(|l| RawLanguage {
                    language: l.to_string(),
                    extra: Default::default(),
                })
                .collect(),
            extra: Default::default(),
        }]);
        state
    }

    #[test]
    fn test_render_people() {
        let mut buf = Vec::new();
        render_people(&state(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "1 person(s) found\nLanguages: Java [any]\n  Bruno [go, Java, Python]\n"
        );
    }

    #[test]
    fn test_render_tags() {
        let mut state = state();
        state.set_active_tag("cobol", true);
        let mut buf = Vec::new();
        render_tags(&state, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("[x] java"));
        let python = text.lines().find(|l| l.contains("python")).unwrap();
        assert!(python.ends_with(state.catalog.image_for("python").unwrap()));
        assert!(text.contains("[ ] python"));
        assert!(text.contains("[x] cobol        (not in catalog)"));
    }
}
