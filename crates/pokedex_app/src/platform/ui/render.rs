use std::fmt::Write;

use pokedex_core::{DetailViewModel, ListViewModel, Phase};

use super::constants::*;

/// Renders the list screen: a title, the search line and one row per match.
pub fn render_list(view: &ListViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{LIST_TITLE}");
    if !view.query.trim().is_empty() {
        let _ = writeln!(
            out,
            "Search: \"{}\" ({} of {} loaded)",
            view.query,
            view.rows.len(),
            view.loaded
        );
    }

    if let Some(message) = &view.error_message {
        let _ = writeln!(out, "{message}");
        return out;
    }
    if view.is_loading && view.loaded == 0 {
        let _ = writeln!(out, "Loading...");
        return out;
    }
    if view.rows.is_empty() {
        let _ = writeln!(out, "{NO_MATCHES}");
        return out;
    }

    for entry in &view.rows {
        let _ = writeln!(out, "{INDENT}{}", capitalize(&entry.name));
    }
    if view.has_more {
        let _ = writeln!(
            out,
            "Showing {} of {}; use --offset for more.",
            view.loaded, view.count
        );
    }
    out
}

/// Renders the detail screen. Partial views render what is known so far.
pub fn render_detail(view: &DetailViewModel) -> String {
    let mut out = String::new();

    let Some(display_name) = &view.display_name else {
        if let Some(message) = &view.error_message {
            let _ = writeln!(out, "{message}");
        } else if view.is_loading {
            let _ = writeln!(out, "Loading {}...", capitalize(&view.name));
        } else {
            let _ = writeln!(out, "No details available for {}.", capitalize(&view.name));
        }
        return out;
    };

    match view.id {
        Some(id) => {
            let _ = writeln!(out, "{} #{id}", capitalize(display_name));
        }
        None => {
            let _ = writeln!(out, "{}", capitalize(display_name));
        }
    }
    if let (Some(height), Some(weight)) = (view.height, view.weight) {
        let _ = writeln!(
            out,
            "Height: {} m  Weight: {} kg",
            tenths(height),
            tenths(weight)
        );
    }

    if !view.sprite_urls.is_empty() {
        section(&mut out, SECTION_SPRITES);
        for url in &view.sprite_urls {
            let _ = writeln!(out, "{INDENT}{url}");
        }
    }

    section(&mut out, SECTION_ENTRY);
    let entry = match &view.pokedex_entry {
        Some(text) => text.as_str(),
        None if view.is_loading => "Loading entry...",
        None => "No Pokedex entry available.",
    };
    let _ = writeln!(out, "{INDENT}{entry}");

    if !view.type_names.is_empty() {
        section(&mut out, SECTION_TYPES);
        let _ = writeln!(out, "{INDENT}{}", join_capitalized(&view.type_names, ", "));
    }
    if !view.effective_against.is_empty() {
        section(&mut out, SECTION_EFFECTIVE);
        let _ = writeln!(
            out,
            "{INDENT}{}",
            join_capitalized(&view.effective_against, ", ")
        );
    }
    if !view.weak_against.is_empty() {
        section(&mut out, SECTION_WEAK);
        let _ = writeln!(out, "{INDENT}{}", join_capitalized(&view.weak_against, ", "));
    }
    if view.evolution_names.len() > 1 {
        section(&mut out, SECTION_EVOLUTION);
        let _ = writeln!(
            out,
            "{INDENT}{}",
            join_capitalized(&view.evolution_names, " -> ")
        );
    }
    if !view.moves.is_empty() {
        section(&mut out, SECTION_MOVES);
        for row in &view.moves {
            let _ = writeln!(
                out,
                "{INDENT}[{}] {}",
                capitalize(&row.type_name),
                capitalize(&row.name)
            );
        }
    }

    if view.phase == Phase::Loading {
        let _ = writeln!(out, "\nStill loading...");
    }
    out
}

/// Capitalizes every word; hyphens and whitespace start a new word.
pub fn capitalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch == '-' || ch.is_whitespace();
    }
    out
}

fn join_capitalized(names: &[String], separator: &str) -> String {
    names
        .iter()
        .map(|name| capitalize(name))
        .collect::<Vec<_>>()
        .join(separator)
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}");
}

/// API heights are decimetres and weights hectograms.
fn tenths(value: u32) -> String {
    format!("{}.{}", value / 10, value % 10)
}
