//! Plain-text rendering of the Remix Page.

use std::fmt::Write;

use crate::page::session::{RemixPage, OUTPUT_SOFT_LIMIT};

pub fn input_counter(page: &RemixPage) -> String {
    format!("{} characters", page.input_len())
}

/// `N/280 characters`, with a trailing warning marker past the limit.
pub fn output_counter(page: &RemixPage) -> String {
    let counter = format!("{}/{OUTPUT_SOFT_LIMIT} characters", page.output_len());
    if page.output_over_limit() {
        format!("{counter} (!)")
    } else {
        counter
    }
}

pub fn remix_button(page: &RemixPage) -> String {
    let label = if page.is_loading() {
        "Remixing..."
    } else {
        "Remix"
    };
    if page.can_remix() {
        format!("[{label}]")
    } else {
        format!("[{label}] (disabled)")
    }
}

/// Renders the whole page. Sections mirror the editing surface top to bottom.
pub fn render(page: &RemixPage) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Content Remixer");
    let _ = writeln!(out);

    let _ = writeln!(out, "Prompts");
    for prompt in page.pills() {
        let marker = if prompt.id == page.selected_prompt_id() {
            '*'
        } else {
            ' '
        };
        if prompt.is_builtin() {
            let _ = writeln!(out, " {marker} {}  ({})", prompt.name, prompt.id);
        } else {
            let _ = writeln!(out, " {marker} {}  ({}) [x]", prompt.name, prompt.id);
        }
    }
    let _ = writeln!(out, "Instruction: {}", page.current_prompt());
    let _ = writeln!(out);

    let _ = writeln!(out, "Input Text");
    if page.input().is_empty() {
        let _ = writeln!(out, "  Paste your content here...");
    } else {
        for line in page.input().lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    let _ = writeln!(out, "{:>60}", input_counter(page));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", remix_button(page));

    if !page.error().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error: {}", page.error());
    }

    if !page.output().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Remixed Output{:>46}", output_counter(page));
        for line in page.output().lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    if let Some(draft) = page.draft() {
        let _ = writeln!(out);
        let _ = writeln!(out, "── Create New Prompt ──");
        let _ = writeln!(out, "Name: {}", draft.name);
        let _ = writeln!(out, "Instruction: {}", draft.content);
        let save = if page.can_save() {
            "[Save]"
        } else {
            "[Save] (disabled)"
        };
        let _ = writeln!(out, "{save} [Cancel]");
    }

    out
}
