use anyhow::Result;
use calgrid_core::notes::NoteBook;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::parse_date;

/// Show or set the free-text note for a day. Notes are local only; no
/// session needed.
pub fn run(date: &str, text: Option<&str>) -> Result<()> {
    let date = parse_date(date)?;
    let mut notebook = NoteBook::open_default()?;

    let text = match text {
        Some(text) => text.to_string(),
        None => {
            // No text argument: prompt, prefilled with the current note.
            // Submitting empty text removes it.
            let current = notebook.get(date).unwrap_or_default().to_string();
            Input::new()
                .with_prompt(format!("  Note for {}", date.format("%Y-%m-%d")))
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?
        }
    };

    if text.trim().is_empty() && notebook.has_note(date) {
        notebook.set(date, "")?;
        println!("  Note removed");
        return Ok(());
    }
    if text.trim().is_empty() {
        match notebook.get(date) {
            Some(note) => println!("  {}", note),
            None => println!("  {}", "No note".dimmed()),
        }
        return Ok(());
    }

    notebook.set(date, &text)?;
    println!("{}", format!("  Saved note for {}", date.format("%Y-%m-%d")).green());
    Ok(())
}
