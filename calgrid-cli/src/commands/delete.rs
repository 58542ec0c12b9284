use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::create_spinner;
use crate::context::AppContext;

pub async fn run(id: &str, yes: bool) -> Result<()> {
    let mut context = AppContext::load().await?;

    let event = match context.coordinator.event(id) {
        Some(event) => event.clone(),
        None => anyhow::bail!("Event '{}' not found", id),
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled");
            return Ok(());
        }
    }

    let spinner = create_spinner(format!("Deleting {}", event.title));
    let result = context.coordinator.delete(id).await;
    spinner.finish_and_clear();

    result?;
    println!("{}", format!("  Deleted {}", event.title).green());
    Ok(())
}
