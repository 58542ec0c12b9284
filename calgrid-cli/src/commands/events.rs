use anyhow::Result;
use calgrid_core::date_range::DateRange;
use owo_colors::OwoColorize;

use crate::context::AppContext;
use crate::render::Render;

pub async fn run(from: Option<&str>, to: Option<&str>) -> Result<()> {
    let range = DateRange::from_args(from, to).map_err(|e| anyhow::anyhow!(e))?;
    let context = AppContext::load().await?;

    let mut instances: Vec<_> = context
        .coordinator
        .instances()
        .into_iter()
        .filter(|i| range.contains(&i.start))
        .collect();
    instances.sort_by_key(|i| i.start.to_utc());

    if instances.is_empty() {
        println!("{}", "No events in range".dimmed());
        return Ok(());
    }

    for instance in &instances {
        println!("{}", instance.render());
    }
    Ok(())
}
