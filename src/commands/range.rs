use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::context::Context;
use crate::render::{Render, print_json};

pub fn run(ctx: &Context, event_id: &str, from: &str, to: &str, cap: usize) -> Result<()> {
    let descriptor = ctx.event(event_id)?;
    let from = ctx.parse_date(from)?;
    let to = ctx.parse_date(to)?;
    let dates = ctx.engine().occurrences_in_range(descriptor, &from, &to, cap);

    if ctx.json {
        let dates: Vec<String> = dates.iter().map(|date| date.to_string()).collect();
        return print_json(&json!({
            "event": event_id,
            "from": from.to_string(),
            "to": to.to_string(),
            "occurrences": dates,
        }));
    }

    if dates.is_empty() {
        println!("{}", "No occurrences found".dimmed());
        return Ok(());
    }

    println!("{}", event_id.bold());
    for date in &dates {
        println!("  {}", date.render());
    }
    if dates.len() == cap {
        println!("{}", format!("  (stopped at {cap}, use --cap for more)").dimmed());
    }
    Ok(())
}
