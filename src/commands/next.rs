use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::context::Context;
use crate::render::{Render, print_json};

pub fn run(ctx: &Context, event_id: &str, date: &str) -> Result<()> {
    let descriptor = ctx.event(event_id)?;
    let after = ctx.parse_date(date)?;
    let engine = ctx.engine();
    let next = engine.next_occurrence(descriptor, &after);

    if ctx.json {
        return print_json(&json!({
            "event": event_id,
            "after": after.to_string(),
            "next": next.map(|date| date.to_string()),
        }));
    }

    match next {
        Some(date) => println!("{} {}", event_id.bold(), date.render()),
        None => println!(
            "{}",
            format!(
                "No occurrence of {} within {} days after {}",
                event_id,
                engine.limits().lookahead_days,
                after
            )
            .dimmed()
        ),
    }
    Ok(())
}
