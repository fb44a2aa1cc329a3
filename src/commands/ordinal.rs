use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::context::Context;
use crate::render::{Render, print_json};

pub fn run(ctx: &Context, event_id: &str, date: &str) -> Result<()> {
    let descriptor = ctx.event(event_id)?;
    let date = ctx.parse_date(date)?;
    let ordinal = ctx.engine().ordinal_up_to(descriptor, &date);

    if ctx.json {
        return print_json(&json!({
            "event": event_id,
            "date": date.to_string(),
            "ordinal": ordinal,
        }));
    }

    let limit = match descriptor.max_occurrences {
        0 => String::new(),
        max => format!(" (limit {max})").dimmed().to_string(),
    };
    println!(
        "{} has occurred {} times by {}{}",
        event_id.bold(),
        ordinal,
        date.render(),
        limit
    );
    Ok(())
}
