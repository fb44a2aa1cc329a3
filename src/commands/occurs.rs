use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::context::Context;
use crate::render::{Render, print_json, render_verdict};

pub fn run(ctx: &Context, event_id: &str, date: &str) -> Result<()> {
    let descriptor = ctx.event(event_id)?;
    let date = ctx.parse_date(date)?;
    let occurs = ctx.engine().occurs_on(descriptor, &date);

    if ctx.json {
        return print_json(&json!({
            "event": event_id,
            "date": date.to_string(),
            "occurs": occurs,
        }));
    }

    println!("{} {} {}", event_id.bold(), date.render(), render_verdict(occurs));
    Ok(())
}
