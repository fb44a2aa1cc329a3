use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::context::Context;
use crate::render::print_json;

pub fn run(ctx: &Context, from: &str, to: &str, cap: usize) -> Result<()> {
    let from = ctx.parse_date(from)?;
    let to = ctx.parse_date(to)?;
    let entries = ctx.engine().agenda(ctx.store.iter(), &from, &to, cap);

    if ctx.json {
        let entries: Vec<_> = entries
            .iter()
            .map(|entry| json!({ "date": entry.date.to_string(), "event": entry.event_id }))
            .collect();
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group by day
    let mut current_day: Option<String> = None;
    for entry in &entries {
        let day = entry.date.start_of_day().to_string();
        if current_day.as_ref() != Some(&day) {
            if current_day.is_some() {
                println!();
            }
            println!("{}", day.bold());
            current_day = Some(day);
        }

        let time = match (entry.date.hour, entry.date.minute) {
            (Some(hour), Some(minute)) => format!("{:>7}", format!("{hour:02}:{minute:02}")),
            _ => "all-day".to_string(),
        };
        println!("  {} {}", time.dimmed(), entry.event_id);
    }

    Ok(())
}
