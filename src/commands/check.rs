use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::context::Context;
use crate::render::print_json;

pub fn run(ctx: &Context) -> Result<()> {
    let errors = ctx.store.validate(ctx.calendar.as_ref());

    if ctx.json {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        print_json(&json!({
            "events": ctx.store.len(),
            "errors": messages,
        }))?;
    } else if errors.is_empty() {
        println!(
            "{} {} events in {}",
            "✓".green(),
            ctx.store.len(),
            ctx.events_path.display()
        );
    } else {
        for error in &errors {
            println!("  {} {}", "✗".red(), error);
        }
    }

    if !errors.is_empty() {
        anyhow::bail!("{} of {} events are invalid", errors.len(), ctx.store.len());
    }
    Ok(())
}
