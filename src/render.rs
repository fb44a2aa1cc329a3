//! Terminal rendering for almanac types.
//!
//! Extension traits that add colored output to almanac-core types using
//! owo_colors, plus the JSON printer shared by `--json`.

use almanac_core::Date;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Date {
    fn render(&self) -> String {
        let day = self.start_of_day().to_string();
        match (self.hour, self.minute) {
            (Some(hour), Some(minute)) => {
                format!("{} {}", day, format!("{hour:02}:{minute:02}").dimmed())
            }
            _ => day,
        }
    }
}

/// `yes`/`no` in green/red.
pub fn render_verdict(occurs: bool) -> String {
    if occurs {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
