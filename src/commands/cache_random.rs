use std::collections::BTreeMap;

use almanac_core::{Date, RepeatKind};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

use crate::context::Context;
use crate::render::print_json;

/// The part of an events file that holds one event's cache.
#[derive(Serialize)]
struct CacheSnippet<'a> {
    events: BTreeMap<&'a str, CachedOccurrences>,
}

#[derive(Serialize)]
struct CachedOccurrences {
    cached_random_occurrences: Vec<Date>,
}

pub fn run(ctx: &mut Context, event_id: &str, until: &str, write: bool) -> Result<()> {
    let until = ctx.parse_date(until)?;
    let descriptor = ctx.event(event_id)?;
    if descriptor.repeat != RepeatKind::Random {
        anyhow::bail!("'{event_id}' is not a random event");
    }
    let Some(dates) = ctx.engine().random_cache(descriptor, &until) else {
        anyhow::bail!("'{event_id}' has no random_config to draw from");
    };

    if write {
        let mut updated = descriptor.clone();
        updated.cached_random_occurrences = Some(dates.clone());
        ctx.store.insert(event_id, updated);
        ctx.store.save(&ctx.events_path)?;

        println!(
            "Cached {} occurrences of {} through {} in {}",
            dates.len(),
            event_id.bold(),
            until,
            ctx.events_path.display()
        );
        return Ok(());
    }

    if ctx.json {
        let dates: Vec<String> = dates.iter().map(|date| date.to_string()).collect();
        return print_json(&json!({
            "event": event_id,
            "until": until.to_string(),
            "cached_random_occurrences": dates,
        }));
    }

    let snippet = CacheSnippet {
        events: BTreeMap::from([(
            event_id,
            CachedOccurrences {
                cached_random_occurrences: dates,
            },
        )]),
    };
    print!("{}", toml::to_string_pretty(&snippet)?);
    Ok(())
}
