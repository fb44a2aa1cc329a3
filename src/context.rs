//! Everything a command needs: configuration, the calendar and the events.

use std::path::PathBuf;

use almanac_core::config::AlmanacConfig;
use almanac_core::{
    CalendarAdapter, ConfiguredCalendar, Date, GregorianCalendar, InMemoryEventStore,
    RecurrenceDescriptor, RecurrenceEngine,
};
use anyhow::{Context as _, Result};

use crate::GlobalArgs;

pub struct Context {
    pub config: AlmanacConfig,
    pub calendar: Box<dyn CalendarAdapter>,
    pub store: InMemoryEventStore,
    pub events_path: PathBuf,
    pub json: bool,
}

impl Context {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config = load_config(args)?;

        let calendar_path = args.calendar.clone().or_else(|| config.calendar_path());
        let calendar: Box<dyn CalendarAdapter> = match &calendar_path {
            Some(path) => Box::new(
                ConfiguredCalendar::load(path)
                    .with_context(|| format!("Could not load calendar {}", path.display()))?,
            ),
            None => Box::new(GregorianCalendar),
        };

        let events_path = args.events.clone().unwrap_or_else(|| config.events_path());
        let store = InMemoryEventStore::load(&events_path)
            .with_context(|| format!("Could not load events from {}", events_path.display()))?;

        tracing::debug!(
            calendar = ?calendar_path,
            events = %events_path.display(),
            count = store.len(),
            "loaded almanac"
        );

        Ok(Context {
            config,
            calendar,
            store,
            events_path,
            json: args.json,
        })
    }

    pub fn engine(&self) -> RecurrenceEngine<'_> {
        RecurrenceEngine::new(self.calendar.as_ref(), &self.store).with_limits(self.config.engine)
    }

    pub fn event(&self, event_id: &str) -> Result<&RecurrenceDescriptor> {
        self.store.get(event_id).map_err(|e| {
            let available: Vec<_> = self.store.iter().map(|(id, _)| id).collect();
            if available.is_empty() {
                anyhow::anyhow!("{e}. No events in {}", self.events_path.display())
            } else {
                anyhow::anyhow!("{e}. Available: {}", available.join(", "))
            }
        })
    }

    /// Parse a command-line date and check it exists in the calendar.
    pub fn parse_date(&self, input: &str) -> Result<Date> {
        let date: Date = input.parse()?;
        if self.calendar.date_to_seconds(&date).is_none() {
            anyhow::bail!("{date} does not exist in this calendar");
        }
        Ok(date)
    }
}

pub fn load_config(args: &GlobalArgs) -> Result<AlmanacConfig> {
    let config = match &args.config {
        Some(path) => AlmanacConfig::load_from(path)?,
        None => AlmanacConfig::load()?,
    };
    Ok(config)
}
