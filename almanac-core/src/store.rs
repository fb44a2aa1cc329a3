//! Event stores: where linked events look up each other's schedules.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarAdapter;
use crate::descriptor::RecurrenceDescriptor;
use crate::error::{AlmanacError, AlmanacResult};

/// Lookup of recurrence descriptors by event id.
pub trait EventStore {
    fn descriptor(&self, event_id: &str) -> Option<&RecurrenceDescriptor>;
}

/// Events file layout: one `[events.<id>]` table per event.
#[derive(Debug, Default, Serialize, Deserialize)]
struct EventsFile {
    #[serde(default)]
    events: BTreeMap<String, RecurrenceDescriptor>,
}

/// An [`EventStore`] held entirely in memory, iterated in id order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: BTreeMap<String, RecurrenceDescriptor>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> AlmanacResult<Self> {
        let file: EventsFile =
            toml::from_str(content).map_err(|e| AlmanacError::Parse(e.to_string()))?;
        Ok(InMemoryEventStore {
            events: file.events,
        })
    }

    /// Load an events file; a missing file is an empty store.
    pub fn load(path: &Path) -> AlmanacResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "events file not found, starting empty");
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> AlmanacResult<()> {
        let file = EventsFile {
            events: self.events.clone(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| AlmanacError::Parse(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Insert or replace an event, returning the previous descriptor.
    pub fn insert(
        &mut self,
        event_id: impl Into<String>,
        descriptor: RecurrenceDescriptor,
    ) -> Option<RecurrenceDescriptor> {
        self.events.insert(event_id.into(), descriptor)
    }

    pub fn remove(&mut self, event_id: &str) -> Option<RecurrenceDescriptor> {
        self.events.remove(event_id)
    }

    pub fn get(&self, event_id: &str) -> AlmanacResult<&RecurrenceDescriptor> {
        self.events
            .get(event_id)
            .ok_or_else(|| AlmanacError::EventNotFound(event_id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecurrenceDescriptor)> {
        self.events.iter().map(|(id, d)| (id.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Validate every event, plus that each link points at a stored event.
    /// Returns one error per bad event.
    pub fn validate(&self, calendar: &dyn CalendarAdapter) -> Vec<AlmanacError> {
        self.iter()
            .filter_map(|(id, descriptor)| {
                if let Err(e) = descriptor.validate(id, calendar) {
                    return Some(e);
                }
                let link = descriptor.linked_event.as_ref()?;
                (!self.events.contains_key(&link.event_id)).then(|| {
                    AlmanacError::descriptor(
                        id,
                        format!("linked event '{}' does not exist", link.event_id),
                    )
                })
            })
            .collect()
    }
}

impl EventStore for InMemoryEventStore {
    fn descriptor(&self, event_id: &str) -> Option<&RecurrenceDescriptor> {
        self.events.get(event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::descriptor::RepeatKind;
    use crate::testing::fixture_calendar;
    use pretty_assertions::assert_eq;

    const EVENTS: &str = r#"
[events.midwinter]
start_date = { year = 1492, month = 11, day = 21 }
repeat = "yearly"

[events.feast]
start_date = { year = 1492, month = 11, day = 21 }
linked_event = { event_id = "midwinter", offset_days = 3 }

[events.orphan]
start_date = { year = 1492, month = 0, day = 1 }
linked_event = { event_id = "nobody" }
"#;

    #[test]
    fn test_load_from_toml() {
        let store = InMemoryEventStore::from_toml_str(EVENTS).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.descriptor("midwinter").unwrap().repeat, RepeatKind::Yearly);
        assert_eq!(
            store.get("feast").unwrap().linked_event.as_ref().unwrap().offset_days,
            3
        );
        assert!(matches!(store.get("missing"), Err(AlmanacError::EventNotFound(_))));
    }

    #[test]
    fn test_validate_reports_dangling_links() {
        let store = InMemoryEventStore::from_toml_str(EVENTS).unwrap();
        let errors = store.validate(&fixture_calendar());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("orphan"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/events.toml");

        let mut store = InMemoryEventStore::new();
        store.insert(
            "market",
            RecurrenceDescriptor::new(Date::new(1492, 3, 1), RepeatKind::Weekly).every(2),
        );
        store.save(&path).unwrap();

        let reloaded = InMemoryEventStore::load(&path).unwrap();
        assert_eq!(reloaded.get("market").unwrap(), store.get("market").unwrap());

        let missing = InMemoryEventStore::load(&dir.path().join("none.toml")).unwrap();
        assert!(missing.is_empty());

        store.remove("market");
        assert!(store.get("market").is_err());
    }
}
