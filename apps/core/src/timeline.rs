//! History timeline and acknowledgements list.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::dates::{format_short_date, parse_date};
use crate::model::{HistoryEvent, ThanksEntry};

pub const EMPTY_MESSAGE: &str = "No history yet";
pub const NODE_STAGGER_SECONDS: f64 = 0.12;
const UNKNOWN_NAME: &str = "Unknown";
const TRUSTED_TAG: &str = "[trusted]";

/// Events oldest first. Events whose date does not parse keep their relative
/// order after all dated ones.
pub fn sorted_events(events: &[HistoryEvent]) -> Vec<&HistoryEvent> {
    let mut keyed: Vec<(Option<NaiveDateTime>, &HistoryEvent)> = events
        .iter()
        .map(|event| (parse_date(&event.date), event))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, event)| event).collect()
}

/// `Jan 5, 2024`, or the raw string when it does not parse.
pub fn event_date_label(event: &HistoryEvent) -> String {
    parse_date(&event.date).map_or_else(|| event.date.clone(), format_short_date)
}

pub fn category_class(event: &HistoryEvent) -> String {
    format!("tl-dot tl-cat-{}", event.category)
}

pub fn node_animation_delay(index: usize) -> String {
    format!("{:.2}s", index as f64 * NODE_STAGGER_SECONDS)
}

/// One acknowledgement as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThanksLine {
    pub name: String,
    pub trusted: bool,
    pub contribution: Option<String>,
}

impl ThanksLine {
    pub fn from_entry(entry: &ThanksEntry) -> Self {
        Self {
            name: entry
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            trusted: entry.trusted.unwrap_or(false),
            contribution: entry.contribution.clone().filter(|c| !c.is_empty()),
        }
    }

    pub const fn trusted_tag() -> &'static str {
        TRUSTED_TAG
    }

    /// `Name [trusted] - contribution`
    pub fn full_text(&self) -> String {
        let mut text = self.name.clone();
        if self.trusted {
            text.push(' ');
            text.push_str(TRUSTED_TAG);
        }
        if let Some(contribution) = &self.contribution {
            text.push_str(" - ");
            text.push_str(contribution);
        }
        text
    }
}

/// Longest rendered line first; equal lengths keep source order.
pub fn sorted_thanks(thanks: &[ThanksEntry]) -> Vec<ThanksLine> {
    let mut lines: Vec<_> = thanks.iter().map(ThanksLine::from_entry).collect();
    lines.sort_by_cached_key(|line| std::cmp::Reverse(line.full_text().chars().count()));
    lines
}

#[cfg(test)]
mod tests {
    use super::{
        category_class, event_date_label, node_animation_delay, sorted_events, sorted_thanks,
        ThanksLine,
    };
    use crate::model::{HistoryEvent, ThanksEntry};

    fn event(date: &str, title: &str) -> HistoryEvent {
        HistoryEvent {
            date: date.to_string(),
            category: "build".to_string(),
            title: title.to_string(),
            description: String::new(),
        }
    }

    fn thanks(name: &str, trusted: bool, contribution: Option<&str>) -> ThanksEntry {
        ThanksEntry {
            name: Some(name.to_string()),
            trusted: Some(trusted),
            contribution: contribution.map(str::to_string),
        }
    }

    #[test]
    fn events_render_oldest_first() {
        let events = vec![event("2023-05-01", "later"), event("2021-01-01", "earlier")];
        let titles: Vec<_> = sorted_events(&events).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["earlier", "later"]);
    }

    #[test]
    fn undated_events_go_last_in_order() {
        let events = vec![
            event("tbd", "a"),
            event("2022-02-02", "b"),
            event("", "c"),
            event("2020-02-02", "d"),
        ];
        let titles: Vec<_> = sorted_events(&events).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["d", "b", "a", "c"]);
    }

    #[test]
    fn event_markup_helpers() {
        let e = event("2024-01-05", "t");
        assert_eq!(event_date_label(&e), "Jan 5, 2024");
        assert_eq!(event_date_label(&event("tbd", "t")), "tbd");
        assert_eq!(category_class(&e), "tl-dot tl-cat-build");
        assert_eq!(node_animation_delay(3), "0.36s");
    }

    #[test]
    fn thanks_sort_by_rendered_length() {
        let entries = vec![
            thanks("Bo", false, None),
            thanks("Al", true, Some("hosting")),
            thanks("Cy", false, Some("art")),
            thanks("Di", false, None),
        ];

        let names: Vec<_> = sorted_thanks(&entries)
            .into_iter()
            .map(|line| line.name)
            .collect();
        assert_eq!(names, ["Al", "Cy", "Bo", "Di"]);
    }

    #[test]
    fn thanks_text_includes_tag_and_contribution() {
        let line = ThanksLine::from_entry(&thanks("Al", true, Some("hosting")));
        assert_eq!(line.full_text(), "Al [trusted] - hosting");

        let anonymous = ThanksLine::from_entry(&ThanksEntry::default());
        assert_eq!(anonymous.full_text(), "Unknown");
        assert!(!anonymous.trusted);
    }
}
