//! Venue aggregation: collapsing a list of venues into a compact,
//! human-readable phrase such as `"2 Picturehouses, 5 ODEONs, & Rio"`.
//!
//! Long lists are condensed in two stages: chain venues sharing a
//! `group_name` collapse into one counted entry, and anything still over
//! the display cap is folded into a trailing `"<N> more"` entry. Each
//! entry remembers how many real venues it stands for, so callers can
//! always recover the true venue count from the rendered list.

use std::collections::BTreeMap;

use crate::domain::catalogue::Venue;
use crate::domain::text::{html_escape, join_phrase, pluralize};

/// Maximum entries in a rendered venue list. Beyond this, chain grouping
/// and then `"<N> more"` truncation kick in.
pub const MAX_DISPLAY_ITEMS: usize = 7;

/// One entry in a rendered venue list.
///
/// `venue_count` tracks how many real venues this entry represents: 1 for
/// a named venue, the group size for a collapsed chain entry, and the sum
/// of everything folded away for a `"<N> more"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub text: String,
    pub venue_count: usize,
}

impl DisplayItem {
    fn single(text: &str) -> Self {
        DisplayItem { text: text.to_string(), venue_count: 1 }
    }
}

/// Aggregate venues into an ordered list of display items.
///
/// Input venues must already be deduplicated by identity; ids that missed
/// the venue table are expected to have been dropped by the caller.
pub fn aggregate(venues: &[&Venue]) -> Vec<DisplayItem> {
    let mut items = if venues.len() <= MAX_DISPLAY_ITEMS {
        venues.iter().map(|v| DisplayItem::single(&v.name)).collect()
    } else {
        grouped_by_chain(venues)
    };

    // Final, authoritative order: lexical by display text.
    items.sort_by(|a, b| a.text.cmp(&b.text));

    if items.len() > MAX_DISPLAY_ITEMS {
        let folded: usize =
            items[MAX_DISPLAY_ITEMS - 1..].iter().map(|i| i.venue_count).sum();
        items.truncate(MAX_DISPLAY_ITEMS - 1);
        items.push(DisplayItem {
            text: format!("{} more", folded),
            venue_count: folded,
        });
    }

    items
}

/// Collapse venues sharing a chain `group_name` of size >= 2 into one
/// counted entry; singleton groups and ungrouped venues stay individual.
fn grouped_by_chain(venues: &[&Venue]) -> Vec<DisplayItem> {
    let mut chains: BTreeMap<&str, Vec<&Venue>> = BTreeMap::new();
    let mut ungrouped: Vec<&Venue> = Vec::new();

    for venue in venues {
        match venue.group_name.as_deref() {
            Some(group) if !group.is_empty() => {
                chains.entry(group).or_default().push(venue);
            }
            _ => ungrouped.push(venue),
        }
    }

    let mut items: Vec<DisplayItem> = Vec::new();
    for (group, members) in &chains {
        if members.len() >= 2 {
            items.push(DisplayItem {
                text: format!("{} {}", members.len(), pluralize(group)),
                venue_count: members.len(),
            });
        } else {
            items.push(DisplayItem::single(&members[0].name));
        }
    }

    ungrouped.sort_by(|a, b| a.name.cmp(&b.name));
    items.extend(ungrouped.into_iter().map(|v| DisplayItem::single(&v.name)));
    items
}

/// Render display items as a plain-text phrase.
pub fn render_plain(items: &[DisplayItem]) -> String {
    join_phrase(&items.iter().map(|i| i.text.clone()).collect::<Vec<_>>())
}

/// Render display items as an HTML phrase, each name escaped and wrapped
/// in a styling span.
pub fn render_html(items: &[DisplayItem]) -> String {
    join_phrase(
        &items
            .iter()
            .map(|i| format!(r#"<span class="venue-name">{}</span>"#, html_escape(&i.text)))
            .collect::<Vec<_>>(),
    )
}
