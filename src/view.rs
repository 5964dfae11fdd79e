//! View composition: the grouped, filtered note structure for display.
//!
//! Pure derivation from (notes, palette, search text, selected day) to the
//! presentation structure; recomputed on every relevant change. A linear
//! scan is fine at expected volumes (hundreds of notes, not millions).

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::{Note, Tag};

/// Search and date filters applied when composing the view.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    /// Case-insensitive substring matched against title or content;
    /// empty matches everything
    pub search: String,
    /// Keep only notes created on this local calendar day
    pub day: Option<NaiveDate>,
}

/// One displayed tag group: the tag plus its pinned and unpinned notes,
/// each in newest-first order.
#[derive(Debug)]
pub struct TagGroup<'a> {
    pub tag: &'a Tag,
    pub pinned: Vec<&'a Note>,
    pub others: Vec<&'a Note>,
}

/// True when `ts` falls on calendar day `day` in time zone `tz`.
///
/// The same day definition is used for setting and applying the date filter;
/// mixing local and UTC days disagrees near midnight away from UTC.
pub fn falls_on_day<Tz: TimeZone>(ts: DateTime<Utc>, day: NaiveDate, tz: &Tz) -> bool {
    ts.with_timezone(tz).date_naive() == day
}

/// The local calendar day a note was created on.
pub fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

fn matches_search(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}

/// Composes the grouped view.
///
/// Groups follow palette order. A tag with no matching notes produces no
/// group at all; within a group, notes are partitioned into pinned and
/// others with their relative (newest-first) order preserved. An empty
/// result means the caller shows a placeholder instead.
pub fn compose_view<'a>(
    notes: &'a [Note],
    palette: &'a [Tag],
    filter: &ViewFilter,
) -> Vec<TagGroup<'a>> {
    let needle = filter.search.to_lowercase();

    palette
        .iter()
        .filter_map(|tag| {
            let matching: Vec<&Note> = notes
                .iter()
                .filter(|n| n.tag.matches_label(&tag.label))
                .filter(|n| matches_search(n, &needle))
                .filter(|n| match filter.day {
                    Some(day) => falls_on_day(n.created_at, day, &Local),
                    None => true,
                })
                .collect();

            if matching.is_empty() {
                return None;
            }

            let (pinned, others) = matching.into_iter().partition(|n| n.pinned);
            Some(TagGroup {
                tag,
                pinned,
                others,
            })
        })
        .collect()
}

/// Groups notes by the local calendar day they were created on, for the
/// textual calendar view. Days are ordered ascending.
pub fn notes_by_day(notes: &[Note]) -> BTreeMap<NaiveDate, Vec<&Note>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&Note>> = BTreeMap::new();
    for note in notes {
        by_day.entry(local_day(note.created_at)).or_default().push(note);
    }
    by_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_palette;
    use chrono::{Duration, FixedOffset};

    fn note(title: &str, content: &str, tag: Tag, pinned: bool) -> Note {
        let mut n = Note::new(title, content, tag, None).unwrap();
        n.pinned = pinned;
        n
    }

    fn work() -> Tag {
        Tag::new("Work", "#34a853")
    }

    fn personal() -> Tag {
        Tag::new("Personal", "#4285f4")
    }

    #[test]
    fn every_note_lands_in_exactly_one_group_and_partition() {
        let notes = vec![
            note("a", "x", work(), true),
            note("b", "y", work(), false),
            note("c", "z", personal(), false),
        ];
        let palette = default_palette();
        let groups = compose_view(&notes, &palette, &ViewFilter::default());

        let total: usize = groups.iter().map(|g| g.pinned.len() + g.others.len()).sum();
        assert_eq!(total, notes.len());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].tag.label, "Work");
        assert_eq!(groups[0].pinned.len(), 1);
        assert_eq!(groups[0].others.len(), 1);
        assert_eq!(groups[1].tag.label, "Personal");
    }

    #[test]
    fn empty_tags_produce_no_group() {
        let notes = vec![note("only", "one", work(), false)];
        let palette = default_palette();
        let groups = compose_view(&notes, &palette, &ViewFilter::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tag.label, "Work");
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let notes = vec![
            note("Buy milk", "2%", work(), false),
            note("Call mom", "tonight", work(), false),
        ];
        let palette = default_palette();

        for needle in ["milk", "MILK"] {
            let filter = ViewFilter {
                search: needle.to_string(),
                day: None,
            };
            let groups = compose_view(&notes, &palette, &filter);
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].others.len(), 1);
            assert_eq!(groups[0].others[0].title, "Buy milk");
        }

        // Content matches too.
        let filter = ViewFilter {
            search: "tonight".to_string(),
            day: None,
        };
        assert_eq!(compose_view(&notes, &palette, &filter)[0].others[0].title, "Call mom");
    }

    #[test]
    fn date_filter_uses_a_single_calendar_day_definition() {
        let ts: DateTime<Utc> = "2024-03-05T10:00:00Z".parse().unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

        assert!(falls_on_day(ts, day, &Utc));
        assert!(!falls_on_day(ts, next, &Utc));

        // 23:30 UTC is already the next day at UTC+1.
        let late: DateTime<Utc> = "2024-03-05T23:30:00Z".parse().unwrap();
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert!(falls_on_day(late, next, &plus_one));
        assert!(!falls_on_day(late, day, &plus_one));
    }

    #[test]
    fn date_filter_keeps_only_notes_from_that_local_day() {
        let today = note("now", "x", work(), false);
        let mut yesterday = note("then", "y", work(), false);
        yesterday.created_at -= Duration::days(2);

        let notes = vec![today, yesterday];
        let palette = default_palette();
        let filter = ViewFilter {
            search: String::new(),
            day: Some(local_day(notes[0].created_at)),
        };

        let groups = compose_view(&notes, &palette, &filter);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].others.len(), 1);
        assert_eq!(groups[0].others[0].title, "now");
    }

    #[test]
    fn relative_order_is_preserved_within_partitions() {
        // Stored newest-first; composition must not reorder.
        let newest = note("newest", "x", work(), false);
        let older = note("older", "y", work(), false);
        let notes = vec![newest, older];
        let palette = default_palette();

        let groups = compose_view(&notes, &palette, &ViewFilter::default());
        let titles: Vec<_> = groups[0].others.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["newest", "older"]);
    }

    #[test]
    fn calendar_grouping_uses_local_days() {
        let today = note("a", "x", work(), false);
        let mut past = note("b", "y", personal(), false);
        past.created_at -= Duration::days(3);

        let notes = vec![today.clone(), past.clone()];
        let by_day = notes_by_day(&notes);
        assert_eq!(by_day.len(), 2);
        assert_eq!(by_day[&local_day(today.created_at)][0].title, "a");
        assert_eq!(by_day[&local_day(past.created_at)][0].title, "b");
    }
}
