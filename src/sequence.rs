//! Event and photo ordering, filtering and ID assignment.
//!
//! For one library, [`sequence_library`] turns the unordered event albums
//! into a plan:
//!
//! 1. Photos inside each event are sorted by capture instant.
//! 2. Events without any resolvable photo are dropped.
//! 3. Events are sorted by their earliest photo.
//! 4. Events whose date (earliest photo, local time) falls outside the
//!    [`DateRange`] are dropped.
//! 5. Surviving events and their photos get IDs from [`IdCounters`].
//!
//! All sorts are stable: equal capture instants keep catalog order. The
//! counters are shared across libraries, so IDs stay dense and unique for
//! the whole run, and dropped events consume none.

use crate::catalog::{EVENT_ALBUM, Library, Photo};
use crate::metadata::TitleFilter;
use crate::timestamp::Normalizer;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

/// Inclusive date range on the event date. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Last event and photo IDs handed out in this run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdCounters {
    pub events: u64,
    pub photos: u64,
}

impl IdCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_event(&mut self) -> u64 {
        self.events += 1;
        self.events
    }

    fn next_photo(&mut self) -> u64 {
        self.photos += 1;
        self.photos
    }
}

/// An event selected for export, with its photos in export order.
#[derive(Debug, Clone)]
pub struct PlannedEvent<'a> {
    pub id: u64,
    /// Cleaned event name, possibly empty.
    pub title: String,
    /// Local date of the earliest photo.
    pub date: NaiveDate,
    /// Photos exported by earlier events in this run.
    pub photos_before: u64,
    pub photos: Vec<PlannedPhoto<'a>>,
}

#[derive(Debug, Clone)]
pub struct PlannedPhoto<'a> {
    pub id: u64,
    /// 1-based position inside the event.
    pub seq: usize,
    pub captured: NaiveDateTime,
    /// Cleaned caption, possibly empty.
    pub title: String,
    pub photo: Photo<'a>,
}

/// Order, filter and number the events of one library.
pub fn sequence_library<'a>(
    library: &'a Library,
    titles: &TitleFilter,
    normalizer: &Normalizer,
    range: &DateRange,
    ids: &mut IdCounters,
) -> Vec<PlannedEvent<'a>> {
    let mut events: Vec<(String, Vec<Photo<'a>>)> = library
        .albums_of_type(EVENT_ALBUM)
        .into_iter()
        .filter_map(|album| {
            let mut photos = album.photos();
            if photos.is_empty() {
                debug!(event = album.name(), "skipping event without photos");
                return None;
            }
            photos.sort_by_key(|p| p.capture_offset().seconds());
            Some((album.name().to_string(), photos))
        })
        .collect();
    events.sort_by_key(|(_, photos)| photos[0].capture_offset().seconds());

    let mut planned = Vec::new();
    for (name, photos) in events {
        let date = normalizer.local(photos[0].capture_offset()).date();
        if !range.contains(date) {
            debug!(event = %name, %date, "skipping event outside date range");
            continue;
        }

        let photos_before = ids.photos;
        let photos: Vec<PlannedPhoto<'a>> = photos
            .into_iter()
            .enumerate()
            .map(|(i, photo)| PlannedPhoto {
                id: ids.next_photo(),
                seq: i + 1,
                captured: normalizer.local(photo.capture_offset()),
                title: titles.photo_title(photo.caption()),
                photo,
            })
            .collect();
        planned.push(PlannedEvent {
            id: ids.next_event(),
            title: titles.event_name(&name),
            date,
            photos_before,
            photos,
        });
    }
    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::CatalogBuilder;

    const DAY: f64 = 86_400.0;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Catalog offset of midnight UTC on the given date.
    fn offset_of(day: NaiveDate) -> f64 {
        let epoch = date(2001, 1, 1);
        (day - epoch).num_days() as f64 * DAY
    }

    fn plan<'a>(library: &'a Library, range: &DateRange, ids: &mut IdCounters) -> Vec<PlannedEvent<'a>> {
        sequence_library(library, &TitleFilter::default(), &Normalizer::utc(), range, ids)
    }

    #[test]
    fn events_sorted_by_earliest_photo() {
        let library = CatalogBuilder::new()
            .photo("1", "late", 3.0 * DAY)
            .photo("2", "early", 1.0 * DAY)
            .photo("3", "middle", 2.0 * DAY)
            .event("Late", &["1"])
            .event("Mixed", &["3", "2"])
            .build();
        let events = plan(&library, &DateRange::default(), &mut IdCounters::new());

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Mixed", "Late"]);
        let captions: Vec<&str> = events[0].photos.iter().map(|p| p.photo.caption()).collect();
        assert_eq!(captions, vec!["early", "middle"]);
        assert_eq!(events[0].date, date(2001, 1, 2));
    }

    #[test]
    fn ids_are_dense_and_one_based() {
        let library = CatalogBuilder::new()
            .photo("1", "a", 0.0)
            .photo("2", "b", 10.0)
            .photo("3", "c", DAY)
            .event("First", &["1", "2"])
            .event("Second", &["3"])
            .build();
        let events = plan(&library, &DateRange::default(), &mut IdCounters::new());

        assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
        let photo_ids: Vec<u64> = events
            .iter()
            .flat_map(|e| e.photos.iter().map(|p| p.id))
            .collect();
        assert_eq!(photo_ids, vec![1, 2, 3]);
        assert_eq!(events[1].photos_before, 2);
        assert_eq!(events[1].photos[0].seq, 1);
    }

    #[test]
    fn equal_instants_keep_catalog_order() {
        let library = CatalogBuilder::new()
            .photo("1", "x", 100.0)
            .photo("2", "y", 100.0)
            .photo("3", "z", 100.0)
            .event("B", &["3", "1"])
            .event("A", &["2"])
            .build();
        let events = plan(&library, &DateRange::default(), &mut IdCounters::new());

        assert_eq!(events[0].title, "B");
        assert_eq!(events[1].title, "A");
        let captions: Vec<&str> = events[0].photos.iter().map(|p| p.photo.caption()).collect();
        assert_eq!(captions, vec!["z", "x"]);
    }

    #[test]
    fn start_date_is_inclusive() {
        let library = CatalogBuilder::new()
            .photo("1", "nye", offset_of(date(2014, 12, 31)))
            .photo("2", "ny", offset_of(date(2015, 1, 1)))
            .event("Eve", &["1"])
            .event("Day", &["2"])
            .build();
        let range = DateRange::new(Some(date(2015, 1, 1)), None);
        let mut ids = IdCounters::new();
        let events = plan(&library, &range, &mut ids);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Day");
        assert_eq!(events[0].id, 1);
        assert_eq!(events[0].photos[0].id, 1);
        assert_eq!(ids, IdCounters { events: 1, photos: 1 });
    }

    #[test]
    fn end_date_is_inclusive() {
        let range = DateRange::new(None, Some(date(2015, 1, 1)));
        assert!(range.contains(date(2015, 1, 1)));
        assert!(!range.contains(date(2015, 1, 2)));
        assert!(DateRange::default().contains(date(1900, 1, 1)));
    }

    #[test]
    fn empty_and_unresolvable_events_are_skipped() {
        let library = CatalogBuilder::new()
            .photo("1", "a", 0.0)
            .event("Empty", &[])
            .event("Dangling", &["404"])
            .event("Real", &["1"])
            .build();
        let events = plan(&library, &DateRange::default(), &mut IdCounters::new());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Real");
        assert_eq!(events[0].id, 1);
    }

    #[test]
    fn non_event_albums_are_ignored() {
        let library = CatalogBuilder::new()
            .photo("1", "a", 0.0)
            .album("Regular", "Favorites", &["1"])
            .build();
        assert!(plan(&library, &DateRange::default(), &mut IdCounters::new()).is_empty());
    }

    #[test]
    fn counters_continue_across_libraries() {
        let first = CatalogBuilder::new()
            .photo("1", "a", 0.0)
            .photo("2", "b", 1.0)
            .event("One", &["1", "2"])
            .build();
        let second = CatalogBuilder::new()
            .photo("1", "c", 0.0)
            .event("Two", &["1"])
            .build();
        let mut ids = IdCounters::new();
        plan(&first, &DateRange::default(), &mut ids);
        let events = plan(&second, &DateRange::default(), &mut ids);

        assert_eq!(events[0].id, 2);
        assert_eq!(events[0].photos[0].id, 3);
        assert_eq!(events[0].photos_before, 2);
    }

    #[test]
    fn titles_are_cleaned() {
        let library = CatalogBuilder::new()
            .photo("1", "PD_0001", 0.0)
            .photo("2", " Sunset ", 1.0)
            .photo("3", "b", DAY)
            .event("Jan 1, 2001", &["1", "2"])
            .event("Scan batch 4", &["3"])
            .build();
        let events = plan(&library, &DateRange::default(), &mut IdCounters::new());

        assert_eq!(events[0].title, "");
        assert_eq!(events[0].photos[0].title, "");
        assert_eq!(events[0].photos[1].title, "Sunset");
        assert_eq!(events[1].title, "");
    }

    #[test]
    fn event_date_uses_normalized_local_time() {
        // 2001-01-02 03:00 UTC is still January 1st five hours west.
        let library = CatalogBuilder::new()
            .photo("1", "a", DAY + 3.0 * 3600.0)
            .event("E", &["1"])
            .build();
        let west = Normalizer::with_offset(chrono::FixedOffset::west_opt(5 * 3600).unwrap());
        let events = sequence_library(
            &library,
            &TitleFilter::default(),
            &west,
            &DateRange::default(),
            &mut IdCounters::new(),
        );
        assert_eq!(events[0].date, date(2001, 1, 1));
        assert_eq!(events[0].photos[0].captured.to_string(), "2001-01-01 22:00:00");
    }
}
