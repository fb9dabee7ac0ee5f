use std::str::FromStr;

use crate::{api::normalize_title, documents::LibraryEntry, Status};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SortKey {
    #[default]
    Name,
    Playtime,
    Rating,
    ReleaseDate,
    LastPlayed,
}

impl FromStr for SortKey {
    type Err = Status;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(SortKey::Name),
            "playtime" => Ok(SortKey::Playtime),
            "rating" => Ok(SortKey::Rating),
            "release-date" => Ok(SortKey::ReleaseDate),
            "last-played" => Ok(SortKey::LastPlayed),
            _ => Err(Status::invalid_argument(format!(
                "Unknown sort key '{value}'."
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Returns the filtered, ordered view of the merged library.
///
/// The filter is a substring match on the normalized name. Sorting is stable
/// and missing metadata values order as the numeric/lexical minimum;
/// descending is the exact reverse of ascending for the same key.
pub fn filter_and_sort(
    entries: &[LibraryEntry],
    filter: &str,
    key: SortKey,
    direction: Direction,
) -> Vec<LibraryEntry> {
    let needle = normalize_title(filter);
    let mut view: Vec<LibraryEntry> = entries
        .iter()
        .filter(|entry| needle.is_empty() || normalize_title(&entry.game.name).contains(&needle))
        .cloned()
        .collect();

    match key {
        SortKey::Name => view.sort_by_key(|entry| normalize_title(&entry.game.name)),
        SortKey::Playtime => view.sort_by_key(|entry| entry.game.playtime_forever),
        SortKey::Rating => view.sort_by(|a, b| rating(a).total_cmp(&rating(b))),
        SortKey::ReleaseDate => view.sort_by_key(release_date),
        SortKey::LastPlayed => {
            view.sort_by_key(|entry| entry.game.rtime_last_played.unwrap_or(0))
        }
    }

    if direction == Direction::Descending {
        view.reverse();
    }
    view
}

fn rating(entry: &LibraryEntry) -> f64 {
    entry
        .metadata
        .record()
        .and_then(|record| record.total_rating)
        .unwrap_or(0.0)
}

fn release_date(entry: &LibraryEntry) -> i64 {
    entry
        .metadata
        .record()
        .and_then(|record| record.first_release_date)
        .unwrap_or(0)
}
