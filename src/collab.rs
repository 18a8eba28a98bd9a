//! Collaborator frequency index.

use crate::SongRecord;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// How often a collaborator appears alongside the queried artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaboratorEntry {
    /// Number of songs the collaborator was seen on, always at least 1
    pub count: u32,
    /// Titles in the order they were seen, one per counted song
    pub song_titles: Vec<String>,
}

/// Collaborators keyed by name, kept in first-seen order.
///
/// The queried artist never appears as a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaboratorIndex {
    entries: Vec<(String, CollaboratorEntry)>,
    positions: HashMap<String, usize>,
}

impl CollaboratorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every artist on `song` except `artist_name` (case-sensitive).
    ///
    /// Primary artists are folded before featured artists. A name listed twice
    /// on the same song is counted twice, so callers should not feed the same
    /// record more than once.
    pub fn record_song(&mut self, artist_name: &str, song: &SongRecord) {
        for collaborator in song.artists() {
            if collaborator == artist_name {
                continue;
            }
            self.record(collaborator, &song.title);
        }
    }

    fn record(&mut self, collaborator: &str, title: &str) {
        match self.positions.get(collaborator) {
            Some(&position) => {
                let entry = &mut self.entries[position].1;
                entry.count += 1;
                entry.song_titles.push(title.to_string());
            }
            None => {
                self.positions
                    .insert(collaborator.to_string(), self.entries.len());
                self.entries.push((
                    collaborator.to_string(),
                    CollaboratorEntry {
                        count: 1,
                        song_titles: vec![title.to_string()],
                    },
                ));
            }
        }
    }

    pub fn get(&self, collaborator: &str) -> Option<&CollaboratorEntry> {
        self.positions
            .get(collaborator)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, collaborator: &str) -> bool {
        self.positions.contains_key(collaborator)
    }

    /// Number of distinct collaborators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollaboratorEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, &CollaboratorEntry)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        ranked
    }
}

impl Serialize for CollaboratorIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// Fold `songs` into a fresh collaborator index for `artist_name`.
///
/// ```
/// use genius_collab::{aggregate, SongRecord};
///
/// let song = |title: &str, primary: &[&str]| SongRecord {
///     title: title.to_string(),
///     featured_artists: vec![],
///     primary_artists: primary.iter().map(|s| s.to_string()).collect(),
///     path: String::new(),
///     lyrics: String::new(),
/// };
///
/// let index = aggregate("Y", &[song("A", &["X", "Y"]), song("B", &["Y"])]);
/// assert!(!index.contains("Y"));
/// assert_eq!(index.get("X").unwrap().song_titles, vec!["A"]);
/// ```
pub fn aggregate(artist_name: &str, songs: &[SongRecord]) -> CollaboratorIndex {
    let mut index = CollaboratorIndex::new();
    for song in songs {
        index.record_song(artist_name, song);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, primary: &[&str], featured: &[&str]) -> SongRecord {
        SongRecord {
            title: title.to_string(),
            featured_artists: featured.iter().map(|s| s.to_string()).collect(),
            primary_artists: primary.iter().map(|s| s.to_string()).collect(),
            path: format!("/{title}-lyrics"),
            lyrics: String::new(),
        }
    }

    #[test]
    fn test_self_is_excluded() {
        let index = aggregate("Y", &[song("A", &["X", "Y"], &[]), song("B", &["Y"], &[])]);
        assert!(!index.contains("Y"));
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get("X"),
            Some(&CollaboratorEntry {
                count: 1,
                song_titles: vec!["A".to_string()],
            })
        );
    }

    #[test]
    fn test_counts_across_songs_and_roles() {
        let index = aggregate(
            "Calvin Harris",
            &[
                song("Summer", &["Calvin Harris"], &[]),
                song("This Is What You Came For", &["Calvin Harris"], &["Rihanna"]),
                song("We Found Love", &["Rihanna"], &["Calvin Harris"]),
                song("Feels", &["Calvin Harris"], &["Pharrell Williams", "Katy Perry", "Big Sean"]),
            ],
        );

        assert_eq!(index.len(), 4);
        let rihanna = index.get("Rihanna").unwrap();
        assert_eq!(rihanna.count, 2);
        assert_eq!(
            rihanna.song_titles,
            vec!["This Is What You Came For", "We Found Love"]
        );

        let names: Vec<&str> = index.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["Rihanna", "Pharrell Williams", "Katy Perry", "Big Sean"]
        );

        let ranked: Vec<&str> = index.ranked().into_iter().map(|(name, _)| name).collect();
        assert_eq!(ranked[0], "Rihanna");
        assert_eq!(&ranked[1..], &["Pharrell Williams", "Katy Perry", "Big Sean"]);
    }

    #[test]
    fn test_self_match_is_case_sensitive() {
        let index = aggregate("sza", &[song("Kill Bill", &["SZA"], &[])]);
        assert!(index.contains("SZA"));
    }

    #[test]
    fn test_empty_input() {
        let index = aggregate("Anyone", &[]);
        assert!(index.is_empty());
        assert_eq!(serde_json::to_string(&index).unwrap(), "{}");
    }

    #[test]
    fn test_serializes_as_object_in_order() {
        let index = aggregate("A", &[song("One", &["A", "Z"], &["B"])]);
        assert_eq!(
            serde_json::to_string(&index).unwrap(),
            r#"{"Z":{"count":1,"song_titles":["One"]},"B":{"count":1,"song_titles":["One"]}}"#
        );
    }
}
