//! Explicit UI state
//!
//! Everything the site front end toggles at runtime: the project filter
//! controls and the background audio player. The owner holds a `UiState`
//! value and mutates it through these methods; nothing here is global.

use crate::catalog::CategoryFilter;
use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_VOLUME: f32 = 0.7;

/// Project list layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Project list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first
    #[default]
    Date,
    /// Title, case-insensitive A to Z
    Name,
    /// Category display order, newest first within a category
    Category,
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "date" => Ok(SortBy::Date),
            "name" => Ok(SortBy::Name),
            "category" => Ok(SortBy::Category),
            other => Err(Error::InvalidInput(format!("Unknown sort order: {}", other))),
        }
    }
}

/// Project filter controls
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub search: String,
    pub view_mode: ViewMode,
    pub sort_by: SortBy,
}

impl FilterState {
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    /// Back to "all projects, no search"; layout and ordering are kept
    pub fn clear(&mut self) {
        self.category = CategoryFilter::All;
        self.search.clear();
    }
}

/// Background audio track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub url: String,
}

/// Background audio player state
///
/// `current` always indexes into `tracks` when the list is non-empty and is
/// 0 otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    tracks: Vec<Track>,
    current: usize,
    playing: bool,
    volume: f32,
    shuffle: bool,
    muted: bool,
}

impl PlayerState {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: 0,
            playing: false,
            volume: DEFAULT_VOLUME,
            shuffle: false,
            muted: false,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Volume actually applied to the audio element
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(Error::InvalidInput(format!(
                "Track index {} out of range ({} tracks)",
                index,
                self.tracks.len()
            )));
        }
        self.current = index;
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Set volume, clamped to `0.0..=1.0`
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        if volume.is_nan() {
            return Err(Error::InvalidInput("Volume must be a number".to_string()));
        }
        self.volume = volume.clamp(0.0, 1.0);
        Ok(())
    }

    /// Advance to the next track (wrapping), or a random one in shuffle mode
    pub fn next(&mut self) {
        self.step(|current, len| (current + 1) % len);
    }

    /// Go back one track (wrapping), or to a random one in shuffle mode
    pub fn previous(&mut self) {
        self.step(|current, len| if current == 0 { len - 1 } else { current - 1 });
    }

    fn step(&mut self, sequential: impl Fn(usize, usize) -> usize) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.current = if self.shuffle {
            rand::thread_rng().gen_range(0..len)
        } else {
            sequential(self.current, len)
        };
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// All front-end state in one value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiState {
    pub filter: FilterState,
    pub player: PlayerState,
}

impl UiState {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            filter: FilterState::default(),
            player: PlayerState::new(tracks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track {
                id: i.to_string(),
                title: format!("Track {}", i),
                artist: None,
                url: format!("/audio/track{}.mp3", i),
            })
            .collect()
    }

    #[test]
    fn test_filter_defaults() {
        let state = FilterState::default();
        assert_eq!(state.category, CategoryFilter::All);
        assert_eq!(state.search, "");
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert_eq!(state.sort_by, SortBy::Date);
    }

    #[test]
    fn test_filter_clear_keeps_layout() {
        let mut state = FilterState::default();
        state.set_category(Category::MobileApps.into());
        state.set_search("react");
        state.set_view_mode(ViewMode::List);
        state.set_sort_by(SortBy::Name);

        state.clear();
        assert_eq!(state.category, CategoryFilter::All);
        assert!(state.search.is_empty());
        assert_eq!(state.view_mode, ViewMode::List);
        assert_eq!(state.sort_by, SortBy::Name);
    }

    #[test]
    fn test_player_defaults() {
        let player = PlayerState::new(tracks(2));
        assert_eq!(player.current_index(), 0);
        assert!(!player.is_playing());
        assert!(!player.is_shuffle());
        assert_eq!(player.volume(), 0.7);
        assert_eq!(player.current_track().unwrap().id, "0");
    }

    #[test]
    fn test_next_previous_wrap() {
        let mut player = PlayerState::new(tracks(3));
        player.previous();
        assert_eq!(player.current_index(), 2);
        player.next();
        assert_eq!(player.current_index(), 0);
        player.next();
        assert_eq!(player.current_index(), 1);
    }

    #[test]
    fn test_shuffle_stays_in_bounds() {
        let mut player = PlayerState::new(tracks(4));
        player.toggle_shuffle();
        for _ in 0..50 {
            player.next();
            assert!(player.current_index() < 4);
            player.previous();
            assert!(player.current_index() < 4);
        }
    }

    #[test]
    fn test_empty_playlist_is_noop() {
        let mut player = PlayerState::default();
        player.next();
        player.previous();
        assert_eq!(player.current_index(), 0);
        assert!(player.current_track().is_none());
        assert!(player.set_current(0).is_err());
    }

    #[test]
    fn test_set_current_bounds() {
        let mut player = PlayerState::new(tracks(2));
        player.set_current(1).unwrap();
        assert_eq!(player.current_index(), 1);
        assert!(matches!(player.set_current(2), Err(Error::InvalidInput(_))));
        assert_eq!(player.current_index(), 1);
    }

    #[test]
    fn test_volume_clamped_and_muted() {
        let mut player = PlayerState::new(tracks(1));
        player.set_volume(1.5).unwrap();
        assert_eq!(player.volume(), 1.0);
        player.set_volume(-0.2).unwrap();
        assert_eq!(player.volume(), 0.0);
        assert!(player.set_volume(f32::NAN).is_err());

        player.set_volume(0.4).unwrap();
        player.toggle_mute();
        assert_eq!(player.effective_volume(), 0.0);
        player.toggle_mute();
        assert_eq!(player.effective_volume(), 0.4);
    }

    #[test]
    fn test_toggle_play() {
        let mut state = UiState::new(tracks(1));
        state.player.toggle_play();
        assert!(state.player.is_playing());
        state.player.toggle_play();
        assert!(!state.player.is_playing());
    }

    #[test]
    fn test_sort_by_parse() {
        assert_eq!("name".parse::<SortBy>().unwrap(), SortBy::Name);
        assert!("size".parse::<SortBy>().is_err());
    }
}
