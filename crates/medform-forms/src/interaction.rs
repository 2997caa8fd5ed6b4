//! Transient interaction state: open dropdowns, inline search queries, and
//! visible suggestion lists.
//!
//! None of this is form data. It lives beside the value map, is never saved,
//! and is discarded when the form closes.
//!
//! Dismissal works through registered interaction regions: the host registers
//! the on-screen region of each dropdown or suggestion list it draws, and
//! reports pointer and focus events. An event that lands outside every
//! registered region closes all dropdowns and clears all suggestion lists in
//! one pass. Opening a dropdown never closes the others.

use std::collections::HashMap;

use crate::fields::FieldOption;

/// A point in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Region {
    /// Creates a region.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if `point` lies inside the region, edges included.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Per-field dropdown state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownState {
    /// Whether the dropdown is expanded (search box shown instead of button).
    pub open: bool,
    /// The inline search query typed while open.
    pub search: String,
}

/// Returns the options whose label contains `query`, ignoring case.
///
/// The query is matched as typed, whitespace included. An empty query matches
/// everything.
pub fn filter_options(options: &[FieldOption], query: &str) -> Vec<FieldOption> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Dropdown, suggestion, and region bookkeeping for one form.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    dropdowns: HashMap<String, DropdownState>,
    suggestions: HashMap<String, Vec<FieldOption>>,
    regions: HashMap<String, Region>,
}

impl InteractionState {
    /// Creates an empty interaction state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the dropdown of `name` and returns its new open state.
    ///
    /// Closing a dropdown also clears its inline search query.
    pub fn toggle(&mut self, name: &str) -> bool {
        let state = self.dropdowns.entry(name.to_string()).or_default();
        state.open = !state.open;
        if !state.open {
            state.search.clear();
        }
        state.open
    }

    /// Returns `true` if the dropdown of `name` is expanded.
    pub fn is_open(&self, name: &str) -> bool {
        self.dropdowns.get(name).is_some_and(|state| state.open)
    }

    /// Returns the names of all expanded dropdowns, sorted.
    pub fn open_dropdowns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .dropdowns
            .iter()
            .filter(|(_, state)| state.open)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Sets the inline search query of an expanded dropdown.
    ///
    /// Returns `false` (and stores nothing) when the dropdown is closed.
    pub fn set_search(&mut self, name: &str, query: &str) -> bool {
        match self.dropdowns.get_mut(name) {
            Some(state) if state.open => {
                state.search = query.to_string();
                true
            }
            _ => false,
        }
    }

    /// Returns the inline search query of `name` (empty when closed).
    pub fn search(&self, name: &str) -> &str {
        self.dropdowns
            .get(name)
            .filter(|state| state.open)
            .map_or("", |state| state.search.as_str())
    }

    /// Recomputes the suggestion list of `name` from its candidates.
    ///
    /// An empty query hides the list. Returns the stored suggestions.
    pub fn filter_suggestions(
        &mut self,
        name: &str,
        query: &str,
        candidates: &[FieldOption],
    ) -> &[FieldOption] {
        if query.is_empty() {
            self.suggestions.remove(name);
            return &[];
        }
        let matches = filter_options(candidates, query);
        let entry = self.suggestions.entry(name.to_string()).or_default();
        *entry = matches;
        entry
    }

    /// Returns the visible suggestions of `name`.
    pub fn suggestions(&self, name: &str) -> &[FieldOption] {
        self.suggestions.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Hides the suggestion list of `name`.
    pub fn clear_suggestions(&mut self, name: &str) {
        self.suggestions.remove(name);
    }

    /// Returns `true` if any dropdown is expanded or any suggestion list shown.
    pub fn has_open_overlays(&self) -> bool {
        self.dropdowns.values().any(|state| state.open)
            || self.suggestions.values().any(|list| !list.is_empty())
    }

    /// Closes every dropdown and clears every suggestion list.
    pub fn close_all(&mut self) {
        for state in self.dropdowns.values_mut() {
            state.open = false;
            state.search.clear();
        }
        self.suggestions.clear();
    }

    /// Registers (or moves) the on-screen region owned by `name`.
    pub fn register_region(&mut self, name: impl Into<String>, region: Region) {
        self.regions.insert(name.into(), region);
    }

    /// Removes the region owned by `name`.
    pub fn deregister_region(&mut self, name: &str) -> Option<Region> {
        self.regions.remove(name)
    }

    /// Handles a pointer interaction.
    ///
    /// Closes everything when `point` is outside every registered region.
    /// Returns `true` if anything was closed.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.regions.values().any(|region| region.contains(point)) {
            return false;
        }
        self.dismiss()
    }

    /// Handles a focus change to the control owned by `name` (or to nothing).
    ///
    /// Focus moving to a control without a registered region counts as an
    /// outside interaction. Returns `true` if anything was closed.
    pub fn focus_moved(&mut self, name: Option<&str>) -> bool {
        if name.is_some_and(|name| self.regions.contains_key(name)) {
            return false;
        }
        self.dismiss()
    }

    /// Forgets all dropdowns, suggestions, and regions.
    pub fn reset(&mut self) {
        self.dropdowns.clear();
        self.suggestions.clear();
        self.regions.clear();
    }

    fn dismiss(&mut self) -> bool {
        if !self.has_open_overlays() {
            return false;
        }
        tracing::debug!(open = ?self.open_dropdowns(), "outside interaction, closing overlays");
        self.close_all();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctors() -> Vec<FieldOption> {
        vec![
            FieldOption::new("1", "Dr. Adams"),
            FieldOption::new("2", "Dr. Baker"),
            FieldOption::new("3", "Nurse Adamson"),
        ]
    }

    #[test]
    fn test_toggle_independent_dropdowns() {
        let mut state = InteractionState::new();
        assert!(state.toggle("doctor"));
        assert!(state.toggle("tests"));
        assert!(state.is_open("doctor"));
        assert!(state.is_open("tests"));
        assert_eq!(state.open_dropdowns(), vec!["doctor", "tests"]);

        assert!(!state.toggle("doctor"));
        assert!(!state.is_open("doctor"));
        assert!(state.is_open("tests"));
    }

    #[test]
    fn test_search_only_while_open() {
        let mut state = InteractionState::new();
        assert!(!state.set_search("doctor", "ad"));
        state.toggle("doctor");
        assert!(state.set_search("doctor", "ad"));
        assert_eq!(state.search("doctor"), "ad");
        state.toggle("doctor");
        assert_eq!(state.search("doctor"), "");
    }

    #[test]
    fn test_filter_options_case_insensitive() {
        let matched = filter_options(&doctors(), "ADAM");
        let labels: Vec<&str> = matched.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Dr. Adams", "Nurse Adamson"]);
        assert_eq!(filter_options(&doctors(), "").len(), 3);
        assert!(filter_options(&doctors(), "zzz").is_empty());
    }

    #[test]
    fn test_filter_suggestions_and_clear() {
        let mut state = InteractionState::new();
        assert_eq!(state.filter_suggestions("doctor", "bak", &doctors()).len(), 1);
        assert_eq!(state.suggestions("doctor")[0].value, "2");

        assert!(state.filter_suggestions("doctor", "", &doctors()).is_empty());
        assert!(state.suggestions("doctor").is_empty());
    }

    #[test]
    fn test_filter_keeps_whitespace_in_query() {
        let spaced = filter_options(&doctors(), "adams ");
        assert!(spaced.is_empty());
        assert_eq!(filter_options(&doctors(), "adams").len(), 2);

        let titled = filter_options(&doctors(), "Dr. ");
        let labels: Vec<&str> = titled.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Dr. Adams", "Dr. Baker"]);

        let mut state = InteractionState::new();
        assert_eq!(state.filter_suggestions("doctor", " ", &doctors()).len(), 3);
        assert_eq!(state.suggestions("doctor").len(), 3);
    }

    #[test]
    fn test_outside_pointer_closes_everything() {
        let mut state = InteractionState::new();
        state.toggle("doctor");
        state.toggle("tests");
        state.filter_suggestions("lab", "dr", &doctors());
        state.register_region("doctor", Region::new(0.0, 0.0, 100.0, 40.0));
        state.register_region("tests", Region::new(0.0, 50.0, 100.0, 40.0));

        assert!(state.pointer_down(Point::new(500.0, 500.0)));
        assert!(state.open_dropdowns().is_empty());
        assert!(state.suggestions("lab").is_empty());
        assert!(!state.has_open_overlays());
    }

    #[test]
    fn test_inside_pointer_keeps_state() {
        let mut state = InteractionState::new();
        state.toggle("doctor");
        state.register_region("doctor", Region::new(0.0, 0.0, 100.0, 40.0));
        assert!(!state.pointer_down(Point::new(10.0, 10.0)));
        assert!(state.is_open("doctor"));
    }

    #[test]
    fn test_deregistered_region_no_longer_protects() {
        let mut state = InteractionState::new();
        state.toggle("doctor");
        state.register_region("doctor", Region::new(0.0, 0.0, 100.0, 40.0));
        state.deregister_region("doctor");
        assert!(state.pointer_down(Point::new(10.0, 10.0)));
        assert!(!state.is_open("doctor"));
    }

    #[test]
    fn test_focus_moved() {
        let mut state = InteractionState::new();
        state.toggle("doctor");
        state.register_region("doctor", Region::new(0.0, 0.0, 1.0, 1.0));
        assert!(!state.focus_moved(Some("doctor")));
        assert!(state.focus_moved(Some("notes")));
        assert!(!state.is_open("doctor"));
        assert!(!state.focus_moved(None));
    }

    #[test]
    fn test_region_contains_edges() {
        let region = Region::new(10.0, 10.0, 5.0, 5.0);
        assert!(region.contains(Point::new(10.0, 15.0)));
        assert!(!region.contains(Point::new(9.9, 12.0)));
    }
}
