// Destination autocomplete engine: debounced lookup scheduling plus
// keyboard-driven highlight state for the suggestion dropdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::destinations::{Destination, DestinationLookup};

#[derive(Debug, Clone)]
pub struct AutocompleteConfig {
    // Quiet period measured from the last keystroke before a lookup fires
    pub debounce: Duration,
    // Trimmed queries shorter than this never reach the lookup
    pub min_query_len: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: 2,
        }
    }
}

// Observable session state for the dropdown.
// Invariants: `highlighted` is None or a valid index into `suggestions`;
// `is_open` is true only while `suggestions` is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutocompleteState {
    pub query: String,
    pub suggestions: Vec<Destination>,
    pub is_open: bool,
    pub highlighted: Option<usize>,
    pub loading: bool,
    pub focused: bool,
}

struct Inner {
    lookup: Arc<dyn DestinationLookup>,
    config: AutocompleteConfig,
    state: Mutex<AutocompleteState>,
    // Issuance token; a scheduled lookup may only apply its result while it
    // is still the latest issued one
    epoch: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
}

// Suggestion engine for the destination search box. Methods map one-to-one
// onto UI events; `on_query_change` must run inside a Tokio runtime since it
// schedules the debounced lookup task.
pub struct DestinationAutocomplete {
    inner: Arc<Inner>,
}

impl DestinationAutocomplete {
    pub fn new(lookup: Arc<dyn DestinationLookup>) -> Self {
        Self::with_config(lookup, AutocompleteConfig::default())
    }

    pub fn with_config(lookup: Arc<dyn DestinationLookup>, config: AutocompleteConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                lookup,
                config,
                state: Mutex::new(AutocompleteState::default()),
                epoch: AtomicU64::new(0),
                pending: Mutex::new(None),
            }),
        }
    }

    // Snapshot of the current session state
    pub fn state(&self) -> AutocompleteState {
        self.inner.state.lock().clone()
    }

    // Records the raw input immediately and schedules a trailing-edge
    // debounced lookup; any previously scheduled or in-flight lookup is
    // superseded
    pub fn on_query_change(&self, query: &str) {
        let inner = &self.inner;
        let token = inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = inner.pending.lock().take() {
            handle.abort();
        }

        {
            let mut state = inner.state.lock();
            state.query = query.to_string();
            if query.trim().chars().count() < inner.config.min_query_len {
                state.suggestions.clear();
                state.is_open = false;
                state.highlighted = None;
                state.loading = false;
                return;
            }
        }

        let task_inner = Arc::clone(inner);
        let query = query.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(task_inner.config.debounce).await;
            if task_inner.epoch.load(Ordering::SeqCst) != token {
                return;
            }
            task_inner.state.lock().loading = true;

            let result = task_inner.lookup.search(&query).await;

            // A newer keystroke may have superseded this lookup while it was
            // in flight; its result must not overwrite newer state
            if task_inner.epoch.load(Ordering::SeqCst) != token {
                return;
            }
            let mut state = task_inner.state.lock();
            match result {
                Ok(matches) => {
                    state.is_open = !matches.is_empty();
                    state.suggestions = matches;
                    state.highlighted = None;
                }
                Err(err) => {
                    tracing::warn!(%err, query = %query, "destination lookup failed");
                    state.suggestions.clear();
                    state.is_open = false;
                    state.highlighted = None;
                }
            }
            state.loading = false;
        });
        *inner.pending.lock() = Some(handle);
    }

    // Moves the highlight down, wrapping from the last entry to the first
    pub fn on_arrow_down(&self) {
        let mut state = self.inner.state.lock();
        if !state.is_open || state.suggestions.is_empty() {
            return;
        }
        let last = state.suggestions.len() - 1;
        state.highlighted = Some(match state.highlighted {
            Some(index) if index < last => index + 1,
            _ => 0,
        });
    }

    // Moves the highlight up, wrapping from the first entry to the last
    pub fn on_arrow_up(&self) {
        let mut state = self.inner.state.lock();
        if !state.is_open || state.suggestions.is_empty() {
            return;
        }
        let last = state.suggestions.len() - 1;
        state.highlighted = Some(match state.highlighted {
            Some(index) if index > 0 => index - 1,
            _ => last,
        });
    }

    // Commits the highlighted suggestion: the query becomes its name, the
    // list closes and the input loses focus. No-op without a highlight.
    pub fn on_enter(&self) -> Option<Destination> {
        let mut state = self.inner.state.lock();
        if !state.is_open || state.suggestions.is_empty() {
            return None;
        }
        let index = state.highlighted?;
        let chosen = state.suggestions.get(index)?.clone();
        Self::commit(&mut state, &chosen);
        Some(chosen)
    }

    // Pointer selection; behaves exactly like Enter on that entry
    pub fn on_select(&self, index: usize) -> Option<Destination> {
        let mut state = self.inner.state.lock();
        let chosen = state.suggestions.get(index)?.clone();
        Self::commit(&mut state, &chosen);
        Some(chosen)
    }

    // Pointer hover moves the highlight without committing
    pub fn on_hover(&self, index: usize) {
        let mut state = self.inner.state.lock();
        if state.is_open && index < state.suggestions.len() {
            state.highlighted = Some(index);
        }
    }

    // Closes the list without changing the committed value
    pub fn on_escape(&self) {
        let mut state = self.inner.state.lock();
        if !state.is_open || state.suggestions.is_empty() {
            return;
        }
        state.is_open = false;
        state.highlighted = None;
        state.focused = false;
    }

    // Pointer interaction outside the component's rendered region
    pub fn on_click_outside(&self) {
        let mut state = self.inner.state.lock();
        state.is_open = false;
        state.highlighted = None;
    }

    // Focusing the input reopens the list when suggestions are still present
    pub fn on_focus(&self) {
        let mut state = self.inner.state.lock();
        state.focused = true;
        if !state.suggestions.is_empty() {
            state.is_open = true;
        }
    }

    // Cancels the pending debounce task and invalidates any in-flight
    // lookup; no state mutation can happen after this returns
    pub fn shutdown(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.inner.pending.lock().take() {
            handle.abort();
        }
    }

    fn commit(state: &mut AutocompleteState, chosen: &Destination) {
        state.query = chosen.name.clone();
        state.is_open = false;
        state.highlighted = None;
        state.focused = false;
    }
}

impl Drop for DestinationAutocomplete {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destinations::LookupError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    // Scripted lookup: records every query it receives, serves a fixed
    // table, and can be slowed down per query or made to fail
    struct ScriptedLookup {
        table: Vec<Destination>,
        calls: Mutex<Vec<String>>,
        delay: Duration,
        slow_queries: HashMap<String, Duration>,
        fail: bool,
    }

    impl ScriptedLookup {
        fn new(names: &[(&str, &str)]) -> Self {
            let table = names
                .iter()
                .enumerate()
                .map(|(i, (name, country))| Destination {
                    id: (i + 1).to_string(),
                    name: name.to_string(),
                    country: country.to_string(),
                    full_name: format!("{}, {}", name, country),
                })
                .collect();
            Self {
                table,
                calls: Mutex::new(Vec::new()),
                delay: Duration::ZERO,
                slow_queries: HashMap::new(),
                fail: false,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl DestinationLookup for ScriptedLookup {
        async fn search(&self, query: &str) -> Result<Vec<Destination>, LookupError> {
            self.calls.lock().push(query.to_string());
            let delay = self.slow_queries.get(query).copied().unwrap_or(self.delay);
            tokio::time::sleep(delay).await;
            if self.fail {
                return Err(LookupError::Failed("lookup offline".to_string()));
            }
            let query = query.trim().to_lowercase();
            Ok(self
                .table
                .iter()
                .filter(|d| d.name.to_lowercase().contains(&query))
                .cloned()
                .collect())
        }
    }

    fn fast_config() -> AutocompleteConfig {
        AutocompleteConfig {
            debounce: Duration::from_millis(20),
            min_query_len: 2,
        }
    }

    async fn engine_with_suggestions(
        lookup: Arc<ScriptedLookup>,
        query: &str,
    ) -> DestinationAutocomplete {
        let engine = DestinationAutocomplete::with_config(lookup, fast_config());
        engine.on_query_change(query);
        tokio::time::sleep(Duration::from_millis(80)).await;
        engine
    }

    fn uk_cities() -> Arc<ScriptedLookup> {
        Arc::new(ScriptedLookup::new(&[
            ("London", "United Kingdom"),
            ("Londonderry", "United Kingdom"),
            ("Luton", "United Kingdom"),
        ]))
    }

    #[tokio::test]
    async fn test_short_query_clears_without_lookup() {
        let lookup = uk_cities();
        let engine = DestinationAutocomplete::with_config(Arc::clone(&lookup) as Arc<dyn DestinationLookup>, fast_config());

        engine.on_query_change("L");
        tokio::time::sleep(Duration::from_millis(80)).await;

        let state = engine.state();
        assert_eq!(state.query, "L");
        assert!(state.suggestions.is_empty());
        assert!(!state.is_open);
        assert!(!state.loading);
        assert!(lookup.calls().is_empty(), "lookup must not be called");
    }

    #[tokio::test]
    async fn test_query_shrinking_below_threshold_closes_list() {
        let lookup = uk_cities();
        let engine = engine_with_suggestions(Arc::clone(&lookup), "Lond").await;
        assert!(engine.state().is_open);

        engine.on_query_change("L");
        let state = engine.state();
        assert!(state.suggestions.is_empty());
        assert!(!state.is_open);
    }

    #[tokio::test]
    async fn test_debounce_coalesces_rapid_typing() {
        let lookup = uk_cities();
        let engine = DestinationAutocomplete::with_config(Arc::clone(&lookup) as Arc<dyn DestinationLookup>, fast_config());

        for query in ["Lo", "Lon", "Lond"] {
            engine.on_query_change(query);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Only the final query of the burst reaches the lookup
        assert_eq!(lookup.calls(), vec!["Lond".to_string()]);
        let state = engine.state();
        assert!(state.is_open);
        assert_eq!(state.suggestions.len(), 2);
    }

    #[tokio::test]
    async fn test_stale_lookup_does_not_overwrite_newer_state() {
        let mut lookup = ScriptedLookup::new(&[
            ("Paris", "France"),
            ("London", "United Kingdom"),
        ]);
        // The first query's lookup is still in flight when the second fires
        lookup
            .slow_queries
            .insert("Paris".to_string(), Duration::from_millis(150));
        let lookup = Arc::new(lookup);
        let engine = DestinationAutocomplete::with_config(Arc::clone(&lookup) as Arc<dyn DestinationLookup>, fast_config());

        engine.on_query_change("Paris");
        tokio::time::sleep(Duration::from_millis(50)).await;
        engine.on_query_change("London");
        tokio::time::sleep(Duration::from_millis(60)).await;

        let names: Vec<String> = engine
            .state()
            .suggestions
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec!["London".to_string()]);

        // Let the stale Paris lookup finish; issuance order still wins
        tokio::time::sleep(Duration::from_millis(200)).await;
        let names: Vec<String> = engine
            .state()
            .suggestions
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec!["London".to_string()]);
        assert_eq!(lookup.calls(), vec!["Paris".to_string(), "London".to_string()]);
    }

    #[tokio::test]
    async fn test_lookup_failure_closes_list_quietly() {
        let mut lookup = ScriptedLookup::new(&[("London", "United Kingdom")]);
        lookup.fail = true;
        let engine = engine_with_suggestions(Arc::new(lookup), "London").await;

        let state = engine.state();
        assert!(state.suggestions.is_empty());
        assert!(!state.is_open);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_loading_flag_tracks_lookup() {
        let mut lookup = ScriptedLookup::new(&[("London", "United Kingdom")]);
        lookup.delay = Duration::from_millis(100);
        let engine = DestinationAutocomplete::with_config(Arc::new(lookup), fast_config());

        engine.on_query_change("London");
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(engine.state().loading);

        tokio::time::sleep(Duration::from_millis(120)).await;
        let state = engine.state();
        assert!(!state.loading);
        assert!(state.is_open);
    }

    #[tokio::test]
    async fn test_arrow_navigation_wraps_both_ends() {
        let engine = engine_with_suggestions(uk_cities(), "Lo").await;
        assert_eq!(engine.state().suggestions.len(), 2);

        // Down from no highlight lands on the first entry
        engine.on_arrow_down();
        assert_eq!(engine.state().highlighted, Some(0));
        engine.on_arrow_down();
        assert_eq!(engine.state().highlighted, Some(1));
        // Wraps from the last entry back to the top
        engine.on_arrow_down();
        assert_eq!(engine.state().highlighted, Some(0));
        // Wraps from the first entry back to the bottom
        engine.on_arrow_up();
        assert_eq!(engine.state().highlighted, Some(1));
        engine.on_arrow_up();
        assert_eq!(engine.state().highlighted, Some(0));
    }

    #[tokio::test]
    async fn test_arrow_up_with_no_highlight_lands_on_last() {
        let engine = engine_with_suggestions(uk_cities(), "Lo").await;
        engine.on_arrow_up();
        assert_eq!(engine.state().highlighted, Some(1));
    }

    #[tokio::test]
    async fn test_arrows_are_noops_while_closed() {
        let lookup = uk_cities();
        let engine = DestinationAutocomplete::with_config(lookup, fast_config());
        engine.on_arrow_down();
        engine.on_arrow_up();
        assert_eq!(engine.state().highlighted, None);
    }

    #[tokio::test]
    async fn test_enter_without_highlight_is_noop() {
        let engine = engine_with_suggestions(uk_cities(), "Lo").await;
        let before = engine.state();
        assert_eq!(before.highlighted, None);

        assert!(engine.on_enter().is_none());
        assert_eq!(engine.state(), before);
    }

    #[tokio::test]
    async fn test_enter_commits_highlighted_suggestion() {
        let lookup = Arc::new(ScriptedLookup::new(&[("London", "United Kingdom")]));
        let engine = engine_with_suggestions(lookup, "Lon").await;
        assert_eq!(engine.state().suggestions.len(), 1);

        engine.on_arrow_down();
        let chosen = engine.on_enter().expect("a suggestion was highlighted");
        assert_eq!(chosen.name, "London");

        let state = engine.state();
        assert_eq!(state.query, "London");
        assert!(!state.is_open);
        assert_eq!(state.highlighted, None);
        assert!(!state.focused);
    }

    #[tokio::test]
    async fn test_pointer_selection_matches_enter() {
        let engine = engine_with_suggestions(uk_cities(), "Lo").await;
        let chosen = engine.on_select(1).expect("index is valid");
        assert_eq!(chosen.name, "Londonderry");

        let state = engine.state();
        assert_eq!(state.query, "Londonderry");
        assert!(!state.is_open);
        assert_eq!(state.highlighted, None);
    }

    #[tokio::test]
    async fn test_select_out_of_bounds_is_noop() {
        let engine = engine_with_suggestions(uk_cities(), "Lo").await;
        assert!(engine.on_select(10).is_none());
        assert!(engine.state().is_open);
    }

    #[tokio::test]
    async fn test_escape_closes_without_changing_query() {
        let engine = engine_with_suggestions(uk_cities(), "Lond").await;
        engine.on_arrow_down();

        engine.on_escape();
        let state = engine.state();
        assert_eq!(state.query, "Lond");
        assert!(!state.is_open);
        assert_eq!(state.highlighted, None);
    }

    #[tokio::test]
    async fn test_click_outside_closes_and_focus_reopens() {
        let engine = engine_with_suggestions(uk_cities(), "Lond").await;
        engine.on_click_outside();
        assert!(!engine.state().is_open);

        // Suggestions are still held, so refocusing reopens the list
        engine.on_focus();
        let state = engine.state();
        assert!(state.is_open);
        assert!(state.focused);
    }

    #[tokio::test]
    async fn test_hover_moves_highlight() {
        let engine = engine_with_suggestions(uk_cities(), "Lo").await;
        engine.on_hover(1);
        assert_eq!(engine.state().highlighted, Some(1));
        // Out-of-range hover is ignored
        engine.on_hover(9);
        assert_eq!(engine.state().highlighted, Some(1));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_lookup() {
        let lookup = uk_cities();
        let engine = DestinationAutocomplete::with_config(Arc::clone(&lookup) as Arc<dyn DestinationLookup>, fast_config());

        engine.on_query_change("London");
        engine.shutdown();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(lookup.calls().is_empty(), "cancelled lookup must not run");
        let state = engine.state();
        assert!(state.suggestions.is_empty());
        assert!(!state.is_open);
    }

    #[tokio::test]
    async fn test_drop_cancels_pending_lookup() {
        let lookup = uk_cities();
        {
            let engine = DestinationAutocomplete::with_config(Arc::clone(&lookup) as Arc<dyn DestinationLookup>, fast_config());
            engine.on_query_change("London");
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn test_highlight_invariant_after_new_results() {
        let engine = engine_with_suggestions(uk_cities(), "Lo").await;
        engine.on_arrow_down();
        engine.on_arrow_down();
        assert_eq!(engine.state().highlighted, Some(1));

        // New results reset the highlight instead of carrying a stale index
        engine.on_query_change("Lut");
        tokio::time::sleep(Duration::from_millis(80)).await;
        let state = engine.state();
        assert_eq!(state.suggestions.len(), 1);
        assert_eq!(state.highlighted, None);
    }
}
