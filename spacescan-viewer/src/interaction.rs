//! Hover and selection state, and the emphasis it implies

use crate::catalog::{BoxCatalog, ViewportScenes};
use crate::config::EmphasisConfig;
use crate::panel::ScrollRequest;
use spacescan_render::{Emphasis, SceneGraph};

/// An interaction event keyed by object id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerEnter(String),
    PointerLeave(String),
    Click(String),
    /// Click that hit no box
    ClickEmpty,
    /// Explicit reset action
    Reset,
}

impl InteractionEvent {
    /// The object this event targets, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            InteractionEvent::PointerEnter(id)
            | InteractionEvent::PointerLeave(id)
            | InteractionEvent::Click(id) => Some(id),
            InteractionEvent::ClickEmpty | InteractionEvent::Reset => None,
        }
    }
}

/// Derived view of an [`InteractionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase<'a> {
    Idle,
    Hovering(&'a str),
    Selected(&'a str),
    SelectedAndHovering { selected: &'a str, hovered: &'a str },
}

/// How one entry stands relative to the current state.
///
/// Selection takes precedence over hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Selected,
    Hovered,
    Neither,
}

/// At most one hovered and at most one selected object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: Option<String>,
    pub selected: Option<String>,
}

impl InteractionState {
    /// State after `event`. With `toggle`, clicking the selected object
    /// deselects it; otherwise that click changes nothing.
    pub fn transition(&self, event: &InteractionEvent, toggle: bool) -> InteractionState {
        let mut next = self.clone();
        match event {
            InteractionEvent::PointerEnter(id) => {
                next.hovered = Some(id.clone());
            }
            InteractionEvent::PointerLeave(id) => {
                if next.hovered.as_deref() == Some(id.as_str()) {
                    next.hovered = None;
                }
            }
            InteractionEvent::Click(id) => {
                if next.selected.as_deref() == Some(id.as_str()) {
                    if toggle {
                        next.selected = None;
                    }
                } else {
                    // hover left behind on the old selection is stale
                    if next.hovered.is_some() && next.hovered == next.selected {
                        next.hovered = None;
                    }
                    next.selected = Some(id.clone());
                }
            }
            InteractionEvent::ClickEmpty | InteractionEvent::Reset => {
                next.hovered = None;
                next.selected = None;
            }
        }
        next
    }

    pub fn phase(&self) -> InteractionPhase<'_> {
        match (self.selected.as_deref(), self.hovered.as_deref()) {
            (None, None) => InteractionPhase::Idle,
            (None, Some(hovered)) => InteractionPhase::Hovering(hovered),
            (Some(selected), None) => InteractionPhase::Selected(selected),
            (Some(selected), Some(hovered)) if selected == hovered => {
                InteractionPhase::Selected(selected)
            }
            (Some(selected), Some(hovered)) => {
                InteractionPhase::SelectedAndHovering { selected, hovered }
            }
        }
    }

    pub fn entry_state(&self, object_id: &str) -> EntryState {
        if self.selected.as_deref() == Some(object_id) {
            EntryState::Selected
        } else if self.hovered.as_deref() == Some(object_id) {
            EntryState::Hovered
        } else {
            EntryState::Neither
        }
    }
}

impl EmphasisConfig {
    /// Emphasis of an entry in `state`
    pub fn for_state(&self, state: EntryState) -> Emphasis {
        match state {
            EntryState::Selected => Emphasis {
                visibility: 1.0,
                edge_width: self.selected_edge_width,
                axis_opacity: self.selected_axis_opacity,
            },
            EntryState::Hovered => Emphasis {
                visibility: 1.0,
                edge_width: self.hover_edge_width,
                axis_opacity: self.hover_axis_opacity,
            },
            EntryState::Neither => Emphasis::hidden(self.base_edge_width),
        }
    }
}

/// What a handled event changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionOutcome {
    pub changed: bool,
    /// Panel row to bring into view after a hover change
    pub scroll_to: Option<ScrollRequest>,
}

/// Owns the [`InteractionState`] and restyles the catalog on every event
#[derive(Debug, Clone)]
pub struct InteractionStateMachine {
    state: InteractionState,
    emphasis: EmphasisConfig,
    toggle: bool,
}

impl InteractionStateMachine {
    pub fn new(emphasis: EmphasisConfig, selection_toggle: bool) -> Self {
        Self {
            state: InteractionState::default(),
            emphasis,
            toggle: selection_toggle,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn hovered(&self) -> Option<&str> {
        self.state.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.state.selected.as_deref()
    }

    /// Apply `event` and restyle every entry of `catalog`.
    ///
    /// Events naming an object that is not in the catalog are ignored.
    pub fn handle<S: SceneGraph>(
        &mut self,
        event: InteractionEvent,
        catalog: &BoxCatalog,
        scenes: &mut ViewportScenes<S>,
    ) -> TransitionOutcome {
        if let Some(id) = event.target() {
            if !catalog.contains(id) {
                log::warn!("Ignoring {:?}: no catalog entry for '{}'", event, id);
                return TransitionOutcome::default();
            }
        }

        let next = self.state.transition(&event, self.toggle);
        let hover_changed = next.hovered != self.state.hovered;
        let changed = next != self.state;
        self.state = next;
        self.apply(catalog, scenes);

        let scroll_to = match (&self.state.hovered, hover_changed) {
            (Some(id), true) => Some(ScrollRequest::nearest(id)),
            _ => None,
        };
        TransitionOutcome { changed, scroll_to }
    }

    /// Forget everything, e.g. after the catalog was rebuilt
    pub fn clear(&mut self) {
        self.state = InteractionState::default();
    }

    /// Recompute the emphasis of every entry from the current state
    pub fn apply<S: SceneGraph>(&self, catalog: &BoxCatalog, scenes: &mut ViewportScenes<S>) {
        for pair in catalog.iter() {
            let emphasis = self.emphasis.for_state(self.state.entry_state(&pair.object_id));
            for (viewport, handle) in pair.handles() {
                if let Err(e) = scenes.get_mut(viewport).set_emphasis(handle, emphasis) {
                    log::warn!("Failed to restyle '{}': {}", pair.object_id, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(id: &str) -> InteractionEvent {
        InteractionEvent::PointerEnter(id.to_string())
    }

    fn click(id: &str) -> InteractionEvent {
        InteractionEvent::Click(id.to_string())
    }

    #[test]
    fn test_last_enter_wins() {
        let state = InteractionState::default()
            .transition(&enter("door_1"), false)
            .transition(&enter("door_2"), false);
        assert_eq!(state.hovered.as_deref(), Some("door_2"));
        assert_eq!(state.phase(), InteractionPhase::Hovering("door_2"));
    }

    #[test]
    fn test_leave_only_clears_matching_hover() {
        let state = InteractionState::default().transition(&enter("door_1"), false);
        let same = state.transition(&InteractionEvent::PointerLeave("door_2".into()), false);
        assert_eq!(same, state);
        let cleared = state.transition(&InteractionEvent::PointerLeave("door_1".into()), false);
        assert_eq!(cleared.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_click_replaces_selection() {
        let state = InteractionState::default()
            .transition(&click("elev_1"), false)
            .transition(&click("door_1"), false);
        assert_eq!(state.selected.as_deref(), Some("door_1"));
        assert_eq!(state.entry_state("elev_1"), EntryState::Neither);
    }

    #[test]
    fn test_click_selected_is_idempotent_without_toggle() {
        let state = InteractionState::default().transition(&click("door_1"), false);
        assert_eq!(state.transition(&click("door_1"), false), state);
        let toggled = state.transition(&click("door_1"), true);
        assert!(toggled.selected.is_none());
    }

    #[test]
    fn test_selected_and_hovering() {
        let state = InteractionState::default()
            .transition(&click("door_1"), false)
            .transition(&enter("window_1"), false);
        assert_eq!(
            state.phase(),
            InteractionPhase::SelectedAndHovering {
                selected: "door_1",
                hovered: "window_1"
            }
        );
        assert_eq!(state.entry_state("door_1"), EntryState::Selected);
        assert_eq!(state.entry_state("window_1"), EntryState::Hovered);

        let hover_on_selected = state.transition(&enter("door_1"), false);
        assert_eq!(hover_on_selected.phase(), InteractionPhase::Selected("door_1"));
    }

    #[test]
    fn test_stale_hover_dropped_on_new_selection() {
        let state = InteractionState::default()
            .transition(&click("door_1"), false)
            .transition(&enter("door_1"), false)
            .transition(&click("door_2"), false);
        assert_eq!(state.hovered, None);
        assert_eq!(state.selected.as_deref(), Some("door_2"));
    }

    #[test]
    fn test_click_empty_resets() {
        let state = InteractionState::default()
            .transition(&click("elev_1"), false)
            .transition(&enter("door_1"), false)
            .transition(&InteractionEvent::ClickEmpty, false);
        assert_eq!(state, InteractionState::default());
    }

    #[test]
    fn test_emphasis_levels() {
        let config = EmphasisConfig::default();
        let selected = config.for_state(EntryState::Selected);
        let hovered = config.for_state(EntryState::Hovered);
        let neither = config.for_state(EntryState::Neither);

        assert_eq!(selected.edge_width, 15.0);
        assert_eq!(selected.axis_opacity, 1.0);
        assert_eq!(hovered.edge_width, 10.0);
        assert_eq!(hovered.axis_opacity, 0.7);
        assert!(!neither.is_visible());
        assert_eq!(neither.axis_opacity, 0.0);
    }
}
