//! Pinch-zoom and pan for label previews
//!
//! Each zoomable element gets a [`GestureTracker`] once it is initialised.
//! Pointer events for that element run through its state machine; the
//! resulting transform and cursor are written back to the document store,
//! and a [`ZoomUpdate`](labelhost_core::messages::ZoomUpdate) is reported
//! whenever a gesture ends.

use std::collections::HashMap;

use labelhost_core::{messages::PointerEvent, DocumentStore};

pub mod tracker;

#[cfg(test)]
mod proptests;

pub use tracker::{
    clamp_zoom, transform_css, GestureOutcome, GestureTracker, MAX_ZOOM, MIN_ZOOM, WHEEL_STEP,
};

/// All registered trackers, keyed by element id
#[derive(Debug, Default)]
pub struct GestureRegistry {
    trackers: HashMap<String, GestureTracker>,
}

impl GestureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a mounted element: initial transform and `grab` cursor
    ///
    /// Returns false (and registers nothing) if the element isn't mounted.
    /// Re-initialising an element resets its state.
    pub fn init(&mut self, documents: &mut DocumentStore, element_id: &str, initial_zoom: f32) -> bool {
        if !documents.contains(element_id) {
            log::debug!("init-pinch-zoom: '{}' is not mounted, ignoring", element_id);
            return false;
        }
        let tracker = GestureTracker::new(element_id, initial_zoom);
        documents.set_transform(element_id, tracker.transform());
        documents.set_cursor(element_id, labelhost_core::Cursor::Grab);
        self.trackers.insert(element_id.to_string(), tracker);
        true
    }

    /// Overwrites a tracker's state and applies its transform immediately
    pub fn set(
        &mut self,
        documents: &mut DocumentStore,
        element_id: &str,
        zoom: f32,
        pan_x: f32,
        pan_y: f32,
    ) -> bool {
        let Some(tracker) = self.trackers.get_mut(element_id) else {
            log::debug!("set-pinch-zoom: no tracker for '{}'", element_id);
            return false;
        };
        let transform = tracker.set(zoom, pan_x, pan_y);
        documents.set_transform(element_id, transform);
        true
    }

    /// Routes a pointer event to the element's tracker and applies the result
    ///
    /// Events for unregistered elements yield `None`.
    pub fn handle(
        &mut self,
        documents: &mut DocumentStore,
        element_id: &str,
        event: &PointerEvent,
    ) -> Option<GestureOutcome> {
        let tracker = self.trackers.get_mut(element_id)?;
        let outcome = tracker.handle(event);
        if let Some(transform) = &outcome.transform {
            documents.set_transform(element_id, transform.clone());
        }
        if let Some(cursor) = outcome.cursor {
            documents.set_cursor(element_id, cursor);
        }
        Some(outcome)
    }

    pub fn remove(&mut self, element_id: &str) -> Option<GestureTracker> {
        self.trackers.remove(element_id)
    }

    pub fn get(&self, element_id: &str) -> Option<&GestureTracker> {
        self.trackers.get(element_id)
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelhost_core::Cursor;

    fn mounted() -> DocumentStore {
        let mut docs = DocumentStore::new();
        docs.mount("preview", "<svg/>");
        docs
    }

    #[test]
    fn test_init_requires_mounted_element() {
        let mut docs = DocumentStore::new();
        let mut registry = GestureRegistry::new();
        assert!(!registry.init(&mut docs, "preview", 1.0));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_init_applies_transform_and_grab_cursor() {
        let mut docs = mounted();
        let mut registry = GestureRegistry::new();
        assert!(registry.init(&mut docs, "preview", 0.5));

        let element = docs.get("preview").unwrap();
        assert_eq!(element.transform.as_deref(), Some("scale(0.5) translate(0px, 0px)"));
        assert_eq!(element.cursor, Some(Cursor::Grab));
    }

    #[test]
    fn test_set_ignores_unknown_ids() {
        let mut docs = mounted();
        let mut registry = GestureRegistry::new();
        assert!(!registry.set(&mut docs, "preview", 2.0, 1.0, 1.0));
        assert_eq!(docs.get("preview").unwrap().transform, None);
    }

    #[test]
    fn test_set_applies_immediately() {
        let mut docs = mounted();
        let mut registry = GestureRegistry::new();
        registry.init(&mut docs, "preview", 1.0);
        assert!(registry.set(&mut docs, "preview", 2.0, 3.0, 4.0));
        assert_eq!(
            docs.get("preview").unwrap().transform.as_deref(),
            Some("scale(2) translate(3px, 4px)")
        );
    }

    #[test]
    fn test_handle_writes_cursor_and_reports_update() {
        let mut docs = mounted();
        let mut registry = GestureRegistry::new();
        registry.init(&mut docs, "preview", 1.0);

        registry.handle(
            &mut docs,
            "preview",
            &PointerEvent::MouseDown {
                button: 0,
                x: 0.0,
                y: 0.0,
            },
        );
        assert_eq!(docs.get("preview").unwrap().cursor, Some(Cursor::Grabbing));

        let outcome = registry
            .handle(&mut docs, "preview", &PointerEvent::MouseUp)
            .unwrap();
        assert_eq!(outcome.update.unwrap().element_id, "preview");
        assert_eq!(docs.get("preview").unwrap().cursor, Some(Cursor::Grab));
    }

    #[test]
    fn test_handle_unknown_element() {
        let mut docs = mounted();
        let mut registry = GestureRegistry::new();
        assert!(registry
            .handle(&mut docs, "preview", &PointerEvent::TouchEnd)
            .is_none());
    }
}
