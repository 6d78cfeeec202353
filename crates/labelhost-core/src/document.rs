//! The host-side stand-in for the displayed page
//!
//! The UI core mounts vector documents under element ids. The rasterizer
//! reads them, the gesture tracker writes transforms and cursor hints back.

use std::collections::HashMap;

/// Cursor hint for a zoomable element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountedElement {
    /// Serialized SVG markup as displayed
    pub svg: String,
    /// Transform applied to the element's zoom target
    pub transform: Option<String>,
    pub cursor: Option<Cursor>,
}

/// Mounted elements by id
#[derive(Debug, Default)]
pub struct DocumentStore {
    elements: HashMap<String, MountedElement>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts or replaces the markup of `id`, keeping any view state
    pub fn mount(&mut self, id: impl Into<String>, svg: impl Into<String>) {
        let id = id.into();
        let svg = svg.into();
        log::debug!("mount {} ({} bytes)", id, svg.len());
        self.elements.entry(id).or_default().svg = svg;
    }

    pub fn unmount(&mut self, id: &str) -> Option<MountedElement> {
        self.elements.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&MountedElement> {
        self.elements.get(id)
    }

    /// Copy of the markup so callers never touch the displayed original
    pub fn clone_svg(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|el| el.svg.clone())
    }

    /// Returns false when `id` is not mounted
    pub fn set_transform(&mut self, id: &str, transform: String) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.transform = Some(transform);
                true
            },
            None => false,
        }
    }

    pub fn set_cursor(&mut self, id: &str, cursor: Cursor) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.cursor = Some(cursor);
                true
            },
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
