//! Screen regions the controller binds to.
//!
//! The host and the modal layout register rectangles here every frame.
//! A region that was never registered (or was removed because the screen
//! is too small) is what a missing page element would be in a browser.

use std::collections::HashMap;
use std::fmt;

use ratatui::layout::Rect;

use docmodal_core::Point;

use crate::ModalError;

/// Identity of a bindable screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Host control that opens the panel
    OpenTrigger,
    /// `[X]` control in the panel header
    CloseTrigger,
    /// Whole panel, borders included
    Panel,
    /// Area the document is written into
    ContentSink,
    /// Top row of the panel, used as drag handle
    Header,
}

impl ElementId {
    /// Whether this region is part of the panel and follows its offset.
    pub fn moves_with_panel(self) -> bool {
        !matches!(self, ElementId::OpenTrigger)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementId::OpenTrigger => "open trigger",
            ElementId::CloseTrigger => "close trigger",
            ElementId::Panel => "panel",
            ElementId::ContentSink => "content area",
            ElementId::Header => "panel header",
        };
        f.write_str(name)
    }
}

/// Registered regions, in untranslated screen coordinates.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    regions: HashMap<ElementId, Rect>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ElementId, area: Rect) {
        self.regions.insert(id, area);
    }

    pub fn remove(&mut self, id: ElementId) {
        self.regions.remove(&id);
    }

    pub fn get(&self, id: ElementId) -> Option<Rect> {
        self.regions.get(&id).copied()
    }

    pub fn require(&self, id: ElementId) -> Result<Rect, ModalError> {
        self.get(id).ok_or(ModalError::MissingElement(id))
    }

    pub fn is_registered(&self, id: ElementId) -> bool {
        self.regions.contains_key(&id)
    }
}

/// Whether `point` lies inside `area`.
pub fn contains(area: Rect, point: Point) -> bool {
    point.x >= i32::from(area.x)
        && point.x < i32::from(area.right())
        && point.y >= i32::from(area.y)
        && point.y < i32::from(area.bottom())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_missing_element() {
        let registry = ElementRegistry::new();
        let err = registry.require(ElementId::OpenTrigger).unwrap_err();
        assert_eq!(err.to_string(), "open trigger not found");
    }

    #[test]
    fn test_register_and_remove() {
        let mut registry = ElementRegistry::new();
        registry.register(ElementId::Panel, Rect::new(1, 1, 10, 5));
        assert_eq!(registry.get(ElementId::Panel), Some(Rect::new(1, 1, 10, 5)));

        registry.remove(ElementId::Panel);
        assert!(!registry.is_registered(ElementId::Panel));
    }

    #[test]
    fn test_contains_is_half_open() {
        let area = Rect::new(2, 3, 4, 1);
        assert!(contains(area, Point::new(2, 3)));
        assert!(contains(area, Point::new(5, 3)));
        assert!(!contains(area, Point::new(6, 3)));
        assert!(!contains(area, Point::new(2, 4)));
    }
}
