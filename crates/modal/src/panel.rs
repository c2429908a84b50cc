//! Panel visibility and position.

use docmodal_core::Offset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

/// The modal surface: visibility plus its drag offset.
///
/// The offset survives multiple drags while shown and is zeroed on hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panel {
    visibility: Visibility,
    offset: Offset,
}

impl Panel {
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub(crate) fn show(&mut self) {
        self.visibility = Visibility::Shown;
    }

    pub(crate) fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
        self.offset = Offset::ZERO;
    }

    pub(crate) fn move_to(&mut self, offset: Offset) {
        self.offset = offset;
    }
}
