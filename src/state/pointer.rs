//! Pointer hit-testing.
//!
//! Pure mapping from a click position to the element under it, using the
//! rectangles recorded by the last render.

use ratatui::layout::Rect;

/// Screen regions of the last rendered frame.
///
/// Regions are `None` when the element was not drawn (the trigger only
/// exists while closed; the panel only while open; the clear affordance
/// only while the query is non-empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalLayout {
    /// Button that opens the modal.
    pub trigger: Option<Rect>,
    /// Whole search panel, including its border.
    pub panel: Option<Rect>,
    /// Query input box.
    pub input: Option<Rect>,
    /// Clear affordance inside the input box.
    pub clear_button: Option<Rect>,
    /// Result list area.
    pub results: Option<Rect>,
    /// Footer line with hints and telemetry.
    pub footer: Option<Rect>,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The button that opens the modal.
    Trigger,
    /// The clear affordance in the input box.
    ClearButton,
    /// Inside the panel but not on an interactive element.
    Panel,
    /// Outside the panel while it is open.
    Overlay,
    /// Nothing interactive (closed screen background).
    Nothing,
}

fn contains(rect: Option<Rect>, x: u16, y: u16) -> bool {
    rect.is_some_and(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
}

/// Resolve the element under `(x, y)`.
pub fn hit_test(layout: &ModalLayout, x: u16, y: u16) -> PointerTarget {
    if let Some(panel) = layout.panel {
        if contains(layout.clear_button, x, y) {
            return PointerTarget::ClearButton;
        }
        if contains(Some(panel), x, y) {
            return PointerTarget::Panel;
        }
        return PointerTarget::Overlay;
    }

    if contains(layout.trigger, x, y) {
        PointerTarget::Trigger
    } else {
        PointerTarget::Nothing
    }
}
