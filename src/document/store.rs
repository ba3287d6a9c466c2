use crate::document::model::{DisplayState, Element, ElementPatch, Slide};
use crate::foundation::core::ElementId;

/// Mutable element store the engine reads from and writes into.
///
/// Writes are partial (see [`ElementPatch`]) and keyed by element id; reads are by id or in
/// bulk. Hosts with their own document model implement this trait; [`crate::Document`] is the
/// in-memory implementation.
pub trait ElementStore {
    fn element(&self, id: &ElementId) -> Option<&Element>;

    /// All elements in document order.
    fn elements(&self) -> &[Element];

    /// Apply a partial write. Returns `false` when the element no longer exists.
    fn apply_patch(&mut self, id: &ElementId, patch: &ElementPatch) -> bool;

    fn slides(&self) -> &[Slide];

    /// Stacking order of a layer; unknown or missing layers sort as `0`.
    fn layer_order(&self, layer_id: Option<&str>) -> i32;

    fn display_state(&self, id: &str) -> Option<&DisplayState>;

    /// Elements whose bounding-box center lies on slide `index`, in document order.
    fn elements_on_slide(&self, index: usize) -> Vec<&Element> {
        let Some(slide) = self.slides().get(index) else {
            return Vec::new();
        };
        self.elements()
            .iter()
            .filter(|el| slide.contains(el))
            .collect()
    }
}
