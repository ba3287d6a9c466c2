pub mod model;
pub mod store;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use anyhow::Context as _;

use crate::document::model::{DisplayState, Element, ElementPatch, Layer, Slide};
use crate::document::store::ElementStore;
use crate::foundation::core::ElementId;
use crate::foundation::error::{MorphError, MorphResult};

/// In-memory document: elements, layers, slides and display states.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub elements: Vec<Element>,
    pub layers: Vec<Layer>,
    pub slides: Vec<Slide>,
    pub states: Vec<DisplayState>,
    /// Display state most recently applied or morphed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_state_id: Option<String>,
}

impl Document {
    /// Parse and validate a document from JSON.
    pub fn from_reader(reader: impl Read) -> MorphResult<Self> {
        let doc: Self = serde_json::from_reader(reader)
            .map_err(|e| MorphError::serde(format!("parse document JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: &Path) -> MorphResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open document '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn validate(&self) -> MorphResult<()> {
        let mut ids = BTreeSet::new();
        for el in &self.elements {
            if el.id.as_str().is_empty() {
                return Err(MorphError::validation("element id must be non-empty"));
            }
            if !ids.insert(&el.id) {
                return Err(MorphError::validation(format!(
                    "duplicate element id '{}'",
                    el.id
                )));
            }
            let geometry = [el.x, el.y, el.width, el.height, el.opacity, el.angle];
            if geometry.iter().any(|v| !v.is_finite()) {
                return Err(MorphError::validation(format!(
                    "element '{}' has non-finite geometry",
                    el.id
                )));
            }
            let mut anim_ids = BTreeSet::new();
            for anim in &el.animations {
                anim.validate()?;
                if !anim_ids.insert(anim.id.as_str()) {
                    return Err(MorphError::validation(format!(
                        "element '{}' declares animation '{}' twice",
                        el.id, anim.id
                    )));
                }
            }
        }

        for slide in &self.slides {
            let d = slide.dimensions;
            if !(d.width.is_finite() && d.height.is_finite()) || d.width < 0.0 || d.height < 0.0 {
                return Err(MorphError::validation(format!(
                    "slide '{}' must have finite, non-negative dimensions",
                    slide.id
                )));
            }
        }

        let mut state_ids = BTreeSet::new();
        for state in &self.states {
            if !state_ids.insert(state.id.as_str()) {
                return Err(MorphError::validation(format!(
                    "duplicate display state id '{}'",
                    state.id
                )));
            }
            for id in state.overrides.keys() {
                if !ids.contains(id) {
                    // Tolerated: elements may have been deleted after capture.
                    tracing::debug!(
                        state = %state.id,
                        element = %id,
                        "state references missing element"
                    );
                }
            }
        }
        Ok(())
    }

    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == *id)
    }

    /// Remove an element; display states keep their (now stale) references.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let idx = self.elements.iter().position(|el| el.id == *id)?;
        Some(self.elements.remove(idx))
    }

    pub fn state(&self, id: &str) -> MorphResult<&DisplayState> {
        self.states
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| MorphError::animation(format!("unknown display state '{id}'")))
    }

    /// Record the current values of every element as a new display state.
    pub fn capture_state(&mut self, name: impl Into<String>) -> &DisplayState {
        let id = self.fresh_state_id();
        let overrides = self
            .elements
            .iter()
            .map(|el| (el.id.clone(), el.snapshot()))
            .collect();
        tracing::debug!(state = %id, "captured display state");
        self.states.push(DisplayState {
            id,
            name: name.into(),
            overrides,
        });
        let idx = self.states.len() - 1;
        &self.states[idx]
    }

    /// Overwrite a state's mapping with the current element values.
    pub fn update_state(&mut self, id: &str) -> MorphResult<()> {
        let overrides = self
            .elements
            .iter()
            .map(|el| (el.id.clone(), el.snapshot()))
            .collect();
        let state = self
            .states
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| MorphError::animation(format!("unknown display state '{id}'")))?;
        state.overrides = overrides;
        Ok(())
    }

    pub fn delete_state(&mut self, id: &str) -> MorphResult<DisplayState> {
        let idx = self
            .states
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| MorphError::animation(format!("unknown display state '{id}'")))?;
        if self.active_state_id.as_deref() == Some(id) {
            self.active_state_id = None;
        }
        Ok(self.states.remove(idx))
    }

    /// Write a state's overrides straight into the elements. Missing elements are skipped.
    pub fn apply_state(&mut self, id: &str) -> MorphResult<()> {
        let state = self.state(id)?.clone();
        for (el_id, props) in &state.overrides {
            if !self.apply_patch(el_id, &ElementPatch::from(props)) {
                tracing::debug!(element = %el_id, "skipping override for deleted element");
            }
        }
        self.active_state_id = Some(state.id);
        Ok(())
    }

    /// State after the active one, wrapping around. The first state when none is active.
    pub fn next_state_id(&self) -> Option<&str> {
        self.cycle_state(1)
    }

    /// State before the active one, wrapping around. The last state when none is active.
    pub fn previous_state_id(&self) -> Option<&str> {
        self.cycle_state(-1)
    }

    fn cycle_state(&self, step: isize) -> Option<&str> {
        let len = self.states.len();
        if len == 0 {
            return None;
        }
        let current = self
            .active_state_id
            .as_deref()
            .and_then(|id| self.states.iter().position(|s| s.id == id));
        let idx = match current {
            Some(i) => (i as isize + step).rem_euclid(len as isize) as usize,
            None if step >= 0 => 0,
            None => len - 1,
        };
        Some(self.states[idx].id.as_str())
    }

    fn fresh_state_id(&self) -> String {
        (self.states.len() + 1..)
            .map(|n| format!("state-{n}"))
            .find(|id| self.states.iter().all(|s| s.id != *id))
            .unwrap_or_else(|| "state".to_owned())
    }
}

impl ElementStore for Document {
    fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == *id)
    }

    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn apply_patch(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                patch.apply_to(el);
                true
            }
            None => false,
        }
    }

    fn slides(&self) -> &[Slide] {
        &self.slides
    }

    fn layer_order(&self, layer_id: Option<&str>) -> i32 {
        layer_id
            .and_then(|id| self.layers.iter().find(|l| l.id == id))
            .map_or(0, |l| l.order)
    }

    fn display_state(&self, id: &str) -> Option<&DisplayState> {
        self.states.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/document.rs"]
mod tests;
