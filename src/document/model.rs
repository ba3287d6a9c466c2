use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::foundation::core::{ElementId, Millis, Point, Rect, Size, bounds_center};
use crate::foundation::error::{MorphError, MorphResult};
use crate::geometry::shapes::ShapeParams;

/// A drawable element of the document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    /// Shape type name resolved through the geometry provider.
    #[serde(rename = "type")]
    pub shape_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Percent, `0..=100`.
    #[serde(default = "full_opacity")]
    pub opacity: f64,
    /// Radians.
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "default_stroke")]
    pub stroke_color: String,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_id: Option<String>,
    #[serde(flatten)]
    pub params: ShapeParams,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<AnimationDescriptor>,
    /// Perpetual flow effect (marching dashes); keeps the clock ticking.
    #[serde(default)]
    pub flow_animation: bool,
    /// Outline drawn instead of the native shape while a morph is in flight, in element-local
    /// coordinates centered on the bounding box. Never persisted.
    #[serde(skip)]
    pub contour_override: Option<Vec<Point>>,
}

fn full_opacity() -> f64 {
    100.0
}

fn default_stroke() -> String {
    "#1e1e1e".to_owned()
}

fn default_background() -> String {
    "transparent".to_owned()
}

impl Element {
    /// Minimal element of `shape_type` at the given bounds; everything else defaulted.
    pub fn new(id: impl Into<ElementId>, shape_type: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            shape_type: shape_type.into(),
            x: bounds.x0,
            y: bounds.y0,
            width: bounds.width(),
            height: bounds.height(),
            opacity: full_opacity(),
            angle: 0.0,
            stroke_color: default_stroke(),
            background_color: default_background(),
            text: None,
            layer_id: None,
            params: ShapeParams::default(),
            animations: Vec::new(),
            flow_animation: false,
            contour_override: None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        bounds_center(self.x, self.y, self.size())
    }

    /// Every property a display state can record, read from the live element.
    pub fn snapshot(&self) -> ElementState {
        ElementState {
            x: Some(self.x),
            y: Some(self.y),
            width: Some(self.width),
            height: Some(self.height),
            opacity: Some(self.opacity),
            angle: Some(self.angle),
            background_color: Some(self.background_color.clone()),
            stroke_color: Some(self.stroke_color.clone()),
            text: self.text.clone(),
            shape_type: Some(self.shape_type.clone()),
        }
    }
}

/// Partial property bag recorded by a display state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Morph target type; when absent the element keeps its own type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
}

/// Named snapshot of element properties that the document can morph to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayState {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub overrides: BTreeMap<ElementId, ElementState>,
}

/// How a patch treats the contour override.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ContourPatch {
    #[default]
    Keep,
    Set(Vec<Point>),
    Clear,
}

/// Partial write applied to one element by runners and state application.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub opacity: Option<f64>,
    pub angle: Option<f64>,
    pub background_color: Option<String>,
    pub stroke_color: Option<String>,
    pub text: Option<String>,
    pub shape_type: Option<String>,
    pub contour: ContourPatch,
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every set field into `el`.
    pub fn apply_to(&self, el: &mut Element) {
        if let Some(v) = self.x {
            el.x = v;
        }
        if let Some(v) = self.y {
            el.y = v;
        }
        if let Some(v) = self.width {
            el.width = v;
        }
        if let Some(v) = self.height {
            el.height = v;
        }
        if let Some(v) = self.opacity {
            el.opacity = v;
        }
        if let Some(v) = self.angle {
            el.angle = v;
        }
        if let Some(v) = &self.background_color {
            el.background_color.clone_from(v);
        }
        if let Some(v) = &self.stroke_color {
            el.stroke_color.clone_from(v);
        }
        if let Some(v) = &self.text {
            el.text = Some(v.clone());
        }
        if let Some(v) = &self.shape_type {
            el.shape_type.clone_from(v);
        }
        match &self.contour {
            ContourPatch::Keep => {}
            ContourPatch::Set(points) => el.contour_override = Some(points.clone()),
            ContourPatch::Clear => el.contour_override = None,
        }
    }
}

impl From<&ElementState> for ElementPatch {
    fn from(s: &ElementState) -> Self {
        Self {
            x: s.x,
            y: s.y,
            width: s.width,
            height: s.height,
            opacity: s.opacity,
            angle: s.angle,
            background_color: s.background_color.clone(),
            stroke_color: s.stroke_color.clone(),
            text: s.text.clone(),
            shape_type: s.shape_type.clone(),
            contour: ContourPatch::Clear,
        }
    }
}

/// Condition that starts an animation during slide playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    OnLoad,
    OnClick,
    WithPrev,
    AfterPrev,
    OnHover,
    Programmatic,
}

/// Number or string property value (`"#ff0000"`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

/// Type-specific payload of an animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnimationKind {
    /// Named effect such as `fadeIn` or `shake`.
    Preset { name: String },
    /// Tween of a single property.
    Property {
        property: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<PropertyValue>,
        to: PropertyValue,
    },
    /// Motion along SVG path data.
    #[serde(rename_all = "camelCase")]
    Path {
        path_data: String,
        #[serde(default)]
        is_relative: bool,
        #[serde(default)]
        orient_to_path: bool,
    },
    /// Rotation to an angle given in degrees.
    #[serde(rename_all = "camelCase")]
    Rotate {
        to_angle: f64,
        #[serde(default)]
        relative: bool,
    },
    /// Morph to a display state.
    #[serde(rename_all = "camelCase")]
    Transition { state_id: String },
}

/// Animation declared on an element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDescriptor {
    pub id: String,
    pub trigger: Trigger,
    #[serde(default)]
    pub duration: Millis,
    #[serde(default)]
    pub delay: Millis,
    #[serde(default)]
    pub easing: Ease,
    /// `0` plays once, `n > 0` adds `n` cycles, `-1` repeats forever.
    #[serde(default)]
    pub repeat: i32,
    /// Alternate direction on every cycle.
    #[serde(default)]
    pub yoyo: bool,
    #[serde(flatten)]
    pub kind: AnimationKind,
}

impl AnimationDescriptor {
    /// Total number of cycles, `None` for infinite repetition.
    pub fn cycles(&self) -> Option<u32> {
        match self.repeat {
            r if r < 0 => None,
            r => Some(u32::try_from(r).unwrap_or(0).saturating_add(1)),
        }
    }

    pub fn validate(&self) -> MorphResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(MorphError::validation(format!(
                "animation '{}' duration must be finite and >= 0",
                self.id
            )));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(MorphError::validation(format!(
                "animation '{}' delay must be finite and >= 0",
                self.id
            )));
        }
        if self.repeat < -1 {
            return Err(MorphError::validation(format!(
                "animation '{}' repeat must be -1 or >= 0",
                self.id
            )));
        }
        Ok(())
    }
}

/// Stacking layer. Lower `order` is further back.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i32,
}

/// Rectangular region of the canvas presented as one slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub spatial_position: Point,
    pub dimensions: Size,
    #[serde(default)]
    pub order: i32,
}

impl Slide {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.spatial_position, self.dimensions)
    }

    /// Whether the element's bounding-box center lies inside the slide (edges inclusive).
    pub fn contains(&self, el: &Element) -> bool {
        let r = self.bounds();
        let c = el.center();
        c.x >= r.x0 && c.x <= r.x1 && c.y >= r.y0 && c.y <= r.y1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
