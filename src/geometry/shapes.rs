use std::collections::{BTreeSet, HashMap};
use std::f64::consts::PI;

use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::math::noise01;

/// Geometric description of a shape in element-local coordinates.
///
/// The origin is the center of the element bounding box, so the top-left corner of a `w x h`
/// element sits at `(-w/2, -h/2)`.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
    },
    /// SVG path data.
    Path { data: String },
    Points { points: Vec<Point>, closed: bool },
    Multi { shapes: Vec<ShapeGeometry> },
}

impl ShapeGeometry {
    fn closed(points: Vec<Point>) -> Self {
        Self::Points {
            points,
            closed: true,
        }
    }

    fn open(points: Vec<Point>) -> Self {
        Self::Points {
            points,
            closed: false,
        }
    }

    fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self::Ellipse {
            center: Point::new(cx, cy),
            rx,
            ry,
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Self {
        Self::Rect { x, y, w, h, radius }
    }
}

/// Type-specific shape parameters carried by an element.
///
/// Ratios are percentages (`38` means 38%); unset values use each shape's own default.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeParams {
    #[serde(deserialize_with = "truthy")]
    pub roundness: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygon_sides: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Explicit points for free-form elements (lines, arrows), relative to the element's top-left
    /// corner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

// `roundness` is stored either as a flag or as an options object; any non-null, non-false value
// turns rounding on.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    })
}

/// Source of shape geometry for an element type and bounding box.
pub trait GeometryProvider {
    /// Geometry for `shape_type`, or `None` when the type is unknown.
    fn geometry(&self, shape_type: &str, size: Size, params: &ShapeParams)
    -> Option<ShapeGeometry>;

    /// Whether the type has an outline that can be contour-morphed.
    fn has_silhouette(&self, shape_type: &str) -> bool {
        let _ = shape_type;
        true
    }
}

type GeometryFn = Box<dyn Fn(Size, &ShapeParams) -> ShapeGeometry + Send + Sync>;

/// Explicit registry of shape geometry generators.
///
/// [`ShapeRegistry::with_builtins`] knows the diagram shapes of the editor; hosts can add or
/// override types with [`ShapeRegistry::register`].
pub struct ShapeRegistry {
    shapes: HashMap<String, GeometryFn>,
    opaque: BTreeSet<String>,
}

impl std::fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("shapes", &self.names())
            .field("opaque", &self.opaque)
            .finish()
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ShapeRegistry {
    /// Registry with no shapes at all.
    pub fn empty() -> Self {
        Self {
            shapes: HashMap::new(),
            opaque: BTreeSet::new(),
        }
    }

    /// Registry populated with every built-in shape type.
    pub fn with_builtins() -> Self {
        let mut r = Self::empty();
        for (name, f) in BUILTINS {
            r.register(*name, *f);
        }
        r.mark_opaque("image");
        r.mark_opaque("text");
        r
    }

    /// Register (or replace) the generator for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(Size, &ShapeParams) -> ShapeGeometry + Send + Sync + 'static,
    {
        self.shapes.insert(name.into(), Box::new(f));
    }

    /// Mark a type as having no morphable silhouette (raster images, text).
    pub fn mark_opaque(&mut self, name: impl Into<String>) {
        self.opaque.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shapes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl GeometryProvider for ShapeRegistry {
    fn geometry(
        &self,
        shape_type: &str,
        size: Size,
        params: &ShapeParams,
    ) -> Option<ShapeGeometry> {
        self.shapes.get(shape_type).map(|f| f(size, params))
    }

    fn has_silhouette(&self, shape_type: &str) -> bool {
        !self.opaque.contains(shape_type)
    }
}

type Builtin = fn(Size, &ShapeParams) -> ShapeGeometry;

const BUILTINS: &[(&str, Builtin)] = &[
    ("rectangle", rounded_box),
    ("image", rounded_box),
    ("text", rounded_box),
    ("umlClass", rounded_box),
    ("umlNote", rounded_box),
    ("umlPackage", rounded_box),
    ("umlActor", rounded_box),
    ("circle", inscribed_ellipse),
    ("umlInterface", inscribed_ellipse),
    ("umlUseCase", inscribed_ellipse),
    ("stateStart", inscribed_ellipse),
    ("triangle", triangle),
    ("diamond", diamond),
    ("hexagon", hexagon),
    ("octagon", octagon),
    ("pentagon", pentagon),
    ("septagon", septagon),
    ("polygon", polygon),
    ("star", star),
    ("burst", burst),
    ("burstBlob", burst_blob),
    ("parallelogram", parallelogram),
    ("trapezoid", trapezoid),
    ("rightTriangle", right_triangle),
    ("capsule", capsule),
    ("stickyNote", sticky_note),
    ("callout", callout),
    ("speechBubble", speech_bubble),
    ("cloud", cloud),
    ("heart", heart),
    ("starPerson", star_person),
    ("lightbulb", lightbulb),
    ("signpost", signpost),
    ("scroll", scroll),
    ("doubleBanner", double_banner),
    ("document", document),
    ("cross", cross),
    ("checkmark", checkmark),
    ("wavyDivider", wavy_divider),
    ("ribbon", ribbon),
    ("bracketLeft", bracket_left),
    ("bracketRight", bracket_right),
    ("arrowLeft", arrow_left),
    ("arrowRight", arrow_right),
    ("arrowUp", arrow_up),
    ("arrowDown", arrow_down),
    ("dfdProcess", dfd_process),
    ("dfdDataStore", dfd_data_store),
    ("isometricCube", isometric_cube),
    ("cylinder", cylinder),
    ("stateEnd", state_end),
    ("stateSync", state_sync),
    ("activationBar", activation_bar),
    ("externalEntity", external_entity),
    ("line", free_form),
    ("arrow", free_form),
];

/// Half extents and top-left corner of a centered `w x h` box.
struct Frame {
    w: f64,
    h: f64,
    x: f64,
    y: f64,
    mw: f64,
    mh: f64,
}

impl Frame {
    fn new(size: Size) -> Self {
        let (w, h) = (size.width, size.height);
        Self {
            w,
            h,
            x: -w / 2.0,
            y: -h / 2.0,
            mw: w / 2.0,
            mh: h / 2.0,
        }
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn rounded_box(size: Size, p: &ShapeParams) -> ShapeGeometry {
    corner_box(size, if p.roundness { 10.0 } else { 0.0 })
}

fn corner_box(size: Size, radius: f64) -> ShapeGeometry {
    let f = Frame::new(size);
    ShapeGeometry::rect(f.x, f.y, f.w, f.h, radius)
}

fn state_sync(size: Size, _: &ShapeParams) -> ShapeGeometry {
    corner_box(size, 2.0)
}

fn activation_bar(size: Size, _: &ShapeParams) -> ShapeGeometry {
    corner_box(size, 0.0)
}

fn inscribed_ellipse(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    ShapeGeometry::ellipse(0.0, 0.0, f.mw, f.mh)
}

fn triangle(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    ShapeGeometry::closed(vec![pt(0.0, -f.mh), pt(-f.mw, f.mh), pt(f.mw, f.mh)])
}

fn diamond(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    ShapeGeometry::closed(vec![
        pt(0.0, -f.mh),
        pt(f.mw, 0.0),
        pt(0.0, f.mh),
        pt(-f.mw, 0.0),
    ])
}

fn regular_polygon(size: Size, sides: u32) -> ShapeGeometry {
    let f = Frame::new(size);
    let points = (0..sides)
        .map(|i| {
            let a = (2.0 * PI / f64::from(sides)) * f64::from(i) - PI / 2.0;
            pt(f.mw * a.cos(), f.mh * a.sin())
        })
        .collect();
    ShapeGeometry::closed(points)
}

fn pentagon(size: Size, _: &ShapeParams) -> ShapeGeometry {
    regular_polygon(size, 5)
}

fn hexagon(size: Size, _: &ShapeParams) -> ShapeGeometry {
    regular_polygon(size, 6)
}

fn septagon(size: Size, _: &ShapeParams) -> ShapeGeometry {
    regular_polygon(size, 7)
}

fn octagon(size: Size, _: &ShapeParams) -> ShapeGeometry {
    regular_polygon(size, 8)
}

fn polygon(size: Size, p: &ShapeParams) -> ShapeGeometry {
    regular_polygon(size, p.polygon_sides.filter(|n| *n >= 3).unwrap_or(6))
}

fn spiked(outer: f64, inner: f64, tips: u32) -> Vec<Point> {
    (0..tips * 2)
        .map(|i| {
            let a = (PI / f64::from(tips)) * f64::from(i) - PI / 2.0;
            let r = if i % 2 == 0 { outer } else { inner };
            pt(r * a.cos(), r * a.sin())
        })
        .collect()
}

fn star(size: Size, p: &ShapeParams) -> ShapeGeometry {
    let outer = size.width.min(size.height) / 2.0;
    let inner = outer * p.shape_ratio.unwrap_or(38.0) / 100.0;
    let tips = p.star_points.filter(|n| *n > 0).unwrap_or(5);
    ShapeGeometry::closed(spiked(outer, inner, tips))
}

fn burst(size: Size, p: &ShapeParams) -> ShapeGeometry {
    let outer = size.width.abs().min(size.height.abs()) / 2.0;
    let inner = outer * p.shape_ratio.unwrap_or(70.0) / 100.0;
    let tips = p.burst_points.filter(|n| *n > 0).unwrap_or(16);
    ShapeGeometry::closed(spiked(outer, inner, tips))
}

fn burst_blob(size: Size, p: &ShapeParams) -> ShapeGeometry {
    const SPIKES: u32 = 12;
    let f = Frame::new(size);
    let outer = f.mw.min(f.mh);
    let inner = outer * 0.6;
    let seed = p.seed.unwrap_or(1);
    let aspect = if f.h != 0.0 { f.w / f.h } else { 1.0 };
    let points = (0..SPIKES * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let jitter = (noise01(seed, u64::from(i)) - 0.5) * outer * 0.1;
            let a = PI * f64::from(i) / f64::from(SPIKES);
            pt(a.cos() * aspect * (r + jitter), a.sin() * (r + jitter))
        })
        .collect();
    ShapeGeometry::closed(points)
}

fn parallelogram(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    let o = f.w * 0.2;
    ShapeGeometry::closed(vec![
        pt(f.x + o, f.y),
        pt(f.x + f.w, f.y),
        pt(f.x + f.w - o, f.y + f.h),
        pt(f.x, f.y + f.h),
    ])
}

fn trapezoid(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    let o = f.w * 0.2;
    ShapeGeometry::closed(vec![
        pt(f.x + o, f.y),
        pt(f.x + f.w - o, f.y),
        pt(f.x + f.w, f.y + f.h),
        pt(f.x, f.y + f.h),
    ])
}

fn right_triangle(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    ShapeGeometry::closed(vec![
        pt(f.x, f.y),
        pt(f.x, f.y + f.h),
        pt(f.x + f.w, f.y + f.h),
    ])
}

fn rounded_rect_path(x: f64, y: f64, w: f64, h: f64, r: f64) -> String {
    format!(
        "M {} {y} L {} {y} Q {} {y} {} {} L {} {} Q {} {} {} {} \
         L {} {} Q {x} {} {x} {} L {x} {} Q {x} {y} {} {y}",
        x + r,
        x + w - r,
        x + w,
        x + w,
        y + r,
        x + w,
        y + h - r,
        x + w,
        y + h,
        x + w - r,
        y + h,
        x + r,
        y + h,
        y + h,
        y + h - r,
        y + r,
        x + r,
    )
}

fn capsule(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    ShapeGeometry::Path {
        data: rounded_rect_path(f.x, f.y, f.w, f.h, f.w.min(f.h) / 2.0),
    }
}

fn sticky_note(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let f = Frame::new(size);
    let fold = f.w.min(f.h) * 0.15;
    ShapeGeometry::closed(vec![
        pt(f.x, f.y),
        pt(f.x + f.w, f.y),
        pt(f.x + f.w, f.y + f.h - fold),
        pt(f.x + f.w - fold, f.y + f.h),
        pt(f.x, f.y + f.h),
    ])
}

fn callout(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, mh, .. } = Frame::new(size);
    let body = h - h * 0.2;
    ShapeGeometry::Path {
        data: format!(
            "M {x} {y} L {} {y} L {} {} L {} {} L 0 {mh} L {} {} L {x} {} Z",
            x + w,
            x + w,
            y + body,
            x + w * 0.7,
            y + body,
            x + w * 0.3,
            y + body,
            y + body,
        ),
    }
}

fn speech_bubble(size: Size, p: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, mh, .. } = Frame::new(size);
    let r = w.min(h) * p.border_radius.unwrap_or(20.0) / 100.0;
    let tail_w = w * 0.15;
    let body = h - h * 0.2;
    let tail_pos = p.tail_position.unwrap_or(20.0) / 100.0;
    let tip = x + w * tail_pos;
    let (b1, b2) = if tail_pos <= 0.5 {
        let b1 = tip + w * 0.1;
        (b1, b1 + tail_w)
    } else {
        let b2 = tip - w * 0.1;
        (b2 - tail_w, b2)
    };
    let rx = (w / 2.0).min(r);
    let ry = (body / 2.0).min(r);
    let bottom = y + body;
    ShapeGeometry::Path {
        data: format!(
            "M {} {y} L {} {y} Q {} {y} {} {} L {} {} Q {} {bottom} {} {bottom} \
             L {b2} {bottom} L {tip} {mh} L {b1} {bottom} L {} {bottom} \
             Q {x} {bottom} {x} {} L {x} {} Q {x} {y} {} {y} Z",
            x + rx,
            x + w - rx,
            x + w,
            x + w,
            y + ry,
            x + w,
            bottom - ry,
            x + w,
            x + w - rx,
            x + rx,
            bottom - ry,
            y + ry,
            x + rx,
        ),
    }
}

fn cloud(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let (r1, r2, r3, r4) = (w * 0.2, w * 0.25, w * 0.2, w * 0.3);
    ShapeGeometry::Path {
        data: format!(
            "M {} 0 A {r1} {r1} 0 0 1 {} {} A {r2} {r2} 0 0 1 {} {} A {r3} {r3} 0 0 1 {} 0 \
             A {r4} {r4} 0 0 1 {} {} A {r4} {r4} 0 0 1 {} {} A {r4} {r4} 0 0 1 {} 0 Z",
            x + r1,
            x + w * 0.3,
            y + r2,
            x + w * 0.7,
            y + r2,
            x + w - r3,
            x + w * 0.6,
            y + h - r4 * 0.5,
            x + w * 0.3,
            y + h - r4 * 0.5,
            x + r1,
        ),
    }
}

fn heart(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let at = |fx: f64, fy: f64| format!("{} {}", x + w * fx, y + h * fy);
    let mid = |fy: f64| format!("0 {}", y + h * fy);
    ShapeGeometry::Path {
        data: format!(
            "M {} C {} {} {} C {} {} {} C {} {} {} C {} {} {} C {} {} {} Z",
            mid(0.3),
            mid(0.15),
            at(0.3, 0.0),
            at(0.5, 0.15),
            at(0.7, 0.0),
            at(1.0, 0.15),
            at(1.0, 0.35),
            at(1.0, 0.6),
            mid(0.8),
            mid(1.0),
            mid(0.8),
            at(0.0, 0.6),
            at(0.0, 0.35),
            at(0.0, 0.15),
            at(0.3, 0.0),
            at(0.5, 0.15),
        ),
    }
}

fn star_person(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let head = w.min(h) * 0.15;
    let neck = y + head * 2.0;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::ellipse(0.0, y + head, head, head),
            ShapeGeometry::closed(vec![
                pt(0.0, neck),
                pt(x, y + h * 0.4),
                pt(0.0, y + h * 0.5),
                pt(x + w, y + h * 0.4),
                pt(0.0, neck),
                pt(x + w * 0.8, y + h),
                pt(0.0, y + h * 0.7),
                pt(x + w * 0.2, y + h),
                pt(0.0, neck),
            ]),
        ],
    }
}

fn lightbulb(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let bulb = w.min(h / 1.5) / 2.0;
    let base_w = w * 0.4;
    let base_h = h * 0.25;
    let base_y = y + h - base_h;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::Path {
                data: format!(
                    "M {} {base_y} C {} {} {x} {} {x} {} A {bulb} {bulb} 0 1 1 {} {} \
                     C {} {} {} {} {} {base_y} Z",
                    -base_w / 2.0,
                    -base_w / 2.0,
                    y + bulb,
                    y + bulb * 1.5,
                    y + bulb,
                    x + w,
                    y + bulb,
                    x + w,
                    y + bulb * 1.5,
                    base_w / 2.0,
                    y + bulb,
                    base_w / 2.0,
                ),
            },
            ShapeGeometry::rect(-base_w / 2.0, base_y, base_w, base_h, 0.0),
        ],
    }
}

fn signpost(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, y, .. } = Frame::new(size);
    let pole = (w * 0.05).max(4.0);
    let board_w = w * 0.9;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::rect(-pole / 2.0, y, pole, h, 0.0),
            ShapeGeometry::rect(-board_w / 2.0, y + h * 0.1, board_w, h * 0.3, 0.0),
        ],
    }
}

fn scroll(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let r = h * 0.15;
    let (top, bottom, right) = (y + r, y + h - r, x + w);
    ShapeGeometry::Path {
        data: format!(
            "M {x} {top} L {right} {top} L {right} {bottom} L {x} {bottom} Z \
             M {x} {top} C {} {top} {} {y} {x} {y} L {right} {y} C {} {y} {} {top} {right} {top} \
             M {x} {bottom} C {} {bottom} {} {} {x} {} \
             L {right} {} C {} {} {} {bottom} {right} {bottom}",
            x - r,
            x - r,
            right + r,
            right + r,
            x - r,
            x - r,
            y + h,
            y + h,
            y + h,
            right + r,
            y + h,
            right + r,
        ),
    }
}

fn double_banner(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, mh, .. } = Frame::new(size);
    let ew = w * 0.15;
    let eh = h * 0.25;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::closed(vec![
                pt(x + ew, y + eh),
                pt(x, y + eh),
                pt(x + ew / 2.0, 0.0),
                pt(x, mh),
                pt(x + ew, mh),
            ]),
            ShapeGeometry::closed(vec![
                pt(x + w - ew, y + eh),
                pt(x + w, y + eh),
                pt(x + w - ew / 2.0, 0.0),
                pt(x + w, mh),
                pt(x + w - ew, mh),
            ]),
            ShapeGeometry::closed(vec![
                pt(x + ew, y),
                pt(x + w - ew, y),
                pt(x + w - ew, y + h - eh),
                pt(x + ew, y + h - eh),
            ]),
        ],
    }
}

fn document(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let wave = h * 0.1;
    ShapeGeometry::Path {
        data: format!(
            "M {x} {y} L {} {y} L {} {} Q {} {} {} {} T {x} {} Z",
            x + w,
            x + w,
            y + h - wave,
            x + w * 0.75,
            y + h - wave * 2.0,
            x + w * 0.5,
            y + h - wave,
            y + h - wave,
        ),
    }
}

fn cross(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::closed(vec![pt(x, y), pt(x + w, y + h)]),
            ShapeGeometry::closed(vec![pt(x + w, y), pt(x, y + h)]),
        ],
    }
}

fn checkmark(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, mh, .. } = Frame::new(size);
    ShapeGeometry::closed(vec![
        pt(x, y + h * 0.5),
        pt(x + w * 0.4, mh),
        pt(x + w, y),
    ])
}

fn wavy_divider(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, .. } = Frame::new(size);
    let mut data = format!("M {x} 0");
    for i in 1..=20 {
        let f = f64::from(i) / 20.0;
        data.push_str(&format!(
            " L {} {}",
            x + f * w,
            (f * PI * 4.0).sin() * (h / 2.0)
        ));
    }
    ShapeGeometry::Path { data }
}

fn ribbon(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let ew = w * 0.15;
    let mid = h * 0.7;
    ShapeGeometry::Path {
        data: format!(
            "M {} {y} L {} {y} L {} {} L {} {} L {} {} L {} {} L {x} {} L {} {} Z",
            x + ew,
            x + w - ew,
            x + w - ew,
            y + mid,
            x + w,
            y + h / 2.0,
            x + w - ew,
            y + h * 0.8,
            x + ew,
            y + h * 0.8,
            y + h / 2.0,
            x + ew,
            y + mid,
        ),
    }
}

fn bracket_left(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    ShapeGeometry::open(vec![pt(x + w, y), pt(x, y + h / 2.0), pt(x + w, y + h)])
}

fn bracket_right(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    ShapeGeometry::open(vec![pt(x, y), pt(x + w, y + h / 2.0), pt(x, y + h)])
}

fn arrow_left(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let tail_h = h * 0.4;
    let tail_y = y + (h - tail_h) / 2.0;
    let head_w = w * 0.4;
    ShapeGeometry::closed(vec![
        pt(x + head_w, y),
        pt(x + head_w, tail_y),
        pt(x + w, tail_y),
        pt(x + w, tail_y + tail_h),
        pt(x + head_w, tail_y + tail_h),
        pt(x + head_w, y + h),
        pt(x, y + h / 2.0),
    ])
}

fn arrow_right(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let tail_h = h * 0.4;
    let tail_y = y + (h - tail_h) / 2.0;
    let head_w = w * 0.4;
    ShapeGeometry::closed(vec![
        pt(x + w - head_w, y),
        pt(x + w, y + h / 2.0),
        pt(x + w - head_w, y + h),
        pt(x + w - head_w, tail_y + tail_h),
        pt(x, tail_y + tail_h),
        pt(x, tail_y),
        pt(x + w - head_w, tail_y),
    ])
}

fn arrow_up(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let tail_w = w * 0.4;
    let tail_x = x + (w - tail_w) / 2.0;
    let head_h = h * 0.4;
    ShapeGeometry::closed(vec![
        pt(x + w / 2.0, y),
        pt(x + w, y + head_h),
        pt(tail_x + tail_w, y + head_h),
        pt(tail_x + tail_w, y + h),
        pt(tail_x, y + h),
        pt(tail_x, y + head_h),
        pt(x, y + head_h),
    ])
}

fn arrow_down(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let tail_w = w * 0.4;
    let tail_x = x + (w - tail_w) / 2.0;
    let head_h = h * 0.4;
    ShapeGeometry::closed(vec![
        pt(tail_x, y),
        pt(tail_x + tail_w, y),
        pt(tail_x + tail_w, y + h - head_h),
        pt(x + w, y + h - head_h),
        pt(x + w / 2.0, y + h),
        pt(x, y + h - head_h),
        pt(tail_x, y + h - head_h),
    ])
}

fn dfd_process(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let header = h * 0.25;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::rect(x, y, w, h, 10.0),
            ShapeGeometry::open(vec![pt(x, y + header), pt(x + w, y + header)]),
        ],
    }
}

fn dfd_data_store(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let label = w * 0.2;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::open(vec![
                pt(x + w, y),
                pt(x, y),
                pt(x, y + h),
                pt(x + w, y + h),
            ]),
            ShapeGeometry::open(vec![pt(x + label, y), pt(x + label, y + h)]),
        ],
    }
}

fn isometric_cube(size: Size, p: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, .. } = Frame::new(size);
    let face = h * p.shape_ratio.unwrap_or(25.0) / 100.0;
    let spine = x + w * p.side_ratio.unwrap_or(50.0) / 100.0;
    let center = y + face;
    let shoulder = y + face / 2.0;
    let foot = y + h - face / 2.0;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::closed(vec![
                pt(spine, y),
                pt(x + w, shoulder),
                pt(spine, center),
                pt(x, shoulder),
            ]),
            ShapeGeometry::closed(vec![
                pt(x, shoulder),
                pt(spine, center),
                pt(spine, y + h),
                pt(x, foot),
            ]),
            ShapeGeometry::closed(vec![
                pt(spine, center),
                pt(x + w, shoulder),
                pt(x + w, foot),
                pt(spine, y + h),
            ]),
        ],
    }
}

fn cylinder(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, x, y, mw, .. } = Frame::new(size);
    let ry = h * 0.15;
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::ellipse(0.0, y + ry, mw, ry),
            ShapeGeometry::ellipse(0.0, y + h - ry, mw, ry),
            ShapeGeometry::open(vec![pt(x, y + ry), pt(x, y + h - ry)]),
            ShapeGeometry::open(vec![pt(x + w, y + ry), pt(x + w, y + h - ry)]),
        ],
    }
}

fn state_end(size: Size, _: &ShapeParams) -> ShapeGeometry {
    let Frame { w, h, .. } = Frame::new(size);
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::ellipse(0.0, 0.0, w / 2.0, h / 2.0),
            ShapeGeometry::ellipse(0.0, 0.0, w / 3.0, h / 3.0),
        ],
    }
}

fn external_entity(size: Size, _: &ShapeParams) -> ShapeGeometry {
    const SHADOW: f64 = 4.0;
    let Frame { w, h, x, y, .. } = Frame::new(size);
    ShapeGeometry::Multi {
        shapes: vec![
            ShapeGeometry::rect(x + SHADOW, y + SHADOW, w, h, 0.0),
            ShapeGeometry::rect(x, y, w, h, 0.0),
        ],
    }
}

// Lines and arrows carry their own vertices, relative to the element's top-left corner; without
// them the bounding-box diagonal stands in. Both are moved into the box-centered frame.
fn free_form(size: Size, p: &ShapeParams) -> ShapeGeometry {
    let center = Vec2::new(size.width / 2.0, size.height / 2.0);
    let points = match &p.points {
        Some(points) if !points.is_empty() => points.iter().map(|q| *q - center).collect(),
        _ => vec![Point::ZERO - center, Point::ZERO + center],
    };
    ShapeGeometry::open(points)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shapes.rs"]
mod tests;
