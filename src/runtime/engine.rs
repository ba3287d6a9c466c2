use std::collections::BTreeMap;

use crate::animation::lerp::Lerp;
use crate::document::model::{Element, ElementPatch, PropertyValue};
use crate::document::store::ElementStore;
use crate::foundation::color::lerp_css_color;
use crate::foundation::core::{ElementId, Millis, Point};
use crate::geometry::path::SampledPath;
use crate::morph::animator::MorphTrack;
use crate::runtime::tween::{Tween, TweenSample};

/// Handle of a runner registered with the [`AnimationEngine`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RunnerId(pub u64);

impl std::fmt::Display for RunnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Engine-wide options.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOpts {
    /// When false, running runners jump to their end state on the next tick.
    pub animations_enabled: bool,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            animations_enabled: true,
        }
    }
}

/// Element property a runner can tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prop {
    X,
    Y,
    Width,
    Height,
    Opacity,
    Angle,
    StrokeColor,
    BackgroundColor,
}

impl Prop {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "x" => Self::X,
            "y" => Self::Y,
            "width" => Self::Width,
            "height" => Self::Height,
            "opacity" => Self::Opacity,
            "angle" => Self::Angle,
            "strokeColor" => Self::StrokeColor,
            "backgroundColor" => Self::BackgroundColor,
            _ => return None,
        })
    }

    pub fn is_color(self) -> bool {
        matches!(self, Self::StrokeColor | Self::BackgroundColor)
    }

    fn read(self, el: &Element) -> PropertyValue {
        match self {
            Self::X => PropertyValue::Number(el.x),
            Self::Y => PropertyValue::Number(el.y),
            Self::Width => PropertyValue::Number(el.width),
            Self::Height => PropertyValue::Number(el.height),
            Self::Opacity => PropertyValue::Number(el.opacity),
            Self::Angle => PropertyValue::Number(el.angle),
            Self::StrokeColor => PropertyValue::Text(el.stroke_color.clone()),
            Self::BackgroundColor => PropertyValue::Text(el.background_color.clone()),
        }
    }

    fn write(self, patch: &mut ElementPatch, value: PropertyValue) {
        match (self, value) {
            (Self::X, PropertyValue::Number(v)) => patch.x = Some(v),
            (Self::Y, PropertyValue::Number(v)) => patch.y = Some(v),
            (Self::Width, PropertyValue::Number(v)) => patch.width = Some(v),
            (Self::Height, PropertyValue::Number(v)) => patch.height = Some(v),
            (Self::Opacity, PropertyValue::Number(v)) => patch.opacity = Some(v),
            (Self::Angle, PropertyValue::Number(v)) => patch.angle = Some(v),
            (Self::StrokeColor, PropertyValue::Text(v)) => patch.stroke_color = Some(v),
            (Self::BackgroundColor, PropertyValue::Text(v)) => patch.background_color = Some(v),
            _ => {}
        }
    }
}

/// One property tween target. `from` defaults to the live value when the phase begins.
#[derive(Clone, Debug, PartialEq)]
pub struct PropTarget {
    pub prop: Prop,
    pub from: Option<PropertyValue>,
    pub to: PropertyValue,
}

impl PropTarget {
    pub fn to(prop: Prop, to: f64) -> Self {
        Self {
            prop,
            from: None,
            to: PropertyValue::Number(to),
        }
    }

    /// Build a target from loosely typed values: numeric properties accept numeric strings,
    /// color properties require strings. `None` when the value cannot apply to the property.
    pub fn coerce(prop: Prop, from: Option<&PropertyValue>, to: &PropertyValue) -> Option<Self> {
        let fit = |v: &PropertyValue| -> Option<PropertyValue> {
            match (prop.is_color(), v) {
                (false, PropertyValue::Number(n)) => Some(PropertyValue::Number(*n)),
                (false, PropertyValue::Text(s)) => {
                    s.trim().parse::<f64>().ok().map(PropertyValue::Number)
                }
                (true, PropertyValue::Text(s)) => Some(PropertyValue::Text(s.clone())),
                (true, PropertyValue::Number(_)) => None,
            }
        };
        let from = match from {
            Some(v) => Some(fit(v)?),
            None => None,
        };
        Some(Self {
            prop,
            from,
            to: fit(to)?,
        })
    }
}

/// One stage of a runner program. Phases run back to back; each begins when the previous one
/// ends on the timeline, independent of frame boundaries.
#[derive(Clone, Debug)]
pub enum Phase {
    /// Instant write.
    Set(ElementPatch),
    /// Tween of element properties from their values at phase start.
    Properties {
        tween: Tween,
        targets: Vec<PropTarget>,
    },
    /// Follow a path. `relative` anchors the path start on the element's top-left corner,
    /// otherwise the element center rides the path. `orient` aligns `angle` with the tangent.
    Motion {
        tween: Tween,
        path: SampledPath,
        relative: bool,
        orient: bool,
    },
    /// Contour and property morph with precomputed endpoints.
    Morph { tween: Tween, track: Box<MorphTrack> },
}

impl Phase {
    fn tween(&self) -> Option<&Tween> {
        match self {
            Self::Set(_) => None,
            Self::Properties { tween, .. }
            | Self::Motion { tween, .. }
            | Self::Morph { tween, .. } => Some(tween),
        }
    }

    fn sample(&self, elapsed: Millis, enabled: bool) -> TweenSample {
        match self.tween() {
            None => TweenSample::Finished(1.0),
            Some(t) if !enabled => TweenSample::Finished(t.final_progress()),
            Some(t) => t.sample(elapsed),
        }
    }

    fn span(&self) -> Millis {
        self.tween().map_or(0.0, Tween::span)
    }

    fn capture(&self, el: &Element) -> Captured {
        match self {
            Self::Properties { targets, .. } => Captured::Values(
                targets
                    .iter()
                    .map(|t| t.from.clone().unwrap_or_else(|| t.prop.read(el)))
                    .collect(),
            ),
            Self::Motion { .. } => Captured::Origin {
                top_left: Point::new(el.x, el.y),
                width: el.width,
                height: el.height,
            },
            Self::Set(_) | Self::Morph { .. } => Captured::Nothing,
        }
    }

    fn patch(&self, captured: &Captured, p: f64, finished: bool) -> ElementPatch {
        match (self, captured) {
            (Self::Set(patch), _) => patch.clone(),
            (Self::Properties { targets, .. }, Captured::Values(starts)) => {
                let mut patch = ElementPatch::default();
                for (target, start) in targets.iter().zip(starts) {
                    if let Some(v) = blend(start, &target.to, p, finished) {
                        target.prop.write(&mut patch, v);
                    }
                }
                patch
            }
            (
                Self::Motion {
                    path,
                    relative,
                    orient,
                    ..
                },
                Captured::Origin {
                    top_left,
                    width,
                    height,
                },
            ) => {
                let at = path.point_at(p);
                let pos = if *relative {
                    *top_left + (at.point - path.start())
                } else {
                    Point::new(at.point.x - width / 2.0, at.point.y - height / 2.0)
                };
                ElementPatch {
                    x: Some(pos.x),
                    y: Some(pos.y),
                    angle: orient.then_some(at.angle),
                    ..ElementPatch::default()
                }
            }
            (Self::Morph { track, .. }, _) => track.patch_at(p, finished),
            _ => ElementPatch::default(),
        }
    }
}

fn blend(
    start: &PropertyValue,
    to: &PropertyValue,
    p: f64,
    finished: bool,
) -> Option<PropertyValue> {
    match (start, to) {
        (PropertyValue::Number(a), PropertyValue::Number(b)) => {
            Some(PropertyValue::Number(f64::lerp(a, b, p)))
        }
        (PropertyValue::Text(a), PropertyValue::Text(b)) => match lerp_css_color(a, b, p) {
            Some(c) => Some(PropertyValue::Text(c)),
            // Values that cannot be blended hold until the end, then land on the endpoint
            // the tween finished on.
            None if finished => Some(PropertyValue::Text((if p >= 0.5 { b } else { a }).clone())),
            None => None,
        },
        _ => finished.then(|| to.clone()),
    }
}

#[derive(Clone, Debug)]
enum Captured {
    Nothing,
    Values(Vec<PropertyValue>),
    Origin {
        top_left: Point,
        width: f64,
        height: f64,
    },
}

#[derive(Clone, Debug)]
struct Runner {
    element: ElementId,
    phases: Vec<Phase>,
    current: usize,
    phase_start: Millis,
    captured: Option<Captured>,
    state: RunnerState,
    paused_at: Option<Millis>,
}

enum Advance {
    Continue,
    Done,
}

impl Runner {
    fn advance(
        &mut self,
        now: Millis,
        enabled: bool,
        store: &mut dyn ElementStore,
        writes: &mut usize,
    ) -> Advance {
        loop {
            let Some(phase) = self.phases.get(self.current) else {
                return Advance::Done;
            };
            let Some(el) = store.element(&self.element) else {
                tracing::debug!(element = %self.element, "runner target deleted, completing");
                return Advance::Done;
            };

            let sample = phase.sample(now - self.phase_start, enabled);
            let (p, finished) = match sample {
                TweenSample::Pending => return Advance::Continue,
                TweenSample::Active(p) => (p, false),
                TweenSample::Finished(p) => (p, true),
            };

            let captured = self.captured.get_or_insert_with(|| phase.capture(el));
            let patch = phase.patch(captured, p, finished);
            if !patch.is_empty() && store.apply_patch(&self.element, &patch) {
                *writes += 1;
            }

            if !finished {
                return Advance::Continue;
            }
            self.phase_start += phase.span();
            self.current += 1;
            self.captured = None;
        }
    }

    fn span(&self) -> Millis {
        self.phases.iter().map(Phase::span).sum()
    }
}

/// Outcome of one [`AnimationEngine::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Runners that completed, were stopped, or lost their element since the last tick.
    pub finished: Vec<RunnerId>,
    /// Number of element writes performed.
    pub writes: usize,
}

/// Registry of per-element runners driven by host frames.
#[derive(Debug, Default)]
pub struct AnimationEngine {
    opts: EngineOpts,
    runners: BTreeMap<RunnerId, Runner>,
    next_id: u64,
    stopped: Vec<RunnerId>,
}

impl AnimationEngine {
    pub fn new(opts: EngineOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    pub fn opts(&self) -> EngineOpts {
        self.opts
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.opts.animations_enabled = enabled;
    }

    /// Register an idle runner for `element`.
    pub fn create(&mut self, element: ElementId, phases: Vec<Phase>) -> RunnerId {
        self.next_id += 1;
        let id = RunnerId(self.next_id);
        self.runners.insert(
            id,
            Runner {
                element,
                phases,
                current: 0,
                phase_start: 0.0,
                captured: None,
                state: RunnerState::Idle,
                paused_at: None,
            },
        );
        id
    }

    /// Start an idle runner, or resume a paused one.
    pub fn start(&mut self, id: RunnerId, now: Millis) -> bool {
        let Some(r) = self.runners.get_mut(&id) else {
            return false;
        };
        match r.state {
            RunnerState::Idle => {
                r.phase_start = now;
                r.state = RunnerState::Running;
                true
            }
            RunnerState::Paused => self.resume(id, now),
            RunnerState::Running | RunnerState::Completed => false,
        }
    }

    /// Create and start in one go.
    pub fn spawn(&mut self, element: ElementId, phases: Vec<Phase>, now: Millis) -> RunnerId {
        let id = self.create(element, phases);
        self.start(id, now);
        id
    }

    pub fn pause(&mut self, id: RunnerId, now: Millis) -> bool {
        match self.runners.get_mut(&id) {
            Some(r) if r.state == RunnerState::Running => {
                r.state = RunnerState::Paused;
                r.paused_at = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn resume(&mut self, id: RunnerId, now: Millis) -> bool {
        match self.runners.get_mut(&id) {
            Some(r) if r.state == RunnerState::Paused => {
                let paused_at = r.paused_at.take().unwrap_or(now);
                r.phase_start += (now - paused_at).max(0.0);
                r.state = RunnerState::Running;
                true
            }
            _ => false,
        }
    }

    pub fn pause_all(&mut self, now: Millis) {
        let ids: Vec<RunnerId> = self.runners.keys().copied().collect();
        for id in ids {
            self.pause(id, now);
        }
    }

    pub fn resume_all(&mut self, now: Millis) {
        let ids: Vec<RunnerId> = self.runners.keys().copied().collect();
        for id in ids {
            self.resume(id, now);
        }
    }

    /// Remove a runner. It is reported as finished by the next tick.
    pub fn stop(&mut self, id: RunnerId) -> bool {
        if self.runners.remove(&id).is_some() {
            self.stopped.push(id);
            true
        } else {
            false
        }
    }

    /// Stop every runner targeting `element`.
    pub fn stop_element(&mut self, element: &ElementId) -> Vec<RunnerId> {
        let ids: Vec<RunnerId> = self
            .runners
            .iter()
            .filter(|(_, r)| r.element == *element)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.stop(*id);
        }
        ids
    }

    /// Drop every runner without reporting them.
    pub fn stop_all(&mut self) {
        self.runners.clear();
        self.stopped.clear();
    }

    pub fn state(&self, id: RunnerId) -> Option<RunnerState> {
        match self.runners.get(&id) {
            Some(r) => Some(r.state),
            None if id.0 >= 1 && id.0 <= self.next_id => Some(RunnerState::Completed),
            None => None,
        }
    }

    pub fn is_active(&self, id: RunnerId) -> bool {
        self.runners.contains_key(&id)
    }

    /// Runners currently running (paused and idle runners excluded).
    pub fn running_count(&self) -> usize {
        self.runners
            .values()
            .filter(|r| r.state == RunnerState::Running)
            .count()
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    /// Nominal duration of a runner program from its start. Infinite tweens count one cycle.
    pub fn expected_span(&self, id: RunnerId) -> Option<Millis> {
        self.runners.get(&id).map(Runner::span)
    }

    /// Advance every running runner to `now` and write into `store`.
    pub fn tick(&mut self, now: Millis, store: &mut dyn ElementStore) -> TickReport {
        let enabled = self.opts.animations_enabled;
        let mut report = TickReport {
            finished: std::mem::take(&mut self.stopped),
            writes: 0,
        };

        for (id, runner) in &mut self.runners {
            if runner.state != RunnerState::Running {
                continue;
            }
            if let Advance::Done = runner.advance(now, enabled, store, &mut report.writes) {
                runner.state = RunnerState::Completed;
                report.finished.push(*id);
            }
        }
        self.runners.retain(|_, r| r.state != RunnerState::Completed);
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/engine.rs"]
mod tests;
