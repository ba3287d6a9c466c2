use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::document::model::{ContourPatch, DisplayState, ElementPatch, ElementState};
use crate::document::store::ElementStore;
use crate::foundation::color::lerp_css_color;
use crate::foundation::core::{ElementId, Millis, Point, Size};
use crate::geometry::shapes::GeometryProvider;
use crate::morph::align::align;
use crate::morph::contour::{CURVE_SAMPLES, Contour, extract_contour};
use crate::morph::interpolate::interpolate;
use crate::runtime::engine::{AnimationEngine, Phase, RunnerId};
use crate::runtime::tween::Tween;

/// Morph timing and resolution.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MorphOpts {
    /// Points per contour on both sides of a morph.
    pub sample_count: usize,
    pub duration_ms: Millis,
    pub easing: Ease,
}

impl Default for MorphOpts {
    fn default() -> Self {
        Self {
            sample_count: CURVE_SAMPLES,
            duration_ms: 800.0,
            easing: Ease::EaseInOutQuad,
        }
    }
}

/// Precomputed endpoints of one element's morph.
///
/// `from` is the full live snapshot taken when the morph was planned, `to` the partial
/// override bag of the target state. Contours are present only when both the current and the
/// target type have a silhouette; they have equal length and are already aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphTrack {
    pub from: ElementState,
    pub to: ElementState,
    pub source: Option<Vec<Point>>,
    pub target: Option<Vec<Point>>,
}

fn mix(a: Option<f64>, b: Option<f64>, p: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f64::lerp(&a, &b, p)),
        (None, b) => b,
        (Some(_), None) => None,
    }
}

fn mix_color(a: Option<&String>, b: Option<&String>, p: f64, finished: bool) -> Option<String> {
    let b = b?;
    if finished {
        return Some(b.clone());
    }
    lerp_css_color(a?, b, p)
}

impl MorphTrack {
    /// Write for eased progress `p`. The final frame lands exactly on the target values,
    /// snaps everything that cannot be blended and hands rendering back to the native shape.
    pub fn patch_at(&self, p: f64, finished: bool) -> ElementPatch {
        let (from, to) = (&self.from, &self.to);
        let contour = match (&self.source, &self.target) {
            _ if finished => ContourPatch::Clear,
            (Some(a), Some(b)) => ContourPatch::Set(interpolate(a, b, p)),
            _ => ContourPatch::Keep,
        };
        ElementPatch {
            x: mix(from.x, to.x, p),
            y: mix(from.y, to.y, p),
            width: mix(from.width, to.width, p),
            height: mix(from.height, to.height, p),
            opacity: mix(from.opacity, to.opacity, p),
            angle: mix(from.angle, to.angle, p),
            background_color: mix_color(
                from.background_color.as_ref(),
                to.background_color.as_ref(),
                p,
                finished,
            ),
            stroke_color: mix_color(
                from.stroke_color.as_ref(),
                to.stroke_color.as_ref(),
                p,
                finished,
            ),
            text: to.text.clone().filter(|_| finished),
            shape_type: to.shape_type.clone().filter(|_| finished),
            contour,
        }
    }
}

/// Drives elements toward a display state.
///
/// Morphs do not queue: starting one stops the runners of the previous morph, and the new one
/// starts from whatever the element currently shows, including a half-blended contour.
#[derive(Debug, Default)]
pub struct MorphAnimator {
    opts: MorphOpts,
    active: Vec<RunnerId>,
}

impl MorphAnimator {
    pub fn new(opts: MorphOpts) -> Self {
        Self {
            opts,
            active: Vec::new(),
        }
    }

    pub fn opts(&self) -> MorphOpts {
        self.opts
    }

    /// Tracks for every live element the state overrides. Deleted elements are skipped.
    pub fn plan(
        &self,
        state: &DisplayState,
        store: &dyn ElementStore,
        provider: &dyn GeometryProvider,
    ) -> Vec<(ElementId, MorphTrack)> {
        let n = self.opts.sample_count.max(1);
        let mut tracks = Vec::with_capacity(state.overrides.len());

        for (id, to) in &state.overrides {
            let Some(el) = store.element(id) else {
                tracing::debug!(
                    element = %id,
                    state = %state.id,
                    "state references a deleted element"
                );
                continue;
            };

            let target_type = to.shape_type.as_deref().unwrap_or(&el.shape_type);
            let contours = if provider.has_silhouette(&el.shape_type)
                && provider.has_silhouette(target_type)
            {
                let source = match &el.contour_override {
                    Some(points) if !points.is_empty() => {
                        Contour::closed(points.clone()).resampled(n)
                    }
                    _ => extract_contour(provider, &el.shape_type, el.size(), &el.params)
                        .resampled(n),
                };
                let size = Size::new(
                    to.width.unwrap_or(el.width),
                    to.height.unwrap_or(el.height),
                );
                let target = extract_contour(provider, target_type, size, &el.params).resampled(n);
                let target = align(&source.points, &target.points);
                Some((source.points, target))
            } else {
                None
            };

            let (source, target) = contours.unzip();
            tracks.push((
                id.clone(),
                MorphTrack {
                    from: el.snapshot(),
                    to: to.clone(),
                    source,
                    target,
                },
            ));
        }
        tracks
    }

    /// Morph with the configured duration and easing.
    pub fn morph_to(
        &mut self,
        state: &DisplayState,
        store: &dyn ElementStore,
        provider: &dyn GeometryProvider,
        engine: &mut AnimationEngine,
        now: Millis,
    ) -> Vec<RunnerId> {
        let tween = Tween::once(self.opts.duration_ms, self.opts.easing);
        self.morph_to_timed(state, store, provider, engine, tween, now)
    }

    /// Morph with explicit timing. Returns the started runners; empty when nothing in the
    /// state refers to a live element, in which case the morph is already complete.
    #[tracing::instrument(skip_all, fields(state = %state.id))]
    pub fn morph_to_timed(
        &mut self,
        state: &DisplayState,
        store: &dyn ElementStore,
        provider: &dyn GeometryProvider,
        engine: &mut AnimationEngine,
        tween: Tween,
        now: Millis,
    ) -> Vec<RunnerId> {
        self.cancel(engine);

        let runners: Vec<RunnerId> = self
            .plan(state, store, provider)
            .into_iter()
            .map(|(id, track)| {
                let phase = Phase::Morph {
                    tween,
                    track: Box::new(track),
                };
                engine.spawn(id, vec![phase], now)
            })
            .collect();

        tracing::debug!(elements = runners.len(), "morph started");
        self.active.clone_from(&runners);
        runners
    }

    /// Stop the runners of the morph in flight, keeping whatever they already wrote.
    pub fn cancel(&mut self, engine: &mut AnimationEngine) {
        for id in self.active.drain(..) {
            engine.stop(id);
        }
    }

    pub fn is_running(&self, engine: &AnimationEngine) -> bool {
        self.active.iter().any(|id| engine.is_active(*id))
    }

    pub fn active(&self) -> &[RunnerId] {
        &self.active
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/animator.rs"]
mod tests;
