use crate::animation::ease::Ease;
use crate::document::model::{AnimationDescriptor, AnimationKind, Element, ElementPatch};
use crate::document::store::ElementStore;
use crate::foundation::core::{ElementId, Millis};
use crate::geometry::path::SampledPath;
use crate::geometry::shapes::GeometryProvider;
use crate::morph::animator::MorphAnimator;
use crate::runtime::engine::{AnimationEngine, Phase, Prop, PropTarget, RunnerId};
use crate::runtime::tween::Tween;

/// Runners started for one build step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StartedStep {
    /// Empty when the step had nothing to animate; such a step is complete immediately.
    pub runners: Vec<RunnerId>,
    /// Nominal time until every runner is done.
    pub expected_ms: Millis,
}

/// Starts the animation of one build step. The build sequencer only talks to this trait.
pub trait StepExecutor {
    fn start_step(
        &mut self,
        element: &ElementId,
        anim: &AnimationDescriptor,
        now: Millis,
    ) -> StartedStep;

    /// Abort everything started so far without rolling back written values.
    fn stop_all(&mut self);
}

/// [`StepExecutor`] backed by the animation engine and the morph animator.
pub struct EngineExecutor<'a> {
    pub engine: &'a mut AnimationEngine,
    pub morph: &'a mut MorphAnimator,
    pub store: &'a mut dyn ElementStore,
    pub provider: &'a dyn GeometryProvider,
}

fn descriptor_tween(anim: &AnimationDescriptor) -> Tween {
    Tween {
        delay: anim.delay,
        duration: anim.duration,
        ease: anim.easing,
        cycles: anim.cycles(),
        alternate: anim.yoyo,
    }
}

fn numbers(pairs: &[(Prop, f64)]) -> Vec<PropTarget> {
    pairs.iter().map(|(p, v)| PropTarget::to(*p, *v)).collect()
}

fn tween_to(tween: Tween, pairs: &[(Prop, f64)]) -> Phase {
    Phase::Properties {
        tween,
        targets: numbers(pairs),
    }
}

/// Phases of a named preset, or `None` for an unknown name.
///
/// Presets run once: `repeat` and `yoyo` are ignored, the delay applies to the first timed
/// phase and a non-positive duration selects the preset's own default.
pub fn preset_phases(name: &str, el: &Element, anim: &AnimationDescriptor) -> Option<Vec<Phase>> {
    let duration = |default: Millis| {
        if anim.duration > 0.0 {
            anim.duration
        } else {
            default
        }
    };
    let first = |ms: Millis, ease: Ease| Tween::once(ms, ease).with_delay(anim.delay);

    let phases = match name {
        "fadeIn" => vec![
            Phase::Set(ElementPatch {
                opacity: Some(0.0),
                ..ElementPatch::default()
            }),
            tween_to(
                first(duration(300.0), Ease::EaseOutQuad),
                &[(Prop::Opacity, 100.0)],
            ),
        ],
        "fadeOut" => vec![tween_to(
            first(duration(300.0), Ease::EaseOutQuad),
            &[(Prop::Opacity, 0.0)],
        )],
        "scaleIn" => {
            let c = el.center();
            vec![
                Phase::Set(ElementPatch {
                    x: Some(c.x),
                    y: Some(c.y),
                    width: Some(0.0),
                    height: Some(0.0),
                    opacity: Some(0.0),
                    ..ElementPatch::default()
                }),
                tween_to(
                    first(duration(300.0), Ease::EaseOutBack),
                    &[
                        (Prop::X, el.x),
                        (Prop::Y, el.y),
                        (Prop::Width, el.width),
                        (Prop::Height, el.height),
                        (Prop::Opacity, 100.0),
                    ],
                ),
            ]
        }
        "bounce" => vec![
            tween_to(first(150.0, Ease::EaseOutQuad), &[(Prop::Y, el.y - 20.0)]),
            tween_to(
                Tween::once(300.0, Ease::EaseOutBounce),
                &[(Prop::Y, el.y)],
            ),
        ],
        "pulse" => {
            let half = duration(300.0) / 2.0;
            let (w, h) = (el.width * 1.1, el.height * 1.1);
            vec![
                tween_to(
                    first(half, Ease::EaseOutQuad),
                    &[
                        (Prop::Width, w),
                        (Prop::Height, h),
                        (Prop::X, el.x - (w - el.width) / 2.0),
                        (Prop::Y, el.y - (h - el.height) / 2.0),
                    ],
                ),
                tween_to(
                    Tween::once(half, Ease::EaseOutQuad),
                    &[
                        (Prop::Width, el.width),
                        (Prop::Height, el.height),
                        (Prop::X, el.x),
                        (Prop::Y, el.y),
                    ],
                ),
            ]
        }
        "shake" => vec![
            tween_to(
                Tween {
                    cycles: Some(4),
                    alternate: true,
                    ..first(duration(400.0), Ease::Linear)
                },
                &[(Prop::X, el.x + 10.0)],
            ),
            Phase::Set(ElementPatch {
                x: Some(el.x),
                ..ElementPatch::default()
            }),
        ],
        _ => return None,
    };
    Some(phases)
}

fn phases_for(el: &Element, anim: &AnimationDescriptor) -> Option<Vec<Phase>> {
    let tween = descriptor_tween(anim);
    match &anim.kind {
        AnimationKind::Preset { name } => {
            let phases = preset_phases(name, el, anim);
            if phases.is_none() {
                tracing::warn!(preset = %name, animation = %anim.id, "unknown preset");
            }
            phases
        }
        AnimationKind::Property { property, from, to } => {
            let Some(prop) = Prop::parse(property) else {
                tracing::warn!(%property, animation = %anim.id, "unknown animated property");
                return None;
            };
            let Some(target) = PropTarget::coerce(prop, from.as_ref(), to) else {
                tracing::warn!(%property, animation = %anim.id, "value does not fit property");
                return None;
            };
            Some(vec![Phase::Properties {
                tween,
                targets: vec![target],
            }])
        }
        AnimationKind::Rotate { to_angle, relative } => {
            let mut angle = to_angle.to_radians();
            if *relative {
                angle += el.angle;
            }
            Some(vec![tween_to(tween, &[(Prop::Angle, angle)])])
        }
        AnimationKind::Path {
            path_data,
            is_relative,
            orient_to_path,
        } => match SampledPath::parse(path_data) {
            Ok(path) => Some(vec![Phase::Motion {
                tween,
                path,
                relative: *is_relative,
                orient: *orient_to_path,
            }]),
            Err(e) => {
                tracing::warn!(error = %e, animation = %anim.id, "motion path skipped");
                None
            }
        },
        AnimationKind::Transition { .. } => None,
    }
}

impl EngineExecutor<'_> {
    fn start_transition(
        &mut self,
        state_id: &str,
        anim: &AnimationDescriptor,
        now: Millis,
    ) -> Vec<RunnerId> {
        let Some(state) = self.store.display_state(state_id).cloned() else {
            tracing::warn!(state = %state_id, animation = %anim.id, "transition to unknown state");
            return Vec::new();
        };
        let mut tween = descriptor_tween(anim);
        if tween.duration <= 0.0 {
            tween.duration = self.morph.opts().duration_ms;
        }
        self.morph
            .morph_to_timed(&state, &*self.store, self.provider, self.engine, tween, now)
    }
}

impl StepExecutor for EngineExecutor<'_> {
    fn start_step(
        &mut self,
        element: &ElementId,
        anim: &AnimationDescriptor,
        now: Millis,
    ) -> StartedStep {
        let runners = if let AnimationKind::Transition { state_id } = &anim.kind {
            self.start_transition(state_id, anim, now)
        } else {
            let Some(el) = self.store.element(element) else {
                tracing::debug!(%element, animation = %anim.id, "step targets a deleted element");
                return StartedStep::default();
            };
            match phases_for(el, anim) {
                Some(phases) => vec![self.engine.spawn(element.clone(), phases, now)],
                None => Vec::new(),
            }
        };

        let expected_ms = runners
            .iter()
            .filter_map(|id| self.engine.expected_span(*id))
            .fold(0.0, f64::max);
        StartedStep {
            runners,
            expected_ms,
        }
    }

    fn stop_all(&mut self) {
        self.morph.cancel(self.engine);
        self.engine.stop_all();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/executor.rs"]
mod tests;
