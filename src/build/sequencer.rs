use std::collections::VecDeque;

use crate::document::model::{AnimationDescriptor, Trigger};
use crate::document::store::ElementStore;
use crate::foundation::core::{ElementId, Millis};
use crate::runtime::engine::RunnerId;
use crate::runtime::executor::StepExecutor;

/// How far an `after-prev` chain walks once its anchor completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AfterPrevChain {
    /// Keep going while the next step is `after-prev`.
    #[default]
    Linked,
    /// Only the step right after the anchor.
    Single,
}

/// Build sequencing options.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOpts {
    pub after_prev_chain: AfterPrevChain,
    /// Extra time a step gets past its nominal end before it is force-completed.
    /// `None` disables the watchdog.
    pub watchdog_grace_ms: Option<Millis>,
}

impl Default for BuildOpts {
    fn default() -> Self {
        Self {
            after_prev_chain: AfterPrevChain::Linked,
            watchdog_grace_ms: Some(1000.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepPhase {
    Pending,
    Running,
    Done,
}

/// One scheduled animation of the slide's build sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildStep {
    pub element: ElementId,
    pub animation: AnimationDescriptor,
    /// Flips to true once, when the step is started.
    pub played: bool,
    phase: StepPhase,
    runners: Vec<RunnerId>,
    deadline: Option<Millis>,
    chains: bool,
}

impl BuildStep {
    fn new(element: ElementId, animation: AnimationDescriptor) -> Self {
        Self {
            element,
            animation,
            played: false,
            phase: StepPhase::Pending,
            runners: Vec::new(),
            deadline: None,
            chains: false,
        }
    }

    pub fn trigger(&self) -> Trigger {
        self.animation.trigger
    }

    /// Runners of this step that have not reported completion yet.
    pub fn runners(&self) -> &[RunnerId] {
        &self.runners
    }

    pub fn is_running(&self) -> bool {
        self.phase == StepPhase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == StepPhase::Done
    }
}

/// Click handling state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildState {
    /// No click in flight.
    #[default]
    Idle,
    /// Waiting for the on-click step that started the current click.
    Running { anchor: usize },
    /// Waiting for an `after-prev` step chained from the current click.
    AwaitingChain { step: usize },
}

/// Result of [`BuildManager::play_next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayNext {
    /// An on-click step was started.
    Started,
    /// A previous click is still in flight; nothing was started.
    Busy,
    /// No on-click step is left.
    Exhausted,
}

impl PlayNext {
    /// Whether the click was consumed by the build (`false` lets the host move to the next
    /// slide).
    pub fn advanced(self) -> bool {
        !matches!(self, Self::Exhausted)
    }
}

/// Observable progress of the build sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event")]
pub enum BuildEvent {
    #[serde(rename = "stepStarted", rename_all = "camelCase")]
    StepStarted {
        index: usize,
        element: ElementId,
        animation_id: String,
        at: Millis,
    },
    #[serde(rename = "stepFinished", rename_all = "camelCase")]
    StepFinished {
        index: usize,
        element: ElementId,
        at: Millis,
        forced: bool,
    },
    #[serde(rename = "clickResolved")]
    ClickResolved { at: Millis },
}

/// Flattens the animations of one slide into an ordered build sequence and plays it.
///
/// `on-load` steps start with [`BuildManager::play_initial`]; every
/// [`BuildManager::play_next`] starts the next `on-click` step. Starting a step also starts the
/// consecutive `with-prev` steps after it, and completing a step starts the next
/// non-`with-prev` step if that one is `after-prev`. Completion arrives through
/// [`BuildManager::notify_finished`]; [`BuildManager::poll`] runs the watchdog.
#[derive(Debug, Default)]
pub struct BuildManager {
    opts: BuildOpts,
    steps: Vec<BuildStep>,
    state: BuildState,
    settled: VecDeque<(usize, bool)>,
    events: Vec<BuildEvent>,
    paused_at: Option<Millis>,
}

impl BuildManager {
    pub fn new(opts: BuildOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    pub fn opts(&self) -> BuildOpts {
        self.opts
    }

    /// Collect the animations of every element on `slide`, ordered by layer stacking order,
    /// then element id, then declaration order.
    #[tracing::instrument(skip(self, store))]
    pub fn init(&mut self, store: &dyn ElementStore, slide: usize) {
        let mut keyed = Vec::new();
        for el in store.elements_on_slide(slide) {
            let layer = store.layer_order(el.layer_id.as_deref());
            for (decl, anim) in el.animations.iter().enumerate() {
                keyed.push((
                    (layer, el.id.clone(), decl),
                    BuildStep::new(el.id.clone(), anim.clone()),
                ));
            }
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        self.steps = keyed.into_iter().map(|(_, step)| step).collect();
        self.state = BuildState::Idle;
        self.settled.clear();
        tracing::info!(steps = self.steps.len(), "build sequence initialized");
    }

    /// Start every unplayed `on-load` step.
    pub fn play_initial(&mut self, exec: &mut dyn StepExecutor, now: Millis) {
        for index in 0..self.steps.len() {
            let step = &self.steps[index];
            if step.trigger() == Trigger::OnLoad && !step.played {
                self.launch(index, true, exec, now);
            }
        }
        self.settle(exec, now);
    }

    /// Whether an unplayed `on-click` step remains.
    pub fn has_more_steps(&self) -> bool {
        self.steps
            .iter()
            .any(|s| !s.played && s.trigger() == Trigger::OnClick)
    }

    /// Start the next `on-click` step. The click stays in flight until that step and its
    /// `after-prev` chain have completed; calls made meanwhile return [`PlayNext::Busy`].
    pub fn play_next(&mut self, exec: &mut dyn StepExecutor, now: Millis) -> PlayNext {
        if self.state != BuildState::Idle {
            tracing::debug!(state = ?self.state, "click ignored, previous click in flight");
            return PlayNext::Busy;
        }
        let Some(index) = self
            .steps
            .iter()
            .position(|s| !s.played && s.trigger() == Trigger::OnClick)
        else {
            return PlayNext::Exhausted;
        };

        self.state = BuildState::Running { anchor: index };
        self.launch(index, true, exec, now);
        self.settle(exec, now);
        PlayNext::Started
    }

    /// Account for runners the engine reported as finished.
    pub fn notify_finished(
        &mut self,
        finished: &[RunnerId],
        exec: &mut dyn StepExecutor,
        now: Millis,
    ) {
        if finished.is_empty() {
            return;
        }
        for (index, step) in self.steps.iter_mut().enumerate() {
            if step.phase != StepPhase::Running || step.runners.is_empty() {
                continue;
            }
            step.runners.retain(|r| !finished.contains(r));
            if step.runners.is_empty() {
                self.settled.push_back((index, false));
            }
        }
        self.settle(exec, now);
    }

    /// Force-complete steps that overran their deadline. Their runners keep running.
    ///
    /// Does nothing while paused.
    pub fn poll(&mut self, exec: &mut dyn StepExecutor, now: Millis) {
        if self.paused_at.is_some() {
            return;
        }
        for (index, step) in self.steps.iter_mut().enumerate() {
            let overdue =
                step.phase == StepPhase::Running && step.deadline.is_some_and(|d| now >= d);
            if overdue {
                tracing::warn!(
                    index,
                    element = %step.element,
                    animation = %step.animation.id,
                    "build step overran its deadline, completing it"
                );
                self.settled.push_back((index, true));
            }
        }
        self.settle(exec, now);
    }

    /// Freeze the watchdog. Deadlines are pushed back by the paused time on
    /// [`BuildManager::resume`].
    pub fn pause(&mut self, now: Millis) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Millis) {
        let Some(since) = self.paused_at.take() else {
            return;
        };
        let paused = (now - since).max(0.0);
        for step in self.steps.iter_mut().filter(|s| s.phase == StepPhase::Running) {
            if let Some(deadline) = step.deadline.as_mut() {
                *deadline += paused;
            }
        }
        tracing::debug!(paused_ms = paused, "build watchdog resumed");
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Drop the sequence and stop everything it started.
    pub fn reset(&mut self, exec: &mut dyn StepExecutor) {
        exec.stop_all();
        self.steps.clear();
        self.state = BuildState::Idle;
        self.settled.clear();
        self.paused_at = None;
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != BuildState::Idle
    }

    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    /// Whether any started step is still waiting for its runners.
    pub fn has_running_steps(&self) -> bool {
        self.steps.iter().any(BuildStep::is_running)
    }

    pub fn drain_events(&mut self) -> Vec<BuildEvent> {
        std::mem::take(&mut self.events)
    }

    fn launch(&mut self, index: usize, chains: bool, exec: &mut dyn StepExecutor, now: Millis) {
        self.start_one(index, chains, exec, now);
        let mut next = index + 1;
        while let Some(step) = self.steps.get(next) {
            if step.trigger() != Trigger::WithPrev {
                break;
            }
            if !step.played {
                self.start_one(next, false, exec, now);
            }
            next += 1;
        }
    }

    fn start_one(&mut self, index: usize, chains: bool, exec: &mut dyn StepExecutor, now: Millis) {
        let grace = self.opts.watchdog_grace_ms;
        let Some(step) = self.steps.get_mut(index) else {
            return;
        };
        let started = exec.start_step(&step.element, &step.animation, now);

        step.played = true;
        step.chains = chains;
        step.phase = StepPhase::Running;
        step.deadline = grace.map(|g| now + started.expected_ms + g);
        step.runners = started.runners;
        tracing::debug!(
            index,
            element = %step.element,
            animation = %step.animation.id,
            "build step started"
        );

        self.events.push(BuildEvent::StepStarted {
            index,
            element: step.element.clone(),
            animation_id: step.animation.id.clone(),
            at: now,
        });
        if step.runners.is_empty() {
            self.settled.push_back((index, false));
        }
    }

    fn settle(&mut self, exec: &mut dyn StepExecutor, now: Millis) {
        while let Some((index, forced)) = self.settled.pop_front() {
            self.finish(index, forced, exec, now);
        }
    }

    fn finish(&mut self, index: usize, forced: bool, exec: &mut dyn StepExecutor, now: Millis) {
        let Some(step) = self.steps.get_mut(index) else {
            return;
        };
        if step.phase != StepPhase::Running {
            return;
        }
        step.phase = StepPhase::Done;
        step.runners.clear();
        step.deadline = None;
        let chains = step.chains;
        self.events.push(BuildEvent::StepFinished {
            index,
            element: step.element.clone(),
            at: now,
            forced,
        });

        let chained = if chains {
            self.chain_after(index, exec, now)
        } else {
            None
        };

        match self.state {
            BuildState::Running { anchor: awaited } | BuildState::AwaitingChain { step: awaited }
                if awaited == index =>
            {
                self.state = match chained {
                    Some(step) => BuildState::AwaitingChain { step },
                    None => {
                        self.events.push(BuildEvent::ClickResolved { at: now });
                        BuildState::Idle
                    }
                };
            }
            _ => {}
        }
    }

    /// Start the `after-prev` successor of `index`, skipping its `with-prev` companions.
    fn chain_after(
        &mut self,
        index: usize,
        exec: &mut dyn StepExecutor,
        now: Millis,
    ) -> Option<usize> {
        let next = self.steps[index + 1..]
            .iter()
            .position(|s| s.trigger() != Trigger::WithPrev)
            .map(|offset| index + 1 + offset)?;
        let step = &self.steps[next];
        if step.trigger() != Trigger::AfterPrev || step.played {
            return None;
        }
        let chains = self.opts.after_prev_chain == AfterPrevChain::Linked;
        self.launch(next, chains, exec, now);
        Some(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/build/sequencer.rs"]
mod tests;
