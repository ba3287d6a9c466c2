use crate::build::sequencer::{BuildEvent, BuildManager, BuildOpts, PlayNext};
use crate::document::Document;
use crate::document::model::Element;
use crate::foundation::core::{ElementId, Millis};
use crate::foundation::error::{MorphError, MorphResult};
use crate::geometry::shapes::ShapeRegistry;
use crate::morph::animator::{MorphAnimator, MorphOpts};
use crate::runtime::clock::GlobalClock;
use crate::runtime::engine::{AnimationEngine, EngineOpts, RunnerId};
use crate::runtime::executor::EngineExecutor;

/// Options for a [`Player`] session.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerOpts {
    pub morph: MorphOpts,
    pub build: BuildOpts,
    pub engine: EngineOpts,
}

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Something was written; draw the document.
    pub redraw: bool,
    /// Schedule another frame.
    pub needs_frame: bool,
}

/// Playback session over one document.
///
/// Owns the document, the shape registry, the clock, the animation engine, the morph animator
/// and the build sequencer. The host calls [`Player::frame`] once per display frame with its
/// frame timestamp and redraws when the report says so.
#[derive(Debug)]
pub struct Player {
    document: Document,
    registry: ShapeRegistry,
    clock: GlobalClock,
    engine: AnimationEngine,
    morph: MorphAnimator,
    build: BuildManager,
    slide: Option<usize>,
}

impl Player {
    pub fn new(document: Document, opts: PlayerOpts) -> Self {
        let mut clock = GlobalClock::new();
        clock.refresh_continuous(&document);
        Self {
            document,
            registry: ShapeRegistry::with_builtins(),
            clock,
            engine: AnimationEngine::new(opts.engine),
            morph: MorphAnimator::new(opts.morph),
            build: BuildManager::new(opts.build),
            slide: None,
        }
    }

    /// Replace the geometry provider.
    pub fn with_registry(mut self, registry: ShapeRegistry) -> Self {
        self.registry = registry;
        self
    }

    fn split(&mut self) -> (&mut BuildManager, EngineExecutor<'_>) {
        (
            &mut self.build,
            EngineExecutor {
                engine: &mut self.engine,
                morph: &mut self.morph,
                store: &mut self.document,
                provider: &self.registry,
            },
        )
    }

    /// Stop the current build, build the sequence of slide `index` and play its `on-load`
    /// steps.
    #[tracing::instrument(skip(self))]
    pub fn enter_slide(&mut self, index: usize, now: Millis) -> MorphResult<()> {
        if index >= self.document.slides.len() {
            return Err(MorphError::validation(format!(
                "slide index {index} out of range ({} slides)",
                self.document.slides.len()
            )));
        }
        let now = self.clock.advance(now);

        let (build, mut exec) = self.split();
        build.reset(&mut exec);
        self.build.init(&self.document, index);
        let (build, mut exec) = self.split();
        build.play_initial(&mut exec, now);

        self.slide = Some(index);
        Ok(())
    }

    /// Handle a click. See [`BuildManager::play_next`].
    pub fn next(&mut self, now: Millis) -> PlayNext {
        let now = self.clock.advance(now);
        let (build, mut exec) = self.split();
        build.play_next(&mut exec, now)
    }

    pub fn has_more_steps(&self) -> bool {
        self.build.has_more_steps()
    }

    /// Morph the document toward display state `id`, cancelling a morph in flight.
    pub fn morph_to_state(&mut self, id: &str, now: Millis) -> MorphResult<Vec<RunnerId>> {
        let state = self.document.state(id)?.clone();
        let now = self.clock.advance(now);
        let runners = self.morph.morph_to(
            &state,
            &self.document,
            &self.registry,
            &mut self.engine,
            now,
        );
        self.document.active_state_id = Some(state.id);
        Ok(runners)
    }

    /// Apply display state `id`, animated or instantly.
    pub fn apply_state(
        &mut self,
        id: &str,
        animate: bool,
        now: Millis,
    ) -> MorphResult<Vec<RunnerId>> {
        if animate {
            return self.morph_to_state(id, now);
        }
        self.morph.cancel(&mut self.engine);
        self.document.apply_state(id)?;
        Ok(Vec::new())
    }

    /// Morph to the state after the active one, wrapping around. Returns the state id.
    pub fn next_state(&mut self, now: Millis) -> MorphResult<Option<String>> {
        let Some(id) = self.document.next_state_id().map(str::to_owned) else {
            return Ok(None);
        };
        self.morph_to_state(&id, now)?;
        Ok(Some(id))
    }

    /// Morph to the state before the active one, wrapping around. Returns the state id.
    pub fn previous_state(&mut self, now: Millis) -> MorphResult<Option<String>> {
        let Some(id) = self.document.previous_state_id().map(str::to_owned) else {
            return Ok(None);
        };
        self.morph_to_state(&id, now)?;
        Ok(Some(id))
    }

    /// Advance to `now`: tick every runner, feed completions to the build sequence and run
    /// its watchdog.
    pub fn frame(&mut self, now: Millis) -> FrameReport {
        let now = self.clock.advance(now);
        let tick = self.engine.tick(now, &mut self.document);

        let (build, mut exec) = self.split();
        build.notify_finished(&tick.finished, &mut exec, now);
        build.poll(&mut exec, now);

        FrameReport {
            redraw: tick.writes > 0 || self.clock.force_continuous(),
            needs_frame: self.clock.needs_frame(self.engine.running_count()),
        }
    }

    /// Edit an element outside of playback. Returns `false` when the element does not exist.
    pub fn update_element(&mut self, id: &ElementId, f: impl FnOnce(&mut Element)) -> bool {
        let Some(el) = self.document.element_mut(id) else {
            return false;
        };
        f(el);
        self.clock.refresh_continuous(&self.document);
        true
    }

    /// Remove an element; runners targeting it complete on the next frame.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let removed = self.document.remove_element(id);
        if removed.is_some() {
            self.clock.refresh_continuous(&self.document);
        }
        removed
    }

    pub fn pause(&mut self, now: Millis) {
        let now = self.clock.advance(now);
        self.engine.pause_all(now);
        self.build.pause(now);
    }

    pub fn resume(&mut self, now: Millis) {
        let now = self.clock.advance(now);
        self.engine.resume_all(now);
        self.build.resume(now);
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.engine.set_animations_enabled(enabled);
    }

    pub fn drain_events(&mut self) -> Vec<BuildEvent> {
        self.build.drain_events()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &GlobalClock {
        &self.clock
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn build(&self) -> &BuildManager {
        &self.build
    }

    pub fn slide(&self) -> Option<usize> {
        self.slide
    }

    pub fn is_morphing(&self) -> bool {
        self.morph.is_running(&self.engine)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/player.rs"]
mod tests;
