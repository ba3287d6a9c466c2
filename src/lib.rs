//! morphdeck is the shape-morphing and slide build engine of a diagram and presentation editor.
//!
//! Shapes of unrelated types are reduced to comparable outlines (extract, resample, align,
//! interpolate) so one can visually turn into another, and the animations declared on a
//! slide's elements are played as one ordered build sequence driven by host frames.
//!
//! The entry point for hosts is [`Player`]: load a [`Document`], call
//! [`Player::enter_slide`], forward clicks to [`Player::next`] and call [`Player::frame`] once
//! per display frame.
#![forbid(unsafe_code)]

/// Easing curves and interpolation.
pub mod animation;
/// Slide build sequencing.
pub mod build;
/// Elements, slides, display states and the element store seam.
pub mod document;
/// Core types, colors and errors.
pub mod foundation;
/// Shape geometry and SVG path sampling.
pub mod geometry;
/// Contour extraction, resampling, alignment and the morph animator.
pub mod morph;
/// Clock, tweens, animation engine and step execution.
pub mod runtime;
/// Playback session facade.
pub mod session;

pub use crate::animation::ease::Ease;
pub use crate::animation::lerp::Lerp;
pub use crate::build::sequencer::{
    AfterPrevChain, BuildEvent, BuildManager, BuildOpts, BuildState, BuildStep, PlayNext,
};
pub use crate::document::Document;
pub use crate::document::model::{
    AnimationDescriptor, AnimationKind, DisplayState, Element, ElementPatch, ElementState,
    Layer, PropertyValue, Slide, Trigger,
};
pub use crate::document::store::ElementStore;
pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{ElementId, Millis, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{MorphError, MorphResult};
pub use crate::geometry::shapes::{GeometryProvider, ShapeGeometry, ShapeParams, ShapeRegistry};
pub use crate::morph::animator::{MorphAnimator, MorphOpts, MorphTrack};
pub use crate::morph::contour::{Contour, extract_contour};
pub use crate::runtime::clock::GlobalClock;
pub use crate::runtime::engine::{AnimationEngine, EngineOpts, RunnerId, RunnerState, TickReport};
pub use crate::runtime::executor::{EngineExecutor, StartedStep, StepExecutor};
pub use crate::session::player::{FrameReport, Player, PlayerOpts};
