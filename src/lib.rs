//! # Garland - gesture-driven holiday particle choreography
//!
//! Garland animates a few hundred ornaments and photos between three
//! procedurally computed arrangements - a spiral-cone tree, a scattered
//! cloud, and a focused photo view - steered by hand gestures from an
//! external classifier.
//!
//! ## Quick Start
//!
//! ```ignore
//! use garland::prelude::*;
//!
//! let mut experience = Experience::new()
//!     .with_ornament_layout(OrnamentLayout { count: 350, ..Default::default() });
//!
//! experience.add_photo("photos/one.png");
//! experience.attach_source(my_gesture_source);
//!
//! loop {
//!     let frame = experience.tick();   // once per rendered frame
//!     renderer.draw(frame);            // transforms + camera, nothing else
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Modes
//!
//! One [`Mode`] value drives everything. The [`ModeMapper`] is the only
//! writer, converting classifier labels into guarded transitions:
//! closed fist gathers, open palm scatters, victory/pointing-up grabs a
//! photo - but only once things are already dispersed.
//!
//! ### Particles
//!
//! Every ornament and photo carries two immutable targets (a tree seat
//! from [`geometry::tree_position`], a cloud point from
//! [`geometry::scatter_position`]) and eases toward whichever one the
//! mode selects, by a fixed fraction per tick. The easing is re-evaluated
//! from the current position every tick, so a mode change mid-flight
//! bends the motion instead of restarting it.
//!
//! ### Gesture input
//!
//! The classifier runs on its own loop and publishes into a single-slot
//! [`gesture::GestureCell`]; the tick reads it once and acts on the
//! latest sample only. Teardown stops the loop and releases the capture
//! resource deterministically. See the [`gesture`] module.
//!
//! ### Rendering
//!
//! The core emits a flat [`Frame`] of (transform, asset) pairs plus a
//! camera pose; all lighting and styling belong to whatever consumes it.
//! The built-in [`viewer`] is one such consumer, with keyboard fallback
//! controls for running without a classifier.

pub mod camera;
pub mod error;
pub mod experience;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod mode;
pub mod ornaments;
pub mod photos;
pub mod time;
pub mod viewer;

pub use camera::{CameraConfig, CameraRig};
pub use error::{GestureError, GpuError, PhotoError, ViewerError};
pub use experience::Experience;
pub use frame::{Asset, CameraPose, Frame, Instance};
pub use gesture::{Detection, Gesture, GestureCell, GestureSample, GestureSource};
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use mode::{Mode, ModeMapper};
pub use ornaments::{Ornament, OrnamentLayout, Ornaments};
pub use photos::{PhotoCloud, PhotoLayout, PhotoParticle};
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use garland::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{CameraConfig, CameraRig};
    pub use crate::experience::Experience;
    pub use crate::frame::{Asset, CameraPose, Frame, Instance};
    pub use crate::gesture::{
        spawn_source, Detection, Gesture, GestureCell, GestureSample, GestureSource,
        ScriptedSource, SourceHandle,
    };
    pub use crate::mode::{Mode, ModeMapper};
    pub use crate::ornaments::{OrnamentLayout, Ornaments};
    pub use crate::photos::{PhotoCloud, PhotoLayout};
    pub use crate::time::Clock;
    pub use crate::{Mat4, Quat, Vec2, Vec3, Vec4};
}
