//! The experience orchestrator.
//!
//! [`Experience`] owns the whole choreography: the mode mapper, the
//! gesture cell, both particle collections, the camera rig, and the
//! clock. Configure with method chaining, then call [`tick`](Experience::tick)
//! once per rendered frame and hand the returned [`Frame`] to a renderer.
//!
//! # Example
//!
//! ```ignore
//! use garland::prelude::*;
//!
//! let mut experience = Experience::new()
//!     .with_seed(7)
//!     .with_ornament_layout(OrnamentLayout { count: 350, ..Default::default() });
//!
//! experience.add_photo("photos/family.png");
//! experience.attach_source(my_gesture_source);
//!
//! loop {
//!     let frame = experience.tick();
//!     // renderer.draw(frame);
//! }
//! ```
//!
//! Each tick reads the gesture cell exactly once; that snapshot - and the
//! mode derived from it - is what every animator sees for the whole tick.
//! No component reads shared state on its own.

use crate::camera::{CameraConfig, CameraRig};
use crate::error::GestureError;
use crate::frame::Frame;
use crate::gesture::{spawn_source, GestureCell, GestureSource, SourceHandle};
use crate::mode::{Mode, ModeMapper};
use crate::ornaments::{OrnamentLayout, Ornaments};
use crate::photos::{PhotoCloud, PhotoLayout};
use crate::time::Clock;

/// The running experience: state machine, particles, camera, clock.
pub struct Experience {
    mapper: ModeMapper,
    cell: GestureCell,
    source: Option<SourceHandle>,
    ornaments: Ornaments,
    photos: PhotoCloud,
    camera: CameraRig,
    clock: Clock,
    frame: Frame,
}

impl Experience {
    /// An experience with default layouts: 350 ornaments, no photos,
    /// starting gathered.
    pub fn new() -> Self {
        Self {
            mapper: ModeMapper::new(),
            cell: GestureCell::new(),
            source: None,
            ornaments: Ornaments::new(OrnamentLayout::default()),
            photos: PhotoCloud::new(PhotoLayout::default()),
            camera: CameraRig::default(),
            clock: Clock::new(),
            frame: Frame::new(),
        }
    }

    /// Rebuild both particle collections from a fixed seed.
    ///
    /// Call before adding photos; reseeding resets the photo cloud.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ornaments = Ornaments::seeded(self.ornaments.layout().clone(), seed);
        self.photos = PhotoCloud::seeded(self.photos.layout().clone(), seed.wrapping_add(1));
        self
    }

    /// Replace the ornament field.
    pub fn with_ornament_layout(mut self, layout: OrnamentLayout) -> Self {
        self.ornaments = Ornaments::new(layout);
        self
    }

    /// Replace the (empty) photo cloud's layout.
    pub fn with_photo_layout(mut self, layout: PhotoLayout) -> Self {
        self.photos = PhotoCloud::new(layout);
        self
    }

    /// Replace the camera configuration.
    pub fn with_camera(mut self, config: CameraConfig) -> Self {
        self.camera = CameraRig::new(config);
        self
    }

    /// Drive the clock with a fixed step instead of wall time.
    pub fn with_fixed_step(mut self, step: f32) -> Self {
        self.clock = Clock::fixed(step);
        self
    }

    /// The shared gesture cell. Clone it into whatever produces samples -
    /// a source thread, or a window event handler acting as the fallback
    /// control.
    pub fn gesture_cell(&self) -> GestureCell {
        self.cell.clone()
    }

    /// Spawn a gesture source feeding this experience.
    ///
    /// Replaces (and deterministically stops) any previous source.
    pub fn attach_source<S: GestureSource>(&mut self, source: S) {
        self.detach_source();
        self.source = Some(spawn_source(source, self.cell.clone()));
    }

    /// Stop the gesture source, if any, and report its terminal error.
    ///
    /// The experience keeps running either way; without a source, mode
    /// changes arrive only via [`set_mode`](Self::set_mode).
    pub fn detach_source(&mut self) -> Option<GestureError> {
        self.source.take().and_then(|mut handle| handle.stop())
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mapper.mode()
    }

    /// Force a mode, bypassing gestures (fallback control surface).
    pub fn set_mode(&mut self, mode: Mode) {
        self.mapper.set_mode(mode);
    }

    /// Append a photo reference; it becomes a particle immediately.
    pub fn add_photo(&mut self, reference: impl Into<String>) {
        self.photos.push(reference);
    }

    /// Select which photo PhotoView pulls forward.
    pub fn set_focus(&mut self, index: Option<usize>) {
        self.photos.set_focus(index);
    }

    /// Elapsed experience time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn ornaments(&self) -> &Ornaments {
        &self.ornaments
    }

    pub fn photos(&self) -> &PhotoCloud {
        &self.photos
    }

    /// Advance one tick and produce the frame to render.
    ///
    /// Reads the latest gesture sample exactly once, applies it to the
    /// mapper, and passes the resulting mode by value into every
    /// animator, so all components see identical state this tick.
    pub fn tick(&mut self) -> &Frame {
        let (elapsed, _delta) = self.clock.update();

        let sample = self.cell.latest();
        self.mapper.apply(&sample);
        let mode = self.mapper.mode();

        self.ornaments.update(mode, elapsed);
        self.photos.update(mode, elapsed);
        self.camera.update(mode, &sample, elapsed);

        self.frame.clear();
        self.ornaments.emit(&mut self.frame.instances);
        self.photos.emit(&mut self.frame.instances);
        self.frame.camera = self.camera.pose();
        self.frame.elapsed = elapsed;
        &self.frame
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Asset;
    use crate::gesture::{Gesture, GestureSample};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Fails on the first poll and flags that it was actually polled, so
    /// tests can wait out the spawn race before asserting on the error.
    struct BrokenCamera {
        polled: Arc<AtomicBool>,
    }

    impl BrokenCamera {
        fn new() -> (Self, Arc<AtomicBool>) {
            let polled = Arc::new(AtomicBool::new(false));
            (
                Self {
                    polled: polled.clone(),
                },
                polled,
            )
        }
    }

    impl GestureSource for BrokenCamera {
        fn next_sample(&mut self) -> Result<Option<GestureSample>, GestureError> {
            self.polled.store(true, Ordering::Release);
            Err(GestureError::Init("no capture device".into()))
        }
    }

    fn wait_for(flag: &AtomicBool) {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
        while !flag.load(Ordering::Acquire) && std::time::Instant::now() < deadline {
            std::thread::yield_now();
        }
    }

    #[test]
    fn frame_contains_every_particle_once() {
        let mut experience = Experience::new()
            .with_seed(5)
            .with_fixed_step(1.0 / 60.0);
        experience.add_photo("a");
        experience.add_photo("b");

        let frame = experience.tick();
        assert_eq!(frame.instances.len(), 352);

        let photos = frame
            .instances
            .iter()
            .filter(|i| matches!(i.asset, Asset::Photo { .. }))
            .count();
        assert_eq!(photos, 2);
    }

    #[test]
    fn published_sample_changes_mode_on_next_tick() {
        let mut experience = Experience::new().with_seed(5).with_fixed_step(1.0 / 60.0);
        let cell = experience.gesture_cell();

        cell.publish(GestureSample::detected(Gesture::OpenPalm, 0.5, 0.5));
        experience.tick();
        assert_eq!(experience.mode(), Mode::Scattered);

        cell.publish(GestureSample::detected(Gesture::Victory, 0.5, 0.5));
        experience.tick();
        assert_eq!(experience.mode(), Mode::PhotoView);
    }

    #[test]
    fn broken_source_degrades_instead_of_crashing() {
        let mut experience = Experience::new().with_seed(5).with_fixed_step(1.0 / 60.0);
        let (camera, polled) = BrokenCamera::new();
        experience.attach_source(camera);

        // The loop stops on its own; ticking keeps working.
        experience.tick();
        wait_for(&polled);
        let error = experience.detach_source();
        assert!(matches!(error, Some(GestureError::Init(_))));

        // Manual control still drives the experience.
        experience.set_mode(Mode::Scattered);
        experience.tick();
        assert_eq!(experience.mode(), Mode::Scattered);
    }

    #[test]
    fn reattaching_replaces_the_previous_source() {
        let mut experience = Experience::new().with_seed(5);
        let (first, _) = BrokenCamera::new();
        let (second, polled) = BrokenCamera::new();
        experience.attach_source(first);
        experience.attach_source(second);
        wait_for(&polled);
        // Exactly one handle remains; detaching drains it.
        assert!(experience.detach_source().is_some());
        assert!(experience.detach_source().is_none());
    }
}
