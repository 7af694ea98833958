//! Gesture input plumbing.
//!
//! The classifier collaborator (an external black box) produces, per video
//! frame, at most one hand detection: a category label plus normalized 2-D
//! landmark points. This module reduces that to the one value the rest of
//! the crate consumes - a [`GestureSample`] - and moves it across the
//! thread boundary through a single-slot [`GestureCell`].
//!
//! The sampling loop and the render tick run at unrelated rates, so there
//! is deliberately no queue: an unprocessed sample is superseded, and the
//! engine always acts on the most recent reading.
//!
//! # Example
//!
//! ```ignore
//! use garland::gesture::{GestureCell, ScriptedSource, spawn_source};
//!
//! let cell = GestureCell::new();
//! let handle = spawn_source(my_source, cell.clone());
//!
//! // ... each render tick:
//! let sample = cell.latest();
//!
//! // Teardown halts the loop and drops the source (and its capture
//! // resource) deterministically.
//! drop(handle);
//! ```

use glam::Vec2;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::GestureError;

// Landmark indices in the classifier's fixed hand layout.
const WRIST: usize = 0;
const INDEX_BASE: usize = 5;
const PINKY_BASE: usize = 17;

/// Classifier category labels the mode mapper reacts to.
///
/// Anything the classifier emits outside this set parses as [`Gesture::Other`]
/// and never causes a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Gesture {
    ClosedFist,
    OpenPalm,
    Victory,
    PointingUp,
    #[default]
    Other,
}

impl Gesture {
    /// Parse a classifier category label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Closed_Fist" => Gesture::ClosedFist,
            "Open_Palm" => Gesture::OpenPalm,
            "Victory" => Gesture::Victory,
            "Pointing_Up" => Gesture::PointingUp,
            _ => Gesture::Other,
        }
    }
}

/// One reading of the hand: gesture plus palm center in video-frame
/// coordinates (both axes normalized to `[0, 1]`).
///
/// When `present` is false the gesture and coordinates are semantically
/// void; they default to [`Gesture::Other`] and the frame center so that
/// downstream math stays bounded without special cases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub gesture: Gesture,
    pub x: f32,
    pub y: f32,
    pub present: bool,
}

impl GestureSample {
    /// The no-hand reading: neutral center, `present == false`.
    pub fn absent() -> Self {
        Self {
            gesture: Gesture::Other,
            x: 0.5,
            y: 0.5,
            present: false,
        }
    }

    /// A reading with a hand in frame.
    pub fn detected(gesture: Gesture, x: f32, y: f32) -> Self {
        Self {
            gesture,
            x,
            y,
            present: true,
        }
    }

    /// Palm center as a vector.
    pub fn hand(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Default for GestureSample {
    fn default() -> Self {
        Self::absent()
    }
}

/// Raw classifier output for one video frame: the category label and the
/// ordered normalized landmark points.
#[derive(Clone, Debug)]
pub struct Detection {
    pub label: String,
    pub landmarks: Vec<Vec2>,
}

impl Detection {
    /// Reduce a detection to a [`GestureSample`].
    ///
    /// The palm center is the average of the wrist, index-base, and
    /// pinky-base landmarks; averaging three points damps jitter from any
    /// one of them. A detection missing those landmarks is treated the
    /// same as no detection at all.
    pub fn sample(&self) -> GestureSample {
        if self.landmarks.len() <= PINKY_BASE {
            return GestureSample::absent();
        }

        let center =
            (self.landmarks[WRIST] + self.landmarks[INDEX_BASE] + self.landmarks[PINKY_BASE]) / 3.0;

        GestureSample::detected(Gesture::from_label(&self.label), center.x, center.y)
    }
}

/// Single-slot, latest-wins shared cell for gesture samples.
///
/// One writer (the source thread), any number of readers. `publish`
/// overwrites whatever is in the slot; `latest` copies the current value
/// out, so a reader holds a snapshot that cannot tear mid-tick.
#[derive(Clone, Debug, Default)]
pub struct GestureCell {
    slot: Arc<Mutex<GestureSample>>,
}

impl GestureCell {
    /// Create a cell holding the absent sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a fresh sample.
    pub fn publish(&self, sample: GestureSample) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = sample;
    }

    /// Copy out the most recent sample.
    pub fn latest(&self) -> GestureSample {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Anything that can be polled for gesture samples.
///
/// Implementations own their capture resource (webcam, file, script) and
/// release it on drop. `next_sample` may block while waiting for the next
/// video frame - it runs on a dedicated thread, never on the render tick.
///
/// Return values:
/// - `Ok(Some(sample))` - a fresh reading (an absent hand is still a
///   reading, not an error);
/// - `Ok(None)` - the stream ended normally;
/// - `Err(_)` - the source failed; the loop publishes an absent sample
///   and stops, leaving the experience in degraded (gesture-less) mode.
pub trait GestureSource: Send + 'static {
    fn next_sample(&mut self) -> Result<Option<GestureSample>, GestureError>;
}

/// A source that plays back a fixed sequence of samples with pacing.
///
/// Stands in for the classifier in tests and headless demos, the same way
/// a keyboard simulator stands in for tracking hardware.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<(GestureSample, Duration)>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample delivered `after` the previous one.
    pub fn then(mut self, sample: GestureSample, after: Duration) -> Self {
        self.steps.push_back((sample, after));
        self
    }
}

impl GestureSource for ScriptedSource {
    fn next_sample(&mut self) -> Result<Option<GestureSample>, GestureError> {
        match self.steps.pop_front() {
            Some((sample, delay)) => {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                Ok(Some(sample))
            }
            None => Ok(None),
        }
    }
}

/// Handle to a running gesture-sampling loop.
///
/// Dropping the handle (or calling [`stop`](SourceHandle::stop)) halts the
/// loop and joins the thread, which drops the source - and with it the
/// capture resource - before returning. After teardown nothing can invoke
/// a disposed classifier.
#[derive(Debug)]
pub struct SourceHandle {
    stop: Arc<AtomicBool>,
    error: Arc<Mutex<Option<GestureError>>>,
    thread: Option<JoinHandle<()>>,
}

impl SourceHandle {
    /// Halt the sampling loop and wait for it to finish.
    ///
    /// Returns the terminal error if the source failed, `None` if it
    /// stopped cleanly. Idempotent.
    pub fn stop(&mut self) -> Option<GestureError> {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SourceHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run a [`GestureSource`] on its own thread, publishing into `cell`.
///
/// The loop exits when the handle is stopped, the stream ends, or the
/// source errors; a source error additionally publishes an absent sample
/// so readers do not keep acting on a stale hand.
pub fn spawn_source<S: GestureSource>(mut source: S, cell: GestureCell) -> SourceHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let error = Arc::new(Mutex::new(None));

    let stop_flag = stop.clone();
    let error_slot = error.clone();
    let thread = thread::spawn(move || {
        while !stop_flag.load(Ordering::Relaxed) {
            match source.next_sample() {
                Ok(Some(sample)) => cell.publish(sample),
                Ok(None) => break,
                Err(e) => {
                    cell.publish(GestureSample::absent());
                    *error_slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(e);
                    break;
                }
            }
        }
    });

    SourceHandle {
        stop,
        error,
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse() {
        assert_eq!(Gesture::from_label("Closed_Fist"), Gesture::ClosedFist);
        assert_eq!(Gesture::from_label("Open_Palm"), Gesture::OpenPalm);
        assert_eq!(Gesture::from_label("Victory"), Gesture::Victory);
        assert_eq!(Gesture::from_label("Pointing_Up"), Gesture::PointingUp);
        assert_eq!(Gesture::from_label("Thumb_Up"), Gesture::Other);
        assert_eq!(Gesture::from_label(""), Gesture::Other);
    }

    #[test]
    fn palm_center_averages_three_landmarks() {
        let mut landmarks = vec![Vec2::ZERO; 21];
        landmarks[WRIST] = Vec2::new(0.3, 0.6);
        landmarks[INDEX_BASE] = Vec2::new(0.4, 0.5);
        landmarks[PINKY_BASE] = Vec2::new(0.5, 0.4);

        let detection = Detection {
            label: "Open_Palm".into(),
            landmarks,
        };
        let sample = detection.sample();

        assert!(sample.present);
        assert_eq!(sample.gesture, Gesture::OpenPalm);
        assert!((sample.x - 0.4).abs() < 1e-6);
        assert!((sample.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn partial_detection_degrades_to_absent() {
        let detection = Detection {
            label: "Victory".into(),
            landmarks: vec![Vec2::ZERO; 5],
        };
        let sample = detection.sample();
        assert!(!sample.present);
        assert_eq!(sample.hand(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn cell_starts_absent_and_latest_wins() {
        let cell = GestureCell::new();
        assert!(!cell.latest().present);

        cell.publish(GestureSample::detected(Gesture::OpenPalm, 0.2, 0.8));
        cell.publish(GestureSample::detected(Gesture::ClosedFist, 0.6, 0.1));

        // Only the most recent publish is visible; the first was superseded.
        let latest = cell.latest();
        assert_eq!(latest.gesture, Gesture::ClosedFist);
        assert_eq!(latest.hand(), Vec2::new(0.6, 0.1));
    }

    #[test]
    fn scripted_source_plays_through_and_ends() {
        let cell = GestureCell::new();
        let source = ScriptedSource::new()
            .then(
                GestureSample::detected(Gesture::OpenPalm, 0.5, 0.5),
                Duration::ZERO,
            )
            .then(
                GestureSample::detected(Gesture::Victory, 0.5, 0.5),
                Duration::from_millis(1),
            );

        let mut handle = spawn_source(source, cell.clone());

        // Wait for the script to drain.
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while handle.is_running() && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(cell.latest().gesture, Gesture::Victory);
        assert!(handle.stop().is_none());
    }

    #[test]
    fn stop_halts_a_long_script() {
        let cell = GestureCell::new();
        let mut source = ScriptedSource::new();
        for _ in 0..10_000 {
            source = source.then(GestureSample::absent(), Duration::from_millis(1));
        }

        let mut handle = spawn_source(source, cell);
        thread::sleep(Duration::from_millis(5));
        assert!(handle.stop().is_none());
        assert!(!handle.is_running());
    }
}
