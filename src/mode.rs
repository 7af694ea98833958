//! Application mode and the gesture-to-mode state machine.
//!
//! The whole experience hangs off one small enum: [`Mode`] selects which
//! target layout every particle and the camera ease toward. The
//! [`ModeMapper`] converts the noisy gesture stream into mode changes with
//! one guarded transition, and is the only thing allowed to change mode.
//!
//! # Transition table
//!
//! | gesture | guard | new mode |
//! |---------|-------|----------|
//! | closed fist | - | `Tree` |
//! | open palm | - | `Scattered` |
//! | victory / pointing up | current is Scattered or PhotoView | `PhotoView` |
//! | victory / pointing up | current == Tree | ignored |
//! | anything else, or hand absent | - | ignored |
//!
//! The grab gesture is suppressed while gathered so it cannot fire
//! mid-gather; the narrative ordering is gather, scatter, then focus.
//! There is no way out of `PhotoView` except fist or open palm, and no
//! timeout-based revert.

use crate::gesture::{Gesture, GestureSample};

/// The three visual arrangements the experience morphs between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Particles gathered into the spiral-cone tree.
    #[default]
    Tree,
    /// Particles dispersed through the scatter sphere, camera on the hand.
    Scattered,
    /// Scattered, plus one photo pulled up to the camera.
    PhotoView,
}

/// State machine feeding mode changes from gesture samples.
///
/// Holds no history beyond the current mode; the mode itself is the one
/// transition guard. Samples with `present == false` never transition.
#[derive(Clone, Debug, Default)]
pub struct ModeMapper {
    mode: Mode,
}

impl ModeMapper {
    /// Create a mapper starting in [`Mode::Tree`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper starting in the given mode.
    pub fn starting_at(mode: Mode) -> Self {
        Self { mode }
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Force a mode, bypassing gesture input.
    ///
    /// This is the fallback control surface for when no gesture source is
    /// available: the experience stays drivable without a hand in frame.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Feed one gesture sample; returns `Some(new_mode)` on a transition.
    ///
    /// Evaluated once per fresh sample. Re-applying the same sample is
    /// harmless (transitions are idempotent), so callers may apply the
    /// latest reading every tick without tracking sample freshness.
    pub fn apply(&mut self, sample: &GestureSample) -> Option<Mode> {
        if !sample.present {
            return None;
        }

        let next = match sample.gesture {
            Gesture::ClosedFist => Mode::Tree,
            Gesture::OpenPalm => Mode::Scattered,
            Gesture::Victory | Gesture::PointingUp => match self.mode {
                // Grabbing is only meaningful once things are dispersed.
                Mode::Scattered | Mode::PhotoView => Mode::PhotoView,
                Mode::Tree => return None,
            },
            Gesture::Other => return None,
        };

        if next == self.mode {
            return None;
        }
        self.mode = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(gesture: Gesture) -> GestureSample {
        GestureSample {
            gesture,
            x: 0.5,
            y: 0.5,
            present: true,
        }
    }

    #[test]
    fn fist_gathers_from_any_state() {
        for start in [Mode::Tree, Mode::Scattered, Mode::PhotoView] {
            let mut mapper = ModeMapper::starting_at(start);
            mapper.apply(&sample(Gesture::ClosedFist));
            assert_eq!(mapper.mode(), Mode::Tree);
        }
    }

    #[test]
    fn open_palm_scatters() {
        let mut mapper = ModeMapper::new();
        assert_eq!(mapper.apply(&sample(Gesture::OpenPalm)), Some(Mode::Scattered));
    }

    #[test]
    fn grab_is_guarded_in_tree_mode() {
        let mut mapper = ModeMapper::new();
        assert_eq!(mapper.apply(&sample(Gesture::Victory)), None);
        assert_eq!(mapper.mode(), Mode::Tree);
        assert_eq!(mapper.apply(&sample(Gesture::PointingUp)), None);
        assert_eq!(mapper.mode(), Mode::Tree);
    }

    #[test]
    fn grab_fires_once_scattered() {
        let mut mapper = ModeMapper::starting_at(Mode::Scattered);
        assert_eq!(mapper.apply(&sample(Gesture::Victory)), Some(Mode::PhotoView));

        // Already focused: pointing up keeps us there without re-announcing.
        assert_eq!(mapper.apply(&sample(Gesture::PointingUp)), None);
        assert_eq!(mapper.mode(), Mode::PhotoView);
    }

    #[test]
    fn absent_hand_never_transitions() {
        let mut mapper = ModeMapper::starting_at(Mode::Scattered);
        let mut absent = sample(Gesture::ClosedFist);
        absent.present = false;
        assert_eq!(mapper.apply(&absent), None);
        assert_eq!(mapper.mode(), Mode::Scattered);
    }

    #[test]
    fn unknown_gesture_is_ignored() {
        let mut mapper = ModeMapper::starting_at(Mode::Scattered);
        assert_eq!(mapper.apply(&sample(Gesture::Other)), None);
        assert_eq!(mapper.mode(), Mode::Scattered);
    }

    #[test]
    fn full_narrative_sequence() {
        // Gather -> scatter -> focus, as the gestures arrive.
        let mut mapper = ModeMapper::new();
        assert_eq!(mapper.apply(&sample(Gesture::OpenPalm)), Some(Mode::Scattered));
        assert_eq!(mapper.apply(&sample(Gesture::Victory)), Some(Mode::PhotoView));
        assert_eq!(mapper.apply(&sample(Gesture::ClosedFist)), Some(Mode::Tree));
    }
}
