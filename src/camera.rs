//! Mode-driven camera motion.
//!
//! The rig derives a position/look-at target from the current mode (and,
//! while scattered, from the palm center) and eases toward it with the
//! same exponential smoothing the particles use, so a mode switch bends
//! the camera path instead of cutting.

use glam::{Vec2, Vec3};

use crate::frame::CameraPose;
use crate::gesture::GestureSample;
use crate::mode::Mode;

/// Orbit and easing parameters for the camera rig.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Orbit radius around the tree.
    pub orbit_radius: f32,
    /// Camera height during the idle tree orbit.
    pub orbit_height: f32,
    /// Angular speed of the idle orbit, radians per second of elapsed time.
    pub idle_speed: f32,
    /// Smoothing factor for the idle orbit (slow, cinematic).
    pub idle_lerp: f32,
    /// Smoothing factor while the hand steers (snappier).
    pub hand_lerp: f32,
    /// Horizontal range the hand X maps onto, pre-scaled to yaw.
    pub hand_yaw_range: f32,
    /// Vertical range the hand Y maps onto, in world units.
    pub hand_height_range: f32,
    /// Where the camera parks for the focused photo.
    pub focus_position: Vec3,
    /// Smoothing factor for the focus approach.
    pub focus_lerp: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 25.0,
            orbit_height: 5.0,
            idle_speed: 0.1,
            idle_lerp: 0.02,
            hand_lerp: 0.05,
            hand_yaw_range: 40.0,
            hand_height_range: 20.0,
            focus_position: Vec3::new(0.0, 0.0, 10.0),
            focus_lerp: 0.05,
        }
    }
}

/// The camera motion controller.
#[derive(Clone, Debug)]
pub struct CameraRig {
    config: CameraConfig,
    position: Vec3,
    look_at: Vec3,
    /// Last palm center seen while scattered. Hand absence keeps easing
    /// toward the pose derived from this, rather than snapping anywhere.
    last_hand: Vec2,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let position = Vec3::new(0.0, 0.0, config.orbit_radius);
        Self {
            config,
            position,
            look_at: Vec3::ZERO,
            last_hand: Vec2::new(0.5, 0.5),
        }
    }

    /// Current camera pose.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at: self.look_at,
        }
    }

    /// Advance the camera one tick.
    pub fn update(&mut self, mode: Mode, sample: &GestureSample, elapsed: f32) {
        let cfg = &self.config;
        match mode {
            Mode::Tree => {
                // Idle ambient orbit, independent of the hand.
                let t = elapsed * cfg.idle_speed;
                let target = Vec3::new(
                    t.sin() * cfg.orbit_radius,
                    cfg.orbit_height,
                    t.cos() * cfg.orbit_radius,
                );
                self.position = self.position.lerp(target, cfg.idle_lerp);
                self.look_at = Vec3::ZERO;
            }
            Mode::Scattered => {
                if sample.present {
                    self.last_hand = sample.hand();
                }
                let yaw = (self.last_hand.x - 0.5) * cfg.hand_yaw_range * 0.1;
                let height = (self.last_hand.y - 0.5) * cfg.hand_height_range;
                let target = Vec3::new(
                    yaw.sin() * cfg.orbit_radius,
                    height,
                    yaw.cos() * cfg.orbit_radius,
                );
                self.position = self.position.lerp(target, cfg.hand_lerp);
                self.look_at = Vec3::ZERO;
            }
            Mode::PhotoView => {
                self.position = self.position.lerp(cfg.focus_position, cfg.focus_lerp);
                self.look_at = Vec3::ZERO;
            }
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Gesture;

    fn absent() -> GestureSample {
        GestureSample::absent()
    }

    #[test]
    fn tree_mode_settles_onto_the_orbit() {
        let mut rig = CameraRig::default();
        for _ in 0..600 {
            rig.update(Mode::Tree, &absent(), 3.0);
        }
        let t: f32 = 0.3; // elapsed * idle_speed
        let expected = Vec3::new(t.sin() * 25.0, 5.0, t.cos() * 25.0);
        assert!((rig.pose().position - expected).length() < 0.1);
        assert_eq!(rig.pose().look_at, Vec3::ZERO);
    }

    #[test]
    fn photo_view_parks_in_front_of_origin() {
        let mut rig = CameraRig::default();
        for _ in 0..400 {
            rig.update(Mode::PhotoView, &absent(), 0.0);
        }
        assert!((rig.pose().position - Vec3::new(0.0, 0.0, 10.0)).length() < 0.01);
    }

    #[test]
    fn hand_steers_the_scattered_orbit() {
        let mut rig = CameraRig::default();
        let hand = GestureSample::detected(Gesture::OpenPalm, 1.0, 0.5);
        for _ in 0..400 {
            rig.update(Mode::Scattered, &hand, 0.0);
        }
        let yaw: f32 = 2.0; // (1.0 - 0.5) * 40 * 0.1
        let expected = Vec3::new(yaw.sin() * 25.0, 0.0, yaw.cos() * 25.0);
        assert!((rig.pose().position - expected).length() < 0.05);
    }

    #[test]
    fn absent_hand_keeps_the_last_target() {
        let mut rig = CameraRig::default();
        let hand = GestureSample::detected(Gesture::OpenPalm, 0.8, 0.2);
        rig.update(Mode::Scattered, &hand, 0.0);

        for _ in 0..400 {
            rig.update(Mode::Scattered, &absent(), 0.0);
        }

        // The rig converged to the pose the hand last asked for; it did
        // not snap back to the neutral center.
        let yaw: f32 = (0.8 - 0.5) * 4.0;
        let height = (0.2 - 0.5) * 20.0;
        let expected = Vec3::new(yaw.sin() * 25.0, height, yaw.cos() * 25.0);
        assert!((rig.pose().position - expected).length() < 0.05);
    }

    #[test]
    fn mode_switch_never_teleports() {
        let mut rig = CameraRig::default();
        for _ in 0..100 {
            rig.update(Mode::Tree, &absent(), 5.0);
        }
        let before = rig.pose().position;
        rig.update(Mode::PhotoView, &absent(), 5.0);
        let step = (rig.pose().position - before).length();
        let span = (before - Vec3::new(0.0, 0.0, 10.0)).length();
        assert!(step <= span * 0.05 + 1e-5);
    }
}
