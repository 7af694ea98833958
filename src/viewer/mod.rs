//! Interactive wgpu viewer for the experience.
//!
//! The viewer is one consumer of the core's per-tick [`Frame`](crate::frame::Frame)
//! output: it opens a window, ticks the experience on every redraw, and
//! draws the instance list. It also provides the keyboard fallback
//! control required when no gesture source is available - held keys stand
//! in for classifier labels, and the cursor stands in for the palm
//! center:
//!
//! | input | stands in for |
//! |-------|---------------|
//! | hold `F` | closed fist (gather the tree) |
//! | hold `O` | open palm (scatter; cursor steers the camera) |
//! | hold `V` | victory (grab a photo) |
//! | `Left` / `Right` | cycle the focused photo |
//! | `Escape` | quit |
//!
//! Photo references are interpreted as filesystem paths; a photo that
//! fails to decode gets a flat gold placeholder and a stderr notice
//! rather than aborting the run.

mod render;
mod shader;

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::error::ViewerError;
use crate::experience::Experience;
use crate::gesture::{Gesture, GestureCell, GestureSample};
use render::GpuState;

/// Run the viewer until its window closes.
pub fn run(experience: Experience) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = Viewer::new(experience);
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// The windowed application driving one [`Experience`].
pub struct Viewer {
    experience: Experience,
    cell: GestureCell,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    /// Cursor position normalized to the window, the keyboard-mode palm
    /// center.
    cursor: Vec2,
    /// Gesture key currently held, if any.
    active: Option<Gesture>,
}

impl Viewer {
    pub fn new(experience: Experience) -> Self {
        let cell = experience.gesture_cell();
        Self {
            experience,
            cell,
            window: None,
            gpu: None,
            cursor: Vec2::new(0.5, 0.5),
            active: None,
        }
    }

    fn publish(&self) {
        match self.active {
            Some(gesture) => self.cell.publish(GestureSample::detected(
                gesture,
                self.cursor.x,
                self.cursor.y,
            )),
            None => self.cell.publish(GestureSample::absent()),
        }
    }

    fn cycle_focus(&mut self, step: isize) {
        let count = self.experience.photos().len();
        if count == 0 {
            return;
        }
        let current = self.experience.photos().focused().unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(count as isize) as usize;
        self.experience.set_focus(Some(next));
    }

    fn handle_key(&mut self, code: KeyCode, state: ElementState, event_loop: &ActiveEventLoop) {
        let pressed = state == ElementState::Pressed;
        let gesture = match code {
            KeyCode::KeyF => Some(Gesture::ClosedFist),
            KeyCode::KeyO => Some(Gesture::OpenPalm),
            KeyCode::KeyV => Some(Gesture::Victory),
            _ => None,
        };

        if let Some(gesture) = gesture {
            if pressed {
                self.active = Some(gesture);
            } else if self.active == Some(gesture) {
                self.active = None;
            }
            self.publish();
            return;
        }

        if pressed {
            match code {
                KeyCode::ArrowRight => self.cycle_focus(1),
                KeyCode::ArrowLeft => self.cycle_focus(-1),
                KeyCode::Escape => event_loop.exit(),
                _ => {}
            }
        }
    }

    fn load_photo_textures(&mut self) {
        let references: Vec<String> = self
            .experience
            .photos()
            .iter()
            .map(|p| p.reference().to_string())
            .collect();

        let Some(gpu) = &mut self.gpu else { return };
        for reference in references {
            let loaded = std::fs::read(&reference)
                .map_err(crate::error::PhotoError::from)
                .and_then(|bytes| gpu.load_photo(&bytes));
            if let Err(e) = loaded {
                eprintln!("Photo {:?} unavailable ({}); using placeholder", reference, e);
                gpu.load_placeholder();
            }
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("Garland")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("{}", ViewerError::from(e));
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window.clone());

            match pollster::block_on(GpuState::new(window)) {
                Ok(gpu) => self.gpu = Some(gpu),
                Err(e) => {
                    eprintln!("{}", ViewerError::from(e));
                    event_loop.exit();
                    return;
                }
            }
            self.load_photo_textures();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                // Halt the gesture loop before the window goes away.
                if let Some(e) = self.experience.detach_source() {
                    eprintln!("Gesture source ended: {}", e);
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(code, event.state, event_loop);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(gpu) = &self.gpu {
                    let w = gpu.config.width.max(1) as f32;
                    let h = gpu.config.height.max(1) as f32;
                    self.cursor = Vec2::new(
                        (position.x as f32 / w).clamp(0.0, 1.0),
                        (position.y as f32 / h).clamp(0.0, 1.0),
                    );
                }
                if self.active.is_some() {
                    self.publish();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(gpu) = &mut self.gpu {
                    let frame = self.experience.tick();
                    match gpu.render(frame) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                            width: gpu.config.width,
                            height: gpu.config.height,
                        }),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
