//! Headless backend: no window, no pixels
//!
//! Drives the full frame loop with scripted input while counting draw
//! calls, so whole sessions can run in tests and in the demo binary.

use super::{Backend, Color, Key, TextureHandle};

/// A backend that renders nothing and plays back scripted input.
///
/// The frame counter advances on `end_frame`; key taps scheduled with
/// [`tap`](Self::tap) surface through `is_key_pressed` on their frame
/// only, keys added with [`hold`](Self::hold) stay down for the whole run.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frame: u64,
    max_frames: u64,
    held: Vec<Key>,
    script: Vec<(u64, Key)>,
    /// When true every texture load fails, exercising the degraded path
    pub fail_textures: bool,
    next_texture_id: u32,
    /// Handles loaded and not yet unloaded
    pub live_textures: Vec<TextureHandle>,
    pub frames_finished: u64,
    pub rectangles_drawn: u64,
    pub circles_drawn: u64,
    pub textures_drawn: u64,
    pub texts_drawn: u64,
    pub target_fps: u32,
}

impl HeadlessBackend {
    /// A backend whose window "closes" after `max_frames` frames
    pub fn new(max_frames: u64) -> Self {
        Self {
            max_frames,
            ..Self::default()
        }
    }

    /// Schedule a one-frame key press
    pub fn tap(&mut self, frame: u64, key: Key) {
        self.script.push((frame, key));
    }

    /// Hold a key down for the whole run
    pub fn hold(&mut self, key: Key) {
        if !self.held.contains(&key) {
            self.held.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.retain(|held| *held != key);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Backend for HeadlessBackend {
    fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps;
    }

    fn load_texture(&mut self, name: &str) -> Option<TextureHandle> {
        if self.fail_textures {
            log::warn!("headless backend refusing to load {name}");
            return None;
        }
        self.next_texture_id += 1;
        let texture = TextureHandle {
            id: self.next_texture_id,
            width: 128,
            height: 64,
        };
        self.live_textures.push(texture);
        Some(texture)
    }

    fn unload_texture(&mut self, texture: TextureHandle) {
        self.live_textures.retain(|live| live.id != texture.id);
    }

    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) {
        self.frame += 1;
        self.frames_finished += 1;
    }

    fn clear_background(&mut self, _color: Color) {}

    fn draw_texture(&mut self, _texture: TextureHandle, _x: f32, _y: f32, _tint: Color) {
        self.textures_drawn += 1;
    }

    fn draw_rectangle(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: Color) {
        self.rectangles_drawn += 1;
    }

    fn draw_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: Color) {
        self.circles_drawn += 1;
    }

    fn draw_text(&mut self, _text: &str, _x: f32, _y: f32, _size: i32, _color: Color) {
        self.texts_drawn += 1;
    }

    fn measure_text(&self, text: &str, size: i32) -> i32 {
        // Rough monospace estimate
        text.len() as i32 * size / 2
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.script
            .iter()
            .any(|&(frame, tapped)| frame == self.frame && tapped == key)
    }

    fn window_should_close(&self) -> bool {
        self.frame >= self.max_frames
    }
}
