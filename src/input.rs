use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode, mouse::MouseButton};

use crate::camera::Camera;

/// The logical actions the keyboard drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::TurnLeft,
        Action::TurnRight,
    ];

    /// The default key binding.
    pub fn from_keycode(keycode: Keycode) -> Option<Self> {
        match keycode {
            Keycode::W | Keycode::Up => Some(Action::MoveForward),
            Keycode::S | Keycode::Down => Some(Action::MoveBackward),
            Keycode::A | Keycode::Left => Some(Action::TurnLeft),
            Keycode::D | Keycode::Right => Some(Action::TurnRight),
            _ => None,
        }
    }

    /// Applies the camera mutator of the action for `dt` seconds.
    pub fn apply(self, camera: &mut Camera, dt: f32) {
        match self {
            Action::MoveForward => camera.move_forward(dt),
            Action::MoveBackward => camera.move_backward(dt),
            Action::TurnLeft => camera.turn_left(dt),
            Action::TurnRight => camera.turn_right(dt),
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The set of actions currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Active actions, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

/// The current state of the mouse.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    pub position: Vec2,
    pub left_down: bool,
    /// The left button went down since the previous frame.
    pub left_pressed: bool,
}

/// Everything the frame loop reads from the window each frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub actions: ActionSet,
    pub mouse: MouseState,
    should_close: bool,
    resized: Option<(u32, u32)>,
}

impl InputState {
    /// Resets the per-frame edge flags. Call before polling the frame's events.
    pub fn begin_frame(&mut self) {
        self.mouse.left_pressed = false;
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.request_close(),
            Event::Window {
                win_event: sdl2::event::WindowEvent::SizeChanged(width, height),
                ..
            } => {
                self.resized = Some(((*width).max(1) as u32, (*height).max(1) as u32));
            }
            Event::KeyDown {
                keycode, repeat, ..
            } => self.handle_key_event(*keycode, true, *repeat),
            Event::KeyUp { keycode, .. } => self.handle_key_event(*keycode, false, false),
            Event::MouseMotion { x, y, .. } => {
                self.mouse.position = Vec2::new(*x as f32, *y as f32);
            }
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => {
                self.mouse.position = Vec2::new(*x as f32, *y as f32);
                self.mouse.left_down = true;
                self.mouse.left_pressed = true;
            }
            Event::MouseButtonUp {
                mouse_btn: MouseButton::Left,
                ..
            } => {
                self.mouse.left_down = false;
            }
            _ => {}
        }
    }

    /// Key transitions as SDL reports them. Auto-repeats and unmapped keys are dropped.
    fn handle_key_event(&mut self, keycode: Option<Keycode>, down: bool, repeat: bool) {
        match keycode {
            Some(keycode) if !repeat => self.handle_key(keycode, down),
            _ => {}
        }
    }

    /// Updates the action set for a key transition. Escape requests close.
    pub fn handle_key(&mut self, keycode: Keycode, down: bool) {
        if keycode == Keycode::Escape {
            if down {
                self.request_close();
            }
            return;
        }
        if let Some(action) = Action::from_keycode(keycode) {
            if down {
                self.actions.insert(action);
            } else {
                self.actions.remove(action);
            }
        }
    }

    /// Applies every held action to the camera, scaled by the frame delta.
    pub fn apply_to(&self, camera: &mut Camera, dt: f32) {
        for action in self.actions.iter() {
            action.apply(camera, dt);
        }
    }

    pub fn request_close(&mut self) {
        self.should_close = true;
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    /// Returns the latest window size reported since the last call.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.resized.take()
    }
}
