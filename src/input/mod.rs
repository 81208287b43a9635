use std::collections::HashMap;

pub use winit::keyboard::KeyCode;

/// The five logical buttons the game reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// State of one logical button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Presses since the end of the last `update`.
    pub downs: u8,
    /// Currently held.
    pub pressed: bool,
}

impl Button {
    pub fn press(&mut self) {
        // Key repeat arrives as extra presses while held; count only edges.
        if !self.pressed {
            self.downs = self.downs.saturating_add(1);
        }
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }
}

/// Button state for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub up: Button,
    pub down: Button,
    pub left: Button,
    pub right: Button,
    pub fire: Button,
}

impl Buttons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ButtonKind) -> &Button {
        match kind {
            ButtonKind::Up => &self.up,
            ButtonKind::Down => &self.down,
            ButtonKind::Left => &self.left,
            ButtonKind::Right => &self.right,
            ButtonKind::Fire => &self.fire,
        }
    }

    pub fn get_mut(&mut self, kind: ButtonKind) -> &mut Button {
        match kind {
            ButtonKind::Up => &mut self.up,
            ButtonKind::Down => &mut self.down,
            ButtonKind::Left => &mut self.left,
            ButtonKind::Right => &mut self.right,
            ButtonKind::Fire => &mut self.fire,
        }
    }

    pub fn set(&mut self, kind: ButtonKind, pressed: bool) {
        let button = self.get_mut(kind);
        if pressed { button.press() } else { button.release() }
    }

    /// Zero every edge counter. Called at the end of each `update`.
    pub fn end_frame(&mut self) {
        for b in [&mut self.up, &mut self.down, &mut self.left, &mut self.right, &mut self.fire] {
            b.downs = 0;
        }
    }
}

/// Maps physical keys to logical buttons. One button may have several keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, ButtonKind>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, key: KeyCode, button: ButtonKind) {
        self.bindings.insert(key, button);
    }

    pub fn lookup(&self, key: KeyCode) -> Option<ButtonKind> {
        self.bindings.get(&key).copied()
    }

    /// Apply a key event to `buttons`. Returns true if the key was bound.
    pub fn handle_key(&self, key: KeyCode, pressed: bool, buttons: &mut Buttons) -> bool {
        match self.lookup(key) {
            Some(kind) => {
                buttons.set(kind, pressed);
                true
            }
            None => false,
        }
    }
}

/// Arrow keys and WASD for movement, Space to fire.
impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(KeyCode::ArrowUp, ButtonKind::Up);
        map.bind(KeyCode::ArrowDown, ButtonKind::Down);
        map.bind(KeyCode::ArrowLeft, ButtonKind::Left);
        map.bind(KeyCode::ArrowRight, ButtonKind::Right);
        map.bind(KeyCode::KeyW, ButtonKind::Up);
        map.bind(KeyCode::KeyS, ButtonKind::Down);
        map.bind(KeyCode::KeyA, ButtonKind::Left);
        map.bind(KeyCode::KeyD, ButtonKind::Right);
        map.bind(KeyCode::Space, ButtonKind::Fire);
        map
    }
}
