use bevy::input::{keyboard::KeyCode, mouse::MouseButton};
use bevy::prelude::*;

#[derive(Resource, Debug)]
pub struct Controls {
    pub orbit: ButtonInput,
    pub toggle_motion_mode: ButtonInput,
    pub toggle_trail: ButtonInput,
}

impl Controls {
    pub fn new() -> Self {
        Controls {
            orbit: ButtonInput::Mouse(MouseButton::Left),
            toggle_motion_mode: ButtonInput::Keyboard(KeyCode::KeyM),
            toggle_trail: ButtonInput::Keyboard(KeyCode::KeyT),
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonInput {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl ButtonInput {
    pub fn pressed(
        self,
        keyboard: &bevy::input::ButtonInput<KeyCode>,
        mouse: &bevy::input::ButtonInput<MouseButton>,
    ) -> bool {
        match self {
            ButtonInput::Keyboard(key_code) => keyboard.pressed(key_code),
            ButtonInput::Mouse(mouse_button) => mouse.pressed(mouse_button),
        }
    }

    pub fn just_pressed(
        self,
        keyboard: &bevy::input::ButtonInput<KeyCode>,
        mouse: &bevy::input::ButtonInput<MouseButton>,
    ) -> bool {
        match self {
            ButtonInput::Keyboard(key_code) => keyboard.just_pressed(key_code),
            ButtonInput::Mouse(mouse_button) => mouse.just_pressed(mouse_button),
        }
    }
}

pub struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Controls::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_dispatch_to_their_device() {
        let mut keyboard = bevy::input::ButtonInput::<KeyCode>::default();
        let mut mouse = bevy::input::ButtonInput::<MouseButton>::default();
        let controls = Controls::new();

        keyboard.press(KeyCode::KeyM);
        assert!(controls.toggle_motion_mode.just_pressed(&keyboard, &mouse));
        assert!(!controls.orbit.pressed(&keyboard, &mouse));

        mouse.press(MouseButton::Left);
        assert!(controls.orbit.pressed(&keyboard, &mouse));
        assert!(!controls.toggle_trail.pressed(&keyboard, &mouse));
    }
}
