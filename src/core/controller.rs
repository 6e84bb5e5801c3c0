/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    Escape,
    MouseLeft,
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// +1 when only `positive` is held, -1 when only `negative` is, else 0
    fn axis(&self, positive: Button, negative: Button) -> f32 {
        match (self.is_down(positive), self.is_down(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test mock controller implementation
    struct MockController {
        pressed: Vec<Button>,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.pressed
        }
    }

    #[test]
    fn test_controller_is_down() {
        let controller = MockController {
            pressed: vec![Button::KeyW, Button::MouseLeft],
        };

        assert!(controller.is_down(Button::KeyW));
        assert!(controller.is_down(Button::MouseLeft));
        assert!(!controller.is_down(Button::KeyA));
        assert_eq!(controller.get_down_keys().len(), 2);
    }

    #[test]
    fn test_axis_single_direction() {
        let controller = MockController {
            pressed: vec![Button::KeyS],
        };

        assert_eq!(controller.axis(Button::KeyW, Button::KeyS), -1.0);
        assert_eq!(controller.axis(Button::KeyD, Button::KeyA), 0.0);
    }

    #[test]
    fn test_axis_opposing_keys_cancel() {
        let controller = MockController {
            pressed: vec![Button::KeyA, Button::KeyD],
        };

        assert_eq!(controller.axis(Button::KeyD, Button::KeyA), 0.0);
    }
}
