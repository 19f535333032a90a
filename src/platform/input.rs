//! Keyboard to input snapshot mapping

use crate::sim::{Command, MoveIntent, TickInput};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    C,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Tab,
}

/// Keyboard state for the current frame
pub trait KeyState {
    /// Held this frame
    fn is_down(&self, key: Key) -> bool;
    /// Went down since the last frame
    fn is_pressed(&self, key: Key) -> bool;
}

/// One frame of input
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub tick: TickInput,
    /// Switch between the two variants (menu only)
    pub toggle_variant: bool,
}

/// Snapshot the keyboard. Presses are queued in a fixed order so a frame
/// with several presses is handled the same way every time.
pub fn poll_input(keys: &impl KeyState) -> FrameInput {
    let any_down = |a: Key, b: Key| keys.is_down(a) || keys.is_down(b);

    let intent = MoveIntent {
        up: any_down(Key::W, Key::Up),
        down: any_down(Key::S, Key::Down),
        left: any_down(Key::A, Key::Left),
        right: any_down(Key::D, Key::Right),
        jump: keys.is_down(Key::Space),
    };

    let mut commands = Vec::new();
    if keys.is_pressed(Key::Escape) {
        commands.push(Command::Cancel);
    }
    if keys.is_pressed(Key::Enter) {
        commands.push(Command::Confirm);
    }
    if keys.is_pressed(Key::Space) {
        commands.push(Command::Dash);
    }
    if keys.is_pressed(Key::C) {
        commands.push(Command::SwapColor);
    }

    FrameInput {
        tick: TickInput { intent, commands },
        toggle_variant: keys.is_pressed(Key::Tab),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeKeys {
        down: HashSet<Key>,
        pressed: HashSet<Key>,
    }

    impl FakeKeys {
        fn press(mut self, key: Key) -> Self {
            self.down.insert(key);
            self.pressed.insert(key);
            self
        }

        fn hold(mut self, key: Key) -> Self {
            self.down.insert(key);
            self
        }
    }

    impl KeyState for FakeKeys {
        fn is_down(&self, key: Key) -> bool {
            self.down.contains(&key)
        }

        fn is_pressed(&self, key: Key) -> bool {
            self.pressed.contains(&key)
        }
    }

    #[test]
    fn test_wasd_and_arrows_both_move() {
        let input = poll_input(&FakeKeys::default().hold(Key::W).hold(Key::Right));
        assert!(input.tick.intent.up);
        assert!(input.tick.intent.right);
        assert!(!input.tick.intent.left);
        assert!(input.tick.commands.is_empty());
    }

    #[test]
    fn test_space_press_dashes_and_jumps() {
        let input = poll_input(&FakeKeys::default().press(Key::Space));
        assert!(input.tick.intent.jump);
        assert_eq!(input.tick.commands, vec![Command::Dash]);

        // Held but not newly pressed: jump only
        let input = poll_input(&FakeKeys::default().hold(Key::Space));
        assert!(input.tick.intent.jump);
        assert!(input.tick.commands.is_empty());
    }

    #[test]
    fn test_command_order_is_fixed() {
        let keys = FakeKeys::default()
            .press(Key::C)
            .press(Key::Enter)
            .press(Key::Escape);
        let input = poll_input(&keys);
        assert_eq!(
            input.tick.commands,
            vec![Command::Cancel, Command::Confirm, Command::SwapColor]
        );
    }

    #[test]
    fn test_tab_toggles_variant() {
        assert!(poll_input(&FakeKeys::default().press(Key::Tab)).toggle_variant);
        assert!(!poll_input(&FakeKeys::default().hold(Key::Tab)).toggle_variant);
    }
}
