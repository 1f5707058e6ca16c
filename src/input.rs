//! Edge-triggered input queue
//!
//! Host callbacks push events whenever they fire; the simulation drains them at
//! the start of the next tick. Each press yields at most one jump attempt, and
//! presses beyond one per tick carry over to later ticks.

use std::collections::VecDeque;

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Restart,
}

/// Inputs consumed by one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Abandon the current run before ticking
    pub restart: bool,
    /// One jump press for this tick
    pub jump: bool,
}

/// FIFO of pending presses
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take the input for one tick: every restart up to and including the first jump
    pub fn next_frame(&mut self) -> FrameInput {
        let mut frame = FrameInput::default();
        while let Some(event) = self.events.pop_front() {
            match event {
                InputEvent::Restart => frame.restart = true,
                InputEvent::Jump => {
                    frame.jump = true;
                    break;
                }
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue() {
        let mut queue = InputQueue::new();
        assert_eq!(queue.next_frame(), FrameInput::default());
    }

    #[test]
    fn test_one_jump_per_tick() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Jump);
        queue.push(InputEvent::Jump);

        assert!(queue.next_frame().jump);
        assert_eq!(queue.len(), 1);
        assert!(queue.next_frame().jump);
        assert!(!queue.next_frame().jump);
    }

    #[test]
    fn test_restart_then_jump_same_tick() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Restart);
        queue.push(InputEvent::Jump);
        assert_eq!(
            queue.next_frame(),
            FrameInput {
                restart: true,
                jump: true
            }
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_jump_then_restart_splits_ticks() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Jump);
        queue.push(InputEvent::Restart);

        let first = queue.next_frame();
        assert!(first.jump && !first.restart);
        let second = queue.next_frame();
        assert!(second.restart && !second.jump);
    }
}
