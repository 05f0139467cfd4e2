use serde::Serialize;

use crate::state::NavigationFrame;

/// Prior navigation positions, strictly last-in-first-out. Unbounded: a
/// session-long chain of jumps stays reversible; capping is a host policy,
/// not the engine's.
#[derive(Debug, Default, Clone, Serialize)]
pub struct HistoryStack {
    frames: Vec<NavigationFrame>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: NavigationFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<NavigationFrame> {
        self.frames.pop()
    }

    /// What the UI checks to decide whether a "back" control renders.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tour_content::LayerId;

    fn layer_frame(id: u32) -> NavigationFrame {
        NavigationFrame::Layer {
            layer: LayerId(id),
            link: None,
        }
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let mut stack = HistoryStack::new();
        stack.push(layer_frame(1));
        stack.push(layer_frame(3));
        stack.push(layer_frame(4));
        assert_eq!(stack.len(), 3);

        assert_eq!(stack.pop(), Some(layer_frame(4)));
        assert_eq!(stack.pop(), Some(layer_frame(3)));
        assert_eq!(stack.pop(), Some(layer_frame(1)));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }
}
