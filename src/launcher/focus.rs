//! Focus ring for controller and keyboard navigation

/// Direction of navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Widgets that can hold focus
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FocusTarget {
    ContentSelector, // Combo box with the content entries
    LaunchButton,
    SetDefaultButton,
    NetplayToggle,
    RetryButton, // Only when no content is loaded
}

impl FocusTarget {
    pub fn label(self) -> &'static str {
        match self {
            Self::ContentSelector => "Content",
            Self::LaunchButton => "Launch",
            Self::SetDefaultButton => "Set Default",
            Self::NetplayToggle => "Netplay",
            Self::RetryButton => "Retry",
        }
    }
}

const CONTENT_RING: [FocusTarget; 4] = [
    FocusTarget::ContentSelector,
    FocusTarget::LaunchButton,
    FocusTarget::SetDefaultButton,
    FocusTarget::NetplayToggle,
];

const ERROR_RING: [FocusTarget; 1] = [FocusTarget::RetryButton];

/// Ordered ring of focusable widgets; moving past either end wraps around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRing {
    targets: &'static [FocusTarget],
    index: usize,
}

impl FocusRing {
    /// Ring for the content view, or the error view when `has_content` is false
    pub fn new(has_content: bool) -> Self {
        let targets: &'static [FocusTarget] = if has_content {
            &CONTENT_RING
        } else {
            &ERROR_RING
        };
        Self { targets, index: 0 }
    }

    pub fn current(&self) -> FocusTarget {
        self.targets[self.index]
    }

    pub fn is_focused(&self, target: FocusTarget) -> bool {
        self.current() == target
    }

    pub fn next(&mut self) -> FocusTarget {
        self.index = (self.index + 1) % self.targets.len();
        self.current()
    }

    pub fn prev(&mut self) -> FocusTarget {
        self.index = (self.index + self.targets.len() - 1) % self.targets.len();
        self.current()
    }

    /// Focus `target` if it is part of this ring
    pub fn focus(&mut self, target: FocusTarget) -> bool {
        match self.targets.iter().position(|t| *t == target) {
            Some(index) => {
                self.index = index;
                true
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        let mut ring = FocusRing::new(true);
        assert_eq!(ring.current(), FocusTarget::ContentSelector);
        assert_eq!(ring.prev(), FocusTarget::NetplayToggle);
        assert_eq!(ring.next(), FocusTarget::ContentSelector);
        ring.next();
        ring.next();
        ring.next();
        assert_eq!(ring.next(), FocusTarget::ContentSelector);
    }

    #[test]
    fn test_error_ring_has_retry_only() {
        let mut ring = FocusRing::new(false);
        assert_eq!(ring.current(), FocusTarget::RetryButton);
        assert_eq!(ring.next(), FocusTarget::RetryButton);
        assert_eq!(ring.prev(), FocusTarget::RetryButton);
        assert!(!ring.focus(FocusTarget::LaunchButton));
    }

    #[test]
    fn test_focus_by_target() {
        let mut ring = FocusRing::new(true);
        assert!(ring.focus(FocusTarget::SetDefaultButton));
        assert!(ring.is_focused(FocusTarget::SetDefaultButton));
        assert_eq!(ring.next(), FocusTarget::NetplayToggle);
    }
}
