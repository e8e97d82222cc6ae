//! Rising-edge debounce for logical controls
//!
//! A control fires once when it goes from released to held. Repeated polls
//! while it stays held report nothing until a release has been observed.

use std::collections::BTreeSet;

use super::nav::LogicalControl;

#[derive(Debug, Default)]
pub struct Debouncer {
    held: BTreeSet<LogicalControl>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the controls held this poll and return the newly pressed ones
    pub fn update(&mut self, active: &BTreeSet<LogicalControl>) -> Vec<LogicalControl> {
        let pressed = active.difference(&self.held).copied().collect();
        self.held.clone_from(active);
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(controls: &[LogicalControl]) -> BTreeSet<LogicalControl> {
        controls.iter().copied().collect()
    }

    #[test]
    fn test_fires_once_per_press() {
        let mut debouncer = Debouncer::new();
        let held = set(&[LogicalControl::Confirm]);

        assert_eq!(debouncer.update(&held), vec![LogicalControl::Confirm]);
        assert!(debouncer.update(&held).is_empty());
        assert!(debouncer.update(&held).is_empty());

        assert!(debouncer.update(&BTreeSet::new()).is_empty());
        assert_eq!(debouncer.update(&held), vec![LogicalControl::Confirm]);
    }

    #[test]
    fn test_independent_controls() {
        let mut debouncer = Debouncer::new();
        debouncer.update(&set(&[LogicalControl::Up]));

        let fired = debouncer.update(&set(&[LogicalControl::Up, LogicalControl::Start]));
        assert_eq!(fired, vec![LogicalControl::Start]);
    }

    proptest! {
        /// Each press/release cycle fires exactly once, however many polls it spans
        #[test]
        fn prop_one_activation_per_cycle(
            cycles in proptest::collection::vec((1usize..10, 1usize..10), 1..20)
        ) {
            let mut debouncer = Debouncer::new();
            let pressed = set(&[LogicalControl::Confirm]);
            let released = BTreeSet::new();
            let mut fired = 0;

            for (held_polls, released_polls) in &cycles {
                for _ in 0..*held_polls {
                    fired += debouncer.update(&pressed).len();
                }
                for _ in 0..*released_polls {
                    fired += debouncer.update(&released).len();
                }
            }

            prop_assert_eq!(fired, cycles.len());
        }
    }
}
