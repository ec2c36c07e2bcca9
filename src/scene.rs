//! Scene sequencing
//!
//! Levels form an ordered roster. A crash reloads the active entry; finishing
//! the last entry wraps back to the first, treating exhaustion of content as a
//! restart of the whole game.

use serde::{Deserialize, Serialize};

use crate::host::SceneDirectory;

/// Deferred scene change requested by an outcome sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneRequest {
    /// Re-enter the active scene from its initial state
    Reload,
    /// Move to the next scene, wrapping to the first after the last
    Advance,
}

/// Resolve a request to a load target against the directory
pub fn resolve_target(request: SceneRequest, dir: &dyn SceneDirectory) -> usize {
    match request {
        SceneRequest::Reload => dir.active_index(),
        SceneRequest::Advance => {
            let next = dir.active_index() + 1;
            if next < dir.scene_count() { next } else { 0 }
        }
    }
}

/// The shell's scene directory: a fixed-length roster of levels.
///
/// `load` records the target; the host loop picks it up via [`take_pending`]
/// and rebuilds the world from it.
///
/// [`take_pending`]: SceneRoster::take_pending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRoster {
    level_count: usize,
    active: usize,
    pending: Option<usize>,
}

impl SceneRoster {
    pub fn new(level_count: usize) -> Self {
        Self {
            level_count,
            active: 0,
            pending: None,
        }
    }

    /// Take the index queued by the last `load` call, if any
    pub fn take_pending(&mut self) -> Option<usize> {
        self.pending.take()
    }
}

impl SceneDirectory for SceneRoster {
    fn active_index(&self) -> usize {
        self.active
    }

    fn scene_count(&self) -> usize {
        self.level_count
    }

    fn load(&mut self, index: usize) {
        log::info!("loading scene {index}");
        self.active = index;
        self.pending = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reload_targets_active_index() {
        let mut roster = SceneRoster::new(3);
        roster.load(1);
        assert_eq!(resolve_target(SceneRequest::Reload, &roster), 1);
    }

    #[test]
    fn test_advance_goes_to_next() {
        let mut roster = SceneRoster::new(3);
        roster.load(1);
        assert_eq!(resolve_target(SceneRequest::Advance, &roster), 2);
    }

    #[test]
    fn test_advance_wraps_from_last() {
        let mut roster = SceneRoster::new(3);
        roster.load(2);
        assert_eq!(resolve_target(SceneRequest::Advance, &roster), 0);
    }

    #[test]
    fn test_load_sets_pending() {
        let mut roster = SceneRoster::new(3);
        assert_eq!(roster.take_pending(), None);

        roster.load(2);
        assert_eq!(roster.active_index(), 2);
        assert_eq!(roster.take_pending(), Some(2));
        assert_eq!(roster.take_pending(), None);
    }

    proptest! {
        #[test]
        fn prop_advance_target_always_in_range(count in 1usize..32, offset in 0usize..32) {
            let mut roster = SceneRoster::new(count);
            roster.load(offset % count);
            let target = resolve_target(SceneRequest::Advance, &roster);
            prop_assert!(target < count);
        }

        #[test]
        fn prop_reload_never_moves(count in 1usize..32, offset in 0usize..32) {
            let mut roster = SceneRoster::new(count);
            let active = offset % count;
            roster.load(active);
            prop_assert_eq!(resolve_target(SceneRequest::Reload, &roster), active);
        }
    }
}
