//! Redraw coalescing.
//!
//! State changes mark the scheduler dirty; the host requests one animation
//! frame the first time that happens and calls [`RedrawScheduler::tick`] from
//! it. Any number of changes before the tick collapse into a single redraw.

/// Single-flight dirty flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    pending: bool,
    frames: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the view dirty.
    ///
    /// Returns `true` only when no redraw was pending yet, i.e. when the host
    /// should request a new frame.
    pub fn mark_dirty(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending redraw. Returns `true` if one was pending.
    pub fn tick(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.frames += 1;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of redraws handed out so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_collapse_into_one_frame() {
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.mark_dirty());
        assert!(!scheduler.mark_dirty());
        assert!(!scheduler.mark_dirty());

        assert!(scheduler.tick());
        assert!(!scheduler.tick());
        assert_eq!(scheduler.frames(), 1);
    }

    #[test]
    fn test_dirty_again_after_tick() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.mark_dirty();
        scheduler.tick();
        assert!(!scheduler.is_pending());
        assert!(scheduler.mark_dirty());
        assert!(scheduler.is_pending());
    }
}
