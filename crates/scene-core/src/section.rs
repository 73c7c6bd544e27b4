//! Discrete section tracking from a continuous scroll offset.

/// Raw section candidate: `round(scroll / viewport_height)`.
///
/// Returns `None` for a zero or negative viewport height.
#[inline]
pub fn candidate_section(scroll_px: f64, viewport_height: f64) -> Option<i64> {
    if !(viewport_height > 0.0) || !scroll_px.is_finite() {
        return None;
    }
    Some((scroll_px / viewport_height).round() as i64)
}

/// A change of the current section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionChange {
    pub from: usize,
    pub to: usize,
}

/// Tracks which section is current. Candidates outside `[0, count)` are
/// clamped to the nearest section, so overscrolling past the last section
/// neither indexes out of range nor re-fires a change.
#[derive(Clone, Debug)]
pub struct SectionTracker {
    current: usize,
    count: usize,
}

impl SectionTracker {
    pub fn new(count: usize) -> Self {
        Self {
            current: 0,
            count: count.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn clamp(&self, candidate: i64) -> usize {
        candidate.clamp(0, self.count as i64 - 1) as usize
    }

    /// Feed a scroll sample. Returns the change when the clamped candidate
    /// differs from the stored section.
    pub fn observe(&mut self, scroll_px: f64, viewport_height: f64) -> Option<SectionChange> {
        let candidate = self.clamp(candidate_section(scroll_px, viewport_height)?);
        if candidate == self.current {
            return None;
        }
        let change = SectionChange {
            from: self.current,
            to: candidate,
        };
        self.current = candidate;
        log::debug!("[section] {} -> {}", change.from, change.to);
        Some(change)
    }
}
