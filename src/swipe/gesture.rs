//! Per-card swipe gesture tracking.

/// Direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Gesture phase of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardPhase {
    #[default]
    Idle,
    /// Pointer is down; `offset` is the signed horizontal travel so far.
    Dragging { origin: u16, offset: i32 },
    /// The last gesture crossed the threshold.
    Committed(SwipeDirection),
}

/// Gesture state machine for one market card.
///
/// A drag that reaches `threshold` columns of horizontal travel commits on
/// release and yields exactly one direction. A shorter drag snaps back to
/// idle and yields nothing. A committed card can be swiped again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeCard {
    phase: CardPhase,
    threshold: u16,
}

impl SwipeCard {
    /// Create an idle card with the given commit threshold (at least one column).
    pub fn new(threshold: u16) -> Self {
        Self {
            phase: CardPhase::Idle,
            threshold: threshold.max(1),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    /// Commit threshold in columns.
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Pointer pressed at column `x`.
    pub fn begin(&mut self, x: u16) {
        self.phase = CardPhase::Dragging {
            origin: x,
            offset: 0,
        };
    }

    /// Pointer moved to column `x`. Returns the current offset.
    ///
    /// Ignored unless a drag is in progress.
    pub fn drag(&mut self, x: u16) -> i32 {
        if let CardPhase::Dragging { origin, offset } = &mut self.phase {
            *offset = i32::from(x) - i32::from(*origin);
            *offset
        } else {
            0
        }
    }

    /// Pointer released at column `x`.
    ///
    /// Returns the committed direction when the drag reached the threshold.
    pub fn release(&mut self, x: u16) -> Option<SwipeDirection> {
        let CardPhase::Dragging { origin, .. } = self.phase else {
            return None;
        };

        let offset = i32::from(x) - i32::from(origin);
        if offset.unsigned_abs() >= u32::from(self.threshold) {
            let direction = if offset > 0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            self.phase = CardPhase::Committed(direction);
            Some(direction)
        } else {
            self.phase = CardPhase::Idle;
            None
        }
    }

    /// Abort an in-progress drag without committing.
    pub fn cancel(&mut self) {
        if matches!(self.phase, CardPhase::Dragging { .. }) {
            self.phase = CardPhase::Idle;
        }
    }

    /// Perform a complete swipe in one step (keyboard or button input).
    pub fn fling(&mut self, direction: SwipeDirection) -> Option<SwipeDirection> {
        let (origin, end) = match direction {
            SwipeDirection::Left => (self.threshold, 0),
            SwipeDirection::Right => (0, self.threshold),
        };
        self.begin(origin);
        self.release(end)
    }

    /// Horizontal offset to draw the card at.
    pub fn offset(&self) -> i32 {
        match self.phase {
            CardPhase::Dragging { offset, .. } => offset,
            _ => 0,
        }
    }

    /// Drag progress towards the threshold, clamped to `-1.0..=1.0`.
    pub fn progress(&self) -> f64 {
        (f64::from(self.offset()) / f64::from(self.threshold)).clamp(-1.0, 1.0)
    }

    /// Whether the current drag would commit if released now.
    pub fn past_threshold(&self) -> bool {
        self.offset().unsigned_abs() >= u32::from(self.threshold)
    }
}

impl Default for SwipeCard {
    fn default() -> Self {
        Self::new(12)
    }
}
