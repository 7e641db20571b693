//! Index-wrap arithmetic shared by every carousel flavour.

use serde::{Deserialize, Serialize};

/// What happens when navigation runs past either end of the sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WrapPolicy {
    /// Requests past the ends are ignored.
    #[default]
    Clamped,
    /// The index wraps around; the caller hides the seam.
    Looped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    pub fn signum(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Returns the index after one step in `direction`.
///
/// Sequences with fewer than two items are inert and always answer 0, the
/// only position they have.
#[must_use]
pub fn step(index: usize, len: usize, direction: Direction, policy: WrapPolicy) -> usize {
    if len < 2 {
        return 0;
    }
    let index = index.min(len - 1);
    match (policy, direction) {
        (WrapPolicy::Clamped, Direction::Forward) => (index + 1).min(len - 1),
        (WrapPolicy::Clamped, Direction::Backward) => index.saturating_sub(1),
        (WrapPolicy::Looped, Direction::Forward) => (index + 1) % len,
        (WrapPolicy::Looped, Direction::Backward) => (index + len - 1) % len,
    }
}

/// Maps any signed position onto `[0, len)`.
#[must_use]
pub fn wrap(position: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    position.rem_euclid(len) as usize
}

/// Previous and next logical indices around `index`, for peek thumbnails.
pub fn neighbors(index: usize, len: usize) -> Option<(usize, usize)> {
    if len < 2 {
        return None;
    }
    Some((
        step(index, len, Direction::Backward, WrapPolicy::Looped),
        step(index, len, Direction::Forward, WrapPolicy::Looped),
    ))
}

/// A logical position bound to a sequence length and wrap policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    len: usize,
    policy: WrapPolicy,
}

impl Navigator {
    pub fn new(len: usize, policy: WrapPolicy) -> Self {
        Self {
            index: 0,
            len,
            policy,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index.min(self.len.saturating_sub(1));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn policy(&self) -> WrapPolicy {
        self.policy
    }

    pub fn can_step(&self, direction: Direction) -> bool {
        step(self.index, self.len, direction, self.policy) != self.index
    }

    /// Moves one step. Returns true when the index changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        let next = step(self.index, self.len, direction, self.policy);
        let changed = next != self.index;
        self.index = next;
        changed
    }

    pub fn advance(&mut self) -> bool {
        self.step(Direction::Forward)
    }

    pub fn retreat(&mut self) -> bool {
        self.step(Direction::Backward)
    }

    /// Jumps to `index`. Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.index {
            return false;
        }
        self.index = index;
        true
    }
}
