//! Persistence projection of the container's state.
//!
//! Only the durable intent survives a save: which gravity (if any) should
//! come back open, and any lock override. Transient gesture state (drag
//! progress, peek, pending animations) is deliberately dropped; restore
//! replays the intent through the normal open/close path before the first
//! layout, so the drawer reappears in place without animating.

use std::error::Error;
use std::fmt;

use sideswipe_core::EdgeGravity;

use crate::container::{LockMode, SideSwipeLayout, DRAWER_INDEX};
use crate::params::OpenState;

/// Serialized length of a [`SavedState`] record.
pub const SAVED_STATE_LEN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SavedState {
    /// Gravity of the drawer that was open, or animating toward open, at
    /// save time. `None` when everything was closed.
    pub open_gravity: Option<EdgeGravity>,
    /// Lock override in force at save time; `Undefined` restores nothing.
    pub lock_mode: LockMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SavedStateError {
    WrongLength(usize),
    InvalidGravity(u8),
    InvalidLockMode(u8),
}

impl fmt::Display for SavedStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavedStateError::WrongLength(len) => {
                write!(f, "saved state must be {SAVED_STATE_LEN} bytes, got {len}")
            }
            SavedStateError::InvalidGravity(byte) => {
                write!(f, "invalid gravity byte {byte:#04x}")
            }
            SavedStateError::InvalidLockMode(byte) => {
                write!(f, "invalid lock mode byte {byte:#04x}")
            }
        }
    }
}

impl Error for SavedStateError {}

impl SavedState {
    pub fn to_bytes(&self) -> [u8; SAVED_STATE_LEN] {
        [gravity_code(self.open_gravity), lock_mode_code(self.lock_mode)]
    }

    /// Appends the record after whatever opaque state the host already wrote.
    pub fn append_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SavedStateError> {
        if bytes.len() != SAVED_STATE_LEN {
            return Err(SavedStateError::WrongLength(bytes.len()));
        }
        let open_gravity = gravity_from_code(bytes[0])
            .ok_or(SavedStateError::InvalidGravity(bytes[0]))?;
        let lock_mode = lock_mode_from_code(bytes[1])
            .ok_or(SavedStateError::InvalidLockMode(bytes[1]))?;
        Ok(Self {
            open_gravity,
            lock_mode,
        })
    }
}

fn gravity_code(gravity: Option<EdgeGravity>) -> u8 {
    match gravity {
        None => 0,
        Some(EdgeGravity::Left) => 1,
        Some(EdgeGravity::Right) => 2,
        Some(EdgeGravity::Start) => 3,
        Some(EdgeGravity::End) => 4,
    }
}

fn gravity_from_code(code: u8) -> Option<Option<EdgeGravity>> {
    match code {
        0 => Some(None),
        1 => Some(Some(EdgeGravity::Left)),
        2 => Some(Some(EdgeGravity::Right)),
        3 => Some(Some(EdgeGravity::Start)),
        4 => Some(Some(EdgeGravity::End)),
        _ => None,
    }
}

fn lock_mode_code(mode: LockMode) -> u8 {
    match mode {
        LockMode::Unlocked => 0,
        LockMode::LockedClosed => 1,
        LockMode::LockedOpen => 2,
        LockMode::Undefined => 3,
    }
}

fn lock_mode_from_code(code: u8) -> Option<LockMode> {
    match code {
        0 => Some(LockMode::Unlocked),
        1 => Some(LockMode::LockedClosed),
        2 => Some(LockMode::LockedOpen),
        3 => Some(LockMode::Undefined),
        _ => None,
    }
}

impl SideSwipeLayout {
    /// Captures the state worth persisting across a host teardown.
    pub fn save_state(&self) -> SavedState {
        let open_gravity = self.state.children.get(DRAWER_INDEX).and_then(|c| {
            if matches!(c.params.open_state, OpenState::Open | OpenState::Opening) {
                c.params.gravity.map(|g| g.edge)
            } else {
                None
            }
        });
        SavedState {
            open_gravity,
            lock_mode: self.state.lock_mode,
        }
    }

    /// Replays a saved record. Meant to run before the first layout pass,
    /// where open/close apply instantly instead of animating. A saved
    /// gravity that no longer matches the drawer is ignored; the match
    /// compares resolved edges, so `Start` under LTR still finds a drawer
    /// declared `Left`.
    pub fn restore_state(&mut self, saved: &SavedState) {
        if let Some(gravity) = saved.open_gravity {
            let direction = self.state.layout_direction;
            let matches_drawer = self
                .state
                .children
                .get(DRAWER_INDEX)
                .and_then(|c| c.params.gravity)
                .map(|g| g.edge.resolve(direction) == gravity.resolve(direction))
                .unwrap_or(false);
            if matches_drawer {
                self.open_drawer(true);
            } else {
                log::debug!("saved open gravity {gravity:?} has no matching drawer");
            }
        }
        if saved.lock_mode != LockMode::Undefined {
            self.set_drawer_lock_mode(saved.lock_mode);
        }
    }
}
