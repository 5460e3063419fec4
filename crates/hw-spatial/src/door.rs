//! Doors.
//!
//! A door owns its own open/close lifecycle.  Vehicles only *notify* a door
//! that a driver is pushing it open or has passed through, via
//! [`DoorControl`]; they keep at most a `DoorId` back-reference.

use hw_core::{AgentId, Cell, DoorId};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    #[default]
    Closed,
    /// Held open manually by an agent.
    HeldOpen { by: AgentId },
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub id: DoorId,
    pub cell: Cell,
    pub state: DoorState,
}

impl Door {
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self.state, DoorState::HeldOpen { .. })
    }
}

/// Notifications a vehicle sends to the door it drives through.
pub trait DoorControl {
    fn start_manual_open_by(&mut self, door: DoorId, agent: AgentId);

    /// Only closes the door if `agent` is the one holding it open.
    fn start_manual_close_by(&mut self, door: DoorId, agent: AgentId);
}
