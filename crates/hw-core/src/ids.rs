//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `AgentId` and `VehicleId` index
//! directly into their SoA / slot `Vec`s via `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in SoA storage.
    pub struct AgentId(u32);
}

typed_id! {
    /// Slot index of a vehicle in the vehicle store.  Slots are never reused,
    /// so a destroyed vehicle's id stays dead.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Identity of one item stack, stable while it moves between the ground
    /// and carriers.
    pub struct ItemId(u32);
}

typed_id! {
    /// Index of a door in the grid map's door table.
    pub struct DoorId(u32);
}

typed_id! {
    /// Faction marker shared by agents and vehicles.
    pub struct FactionId(u16);
}

typed_id! {
    /// Item type identity ("Wood", "Steel", …).  Two stacks merge-match when
    /// their `ItemDefId`s are equal.
    pub struct ItemDefId(u16);
}

impl FactionId {
    /// The home (player) faction.  "Friendly" means this faction.
    pub const PLAYER: FactionId = FactionId(0);

    #[inline]
    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
}
