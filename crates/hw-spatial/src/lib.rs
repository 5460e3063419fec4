//! `hw-spatial`: the world's grid, what lies on it, and how to cross it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`map`]      | `GridMap` (bounds, passability, roofs, edge band, parking, contamination), `GridMapBuilder` |
//! | [`door`]     | `Door`, `DoorState`, `DoorControl` trait                    |
//! | [`items`]    | `GroundItems`: items lying on cells, R-tree indexed         |
//! | [`zones`]    | `StorageZones`, `StoragePolicy` trait                       |
//! | [`router`]   | `Router` trait, `Route`, `PathEnd`, `DijkstraRouter`        |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod door;
pub mod error;
pub mod items;
pub mod map;
pub mod router;
pub mod zones;


pub use door::{Door, DoorControl, DoorState};
pub use error::{SpatialError, SpatialResult};
pub use items::{GroundItem, GroundItems};
pub use map::{GridMap, GridMapBuilder};
pub use router::{DijkstraRouter, PathEnd, Route, Router};
pub use zones::{StorageFilter, StoragePolicy, StorageZone, StorageZones};
