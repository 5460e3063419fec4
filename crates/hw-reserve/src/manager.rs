use std::collections::{BTreeMap, BTreeSet};

use hw_core::{AgentId, Target};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::ReservationConflict;

/// Target → holder registry with a per-agent reverse index.
///
/// The reverse index is a `BTreeMap` of `BTreeSet`s so that everything that
/// walks an agent's claims does so in a stable order.
#[derive(Default, Debug)]
pub struct ReservationManager {
    holders: FxHashMap<Target, AgentId>,
    by_agent: BTreeMap<AgentId, BTreeSet<Target>>,
}

impl ReservationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `target` for `agent`.  Re-reserving something you already hold
    /// succeeds; a target held by someone else is refused with no change.
    pub fn reserve(&mut self, agent: AgentId, target: Target) -> Result<(), ReservationConflict> {
        match self.holders.get(&target) {
            Some(&holder) if holder == agent => Ok(()),
            Some(&holder) => Err(ReservationConflict { target, holder }),
            None => {
                self.holders.insert(target, agent);
                self.by_agent.entry(agent).or_default().insert(target);
                debug!(%agent, %target, "reserved");
                Ok(())
            }
        }
    }

    /// `true` if `target` is free or already held by `agent`.
    pub fn can_reserve(&self, agent: AgentId, target: Target) -> bool {
        self.holders.get(&target).is_none_or(|&h| h == agent)
    }

    /// Release `target` if, and only if, `agent` holds it.
    pub fn release(&mut self, agent: AgentId, target: Target) -> bool {
        if self.holders.get(&target) != Some(&agent) {
            return false;
        }
        self.holders.remove(&target);
        self.unlink(agent, target);
        true
    }

    /// Clear the claim on `target` whoever holds it, returning the previous
    /// holder.  The holder's task is not told; it must re-validate.
    pub fn force_release(&mut self, target: Target) -> Option<AgentId> {
        let prev = self.holders.remove(&target)?;
        self.unlink(prev, target);
        info!(%target, previous = %prev, "reservation force-released");
        Some(prev)
    }

    /// Drop every claim `agent` holds.  Returns how many were released.
    pub fn release_all_for_agent(&mut self, agent: AgentId) -> usize {
        let Some(set) = self.by_agent.remove(&agent) else {
            return 0;
        };
        for target in &set {
            self.holders.remove(target);
        }
        if !set.is_empty() {
            debug!(%agent, released = set.len(), "released all reservations");
        }
        set.len()
    }

    #[inline]
    pub fn holder(&self, target: Target) -> Option<AgentId> {
        self.holders.get(&target).copied()
    }

    #[inline]
    pub fn is_reserved(&self, target: Target) -> bool {
        self.holders.contains_key(&target)
    }

    /// `true` if `agent` currently holds `target`.
    #[inline]
    pub fn holds(&self, agent: AgentId, target: Target) -> bool {
        self.holder(target) == Some(agent)
    }

    /// Targets held by `agent`, in ascending order.
    pub fn reservations_of(&self, agent: AgentId) -> impl Iterator<Item = Target> + '_ {
        self.by_agent.get(&agent).into_iter().flat_map(|s| s.iter().copied())
    }

    /// Total live reservations.
    #[inline]
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    fn unlink(&mut self, agent: AgentId, target: Target) {
        if let Some(set) = self.by_agent.get_mut(&agent) {
            set.remove(&target);
            if set.is_empty() {
                self.by_agent.remove(&agent);
            }
        }
    }
}
