//! Core agent storage.

use hw_core::{AgentId, Cell, CoreError, CoreResult, FactionId, JobKind, Rot4, Vec3};
use hw_storage::CapacityContainer;

use crate::state::MIN_DRIVER_BODY_SIZE;
use crate::{AgentKind, Ineligible, MentalState, Vitals};

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let here = store.position[agent.index()];
/// ```
///
/// `position` is the cell the agent logically occupies; `draw_pos` is where
/// it is drawn, moving smoothly between cells.  A mounted vehicle follows
/// `draw_pos`.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Placement ─────────────────────────────────────────────────────────
    pub position: Vec<Cell>,
    pub draw_pos: Vec<Vec3>,
    pub rotation: Vec<Rot4>,

    // ── Identity ──────────────────────────────────────────────────────────
    pub faction: Vec<FactionId>,
    pub kind: Vec<AgentKind>,

    // ── Condition ─────────────────────────────────────────────────────────
    pub vitals: Vec<Vitals>,
    pub mental: Vec<MentalState>,
    pub starving: Vec<bool>,
    pub exhausted: Vec<bool>,

    // ── Activity ──────────────────────────────────────────────────────────
    /// Kind of the job the agent is doing.  `None` means idle.
    pub job: Vec<Option<JobKind>>,
    /// Set by the mobility engine while the agent is walking a path.
    pub moving: Vec<bool>,
    /// Performing an action that occupies the whole body (no fuel is burnt
    /// while driving in this state).
    pub full_body_busy: Vec<bool>,
    /// Speed multiplier on foot.  1.0 = normal walking speed.
    pub base_speed: Vec<f32>,

    // ── Carrying ──────────────────────────────────────────────────────────
    /// Worn carrier (backpack), if any.
    pub worn: Vec<Option<CapacityContainer>>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Error unless `agent` indexes a stored agent.
    pub fn check(&self, agent: AgentId) -> CoreResult<()> {
        if self.contains(agent) {
            Ok(())
        } else {
            Err(CoreError::AgentNotFound(agent))
        }
    }

    // ── Condition helpers ─────────────────────────────────────────────────

    /// Dead, downed, in pain shock, or not in control of itself.
    pub fn is_incapacitated(&self, agent: AgentId) -> bool {
        let i = agent.index();
        self.vitals[i] != Vitals::Healthy || self.mental[i].is_uncontrolled()
    }

    #[inline]
    pub fn is_player(&self, agent: AgentId) -> bool {
        self.faction[agent.index()].is_player()
    }

    #[inline]
    pub fn is_idle(&self, agent: AgentId) -> bool {
        self.job[agent.index()].is_none()
    }

    /// Whether the agent's body can drive at all.  Does not consider whether
    /// it is already driving something.
    pub fn drive_eligibility(&self, agent: AgentId) -> Result<(), Ineligible> {
        match self.kind[agent.index()] {
            AgentKind::Humanlike | AgentKind::Mechanoid => Ok(()),
            AgentKind::Animal { trained, body_size } => {
                if !trained {
                    Err(Ineligible::NotTrained)
                } else if body_size < MIN_DRIVER_BODY_SIZE {
                    Err(Ineligible::TooSmall)
                } else {
                    Ok(())
                }
            }
        }
    }

    // ── Placement helpers ─────────────────────────────────────────────────

    /// Put the agent at the centre of `cell`, standing still.
    pub fn teleport(&mut self, agent: AgentId, cell: Cell) {
        let i = agent.index();
        self.position[i] = cell;
        self.draw_pos[i] = cell.center();
        self.moving[i] = false;
    }

    // ── Carrying helpers ──────────────────────────────────────────────────

    pub fn worn(&self, agent: AgentId) -> Option<&CapacityContainer> {
        self.worn.get(agent.index())?.as_ref()
    }

    pub fn worn_mut(&mut self, agent: AgentId) -> Option<&mut CapacityContainer> {
        self.worn.get_mut(agent.index())?.as_mut()
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            count: 0,
            position: Vec::with_capacity(count),
            draw_pos: Vec::with_capacity(count),
            rotation: Vec::with_capacity(count),
            faction: Vec::with_capacity(count),
            kind: Vec::with_capacity(count),
            vitals: Vec::with_capacity(count),
            mental: Vec::with_capacity(count),
            starving: Vec::with_capacity(count),
            exhausted: Vec::with_capacity(count),
            job: Vec::with_capacity(count),
            moving: Vec::with_capacity(count),
            full_body_busy: Vec::with_capacity(count),
            base_speed: Vec::with_capacity(count),
            worn: Vec::with_capacity(count),
        }
    }
}
