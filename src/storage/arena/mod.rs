pub(crate) mod arena;

pub(crate) use arena::{NodeArena, NodeId};

use serde::{Deserialize, Serialize};

// Constants
// Capacities are counted in nodes, not bytes. The arena grows past them when it has to,
// they only decide how much is reserved up front.
const KB: usize = 1024;

const DEFAULT_ARENA_CAP: usize = 4 * KB;
const SMALL_ARENA_CAP: usize = 256;
const MEDIUM_ARENA_CAP: usize = 64 * KB;
const LARGE_ARENA_CAP: usize = 1024 * KB;

// Upper bound for an exact Nodes(n) reservation
pub const MAX_ARENA_CAP: usize = LARGE_ARENA_CAP;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArenaSize {
    // Exact number of node slots to reserve
    Nodes(usize),
    Small,
    #[default]
    Default,
    Medium,
    Large,
}

impl ArenaSize {
    pub fn to_policy(self) -> ArenaPolicy {
        match self {
            ArenaSize::Nodes(cap) => ArenaPolicy {
                initial_capacity: cap,
            },
            ArenaSize::Small => ArenaPolicy {
                initial_capacity: SMALL_ARENA_CAP,
            },
            ArenaSize::Default => ArenaPolicy {
                initial_capacity: DEFAULT_ARENA_CAP,
            },
            ArenaSize::Medium => ArenaPolicy {
                initial_capacity: MEDIUM_ARENA_CAP,
            },
            ArenaSize::Large => ArenaPolicy {
                initial_capacity: LARGE_ARENA_CAP,
            },
        }
    }
}

//
#[derive(Debug, Clone, Copy)]
pub struct ArenaPolicy {
    pub initial_capacity: usize,
}
