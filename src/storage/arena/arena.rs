// Node arena for the skip list
//
// Arena invariants:
//
// - Every data node lives in exactly one slot and never moves while it is live.
// - Nodes refer to each other by NodeId (slot index), never by reference, so unlinking and freeing a node
//   can't leave a dangling pointer in some higher level chain. A stale id is caught by the slot being vacant.
// - Freed slots go on a free list and are handed out again before the slot vector grows.
// - The arena has a single owner (the skip list) and no interior locking, the owner's lock covers it.
//
// ┌────────┬────────┬────────┬────────┐
// │ slot 0 │ slot 1 │ slot 2 │ slot 3 │ ...
// │ Node   │ vacant │ Node   │ Node   │
// └────────┴────────┴────────┴────────┘
//               ▲
//               └── free list head

use crate::storage::arena::ArenaPolicy;
use crate::storage::skiplist::node::Node;

/// Stable handle to a node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

pub(crate) struct NodeArena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    live: usize,
    policy: ArenaPolicy,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn new(policy: ArenaPolicy) -> Self {
        Self {
            slots: Vec::with_capacity(policy.initial_capacity),
            free: Vec::new(),
            live: 0,
            policy,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.live += 1;

        if let Some(id) = self.free.pop() {
            debug_assert!(self.slots[id.0].is_none());
            self.slots[id.0] = Some(node);
            return id;
        }

        self.slots.push(Some(node));
        NodeId(self.slots.len() - 1)
    }

    // Caller must have unlinked the node from every level before releasing it
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node<K, V>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        self.live -= 1;
        Some(node)
    }

    // Live nodes are only ever reached through ids the skip list handed out, so a vacant slot here
    // means the level chains are corrupt.
    #[inline(always)]
    pub(crate) fn get(&self, id: NodeId) -> &Node<K, V> {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("skip list node {} is not live", id.0),
        }
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("skip list node {} is not live", id.0),
        }
    }

    // Drops every node at once. Only valid together with resetting the header tower.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.slots.shrink_to(self.policy.initial_capacity);
        self.free.clear();
        self.live = 0;
    }

    #[inline(always)]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    #[cfg(test)]
    pub(crate) fn slots_allocated(&self) -> usize {
        self.slots.len()
    }
}
