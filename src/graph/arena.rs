//! `NodeArena`: a generational slot arena holding a graph's nodes.
//!
//! Implementation details:
//! - Slots are either occupied (holding a node) or vacant (linking the free list).
//! - Every slot carries a generation. Removing a node bumps the generation, so a
//!   handle issued before the removal no longer resolves even after the slot is reused.
//! - Freed slots are reused LIFO through `free_head`.

use core::mem;

enum Slot<N> {
    Occupied { generation: u32, value: N },
    Vacant { generation: u32, next_free: Option<u32> },
}

impl<N> Slot<N> {
    #[inline(always)]
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation, .. } => *generation,
        }
    }
}

/// Generational storage for graph nodes.
pub(crate) struct NodeArena<N> {
    slots: Vec<Slot<N>>,
    free_head: Option<u32>,
    len: usize,
}

impl<N> NodeArena<N> {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of slots ever allocated (occupied or vacant). Dense per-slot side
    /// tables are sized with this.
    #[inline(always)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Stores `value`, returning its `(index, generation)`.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX` slots.
    pub(crate) fn insert(&mut self, value: N) -> (u32, u32) {
        self.len += 1;

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            let (generation, next_free) = match slot {
                Slot::Vacant {
                    generation,
                    next_free,
                } => (*generation, *next_free),
                Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
            };
            self.free_head = next_free;
            *slot = Slot::Occupied { generation, value };
            (index, generation)
        } else {
            let index = u32::try_from(self.slots.len()).expect("node arena exceeded u32::MAX slots");
            self.slots.push(Slot::Occupied {
                generation: 0,
                value,
            });
            (index, 0)
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: usize, generation: u32) -> Option<&N> {
        match self.slots.get(index)? {
            Slot::Occupied {
                generation: g,
                value,
            } if *g == generation => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize, generation: u32) -> Option<&mut N> {
        match self.slots.get_mut(index)? {
            Slot::Occupied {
                generation: g,
                value,
            } if *g == generation => Some(value),
            _ => None,
        }
    }

    /// Vacates the slot if it still holds `generation`, returning the value.
    pub(crate) fn remove(&mut self, index: usize, generation: u32) -> Option<N> {
        let slot = self.slots.get_mut(index)?;
        if !matches!(slot, Slot::Occupied { generation: g, .. } if *g == generation) {
            return None;
        }

        let vacant = Slot::Vacant {
            generation: slot.generation().wrapping_add(1),
            next_free: self.free_head,
        };
        let Slot::Occupied { value, .. } = mem::replace(slot, vacant) else {
            return None;
        };

        // `index` fits in u32: it was handed out by `insert`.
        self.free_head = Some(index as u32);
        self.len -= 1;
        Some(value)
    }

    /// Iterates occupied slots as `(index, generation, value)`.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, u32, &N)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Slot::Occupied { generation, value } => Some((i as u32, *generation, value)),
            Slot::Vacant { .. } => None,
        })
    }

    /// Vacates every occupied slot, bumping generations so outstanding handles
    /// go stale.
    pub(crate) fn clear(&mut self) {
        for index in 0..self.slots.len() {
            let generation = self.slots[index].generation();
            if let Slot::Occupied { .. } = self.slots[index] {
                self.slots[index] = Slot::Vacant {
                    generation: generation.wrapping_add(1),
                    next_free: self.free_head,
                };
                self.free_head = Some(index as u32);
            }
        }
        self.len = 0;
    }
}
