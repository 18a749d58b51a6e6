//! # Slot Pool
//!
//! Fixed-capacity storage for short-lived entities such as emitters and
//! particles. Every slot is allocated up front and carries a liveness flag.

/// A fixed-capacity pool of `T` slots indexed by liveness flags.
///
/// Slots are created once in [`SlotPool::new`]. Inserting reuses a dead slot,
/// removing marks it dead again; neither touches the heap. This makes the pool
/// suitable for per-frame churn inside an animation loop.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It is owned by exactly one simulation.
///
/// # Example
///
/// ```rust
/// use fete_core::SlotPool;
///
/// let mut pool: SlotPool<f32> = SlotPool::new(2);
/// pool.insert(1.0).unwrap();
/// pool.insert(0.005).unwrap();
///
/// // Drop everything that faded out.
/// pool.retain_mut(|alpha| *alpha >= 0.01);
/// assert_eq!(pool.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    /// Slot storage. Dead slots keep stale values until reused.
    slots: Box<[T]>,
    /// Liveness flag per slot.
    live: Box<[bool]>,
    /// Indices of dead slots. Reserved to full capacity, never grows.
    free_list: Vec<usize>,
    /// Number of live slots.
    live_count: usize,
}

/// Handle to a live slot in a [`SlotPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    /// Index into the pool.
    index: usize,
}

impl SlotHandle {
    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T: Default> SlotPool<T> {
    /// Creates a new pool with `capacity` dead slots.
    ///
    /// All memory is allocated here; a zero capacity yields a pool that
    /// rejects every insert.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let slots: Vec<T> = (0..capacity).map(|_| T::default()).collect();
        let mut free_list = Vec::with_capacity(capacity);
        // Lowest index is handed out first.
        free_list.extend((0..capacity).rev());

        Self {
            slots: slots.into_boxed_slice(),
            live: vec![false; capacity].into_boxed_slice(),
            free_list,
            live_count: 0,
        }
    }
}

impl<T> SlotPool<T> {
    /// Returns the total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if no slot is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the number of dead slots available for insertion.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Returns true if every slot is live.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Stores `value` in a dead slot.
    ///
    /// O(1), no heap allocation. Returns `None` when the pool is full.
    pub fn insert(&mut self, value: T) -> Option<SlotHandle> {
        let index = self.free_list.pop()?;
        self.slots[index] = value;
        self.live[index] = true;
        self.live_count += 1;
        Some(SlotHandle { index })
    }

    /// Marks the slot dead and returns a reference to its last value.
    ///
    /// Returns `None` if the handle is out of range or already dead.
    pub fn remove(&mut self, handle: SlotHandle) -> Option<&T> {
        if !self.is_live(handle.index) {
            return None;
        }
        self.kill(handle.index);
        Some(&self.slots[handle.index])
    }

    /// Gets a reference to a live slot.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        if self.is_live(handle.index) {
            Some(&self.slots[handle.index])
        } else {
            None
        }
    }

    /// Gets a mutable reference to a live slot.
    #[inline]
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        if self.is_live(handle.index) {
            Some(&mut self.slots[handle.index])
        } else {
            None
        }
    }

    /// Marks every slot dead without freeing memory.
    pub fn clear(&mut self) {
        self.live.iter_mut().for_each(|flag| *flag = false);
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len()).rev());
        self.live_count = 0;
    }

    /// Visits every live slot in index order, killing those for which `keep`
    /// returns false.
    ///
    /// This is the frame-loop primitive: update and cull in one pass with no
    /// allocation.
    pub fn retain_mut<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        for index in 0..self.slots.len() {
            if self.live[index] && !keep(&mut self.slots[index]) {
                self.kill(index);
            }
        }
    }

    /// Iterates over live slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> {
        self.slots
            .iter()
            .zip(self.live.iter())
            .enumerate()
            .filter_map(|(index, (value, &live))| live.then_some((SlotHandle { index }, value)))
    }

    /// Iterates mutably over live slots in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotHandle, &mut T)> {
        self.slots
            .iter_mut()
            .zip(self.live.iter())
            .enumerate()
            .filter_map(|(index, (value, &live))| live.then_some((SlotHandle { index }, value)))
    }

    #[inline]
    fn is_live(&self, index: usize) -> bool {
        self.live.get(index).copied().unwrap_or(false)
    }

    fn kill(&mut self, index: usize) {
        self.live[index] = false;
        // Cannot reallocate: at most `capacity` indices are ever free.
        self.free_list.push(index);
        self.live_count -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_insert_remove() {
        let mut pool: SlotPool<u32> = SlotPool::new(10);

        let h1 = pool.insert(42).unwrap();
        assert_eq!(*pool.get(h1).unwrap(), 42);
        assert_eq!(pool.len(), 1);

        let removed = *pool.remove(h1).unwrap();
        assert_eq!(removed, 42);
        assert!(pool.is_empty());
        assert!(pool.get(h1).is_none());
        assert!(pool.remove(h1).is_none());
    }

    #[test]
    fn test_pool_full() {
        let mut pool: SlotPool<u8> = SlotPool::new(2);

        pool.insert(1).unwrap();
        pool.insert(2).unwrap();
        assert!(pool.is_full());
        assert!(pool.insert(3).is_none());
    }

    #[test]
    fn test_pool_zero_capacity() {
        let mut pool: SlotPool<u8> = SlotPool::new(0);
        assert!(pool.insert(1).is_none());
        assert_eq!(pool.iter().count(), 0);
    }

    #[test]
    fn test_pool_reuse_lowest_slot() {
        let mut pool: SlotPool<u32> = SlotPool::new(3);

        let h1 = pool.insert(1).unwrap();
        let _h2 = pool.insert(2).unwrap();
        assert_eq!(h1.index(), 0);
        pool.remove(h1);

        let h3 = pool.insert(3).unwrap();
        assert_eq!(h3.index(), h1.index());
        assert_eq!(*pool.get(h3).unwrap(), 3);
    }

    #[test]
    fn test_retain_mut_culls_without_growing() {
        let mut pool: SlotPool<i32> = SlotPool::new(8);
        for value in 0..8 {
            pool.insert(value).unwrap();
        }
        let reserved = pool.free_list.capacity();

        pool.retain_mut(|v| {
            *v += 100;
            *v % 2 == 0
        });

        assert_eq!(pool.len(), 4);
        assert_eq!(pool.free_count(), 4);
        assert_eq!(pool.free_list.capacity(), reserved);
        let values: Vec<i32> = pool.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![100, 102, 104, 106]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut pool: SlotPool<u8> = SlotPool::new(4);
        for value in 0..4 {
            pool.insert(value).unwrap();
        }
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.free_count(), 4);
        assert_eq!(pool.insert(9).unwrap().index(), 0);
    }
}
