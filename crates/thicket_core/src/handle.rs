//! Generational handles and the arena that hands them out
//!
//! Enemies and projectiles are owned by a [`HandleMap`] and referred to by
//! [`Handle`]s. Removing a value frees its slot and bumps the slot generation,
//! so a handle kept across a removal resolves to `None` instead of silently
//! aliasing whatever was spawned into the slot afterwards.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::error::{CoreError, Result};

/// A type-safe handle to a value of type T
#[repr(transparent)]
pub struct Handle<T> {
    /// Lower 32 bits: index, Upper 32 bits: generation
    bits: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Largest index the allocator hands out. `u32::MAX` is reserved for null.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Create a new handle from index and generation
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        debug_assert!(index <= Self::MAX_INDEX);
        Self {
            bits: (generation as u64) << 32 | index as u64,
            _marker: PhantomData,
        }
    }

    /// Create an invalid/null handle
    #[inline]
    pub const fn null() -> Self {
        Self {
            bits: u64::MAX,
            _marker: PhantomData,
        }
    }

    /// True for any handle carrying the reserved index
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.index() == u32::MAX
    }

    /// Slot index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.bits as u32
    }

    #[inline]
    pub const fn generation(&self) -> u32 {
        (self.bits >> 32) as u32
    }

    /// Raw bits, stable for the lifetime of the value (used in snapshots)
    #[inline]
    pub const fn to_bits(&self) -> u64 {
        self.bits
    }
}

// Manual trait implementations to avoid T bounds
impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = core::any::type_name::<T>().rsplit("::").next().unwrap_or("?");
        if self.is_null() {
            write!(f, "Handle<{}>(null)", name)
        } else {
            write!(f, "Handle<{}>({}v{})", name, self.index(), self.generation())
        }
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

/// Allocates handles with generation tracking
pub struct HandleAllocator<T> {
    /// Generations for each slot
    generations: Vec<u32>,
    /// Occupancy for each slot
    live: Vec<bool>,
    /// Free list of available indices
    free_list: Vec<u32>,
    /// Slots whose generation ran out
    retired: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HandleAllocator<T> {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            live: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            retired: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate a new handle
    ///
    /// # Panics
    ///
    /// Panics once more than [`Handle::MAX_INDEX`] slots are live at the same time.
    pub fn allocate(&mut self) -> Handle<T> {
        if let Some(index) = self.free_list.pop() {
            let slot = index as usize;
            self.live[slot] = true;
            Handle::new(index, self.generations[slot])
        } else {
            let index = self.generations.len() as u32;
            assert!(index <= Handle::<T>::MAX_INDEX, "handle allocator exhausted");
            self.generations.push(0);
            self.live.push(true);
            Handle::new(index, 0)
        }
    }

    /// Free a handle, making its index available for reuse.
    /// Returns false if the handle was already stale.
    pub fn free(&mut self, handle: Handle<T>) -> bool {
        if !self.is_valid(handle) {
            return false;
        }
        self.release(handle.index() as usize);
        true
    }

    pub fn is_valid(&self, handle: Handle<T>) -> bool {
        if handle.is_null() {
            return false;
        }
        let slot = handle.index() as usize;
        slot < self.generations.len() && self.live[slot] && self.generations[slot] == handle.generation()
    }

    /// Same as [`is_valid`](Self::is_valid) but says why a handle is rejected
    pub fn check(&self, handle: Handle<T>) -> Result<()> {
        if handle.is_null() {
            Err(CoreError::NullHandle)
        } else if self.is_valid(handle) {
            Ok(())
        } else {
            Err(CoreError::StaleHandle)
        }
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.generations.len() - self.free_list.len() - self.retired
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handle_at(&self, slot: usize) -> Handle<T> {
        Handle::new(slot as u32, self.generations[slot])
    }

    /// Bump the slot generation and mark it free. A slot whose generation
    /// would wrap is retired instead of going back on the free list, so no
    /// handle ever matches a later occupant of its slot.
    fn release(&mut self, slot: usize) {
        self.live[slot] = false;
        match self.generations[slot].checked_add(1) {
            Some(next) => {
                self.generations[slot] = next;
                self.free_list.push(slot as u32);
            }
            None => self.retired += 1,
        }
    }

    fn clear(&mut self) {
        for slot in 0..self.generations.len() {
            if self.live[slot] {
                self.release(slot);
            }
        }
    }
}

impl<T> Default for HandleAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An arena that stores values behind generational handles.
///
/// Iteration always walks slots in index order, so two runs that perform the
/// same inserts and removals visit values in the same order.
pub struct HandleMap<T> {
    allocator: HandleAllocator<T>,
    values: Vec<Option<T>>,
}

impl<T> HandleMap<T> {
    pub fn new() -> Self {
        Self {
            allocator: HandleAllocator::new(),
            values: Vec::new(),
        }
    }

    /// Insert a value and get a handle to it
    pub fn insert(&mut self, value: T) -> Handle<T> {
        let handle = self.allocator.allocate();
        let index = handle.index() as usize;

        if index >= self.values.len() {
            self.values.resize_with(index + 1, || None);
        }
        self.values[index] = Some(value);
        handle
    }

    /// Remove a value by its handle. O(1); other handles stay valid.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if !self.allocator.free(handle) {
            return None;
        }
        self.values[handle.index() as usize].take()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get(handle.index() as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get_mut(handle.index() as usize)?.as_mut()
    }

    /// Fallible lookup for callers outside the tick
    pub fn try_get(&self, handle: Handle<T>) -> Result<&T> {
        self.allocator.check(handle)?;
        self.get(handle).ok_or(CoreError::StaleHandle)
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.allocator.is_valid(handle)
    }

    pub fn len(&self) -> usize {
        self.allocator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocator.is_empty()
    }

    /// Snapshot of the live handles, in iteration order.
    ///
    /// Use this to drive a loop that removes values as it goes: each handle in
    /// the snapshot is visited exactly once regardless of removals.
    pub fn handles(&self) -> Vec<Handle<T>> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    /// Remove every value for which `remove` returns true and return the
    /// removed values in iteration order.
    pub fn drain_where<F>(&mut self, mut remove: F) -> Vec<(Handle<T>, T)>
    where
        F: FnMut(Handle<T>, &T) -> bool,
    {
        let doomed: Vec<Handle<T>> = self
            .iter()
            .filter(|(handle, value)| remove(*handle, *value))
            .map(|(handle, _)| handle)
            .collect();

        doomed
            .into_iter()
            .filter_map(|handle| self.remove(handle).map(|value| (handle, value)))
            .collect()
    }

    /// Drop every value and invalidate every outstanding handle
    pub fn clear(&mut self) {
        self.allocator.clear();
        for value in &mut self.values {
            *value = None;
        }
    }

    /// Iterate over all live handles and values
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        let allocator = &self.allocator;
        self.values
            .iter()
            .enumerate()
            .filter_map(move |(i, opt)| opt.as_ref().map(|v| (allocator.handle_at(i), v)))
    }

    /// Iterate over all live handles and mutable values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        let allocator = &self.allocator;
        self.values
            .iter_mut()
            .enumerate()
            .filter_map(move |(i, opt)| opt.as_mut().map(|v| (allocator.handle_at(i), v)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter().filter_map(Option::as_ref)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.values.iter_mut().filter_map(Option::as_mut)
    }
}

impl<T> Default for HandleMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for HandleMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_allocation() {
        let mut alloc: HandleAllocator<i32> = HandleAllocator::new();
        let h1 = alloc.allocate();
        let h2 = alloc.allocate();

        assert!(alloc.is_valid(h1));
        assert!(alloc.is_valid(h2));
        assert_ne!(h1, h2);

        assert!(alloc.free(h1));
        assert!(!alloc.is_valid(h1));
        assert!(!alloc.free(h1));

        let h3 = alloc.allocate();
        assert_eq!(h3.index(), h1.index());
        assert_ne!(h3.generation(), h1.generation());
    }

    #[test]
    fn test_handle_map() {
        let mut map: HandleMap<String> = HandleMap::new();
        let h1 = map.insert("hello".to_string());
        let h2 = map.insert("world".to_string());

        assert_eq!(map.get(h1), Some(&"hello".to_string()));
        assert_eq!(map.get(h2), Some(&"world".to_string()));

        map.remove(h1);
        assert_eq!(map.get(h1), None);
        assert_eq!(map.try_get(h1), Err(CoreError::StaleHandle));
        assert_eq!(map.try_get(Handle::null()), Err(CoreError::NullHandle));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_during_scan_visits_each_once() {
        let mut map: HandleMap<u32> = HandleMap::new();
        for i in 0..6 {
            map.insert(i);
        }

        let mut visited = Vec::new();
        for handle in map.handles() {
            let value = *map.get(handle).unwrap();
            visited.push(value);
            if value % 2 == 0 {
                map.remove(handle);
            }
        }

        assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_drain_where_adjacent() {
        let mut map: HandleMap<u32> = HandleMap::new();
        for i in [10, 0, 0, 7, 0] {
            map.insert(i);
        }

        let removed = map.drain_where(|_, v| *v == 0);
        assert_eq!(removed.len(), 3);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![10, 7]);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut map: HandleMap<u32> = HandleMap::new();
        let h = map.insert(1);
        map.clear();

        assert!(map.is_empty());
        assert!(map.get(h).is_none());

        let fresh = map.insert(2);
        assert_eq!(fresh.index(), h.index());
        assert_ne!(fresh, h);
    }

    #[test]
    fn test_slot_reuse_never_revives_old_handle() {
        let mut map: HandleMap<u32> = HandleMap::new();
        let first = map.insert(0);
        map.remove(first);

        for i in 1..=300 {
            let h = map.insert(i);
            assert_eq!(h.index(), first.index());
            assert!(!map.contains(first), "stale handle resolved after {} reuses", i);
            map.remove(h);
        }
        assert_eq!(map.get(first), None);
    }

    #[test]
    fn test_exhausted_slot_is_retired() {
        let mut alloc: HandleAllocator<u32> = HandleAllocator::new();
        let h = alloc.allocate();
        alloc.generations[0] = u32::MAX;
        let last = alloc.handle_at(0);

        assert!(alloc.free(last));
        assert!(!alloc.is_valid(last));
        assert!(alloc.is_empty());

        let fresh = alloc.allocate();
        assert_ne!(fresh.index(), h.index());
        assert_eq!(fresh.generation(), 0);
    }

    #[test]
    fn test_null_is_never_allocated() {
        let null: Handle<u32> = Handle::null();
        let top: Handle<u32> = Handle::new(Handle::<u32>::MAX_INDEX, u32::MAX);

        assert!(null.is_null());
        assert!(!top.is_null());
        assert_ne!(top, null);
        assert_eq!(format!("{:?}", null), "Handle<u32>(null)");

        let mut alloc: HandleAllocator<u32> = HandleAllocator::new();
        assert!(!alloc.is_valid(null));
        assert!(!alloc.allocate().is_null());
    }
}
