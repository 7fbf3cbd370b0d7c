//! Slot storage with stable keys.
//!
//! Storage provides insert/remove/get operations where keys remain valid
//! until explicitly removed. The list uses keys as links instead of pointers,
//! so every node has exactly one owner (the storage) and unlinking never
//! aliases.
//!
//! Storage is split into bounded and unbounded variants:
//!
//! ```text
//! Storage<T>               - try_insert -> Result, get, remove, clear
//!     │
//!     └── UnboundedStorage<T> - insert -> Key (infallible, aborts on OOM)
//! ```
//!
//! | Storage | Capacity | Failure modes |
//! |---------|----------|---------------|
//! | [`Arena`] | Growable | key space exhausted, allocator refusal |
//! | [`BoxedStorage`] | Fixed (runtime) | capacity reached |
//! | `slab::Slab` | Growable | none (feature `slab`) |

use core::hint::unreachable_unchecked;
use core::mem;

use crate::{InsertError, Key};

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable keys**: a key remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
/// - **Reserved keys**: [`Key::NONE`] and [`Key::SENTINEL`] are never returned
///
/// # Safety
///
/// The list reads linked nodes through [`get_unchecked`](Storage::get_unchecked)
/// and [`get_unchecked_mut`](Storage::get_unchecked_mut). Implementors must
/// guarantee:
///
/// - Every key returned by `try_insert` (or [`UnboundedStorage::insert`]) is
///   occupied until passed to `remove` or `clear` is called, and
///   `get_unchecked*` on such a key returns the inserted value.
/// - A returned key is never a reserved key and is not handed out again while
///   occupied.
/// - `get`, `get_mut` and `remove` return `None` for keys that are not
///   occupied, including reserved keys.
/// - `len` is the number of occupied keys, and `with_capacity` and
///   `empty_like` return empty storage.
///
/// A safe wrapper cannot uphold this by accident:
///
/// ```compile_fail
/// use nexus_slist::{Arena, InsertError, Storage};
///
/// struct Wrapper(Arena<u64>);
///
/// impl Storage<u64> for Wrapper {
///     type Key = u32;
///     fn with_capacity(capacity: usize) -> Self { Wrapper(Arena::with_capacity(capacity)) }
///     fn empty_like(&self) -> Self { Wrapper(self.0.empty_like()) }
///     fn try_insert(&mut self, value: u64) -> Result<u32, InsertError<u64>> {
///         self.0.try_insert(value).map(|key| key + 1)
///     }
///     fn remove(&mut self, key: u32) -> Option<u64> { self.0.remove(key) }
///     fn get(&self, key: u32) -> Option<&u64> { self.0.get(key) }
///     fn get_mut(&mut self, key: u32) -> Option<&mut u64> { self.0.get_mut(key) }
///     unsafe fn get_unchecked(&self, key: u32) -> &u64 { unsafe { self.0.get_unchecked(key) } }
///     unsafe fn get_unchecked_mut(&mut self, key: u32) -> &mut u64 {
///         unsafe { self.0.get_unchecked_mut(key) }
///     }
///     fn len(&self) -> usize { self.0.len() }
///     fn capacity(&self) -> usize { self.0.capacity() }
///     fn clear(&mut self) { self.0.clear() }
/// }
/// ```
pub unsafe trait Storage<T> {
    /// Key type for this storage.
    type Key: Key;

    /// Creates empty storage with room for at least `capacity` values.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Creates empty storage configured like this one.
    ///
    /// Fixed-capacity storage keeps its capacity; growable storage sizes
    /// itself for the current number of values.
    fn empty_like(&self) -> Self
    where
        Self: Sized;

    /// Inserts a value, returning its stable key.
    ///
    /// # Errors
    ///
    /// Returns the value inside an [`InsertError`] if no slot is available.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, InsertError<T>>;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots available without growing.
    fn capacity(&self) -> usize;

    /// Drops every stored value and makes all slots available.
    fn clear(&mut self);
}

/// Storage that grows on demand.
///
/// Insertion only fails if the allocator fails, in which case the process
/// aborts the same way `Vec::push` does. Use [`Storage::try_insert`] to get
/// an error instead.
///
/// # Safety
///
/// Keys returned by [`insert`](UnboundedStorage::insert) must satisfy the
/// same guarantees as keys returned by [`Storage::try_insert`].
pub unsafe trait UnboundedStorage<T>: Storage<T> {
    /// Inserts a value, returning its stable key.
    ///
    /// # Panics
    ///
    /// Panics if the key type has no free values left.
    fn insert(&mut self, value: T) -> Self::Key;
}

// =============================================================================
// Slots - shared by Arena and BoxedStorage
// =============================================================================

/// A storage slot: either a value or a link in the free list.
enum Slot<T, K> {
    Occupied(T),
    Vacant(K),
}

impl<T, K: Key> Slot<T, K> {
    #[inline]
    fn value(&self) -> Option<&T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    /// # Safety
    ///
    /// The slot must be occupied.
    #[inline]
    unsafe fn value_unchecked(&self) -> &T {
        match self {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => {
                debug_assert!(false, "unchecked access to a vacant slot");
                // Safety: caller guarantees the slot is occupied
                unsafe { unreachable_unchecked() }
            }
        }
    }

    /// # Safety
    ///
    /// The slot must be occupied.
    #[inline]
    unsafe fn value_unchecked_mut(&mut self) -> &mut T {
        match self {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => {
                debug_assert!(false, "unchecked access to a vacant slot");
                // Safety: caller guarantees the slot is occupied
                unsafe { unreachable_unchecked() }
            }
        }
    }
}

/// Pops the head of the free list and stores `value` there.
///
/// `free` must be the head of a free list threaded through `slots`.
#[inline]
fn fill_free<T, K: Key>(slots: &mut [Slot<T, K>], free: &mut K, value: T) -> K {
    let key = *free;
    let slot = &mut slots[key.as_usize()];
    match mem::replace(slot, Slot::Occupied(value)) {
        Slot::Vacant(next) => *free = next,
        Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
    }
    key
}

/// Vacates the slot at `key`, pushing it onto the free list.
#[inline]
fn vacate<T, K: Key>(slots: &mut [Slot<T, K>], free: &mut K, key: K) -> Option<T> {
    if !key.is_node() {
        return None;
    }
    let slot = slots.get_mut(key.as_usize())?;
    if slot.value().is_none() {
        return None;
    }
    match mem::replace(slot, Slot::Vacant(*free)) {
        Slot::Occupied(value) => {
            *free = key;
            Some(value)
        }
        Slot::Vacant(_) => None,
    }
}

#[inline]
fn lookup<T, K: Key>(slots: &[Slot<T, K>], key: K) -> Option<&T> {
    if !key.is_node() {
        return None;
    }
    slots.get(key.as_usize()).and_then(Slot::value)
}

#[inline]
fn lookup_mut<T, K: Key>(slots: &mut [Slot<T, K>], key: K) -> Option<&mut T> {
    if !key.is_node() {
        return None;
    }
    slots.get_mut(key.as_usize()).and_then(Slot::value_mut)
}

// =============================================================================
// Arena - growable, free list reuse
// =============================================================================

/// Growable slot storage with free-list reuse.
///
/// Slots live in a single `Vec`. Removed slots are threaded into a LIFO free
/// list and handed out again before the vector grows.
///
/// # Example
///
/// ```
/// use nexus_slist::{Arena, Storage, UnboundedStorage};
///
/// let mut arena: Arena<u64> = Arena::new();
///
/// let a = arena.insert(1);
/// let b = arena.try_insert(2).unwrap();
/// assert_eq!(arena.get(a), Some(&1));
///
/// arena.remove(b);
/// // Freed slot is reused
/// assert_eq!(arena.insert(3), b);
/// ```
pub struct Arena<T, K: Key = u32> {
    slots: Vec<Slot<T, K>>,
    free: K,
    len: usize,
}

impl<T, K: Key> Arena<T, K> {
    /// Creates an empty arena without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: K::NONE,
            len: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(K::max_slots())),
            free: K::NONE,
            len: 0,
        }
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots available without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Pushes a fresh slot at the end of the vector.
    ///
    /// Space must already be reserved.
    #[inline]
    fn push_slot(&mut self, value: T) -> K {
        let key = K::from_usize(self.slots.len());
        self.slots.push(Slot::Occupied(value));
        self.len += 1;
        key
    }
}

impl<T, K: Key> Default for Arena<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: slots are only vacated by `remove` and `clear`; `lookup` rejects
// reserved and vacant keys
unsafe impl<T, K: Key> Storage<T> for Arena<T, K> {
    type Key = K;

    fn with_capacity(capacity: usize) -> Self {
        Arena::with_capacity(capacity)
    }

    fn empty_like(&self) -> Self {
        Arena::with_capacity(self.len)
    }

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<K, InsertError<T>> {
        if self.free.is_some() {
            self.len += 1;
            return Ok(fill_free(&mut self.slots, &mut self.free, value));
        }

        if self.slots.len() >= K::max_slots() {
            tracing::debug!(slots = self.slots.len(), "arena key space exhausted");
            return Err(InsertError::full(value));
        }

        if self.slots.len() == self.slots.capacity() {
            tracing::trace!(capacity = self.slots.capacity(), "arena growing");
            if let Err(err) = self.slots.try_reserve(1) {
                tracing::warn!(len = self.len, error = %err, "arena allocation failed");
                return Err(InsertError::alloc_failed(value));
            }
        }

        Ok(self.push_slot(value))
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let value = vacate(&mut self.slots, &mut self.free, key)?;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        lookup(&self.slots, key)
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        lookup_mut(&mut self.slots, key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        // Safety: caller guarantees key is valid and occupied
        unsafe { self.slots.get_unchecked(key.as_usize()).value_unchecked() }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        // Safety: caller guarantees key is valid and occupied
        unsafe {
            self.slots
                .get_unchecked_mut(key.as_usize())
                .value_unchecked_mut()
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free = K::NONE;
        self.len = 0;
    }
}

// Safety: same slot discipline as `try_insert`
unsafe impl<T, K: Key> UnboundedStorage<T> for Arena<T, K> {
    #[inline]
    fn insert(&mut self, value: T) -> K {
        if self.free.is_some() {
            self.len += 1;
            return fill_free(&mut self.slots, &mut self.free, value);
        }

        assert!(
            self.slots.len() < K::max_slots(),
            "arena key space exhausted"
        );
        self.push_slot(value)
    }
}

// =============================================================================
// BoxedStorage - runtime capacity, single allocation
// =============================================================================

/// Fixed-capacity storage with runtime-determined size.
///
/// All slots are allocated up front in one boxed slice, so insertion never
/// allocates. Once every slot is occupied, [`Storage::try_insert`] reports
/// [`InsertErrorKind::Full`](crate::InsertErrorKind::Full).
///
/// # Example
///
/// ```
/// use nexus_slist::{BoxedStorage, Storage};
///
/// let mut storage: BoxedStorage<u64> = BoxedStorage::with_capacity(2);
///
/// let a = storage.try_insert(1).unwrap();
/// storage.try_insert(2).unwrap();
/// assert!(storage.try_insert(3).is_err());
///
/// storage.remove(a);
/// assert!(storage.try_insert(3).is_ok());
/// ```
pub struct BoxedStorage<T, K: Key = u32> {
    slots: Box<[Slot<T, K>]>,
    free: K,
    len: usize,
}

impl<T, K: Key> BoxedStorage<T, K> {
    /// Creates storage with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the number of keys the key type can hold.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity <= K::max_slots(),
            "capacity exceeds key type maximum"
        );

        Self {
            slots: vacant_chain(capacity),
            free: if capacity == 0 {
                K::NONE
            } else {
                K::from_usize(0)
            },
            len: 0,
        }
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if all slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }
}

/// Builds `capacity` vacant slots, each linking to the next.
fn vacant_chain<T, K: Key>(capacity: usize) -> Box<[Slot<T, K>]> {
    (0..capacity)
        .map(|i| {
            if i + 1 < capacity {
                Slot::Vacant(K::from_usize(i + 1))
            } else {
                Slot::Vacant(K::NONE)
            }
        })
        .collect()
}

// Safety: slots are only vacated by `remove` and `clear`; `lookup` rejects
// reserved and vacant keys
unsafe impl<T, K: Key> Storage<T> for BoxedStorage<T, K> {
    type Key = K;

    fn with_capacity(capacity: usize) -> Self {
        BoxedStorage::with_capacity(capacity)
    }

    fn empty_like(&self) -> Self {
        BoxedStorage::with_capacity(self.slots.len())
    }

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<K, InsertError<T>> {
        if self.free.is_none() {
            tracing::debug!(capacity = self.slots.len(), "boxed storage full");
            return Err(InsertError::full(value));
        }

        self.len += 1;
        Ok(fill_free(&mut self.slots, &mut self.free, value))
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let value = vacate(&mut self.slots, &mut self.free, key)?;
        self.len -= 1;
        Some(value)
    }

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        lookup(&self.slots, key)
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        lookup_mut(&mut self.slots, key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        // Safety: caller guarantees key is valid and occupied
        unsafe { self.slots.get_unchecked(key.as_usize()).value_unchecked() }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        // Safety: caller guarantees key is valid and occupied
        unsafe {
            self.slots
                .get_unchecked_mut(key.as_usize())
                .value_unchecked_mut()
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn clear(&mut self) {
        let capacity = self.slots.len();
        // Dropping the old slice drops every stored value
        self.slots = vacant_chain(capacity);
        self.free = if capacity == 0 {
            K::NONE
        } else {
            K::from_usize(0)
        };
        self.len = 0;
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
// Safety: slab keys are stable until removed, and `insert` debug-checks that
// no reserved key is handed out
unsafe impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    fn with_capacity(capacity: usize) -> Self {
        slab::Slab::with_capacity(capacity)
    }

    fn empty_like(&self) -> Self {
        slab::Slab::with_capacity(self.len())
    }

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, InsertError<T>> {
        Ok(UnboundedStorage::insert(self, value))
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        self.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        self.get_mut(key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: usize) -> &T {
        // Safety: caller guarantees key is valid and occupied
        unsafe { self.get_unchecked(key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut T {
        // Safety: caller guarantees key is valid and occupied
        unsafe { self.get_unchecked_mut(key) }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

#[cfg(feature = "slab")]
// Safety: see the `Storage` impl
unsafe impl<T> UnboundedStorage<T> for slab::Slab<T> {
    #[inline]
    fn insert(&mut self, value: T) -> usize {
        let key = self.insert(value);
        debug_assert!(key.is_node(), "slab handed out a reserved key");
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InsertErrorKind;

    #[test]
    fn arena_new_is_empty() {
        let arena: Arena<u64> = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.capacity(), 0);
    }

    #[test]
    fn arena_insert_get_remove() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.try_insert(42).unwrap();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(key), Some(&42));

        assert_eq!(arena.remove(key), Some(42));
        assert_eq!(arena.get(key), None);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn arena_get_mut() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.insert(10);
        *arena.get_mut(key).unwrap() = 20;

        assert_eq!(arena.get(key), Some(&20));
    }

    #[test]
    fn arena_slot_reuse_is_lifo() {
        let mut arena: Arena<u64> = Arena::new();

        let k0 = arena.insert(0);
        let k1 = arena.insert(1);
        let _k2 = arena.insert(2);

        arena.remove(k0);
        arena.remove(k1);

        assert_eq!(arena.insert(3), k1);
        assert_eq!(arena.insert(4), k0);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn arena_remove_nonexistent() {
        let mut arena: Arena<u64> = Arena::new();

        let key = arena.insert(42);
        arena.remove(key);

        // Double remove returns None and leaves the free list intact
        assert_eq!(arena.remove(key), None);
        assert_eq!(arena.insert(1), key);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn reserved_keys_are_never_present() {
        let mut arena: Arena<u64> = Arena::new();
        arena.insert(1);

        assert_eq!(arena.get(u32::NONE), None);
        assert_eq!(arena.get(u32::SENTINEL), None);
        assert_eq!(arena.remove(u32::SENTINEL), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn arena_key_space_exhaustion() {
        let mut arena: Arena<u64, u8> = Arena::new();

        for i in 0..u8::max_slots() {
            arena.try_insert(i as u64).unwrap();
        }

        let err = arena.try_insert(999).unwrap_err();
        assert_eq!(err.kind(), InsertErrorKind::Full);
        assert_eq!(err.into_inner(), 999);
        assert_eq!(arena.len(), 254);

        // Freed keys are usable again
        arena.remove(7);
        assert_eq!(arena.try_insert(1000).unwrap(), 7);
    }

    #[test]
    #[should_panic(expected = "arena key space exhausted")]
    fn arena_infallible_insert_panics_when_exhausted() {
        let mut arena: Arena<u64, u8> = Arena::new();
        for i in 0..=u8::max_slots() {
            arena.insert(i as u64);
        }
    }

    #[test]
    fn arena_clear() {
        let mut arena: Arena<String> = Arena::new();
        let a = arena.insert("a".into());
        arena.insert("b".into());

        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.insert("c".into()), 0);
    }

    #[test]
    fn boxed_new_is_empty() {
        let storage: BoxedStorage<u64> = BoxedStorage::with_capacity(16);
        assert!(storage.is_empty());
        assert!(!storage.is_full());
        assert_eq!(storage.len(), 0);
        assert_eq!(storage.capacity(), 16);
    }

    #[test]
    fn boxed_fill_to_capacity() {
        let mut storage: BoxedStorage<u64> = BoxedStorage::with_capacity(4);

        let k0 = storage.try_insert(0).unwrap();
        let k1 = storage.try_insert(1).unwrap();
        let k2 = storage.try_insert(2).unwrap();
        let k3 = storage.try_insert(3).unwrap();

        assert!(storage.is_full());

        let err = storage.try_insert(4).unwrap_err();
        assert_eq!(err.kind(), InsertErrorKind::Full);
        assert_eq!(err.into_inner(), 4);

        assert_eq!(storage.get(k0), Some(&0));
        assert_eq!(storage.get(k1), Some(&1));
        assert_eq!(storage.get(k2), Some(&2));
        assert_eq!(storage.get(k3), Some(&3));
    }

    #[test]
    fn boxed_zero_capacity_is_always_full() {
        let mut storage: BoxedStorage<u64> = BoxedStorage::with_capacity(0);
        assert!(storage.is_full());
        assert!(storage.try_insert(1).is_err());
    }

    #[test]
    #[should_panic(expected = "capacity exceeds key type maximum")]
    fn boxed_capacity_bounded_by_key() {
        let _storage: BoxedStorage<u64, u8> = BoxedStorage::with_capacity(255);
    }

    #[test]
    fn boxed_clear_resets_free_list() {
        let mut storage: BoxedStorage<u64> = BoxedStorage::with_capacity(2);
        storage.try_insert(1).unwrap();
        storage.try_insert(2).unwrap();

        storage.clear();

        assert!(storage.is_empty());
        storage.try_insert(3).unwrap();
        storage.try_insert(4).unwrap();
        assert!(storage.is_full());
    }

    #[test]
    fn empty_like_keeps_configuration() {
        let mut boxed: BoxedStorage<u64> = BoxedStorage::with_capacity(8);
        boxed.try_insert(1).unwrap();
        let fresh = boxed.empty_like();
        assert!(fresh.is_empty());
        assert_eq!(fresh.capacity(), 8);

        let mut arena: Arena<u64> = Arena::new();
        arena.insert(1);
        arena.insert(2);
        let fresh = arena.empty_like();
        assert!(fresh.is_empty());
        assert!(Storage::capacity(&fresh) >= 2);
    }

    #[test]
    fn drop_cleans_up() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct DropCounter(Rc<Cell<usize>>);
        impl Drop for DropCounter {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        {
            let mut arena: Arena<DropCounter> = Arena::new();
            arena.insert(DropCounter(drops.clone()));
            arena.insert(DropCounter(drops.clone()));

            let mut boxed: BoxedStorage<DropCounter> = BoxedStorage::with_capacity(4);
            boxed.try_insert(DropCounter(drops.clone())).unwrap();
        }
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn u16_keys() {
        let mut storage: BoxedStorage<u64, u16> = BoxedStorage::with_capacity(100);
        let key = storage.try_insert(42).unwrap();
        assert_eq!(storage.get(key), Some(&42));
    }

    /// Forwards to an arena and counts insertions.
    struct Counting {
        inner: Arena<crate::Node<u64>>,
        inserts: usize,
    }

    // Safety: every call forwards to an arena with the keys it handed out
    unsafe impl Storage<crate::Node<u64>> for Counting {
        type Key = u32;

        fn with_capacity(capacity: usize) -> Self {
            Counting {
                inner: Arena::with_capacity(capacity),
                inserts: 0,
            }
        }

        fn empty_like(&self) -> Self {
            Counting {
                inner: self.inner.empty_like(),
                inserts: 0,
            }
        }

        fn try_insert(
            &mut self,
            value: crate::Node<u64>,
        ) -> Result<u32, InsertError<crate::Node<u64>>> {
            self.inserts += 1;
            self.inner.try_insert(value)
        }

        fn remove(&mut self, key: u32) -> Option<crate::Node<u64>> {
            self.inner.remove(key)
        }

        fn get(&self, key: u32) -> Option<&crate::Node<u64>> {
            self.inner.get(key)
        }

        fn get_mut(&mut self, key: u32) -> Option<&mut crate::Node<u64>> {
            self.inner.get_mut(key)
        }

        unsafe fn get_unchecked(&self, key: u32) -> &crate::Node<u64> {
            // Safety: forwarded contract
            unsafe { self.inner.get_unchecked(key) }
        }

        unsafe fn get_unchecked_mut(&mut self, key: u32) -> &mut crate::Node<u64> {
            // Safety: forwarded contract
            unsafe { self.inner.get_unchecked_mut(key) }
        }

        fn len(&self) -> usize {
            self.inner.len()
        }

        fn capacity(&self) -> usize {
            Storage::capacity(&self.inner)
        }

        fn clear(&mut self) {
            self.inner.clear();
        }
    }

    #[test]
    fn user_storage_drives_list() {
        let mut list: crate::ForwardList<u64, u32, Counting> = crate::ForwardList::with_capacity(4);

        list.try_push_back(1).unwrap();
        list.try_push_back(2).unwrap();
        list.try_push_front(0).unwrap();
        list.try_erase_after(list.begin()).unwrap();

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 2]);
        assert_eq!(list.back(), Some(&2));
        assert_eq!(list.len(), 2);
    }

    #[cfg(feature = "slab")]
    mod slab_tests {
        use super::*;

        #[test]
        fn insert_get_remove() {
            let mut storage = slab::Slab::new();

            let key = storage.try_insert(42).unwrap();
            assert_eq!(Storage::get(&storage, key), Some(&42));

            assert_eq!(Storage::remove(&mut storage, key), Some(42));
            assert_eq!(Storage::get(&storage, key), None);
        }

        #[test]
        fn slot_reuse() {
            let mut storage = slab::Slab::new();

            let key1 = storage.try_insert(1).unwrap();
            Storage::remove(&mut storage, key1);

            let key2 = storage.try_insert(2).unwrap();
            assert_eq!(key1, key2);
        }
    }
}
