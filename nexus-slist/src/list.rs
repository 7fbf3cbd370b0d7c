//! Singly-linked list over slot storage.
//!
//! The list owns its storage. Nodes are addressed by keys, each node holds
//! the key of its successor, and the list handle holds the successor link of
//! a value-less sentinel plus a cached tail key and the length.
//!
//! ```text
//!  before_begin     begin                    tail          end
//!  [sentinel] ──▶ [3] ──▶ [14] ──▶ [15] ──▶ [92] ──▶ NONE
//! ```
//!
//! Because the sentinel is an addressable position ([`Key::SENTINEL`]),
//! inserting or erasing at the front goes through the same `*_after`
//! operations as anywhere else.
//!
//! # Positions
//!
//! A [`Position`] is a copyable, non-owning reference to a node, to the
//! sentinel, or to the end. It does not borrow the list, so it can be held
//! across mutations. Erasing a node invalidates positions referring to it:
//! checked accessors report them as [`PositionError::Dangling`] until the
//! slot is reused.
//!
//! # Checked and unchecked operations
//!
//! Operations with a precondition come in two flavours:
//!
//! | Panics on violation | Returns an error |
//! |---------------------|------------------|
//! | [`advance`](ForwardList::advance) | [`try_advance`](ForwardList::try_advance) |
//! | `list[pos]` | [`try_get`](ForwardList::try_get) / [`get`](ForwardList::get) |
//! | [`insert_after`](ForwardList::insert_after) | [`try_insert_after`](ForwardList::try_insert_after) |
//! | [`erase_after`](ForwardList::erase_after) | [`try_erase_after`](ForwardList::try_erase_after) |
//!
//! # Example
//!
//! ```
//! use nexus_slist::ForwardList;
//!
//! let mut list: ForwardList<u64> = ForwardList::from([3, 14, 15, 92, 6]);
//!
//! list.pop_front();
//! assert_eq!(list, ForwardList::<u64>::from([14, 15, 92, 6]));
//!
//! // Insert at the front through the before-begin position
//! let pos = list.insert_after(list.before_begin(), 1);
//! assert_eq!(pos, list.begin());
//!
//! // Erase the element after the first one
//! let next = list.erase_after(list.begin());
//! assert_eq!(list[next], 15);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 15, 92, 6]);
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ops;

use crate::cursor::{BasicCursor, Cursor, CursorMut};
use crate::{Arena, BoxedStorage, InsertError, Key, PositionError, Storage, UnboundedStorage};

/// List backed by fixed-capacity [`BoxedStorage`].
pub type BoundedForwardList<T, K = u32> = ForwardList<T, K, BoxedStorage<Node<T, K>, K>>;

/// List backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabForwardList<T> = ForwardList<T, usize, slab::Slab<Node<T, usize>>>;

/// A node in the list.
///
/// Wraps a value with the key of its successor. Users interact with `&T` and
/// `&mut T`; the node is only visible as the element type of the storage.
pub struct Node<T, K: Key = u32> {
    value: T,
    next: K,
}

impl<T, K: Key> Node<T, K> {
    /// Creates a node with no successor.
    #[inline]
    fn new(value: T) -> Self {
        Self {
            value,
            next: K::NONE,
        }
    }

    #[inline]
    fn into_value(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug, K: Key> fmt::Debug for Node<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("next", &Position::new(self.next))
            .finish()
    }
}

// =============================================================================
// Position
// =============================================================================

/// A position in a list: a node, the before-begin sentinel, or the end.
///
/// Positions are plain keys. Two positions are equal iff they refer to the
/// same node; all end positions are equal, as are all before-begin positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position<K: Key = u32> {
    key: K,
}

impl<K: Key> Position<K> {
    #[inline]
    pub(crate) fn new(key: K) -> Self {
        Self { key }
    }

    #[inline]
    pub(crate) fn key(self) -> K {
        self.key
    }

    /// Returns `true` if this is the position past the last element.
    #[inline]
    pub fn is_end(self) -> bool {
        self.key.is_none()
    }

    /// Returns `true` if this is the position before the first element.
    #[inline]
    pub fn is_before_begin(self) -> bool {
        self.key.is_sentinel()
    }
}

impl<K: Key> fmt::Debug for Position<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            f.write_str("End")
        } else if self.is_before_begin() {
            f.write_str("BeforeBegin")
        } else {
            f.debug_tuple("Position").field(&self.key.as_usize()).finish()
        }
    }
}

// =============================================================================
// ForwardList
// =============================================================================

/// A singly-linked list that owns its node storage.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `K`: Key type (default `u32`), bounds the number of nodes
/// - `S`: Storage type (default [`Arena`], growable)
///
/// # Invariants
///
/// - `len` equals the number of nodes reachable from the sentinel, which
///   equals the number of occupied storage slots.
/// - `tail` is `NONE` iff the list is empty, otherwise it is the node whose
///   successor is `NONE`.
///
/// # Example
///
/// ```
/// use nexus_slist::ForwardList;
///
/// let mut list: ForwardList<&str> = ForwardList::new();
/// list.push_back("b");
/// list.push_front("a");
/// list.push_back("c");
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.front(), Some(&"a"));
/// assert_eq!(list.back(), Some(&"c"));
/// ```
pub struct ForwardList<T, K: Key = u32, S = Arena<Node<T, K>, K>>
where
    S: Storage<Node<T, K>, Key = K>,
{
    storage: S,
    /// Successor link of the before-begin sentinel.
    head: K,
    tail: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, K: Key, S> Default for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::with_storage(S::default())
    }
}

impl<T, K: Key, S> ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::default()
    }

    /// Creates an empty list whose storage has room for `capacity` nodes.
    ///
    /// For fixed-capacity storage this is a hard limit.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(S::with_capacity(capacity))
    }

    /// Creates an empty list over the given storage.
    ///
    /// # Panics
    ///
    /// Panics if `storage` is not empty.
    #[inline]
    pub fn with_storage(storage: S) -> Self {
        assert!(storage.is_empty(), "list storage must start empty");
        Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Builds a list from an iterator by repeated back insertion into
    /// `storage`.
    ///
    /// # Errors
    ///
    /// If storage rejects an element, the partially built list is dropped
    /// and the rejected element is returned.
    pub fn from_iter_in<I>(storage: S, iter: I) -> Result<Self, InsertError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::with_storage(storage);
        for value in iter {
            list.try_push_back(value)?;
        }
        Ok(list)
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes the storage can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Exchanges the contents of two lists in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    // ========================================================================
    // Positions
    // ========================================================================

    /// Returns the position before the first element.
    ///
    /// It cannot be dereferenced; it anchors insertion and removal at the
    /// front.
    #[inline]
    pub fn before_begin(&self) -> Position<K> {
        Position::new(K::SENTINEL)
    }

    /// Returns the position of the first element, or [`end`](Self::end) if
    /// the list is empty.
    #[inline]
    pub fn begin(&self) -> Position<K> {
        Position::new(self.head)
    }

    /// Returns the position past the last element.
    #[inline]
    pub fn end(&self) -> Position<K> {
        Position::new(K::NONE)
    }

    /// Returns the position following `pos`.
    ///
    /// # Errors
    ///
    /// [`PositionError::End`] if `pos` is the end, [`PositionError::Dangling`]
    /// if its node was removed.
    #[inline]
    pub fn try_advance(&self, pos: Position<K>) -> Result<Position<K>, PositionError> {
        self.successor(pos.key).map(Position::new)
    }

    /// Returns the position following `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end or refers to a removed node.
    #[inline]
    pub fn advance(&self, pos: Position<K>) -> Position<K> {
        match self.try_advance(pos) {
            Ok(next) => next,
            Err(err) => panic!("cannot advance position: {err}"),
        }
    }

    /// Returns an iterator over the positions of all elements, front to back.
    #[inline]
    pub fn positions(&self) -> Positions<'_, T, K, S> {
        Positions {
            storage: &self.storage,
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the element at `pos`, or `None` if `pos` holds no element.
    #[inline]
    pub fn get(&self, pos: Position<K>) -> Option<&T> {
        self.storage.get(pos.key).map(|node| &node.value)
    }

    /// Returns the element at `pos` mutably, or `None` if `pos` holds no
    /// element.
    #[inline]
    pub fn get_mut(&mut self, pos: Position<K>) -> Option<&mut T> {
        self.storage.get_mut(pos.key).map(|node| &mut node.value)
    }

    /// Returns the element at `pos`.
    ///
    /// # Errors
    ///
    /// Reports why `pos` cannot be dereferenced.
    #[inline]
    pub fn try_get(&self, pos: Position<K>) -> Result<&T, PositionError> {
        self.storage
            .get(pos.key)
            .map(|node| &node.value)
            .ok_or_else(|| deref_error(pos.key))
    }

    /// Returns the element at `pos` mutably.
    ///
    /// # Errors
    ///
    /// Reports why `pos` cannot be dereferenced.
    #[inline]
    pub fn try_get_mut(&mut self, pos: Position<K>) -> Result<&mut T, PositionError> {
        self.storage
            .get_mut(pos.key)
            .map(|node| &mut node.value)
            .ok_or_else(|| deref_error(pos.key))
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.head.is_none() {
            None
        } else {
            // Safety: head is occupied when is_some()
            Some(unsafe { &self.storage.get_unchecked(self.head).value })
        }
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.head.is_none() {
            None
        } else {
            // Safety: head is occupied when is_some()
            Some(unsafe { &mut self.storage.get_unchecked_mut(self.head).value })
        }
    }

    /// Returns a reference to the last element in O(1).
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.tail.is_none() {
            None
        } else {
            // Safety: tail is occupied when is_some()
            Some(unsafe { &self.storage.get_unchecked(self.tail).value })
        }
    }

    /// Returns a mutable reference to the last element in O(1).
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.tail.is_none() {
            None
        } else {
            // Safety: tail is occupied when is_some()
            Some(unsafe { &mut self.storage.get_unchecked_mut(self.tail).value })
        }
    }

    // ========================================================================
    // Fallible insertion
    // ========================================================================

    /// Pushes a value to the front of the list.
    ///
    /// Returns the position of the new element.
    ///
    /// # Errors
    ///
    /// Returns the value if storage has no room. The list is unchanged.
    #[inline]
    pub fn try_push_front(&mut self, value: T) -> Result<Position<K>, InsertError<T>> {
        let key = self.store(value)?;
        // Safety: the sentinel is always a valid anchor, key is fresh
        unsafe { self.link_after(K::SENTINEL, self.head, key) };
        Ok(Position::new(key))
    }

    /// Pushes a value to the back of the list in O(1).
    ///
    /// Returns the position of the new element.
    ///
    /// # Errors
    ///
    /// Returns the value if storage has no room. The list is unchanged.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<Position<K>, InsertError<T>> {
        let key = self.store(value)?;
        let anchor = self.back_anchor();
        // Safety: back_anchor is the tail or the sentinel, key is fresh
        unsafe { self.link_after(anchor, K::NONE, key) };
        Ok(Position::new(key))
    }

    /// Inserts a value immediately after `pos`.
    ///
    /// `pos` may be [`before_begin`](Self::before_begin) but not the end.
    /// Returns the position of the new element.
    ///
    /// # Errors
    ///
    /// Returns the value if `pos` is not a valid anchor or storage has no
    /// room. The list is unchanged in both cases.
    #[inline]
    pub fn try_insert_after(
        &mut self,
        pos: Position<K>,
        value: T,
    ) -> Result<Position<K>, InsertError<T>> {
        let next = match self.successor(pos.key) {
            Ok(next) => next,
            Err(err) => return Err(InsertError::position(value, err)),
        };
        let key = self.store(value)?;
        // Safety: successor() validated the anchor, key is fresh
        unsafe { self.link_after(pos.key, next, key) };
        Ok(Position::new(key))
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the first element, or `None` if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove_after(K::SENTINEL)
    }

    /// Removes the element after `pos`.
    ///
    /// Returns the position that now follows `pos`, which is the end if the
    /// removed element was the last one.
    ///
    /// # Errors
    ///
    /// Reports why `pos` has no removable successor. The list is unchanged.
    #[inline]
    pub fn try_erase_after(&mut self, pos: Position<K>) -> Result<Position<K>, PositionError> {
        let key = self.unlink_after(pos.key)?;
        let next = self.storage.remove(key).map_or(K::NONE, |node| node.next);
        Ok(Position::new(next))
    }

    /// Removes the element after `pos`.
    ///
    /// Returns the position that now follows `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end, refers to a removed node, or has no
    /// successor.
    #[inline]
    pub fn erase_after(&mut self, pos: Position<K>) -> Position<K> {
        match self.try_erase_after(pos) {
            Ok(next) => next,
            Err(err) => panic!("cannot erase after position: {err}"),
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    // ========================================================================
    // Copy and assignment
    // ========================================================================

    /// Clones the list, reporting storage failure instead of panicking.
    ///
    /// The copy is built in fresh storage configured like this list's.
    ///
    /// # Errors
    ///
    /// Returns the element that could not be stored. `self` is unaffected.
    pub fn try_clone(&self) -> Result<Self, InsertError<T>>
    where
        T: Clone,
    {
        Self::from_iter_in(self.storage.empty_like(), self.iter().cloned())
    }

    /// Replaces the contents of the list with the elements of `iter`.
    ///
    /// The replacement is built completely before the current contents are
    /// released, so on failure (an error here, or a panic inside `iter`) the
    /// list keeps its previous contents.
    ///
    /// # Errors
    ///
    /// Returns the element that could not be stored.
    pub fn assign<I>(&mut self, iter: I) -> Result<(), InsertError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let replacement = Self::from_iter_in(self.storage.empty_like(), iter)?;
        *self = replacement;
        Ok(())
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, K, S> {
        Iter {
            storage: &self.storage,
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, K, S> {
        IterMut {
            next: self.head,
            remaining: self.len,
            storage: &mut self.storage,
            _marker: PhantomData,
        }
    }

    /// Returns a read-only cursor at the before-begin position.
    #[inline]
    pub fn cursor(&self) -> Cursor<'_, T, K, S> {
        BasicCursor::new(self, Position::new(K::SENTINEL))
    }

    /// Returns a read-only cursor at `pos`.
    #[inline]
    pub fn cursor_at(&self, pos: Position<K>) -> Cursor<'_, T, K, S> {
        BasicCursor::new(self, pos)
    }

    /// Returns a mutable cursor at the before-begin position.
    ///
    /// Starting before the first element lets the cursor insert and remove
    /// at the front.
    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, K, S> {
        BasicCursor::new(self, Position::new(K::SENTINEL))
    }

    /// Returns a mutable cursor at `pos`.
    #[inline]
    pub fn cursor_mut_at(&mut self, pos: Position<K>) -> CursorMut<'_, T, K, S> {
        BasicCursor::new(self, pos)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Successor link of `anchor`, which may be the sentinel.
    #[inline]
    fn successor(&self, anchor: K) -> Result<K, PositionError> {
        if anchor.is_sentinel() {
            Ok(self.head)
        } else if anchor.is_none() {
            Err(PositionError::End)
        } else {
            self.storage
                .get(anchor)
                .map(|node| node.next)
                .ok_or(PositionError::Dangling)
        }
    }

    /// Anchor for back insertion: the tail, or the sentinel when empty.
    #[inline]
    fn back_anchor(&self) -> K {
        if self.tail.is_none() {
            K::SENTINEL
        } else {
            self.tail
        }
    }

    /// Puts `value` into an unlinked node.
    #[inline]
    fn store(&mut self, value: T) -> Result<K, InsertError<T>> {
        self.storage
            .try_insert(Node::new(value))
            .map_err(|err| err.map(Node::into_value))
    }

    /// Rewrites the successor link of `anchor`.
    ///
    /// # Safety
    ///
    /// `anchor` must be the sentinel or an occupied key.
    #[inline]
    unsafe fn set_successor(&mut self, anchor: K, next: K) {
        if anchor.is_sentinel() {
            self.head = next;
        } else {
            // Safety: caller guarantees anchor is occupied
            unsafe { self.storage.get_unchecked_mut(anchor) }.next = next;
        }
    }

    /// Links the stored node `key` between `anchor` and its successor `next`.
    ///
    /// # Safety
    ///
    /// `anchor` must be the sentinel or a linked node whose successor is
    /// `next`. `key` must be occupied and unlinked.
    #[inline]
    unsafe fn link_after(&mut self, anchor: K, next: K, key: K) {
        // Safety: caller guarantees key is occupied
        unsafe { self.storage.get_unchecked_mut(key) }.next = next;
        // Safety: caller guarantees anchor is valid
        unsafe { self.set_successor(anchor, key) };

        if next.is_none() {
            self.tail = key;
        }
        self.len += 1;
    }

    /// Unlinks the node after `anchor` without freeing its slot.
    ///
    /// Returns the unlinked key.
    fn unlink_after(&mut self, anchor: K) -> Result<K, PositionError> {
        let key = self.successor(anchor)?;
        if key.is_none() {
            return Err(PositionError::NoSuccessor);
        }

        // Safety: key came from a link, linked keys are occupied
        let next = unsafe { self.storage.get_unchecked(key) }.next;
        // Safety: successor() validated the anchor
        unsafe { self.set_successor(anchor, next) };

        if next.is_none() {
            self.tail = if anchor.is_sentinel() { K::NONE } else { anchor };
        }
        self.len -= 1;
        Ok(key)
    }

    /// Removes and returns the element after `anchor`, if any.
    #[inline]
    pub(crate) fn remove_after(&mut self, anchor: K) -> Option<T> {
        let key = self.unlink_after(anchor).ok()?;
        self.storage.remove(key).map(Node::into_value)
    }
}

// =============================================================================
// Unbounded storage impl - infallible insertion
// =============================================================================

impl<T, K: Key, S> ForwardList<T, K, S>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Pushes a value to the front of the list.
    ///
    /// Returns the position of the new element.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Position<K> {
        let key = self.storage.insert(Node::new(value));
        // Safety: the sentinel is always a valid anchor, key is fresh
        unsafe { self.link_after(K::SENTINEL, self.head, key) };
        Position::new(key)
    }

    /// Pushes a value to the back of the list in O(1).
    ///
    /// Returns the position of the new element.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Position<K> {
        let key = self.storage.insert(Node::new(value));
        let anchor = self.back_anchor();
        // Safety: back_anchor is the tail or the sentinel, key is fresh
        unsafe { self.link_after(anchor, K::NONE, key) };
        Position::new(key)
    }

    /// Inserts a value immediately after `pos`.
    ///
    /// Returns the position of the new element.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end or refers to a removed node.
    #[inline]
    pub fn insert_after(&mut self, pos: Position<K>, value: T) -> Position<K> {
        let next = match self.successor(pos.key) {
            Ok(next) => next,
            Err(err) => panic!("cannot insert after position: {err}"),
        };
        let key = self.storage.insert(Node::new(value));
        // Safety: successor() validated the anchor, key is fresh
        unsafe { self.link_after(pos.key, next, key) };
        Position::new(key)
    }
}

/// Why `key` cannot be dereferenced, given that storage holds nothing there.
#[inline]
fn deref_error<K: Key>(key: K) -> PositionError {
    if key.is_none() {
        PositionError::End
    } else if key.is_sentinel() {
        PositionError::BeforeBegin
    } else {
        PositionError::Dangling
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T, K: Key, S> ops::Index<Position<K>> for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Output = T;

    /// # Panics
    ///
    /// Panics if `pos` is before-begin, the end, or refers to a removed node.
    #[inline]
    fn index(&self, pos: Position<K>) -> &T {
        match self.try_get(pos) {
            Ok(value) => value,
            Err(err) => panic!("cannot dereference position: {err}"),
        }
    }
}

impl<T, K: Key, S> ops::IndexMut<Position<K>> for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn index_mut(&mut self, pos: Position<K>) -> &mut T {
        match self.try_get_mut(pos) {
            Ok(value) => value,
            Err(err) => panic!("cannot dereference position: {err}"),
        }
    }
}

/// Deep copy. The copy is built completely before it is returned, so a panic
/// while cloning an element leaves no partial list behind; `clone_from`
/// therefore either replaces the receiver entirely or leaves it untouched.
///
/// # Panics
///
/// Panics if storage cannot hold the copy. Use
/// [`try_clone`](ForwardList::try_clone) to get an error instead.
impl<T: Clone, K: Key, S> Clone for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(list) => list,
            Err(err) => panic!("failed to clone list: {err}"),
        }
    }
}

impl<T: fmt::Debug, K: Key, S> fmt::Debug for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, K: Key, S> FromIterator<T> for ForwardList<T, K, S>
where
    S: UnboundedStorage<Node<T, K>, Key = K> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, K: Key, S, const N: usize> From<[T; N]> for ForwardList<T, K, S>
where
    S: UnboundedStorage<Node<T, K>, Key = K> + Default,
{
    fn from(values: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.extend(values);
        list
    }
}

impl<T, K: Key, S> Extend<T> for ForwardList<T, K, S>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, K: Key, S> Extend<&'a T> for ForwardList<T, K, S>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, K: Key, S> IntoIterator for ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;
    type IntoIter = IntoIter<T, K, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T, K: Key, S> IntoIterator for &'a ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, K, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, K: Key, S> IntoIterator for &'a mut ForwardList<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, K, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T, K: Key, S> {
    storage: &'a S,
    next: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<T, K: Key, S> Clone for Iter<'_, T, K, S> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T: 'a, K: Key + 'a, S> Iterator for Iter<'a, T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: `remaining` linked nodes follow `next` (list invariant)
        let node = unsafe { self.storage.get_unchecked(self.next) };
        self.next = node.next;
        self.remaining -= 1;

        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, K: Key + 'a, S> ExactSizeIterator for Iter<'a, T, K, S> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<'a, T: 'a, K: Key + 'a, S> FusedIterator for Iter<'a, T, K, S> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T, K: Key, S> {
    storage: &'a mut S,
    next: K,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a, K: Key + 'a, S> Iterator for IterMut<'a, T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: `remaining` linked nodes follow `next` (list invariant)
        let node = unsafe { self.storage.get_unchecked_mut(self.next) };
        self.next = node.next;
        self.remaining -= 1;

        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *((&mut node.value) as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, K: Key + 'a, S> ExactSizeIterator for IterMut<'a, T, K, S> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<'a, T: 'a, K: Key + 'a, S> FusedIterator for IterMut<'a, T, K, S> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Iterator over the positions of list elements.
pub struct Positions<'a, T, K: Key, S> {
    storage: &'a S,
    next: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<T, K: Key, S> Iterator for Positions<'_, T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = Position<K>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let key = self.next;
        // Safety: `remaining` linked nodes follow `next` (list invariant)
        self.next = unsafe { self.storage.get_unchecked(key) }.next;
        self.remaining -= 1;

        Some(Position::new(key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, K: Key, S> ExactSizeIterator for Positions<'_, T, K, S> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<T, K: Key, S> FusedIterator for Positions<'_, T, K, S> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Owning iterator that pops elements from the front.
pub struct IntoIter<T, K: Key, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: ForwardList<T, K, S>,
}

impl<T, K: Key, S> Iterator for IntoIter<T, K, S>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, K: Key, S> ExactSizeIterator for IntoIter<T, K, S> where S: Storage<Node<T, K>, Key = K> {}

impl<T, K: Key, S> FusedIterator for IntoIter<T, K, S> where S: Storage<Node<T, K>, Key = K> {}
