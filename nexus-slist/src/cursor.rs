//! Cursors over a [`ForwardList`].
//!
//! A cursor is a list borrow plus a [`Position`]. [`Cursor`] borrows the list
//! shared and can only read; [`CursorMut`] borrows it exclusively and can also
//! insert and remove after its position. Both are the same [`BasicCursor`]
//! type with a different borrow, so they compare equal to each other, and to
//! a bare [`Position`], whenever they sit at the same position.
//!
//! ```
//! use nexus_slist::ForwardList;
//!
//! let mut list: ForwardList<u32> = ForwardList::from([1, 2, 4]);
//!
//! let mut cursor = list.cursor_mut();
//! cursor.move_next();
//! cursor.move_next();
//! assert_eq!(cursor.current(), Some(&2));
//!
//! cursor.insert_after(3);
//! assert_eq!(cursor.peek_next(), Some(&3));
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
//! ```

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::{
    Arena, ForwardList, InsertError, Key, Node, Position, PositionError, Storage,
    UnboundedStorage,
};

/// A position within a list, together with a borrow of that list.
///
/// `L` is `&ForwardList` for [`Cursor`] and `&mut ForwardList` for
/// [`CursorMut`].
pub struct BasicCursor<L, K: Key> {
    list: L,
    position: Position<K>,
}

/// Read-only cursor.
pub type Cursor<'a, T, K = u32, S = Arena<Node<T, K>, K>> =
    BasicCursor<&'a ForwardList<T, K, S>, K>;

/// Cursor that can modify the list after its position.
pub type CursorMut<'a, T, K = u32, S = Arena<Node<T, K>, K>> =
    BasicCursor<&'a mut ForwardList<T, K, S>, K>;

impl<L, K: Key> BasicCursor<L, K> {
    #[inline]
    pub(crate) fn new(list: L, position: Position<K>) -> Self {
        Self { list, position }
    }

    /// Returns the cursor's position.
    ///
    /// The position outlives the cursor and can be used with the list
    /// directly once the cursor is dropped.
    #[inline]
    pub fn position(&self) -> Position<K> {
        self.position
    }

    /// Returns `true` if the cursor is past the last element.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// Returns `true` if the cursor is before the first element.
    #[inline]
    pub fn is_before_begin(&self) -> bool {
        self.position.is_before_begin()
    }
}

impl<L, T, K, S> BasicCursor<L, K>
where
    L: Deref<Target = ForwardList<T, K, S>>,
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    /// Returns the element at the cursor, or `None` at before-begin or end.
    #[inline]
    pub fn current<'a>(&'a self) -> Option<&'a T>
    where
        K: 'a,
        S: 'a,
    {
        self.list.get(self.position)
    }

    /// Returns the element after the cursor without moving it.
    #[inline]
    pub fn peek_next<'a>(&'a self) -> Option<&'a T>
    where
        K: 'a,
        S: 'a,
    {
        let next = self.list.try_advance(self.position).ok()?;
        self.list.get(next)
    }

    /// Moves to the next position.
    ///
    /// At the end, the cursor stays at the end.
    #[inline]
    pub fn move_next(&mut self) {
        if let Ok(next) = self.list.try_advance(self.position) {
            self.position = next;
        }
    }

    /// Moves to the next position.
    ///
    /// # Errors
    ///
    /// [`PositionError::End`] if the cursor is already at the end. The cursor
    /// does not move.
    #[inline]
    pub fn try_move_next(&mut self) -> Result<(), PositionError> {
        self.position = self.list.try_advance(self.position)?;
        Ok(())
    }

    /// Returns the list the cursor walks.
    #[inline]
    pub fn list(&self) -> &ForwardList<T, K, S> {
        &self.list
    }
}

impl<L, T, K, S> BasicCursor<L, K>
where
    L: DerefMut<Target = ForwardList<T, K, S>>,
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    /// Returns the element at the cursor mutably.
    #[inline]
    pub fn current_mut<'a>(&'a mut self) -> Option<&'a mut T>
    where
        K: 'a,
        S: 'a,
    {
        let pos = self.position;
        self.list.get_mut(pos)
    }

    /// Inserts a value after the cursor. The cursor does not move.
    ///
    /// Returns the position of the new element.
    ///
    /// # Errors
    ///
    /// Returns the value if the cursor is at the end or storage is full.
    #[inline]
    pub fn try_insert_after(&mut self, value: T) -> Result<Position<K>, InsertError<T>> {
        let pos = self.position;
        self.list.try_insert_after(pos, value)
    }

    /// Removes and returns the element after the cursor.
    ///
    /// Returns `None` if there is nothing after the cursor.
    #[inline]
    pub fn remove_next(&mut self) -> Option<T> {
        let anchor = self.position.key();
        self.list.remove_after(anchor)
    }
}

impl<L, T, K, S> BasicCursor<L, K>
where
    L: DerefMut<Target = ForwardList<T, K, S>>,
    K: Key,
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Inserts a value after the cursor. The cursor does not move.
    ///
    /// Returns the position of the new element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn insert_after(&mut self, value: T) -> Position<K> {
        let pos = self.position;
        self.list.insert_after(pos, value)
    }
}

impl<L, M, K: Key> PartialEq<BasicCursor<M, K>> for BasicCursor<L, K> {
    #[inline]
    fn eq(&self, other: &BasicCursor<M, K>) -> bool {
        self.position == other.position
    }
}

impl<L, K: Key> Eq for BasicCursor<L, K> {}

impl<L, K: Key> PartialEq<Position<K>> for BasicCursor<L, K> {
    #[inline]
    fn eq(&self, other: &Position<K>) -> bool {
        self.position == *other
    }
}

impl<L, K: Key> PartialEq<BasicCursor<L, K>> for Position<K> {
    #[inline]
    fn eq(&self, other: &BasicCursor<L, K>) -> bool {
        *self == other.position
    }
}

impl<L, K: Key> fmt::Debug for BasicCursor<L, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BoundedForwardList, ForwardList, InsertErrorKind, PositionError};

    fn list(values: &[u32]) -> ForwardList<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn walk_from_before_begin() {
        let list = list(&[1, 2, 3]);
        let mut cursor = list.cursor();

        assert!(cursor.is_before_begin());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek_next(), Some(&1));

        cursor.move_next();
        assert_eq!(cursor.current(), Some(&1));
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&3));
        assert_eq!(cursor.peek_next(), None);

        cursor.move_next();
        assert!(cursor.is_end());
        assert_eq!(cursor, list.end());

        // Stays at the end
        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn try_move_next_at_end() {
        let list = list(&[1]);
        let mut cursor = list.cursor_at(list.begin());

        assert_eq!(cursor.try_move_next(), Ok(()));
        assert_eq!(cursor.try_move_next(), Err(PositionError::End));
        assert!(cursor.is_end());
    }

    #[test]
    fn cursors_compare_by_position() {
        let mut list = list(&[1, 2]);
        let begin = list.begin();

        let a = list.cursor_at(begin);
        let b = list.cursor_at(begin);
        let mut c = list.cursor();
        assert_eq!(a, b);
        assert_ne!(a, c);
        c.move_next();
        assert_eq!(a, c);
        assert_eq!(begin, a);

        let shared_end = list.cursor_at(list.end()).position();
        let mut_cursor = list.cursor_mut_at(begin);
        assert_eq!(mut_cursor, begin);
        assert_ne!(mut_cursor, shared_end);
    }

    #[test]
    fn mutable_and_read_only_cursors_compare() {
        let list = list(&[1, 2]);
        let mut owner = list.clone();

        let read = list.cursor_at(list.begin());
        let write = owner.cursor_mut_at(owner.begin());

        // Same key in separately built lists
        assert_eq!(read, write);
        assert_eq!(write, read);
    }

    #[test]
    fn insert_at_front_through_before_begin() {
        let mut list = list(&[2, 3]);

        let mut cursor = list.cursor_mut();
        let pos = cursor.insert_after(1);
        assert!(cursor.is_before_begin());
        assert_eq!(cursor.peek_next(), Some(&1));

        drop(cursor);
        assert_eq!(pos, list.begin());
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn insert_at_back_updates_tail() {
        let mut list = list(&[1]);

        let mut cursor = list.cursor_mut_at(list.begin());
        cursor.insert_after(2);
        cursor.move_next();
        cursor.insert_after(3);

        assert_eq!(list.back(), Some(&3));
        list.push_back(4);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    }

    #[test]
    fn remove_next() {
        let mut list = list(&[1, 2, 3]);

        let mut cursor = list.cursor_mut_at(list.begin());
        assert_eq!(cursor.remove_next(), Some(2));
        assert_eq!(cursor.remove_next(), Some(3));
        assert_eq!(cursor.remove_next(), None);
        assert_eq!(cursor.current(), Some(&1));

        assert_eq!(list.len(), 1);
        assert_eq!(list.back(), Some(&1));
    }

    #[test]
    fn remove_next_from_before_begin_empties() {
        let mut list = list(&[1, 2]);

        let mut cursor = list.cursor_mut();
        while cursor.remove_next().is_some() {}

        assert!(list.is_empty());
        assert!(list.back().is_none());
    }

    #[test]
    fn current_mut_edits_in_place() {
        let mut list = list(&[1, 2, 3]);

        let mut cursor = list.cursor_mut();
        cursor.move_next();
        while let Some(value) = cursor.current_mut() {
            *value *= 2;
            cursor.move_next();
        }

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 4, 6]);
    }

    #[test]
    fn try_insert_after_at_end() {
        let mut list = list(&[1]);

        let mut cursor = list.cursor_mut_at(list.end());
        let err = cursor.try_insert_after(9).unwrap_err();
        assert_eq!(err.kind(), InsertErrorKind::Position(PositionError::End));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn bounded_cursor_reports_full() {
        let mut list: BoundedForwardList<u32> = BoundedForwardList::with_capacity(1);

        let mut cursor = list.cursor_mut();
        cursor.try_insert_after(1).unwrap();
        let err = cursor.try_insert_after(2).unwrap_err();
        assert_eq!(err.kind(), InsertErrorKind::Full);
        assert_eq!(err.into_inner(), 2);
    }

    #[test]
    fn debug_shows_position() {
        let list = list(&[1]);
        assert_eq!(
            format!("{:?}", list.cursor()),
            "Cursor { position: BeforeBegin, .. }"
        );
    }
}
