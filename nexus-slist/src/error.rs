//! Error types for list and storage operations.

use core::fmt;

/// Why a position could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionError {
    /// The position is the end position, which has no node and no successor.
    End,
    /// The position is before-begin, which holds no value.
    BeforeBegin,
    /// The position refers to a slot that no longer holds a node.
    Dangling,
    /// The position is valid but has no successor to remove.
    NoSuccessor,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => write!(f, "position is past the last element"),
            Self::BeforeBegin => write!(f, "before-begin position holds no value"),
            Self::Dangling => write!(f, "position refers to a removed node"),
            Self::NoSuccessor => write!(f, "position has no successor"),
        }
    }
}

impl std::error::Error for PositionError {}

/// Why an insertion was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertErrorKind {
    /// Storage is at capacity, or the key type has no free values left.
    Full,
    /// The allocator could not provide room for another node.
    AllocFailed,
    /// The anchor position is not valid for insertion.
    Position(PositionError),
}

/// Error returned when a value could not be inserted.
///
/// The list is unchanged and the value is handed back.
///
/// # Example
///
/// ```
/// use nexus_slist::{BoundedForwardList, InsertErrorKind};
///
/// let mut list: BoundedForwardList<u64> = BoundedForwardList::with_capacity(1);
/// list.try_push_back(1).unwrap();
///
/// let err = list.try_push_back(2).unwrap_err();
/// assert_eq!(err.kind(), InsertErrorKind::Full);
/// assert_eq!(err.into_inner(), 2);
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InsertError<T> {
    value: T,
    kind: InsertErrorKind,
}

impl<T> InsertError<T> {
    #[inline]
    pub(crate) fn full(value: T) -> Self {
        Self {
            value,
            kind: InsertErrorKind::Full,
        }
    }

    #[inline]
    pub(crate) fn alloc_failed(value: T) -> Self {
        Self {
            value,
            kind: InsertErrorKind::AllocFailed,
        }
    }

    #[inline]
    pub(crate) fn position(value: T, err: PositionError) -> Self {
        Self {
            value,
            kind: InsertErrorKind::Position(err),
        }
    }

    /// Returns the reason for the failure.
    #[inline]
    pub fn kind(&self) -> InsertErrorKind {
        self.kind
    }

    /// Returns the value that could not be inserted.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Maps the carried value, keeping the kind.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> InsertError<U> {
        InsertError {
            value: f(self.value),
            kind: self.kind,
        }
    }
}

// Manual impl so `T` needs no `Debug` bound for `unwrap_err` and friends.
impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            InsertErrorKind::Full => write!(f, "storage is full"),
            InsertErrorKind::AllocFailed => write!(f, "node allocation failed"),
            InsertErrorKind::Position(err) => write!(f, "invalid insert position: {err}"),
        }
    }
}

impl<T> std::error::Error for InsertError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_error_returns_value() {
        let err = InsertError::full(String::from("order"));
        assert_eq!(err.kind(), InsertErrorKind::Full);
        assert_eq!(err.into_inner(), "order");
    }

    #[test]
    fn map_keeps_kind() {
        let err = InsertError::position(7u32, PositionError::End).map(|v| v * 2);
        assert_eq!(err.kind(), InsertErrorKind::Position(PositionError::End));
        assert_eq!(err.into_inner(), 14);
    }

    #[test]
    fn display() {
        assert_eq!(InsertError::full(()).to_string(), "storage is full");
        assert_eq!(
            InsertError::alloc_failed(()).to_string(),
            "node allocation failed"
        );
        assert_eq!(
            InsertError::position((), PositionError::Dangling).to_string(),
            "invalid insert position: position refers to a removed node"
        );
    }
}
