//! Key trait for node handles.
//!
//! Nodes are addressed by small integer keys instead of pointers. Two values
//! of every key type are reserved and never handed out by storage:
//!
//! - [`Key::NONE`] marks "no successor", which doubles as the end position.
//! - [`Key::SENTINEL`] addresses the list's before-begin anchor.

/// A copyable node handle with two reserved sentinel values.
///
/// # Example
///
/// ```
/// use nexus_slist::Key;
///
/// let key: u32 = 5;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert!(u32::SENTINEL.is_sentinel());
///
/// // Two values are reserved, so a u8 key addresses at most 254 nodes.
/// assert_eq!(u8::max_slots(), 254);
/// ```
///
/// # Custom Key Types
///
/// ```
/// use nexus_slist::Key;
///
/// #[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// struct Slot(u16);
///
/// impl Key for Slot {
///     const NONE: Self = Slot(u16::MAX);
///     const SENTINEL: Self = Slot(u16::MAX - 1);
///
///     fn as_usize(self) -> usize {
///         self.0 as usize
///     }
///
///     fn from_usize(val: usize) -> Self {
///         Slot(val as u16)
///     }
/// }
///
/// assert_eq!(Slot::max_slots(), u16::MAX as usize - 1);
/// ```
pub trait Key: Copy + Eq {
    /// No node. Terminates a chain of links and represents the end position.
    const NONE: Self;

    /// The before-begin anchor. Must differ from [`NONE`](Key::NONE) and be
    /// the smallest reserved value.
    const SENTINEL: Self;

    /// Returns the key as a `usize` slot index.
    fn as_usize(self) -> usize;

    /// Creates a key from a slot index.
    ///
    /// Callers guarantee `val < Self::max_slots()`.
    fn from_usize(val: usize) -> Self;

    /// Returns `true` if this is [`Key::NONE`].
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not [`Key::NONE`].
    ///
    /// Note that the sentinel counts as "some": it is an addressable position.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns `true` if this is [`Key::SENTINEL`].
    #[inline]
    fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    /// Returns `true` if this key can address a stored node.
    #[inline]
    fn is_node(self) -> bool {
        !self.is_none() && !self.is_sentinel()
    }

    /// Number of distinct node keys, i.e. the largest number of nodes a
    /// storage keyed by this type can hold.
    #[inline]
    fn max_slots() -> usize {
        Self::SENTINEL.as_usize()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;
                const SENTINEL: Self = <$ty>::MAX - 1;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val < Self::max_slots(), "key {val} out of range");
                    val as Self
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_key_sentinels {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty>::NONE.is_none());
                    assert!(!<$ty>::NONE.is_some());
                    assert!(!<$ty>::NONE.is_node());

                    assert!(<$ty>::SENTINEL.is_sentinel());
                    assert!(<$ty>::SENTINEL.is_some());
                    assert!(!<$ty>::SENTINEL.is_node());

                    assert!((0 as $ty).is_node());
                    assert!((<$ty>::MAX - 2).is_node());
                }
            )*
        };
    }

    test_key_sentinels!(
        u8 => u8_sentinels,
        u16 => u16_sentinels,
        u32 => u32_sentinels,
        u64 => u64_sentinels,
        usize => usize_sentinels
    );

    #[test]
    fn max_slots_excludes_reserved() {
        assert_eq!(u8::max_slots(), 254);
        assert_eq!(u16::max_slots(), u16::MAX as usize - 1);
        assert_eq!(u32::max_slots(), u32::MAX as usize - 1);
    }

    #[test]
    fn from_usize_roundtrip() {
        for i in [0usize, 1, 100, 1000, u16::MAX as usize - 2] {
            assert_eq!(u32::from_usize(i).as_usize(), i);
        }
    }
}
