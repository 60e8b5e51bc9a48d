//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Node and sensor ids are 1-based
//! labels, not storage offsets; `zero_based()` converts for slice lookups
//! when a collection is known to be densely numbered from 1.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equal to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Offset into a collection densely numbered from 1, or `None`
            /// for id 0 and the sentinel.
            #[inline]
            pub fn zero_based(self) -> Option<usize> {
                if self == Self::INVALID {
                    return None;
                }
                (self.0 as usize).checked_sub(1)
            }

            /// The id whose `zero_based()` offset is `offset`.
            #[inline]
            pub fn from_offset(offset: usize) -> Self {
                Self((offset as $inner).saturating_add(1))
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a simulated sensor/relay node.  Stable for the node's
    /// lifetime; assigned 1..=N by the network initializer.
    pub struct NodeId(u32);
}

typed_id! {
    /// Identifier of a smart-home sensor.
    pub struct SensorId(u32);
}
