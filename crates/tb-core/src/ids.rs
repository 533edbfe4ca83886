//! Small integer identifiers.
//!
//! Each id is a `Copy` newtype so a zone index can never be passed where an
//! activity is expected.  `MAX` of the inner type is reserved as "none".

use std::fmt;

macro_rules! small_id {
    ($(#[$attr:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            /// Reserved "no id" value.  Also the `Default`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline]
            pub fn index(self) -> usize {
                usize::from(self.0)
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($label, "#{}"), self.0)
                } else {
                    f.write_str(concat!($label, "#none"))
                }
            }
        }

        /// Fails for indices that do not fit, including the reserved one.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                let raw = <$inner>::try_from(n)?;
                if raw == <$inner>::MAX {
                    // Produce the same error type as an out-of-range index.
                    return <$inner>::try_from(usize::MAX).map($name);
                }
                Ok($name(raw))
            }
        }
    };
}

small_id! {
    /// The activity a bot is pursuing (mining, stall A, stall B).  The bot
    /// crate assigns the meaning.
    ActivityId(u16), "activity"
}

small_id! {
    /// Index of a zone in its classifier's precedence list.
    ZoneId(u16), "zone"
}
