// SPDX-License-Identifier: MPL-2.0
//! Shared shape of the clamped capacity newtypes.

/// Declares a `usize` capacity that is clamped into `min..=max` on
/// construction, along with a `*_bounds` module exposing the limits.
///
/// The default must lie within the bounds; this is checked at compile time.
macro_rules! clamped_capacity {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
        bounds $bounds:ident { min: $min:expr, max: $max:expr, default: $default:expr $(,)? }
    ) => {
        #[doc = concat!(
            "Limits accepted by [`", stringify!($name), "`](super::", stringify!($name), ")."
        )]
        pub mod $bounds {
            /// Smallest accepted value.
            pub const MIN: usize = $min;
            /// Largest accepted value.
            pub const MAX: usize = $max;
            /// Value used when nothing is configured.
            pub const DEFAULT: usize = $default;

            const _: () = assert!(MIN <= DEFAULT && DEFAULT <= MAX);
        }

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(usize);

        impl $name {
            /// Creates a capacity, clamping `value` into the accepted range.
            #[must_use]
            pub fn new(value: usize) -> Self {
                Self(value.clamp($bounds::MIN, $bounds::MAX))
            }

            #[must_use]
            pub fn value(self) -> usize {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($bounds::DEFAULT)
            }
        }
    };
}
