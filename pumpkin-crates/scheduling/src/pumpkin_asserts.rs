//! Leveled assertions; the cheap ones are always on, the expensive ones only with the
//! `debug-checks` feature.

pub const PUMPKIN_ASSERT_SIMPLE: u8 = 1;
pub const PUMPKIN_ASSERT_MODERATE: u8 = 2;
pub const PUMPKIN_ASSERT_ADVANCED: u8 = 3;
pub const PUMPKIN_ASSERT_EXTREME: u8 = 4;

#[cfg(feature = "debug-checks")]
pub const PUMPKIN_ASSERT_LEVEL_DEFINITION: u8 = PUMPKIN_ASSERT_EXTREME;
#[cfg(not(feature = "debug-checks"))]
pub const PUMPKIN_ASSERT_LEVEL_DEFINITION: u8 = PUMPKIN_ASSERT_SIMPLE;

#[macro_export]
#[doc(hidden)]
macro_rules! print_pumpkin_assert_warning_message {
    () => {
        if $crate::pumpkin_asserts::PUMPKIN_ASSERT_LEVEL_DEFINITION
            >= $crate::pumpkin_asserts::PUMPKIN_ASSERT_MODERATE
        {
            log::warn!("Potential performance degradation: the Pumpkin assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.", $crate::pumpkin_asserts::PUMPKIN_ASSERT_LEVEL_DEFINITION);
        };
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! pumpkin_assert_simple {
    ($($arg:tt)*) => {
        if $crate::pumpkin_asserts::PUMPKIN_ASSERT_LEVEL_DEFINITION >= $crate::pumpkin_asserts::PUMPKIN_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! pumpkin_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::pumpkin_asserts::PUMPKIN_ASSERT_LEVEL_DEFINITION >= $crate::pumpkin_asserts::PUMPKIN_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! pumpkin_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::pumpkin_asserts::PUMPKIN_ASSERT_LEVEL_DEFINITION >= $crate::pumpkin_asserts::PUMPKIN_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! pumpkin_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::pumpkin_asserts::PUMPKIN_ASSERT_LEVEL_DEFINITION >= $crate::pumpkin_asserts::PUMPKIN_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! pumpkin_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::pumpkin_asserts::PUMPKIN_ASSERT_LEVEL_DEFINITION >= $crate::pumpkin_asserts::PUMPKIN_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
