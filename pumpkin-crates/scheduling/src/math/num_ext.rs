//! Extensions for numbers that are not present in the stable standard library.

pub(crate) trait NumExt {
    /// Division with rounding up.
    fn div_ceil(self, other: Self) -> Self;
}

impl NumExt for i64 {
    fn div_ceil(self, other: Self) -> Self {
        // The source is taken from the standard library nightly implementation of this function.
        // Tracking issue: https://github.com/rust-lang/rust/issues/88581
        let d = self / other;
        let r = self % other;
        if (r > 0 && other > 0) || (r < 0 && other < 0) {
            d + 1
        } else {
            d
        }
    }
}
