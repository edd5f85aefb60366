//! Extent helpers: power-of-two rounding and mip chain length.
//!
//! ```
//! use teximage_common::extent::{count_mipmaps, nearest_power_of_two, previous_power_of_two};
//!
//! assert_eq!(previous_power_of_two(5), 4);
//! assert_eq!(nearest_power_of_two(6), 8);
//! assert_eq!(count_mipmaps(8, 1, 1), 4);
//! ```

/// Smallest power of two that is `>= v`. `0` maps to `1`.
#[inline]
pub fn next_power_of_two(v: u32) -> u32 {
    v.next_power_of_two()
}

/// Largest power of two that is `<= v`.
///
/// `1 -> 1, 2 -> 2, 3 -> 2, 4 -> 4, 5 -> 4, ...`; `0` maps to `0`.
#[inline]
pub fn previous_power_of_two(v: u32) -> u32 {
    if v == 0 {
        return 0;
    }
    1 << (31 - v.leading_zeros())
}

/// Whichever of [`next_power_of_two`] and [`previous_power_of_two`] is closer to `v`.
/// Ties go to the next power of two.
#[inline]
pub fn nearest_power_of_two(v: u32) -> u32 {
    let np2 = next_power_of_two(v);
    let pp2 = previous_power_of_two(v);

    if np2 - v <= v - pp2 {
        np2
    } else {
        pp2
    }
}

/// Number of mip levels from `w x h x d` down to `1 x 1 x 1`, base level included.
///
/// Each step halves every dimension (rounding down, never below 1).
/// A zero extent has no levels.
pub fn count_mipmaps(w: u32, h: u32, d: u32) -> u32 {
    if w == 0 || h == 0 || d == 0 {
        return 0;
    }

    let (mut w, mut h, mut d) = (w, h, d);
    let mut mipmap = 0;

    while w != 1 || h != 1 || d != 1 {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        d = (d / 2).max(1);
        mipmap += 1;
    }

    mipmap + 1
}
