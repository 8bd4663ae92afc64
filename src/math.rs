//! Fixed point blending arithmetic
//!
//! Color components and coverage values are both 8 bit, `0 ..= 255`, where
//! 255 stands for 1.0.

const BASE_SHIFT: i32 = 8;
const BASE_MSB: i32 = 1 << (BASE_SHIFT - 1);

/// Interpolate from `p` toward `q` by the fraction `a`
///
/// `a == 0` yields `p`, `a == 255` yields `q`.
///
///     use linemap::math::lerp_u8;
///
///     assert_eq!(lerp_u8(0, 200, 0), 0);
///     assert_eq!(lerp_u8(0, 200, 255), 200);
///     assert_eq!(lerp_u8(255, 0, 255), 0);
///
pub fn lerp_u8(p: u8, q: u8, a: u8) -> u8 {
    let v = if p > q { 1 } else { 0 };
    let (q, p, a) = (i32::from(q), i32::from(p), i32::from(a));
    let t0: i32 = (q - p) * a + BASE_MSB - v;
    let t1: i32 = ((t0 >> BASE_SHIFT) + t0) >> BASE_SHIFT;
    (p + t1) as u8
}
