#[inline(always)]
pub const fn mask_u64(size: u64) -> u64 {
    let mask = if size == 0 { 0 } else { !0u64 };
    mask.wrapping_shr(u64::BITS - size as u32)
}

/// Number of bits needed to represent `x` (at least 1).
#[inline(always)]
pub const fn bit_width(x: u64) -> u32 {
    u64::BITS - (x | 1).leading_zeros()
}

/// Smallest `i` such that `2^i >= x`.
#[inline(always)]
pub const fn ceil_log2(x: u64) -> u32 {
    if x <= 1 {
        0
    } else {
        bit_width(x - 1)
    }
}
