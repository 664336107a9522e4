//! 64 to 32 bit signed normalization.
//!
//! Values coming from systems with 32-bit integer arithmetic (hashes,
//! checksums, legacy IDs) often arrive widened to 64 bits. These helpers
//! fold them back to the value the 32-bit side sees.

// Truncating casts are the whole point here.
#![allow(clippy::cast_possible_truncation)]

/// Keeps the low 32 bits of `value` and reinterprets them as a signed
/// 32-bit integer.
///
/// ```
/// use support_rs::int::to_32_bit_signed;
///
/// assert_eq!(to_32_bit_signed(0x7FFF_FFFF), i32::MAX);
/// assert_eq!(to_32_bit_signed(0x8000_0000), i32::MIN);
/// assert_eq!(to_32_bit_signed(0xFFFF_FFFF), -1);
/// assert_eq!(to_32_bit_signed((1 << 32) + 5), 5);
/// ```
pub const fn to_32_bit_signed(value: i64) -> i32 {
    value as i32
}

/// [`to_32_bit_signed`] at the platform's native integer width: a no-op
/// where `isize` is already 32 bits or narrower.
#[cfg(target_pointer_width = "64")]
pub const fn to_32_bit_signed_native(value: isize) -> isize {
    value as i32 as isize
}

/// [`to_32_bit_signed`] at the platform's native integer width: a no-op
/// where `isize` is already 32 bits or narrower.
#[cfg(not(target_pointer_width = "64"))]
pub const fn to_32_bit_signed_native(value: isize) -> isize {
    value
}
