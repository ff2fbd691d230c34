//! Low-level helpers for packing fixed-width values into a single integer.
//!
//! Bits are addressed LSB-first: offset 0 is the least-significant bit of the
//! packed value, and the packed value is serialized least-significant byte first.

/// Widest single field, in bits. Field values are held as `u64`.
pub const MAX_FIELD_BITS: u32 = u64::BITS;

/// Widest packed record, in bits. The packed value is a `u128`.
pub const MAX_TOTAL_BITS: u32 = u128::BITS;

/// Largest value representable in `width` bits (`width` in `1..=64`).
pub fn max_value(width: u32) -> u64 {
    debug_assert!((1..=MAX_FIELD_BITS).contains(&width));
    u64::MAX >> (MAX_FIELD_BITS - width)
}

/// Number of bytes needed to hold `bits` bits.
pub fn byte_len(bits: u32) -> usize {
    bits.div_ceil(8) as usize
}

/// ORs the low `width` bits of `value` into `packed` at `offset`.
pub fn insert_bits(packed: u128, offset: u32, width: u32, value: u64) -> u128 {
    debug_assert!(offset + width <= MAX_TOTAL_BITS);
    let masked = value & max_value(width);
    packed | ((masked as u128) << offset)
}

/// Reads `width` bits of `packed` starting at `offset`.
pub fn extract_bits(packed: u128, offset: u32, width: u32) -> u64 {
    debug_assert!(offset + width <= MAX_TOTAL_BITS);
    ((packed >> offset) as u64) & max_value(width)
}

/// Encodes `packed` as exactly `len` little-endian bytes.
///
/// High-order bytes beyond `len` are dropped; callers size `len` from the
/// schema so they are always zero.
pub fn to_le_bytes(packed: u128, len: usize) -> Vec<u8> {
    debug_assert!(len <= 16);
    packed.to_le_bytes()[..len].to_vec()
}
