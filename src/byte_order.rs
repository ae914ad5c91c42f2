//! Big-endian integer parsing for the replay read façade.
//!
//! Wire integers arrive in network order; decoders read them through
//! [`ReplayBuf::read_u16`](crate::ReplayBuf::read_u16) and
//! [`ReplayBuf::read_u32`](crate::ReplayBuf::read_u32), which delegate here.

/// Parse a network-order `u16`.
///
/// ```
/// use replayframe::byte_order::read_network_u16;
///
/// assert_eq!(read_network_u16([0x01, 0xbb]), 443);
/// ```
#[must_use]
pub fn read_network_u16(bytes: [u8; 2]) -> u16 {
    #[expect(clippy::big_endian_bytes, reason = "wire integers are big-endian")]
    u16::from_be_bytes(bytes)
}

/// Parse a network-order `u32`.
#[must_use]
pub fn read_network_u32(bytes: [u8; 4]) -> u32 {
    #[expect(clippy::big_endian_bytes, reason = "wire integers are big-endian")]
    u32::from_be_bytes(bytes)
}
