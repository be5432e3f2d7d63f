/// Prefix for the empty string / zero value, and the base offset for short strings.
pub const RLP_NULL: u8 = 0x80;
/// Prefix for the empty list, and the base offset for short lists.
pub const RLP_EMPTY_LIST: u8 = 0xc0;
