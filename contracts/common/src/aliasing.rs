//! L1 → L2 address aliasing.
//!
//! Some bridge families do not report the original sender of a message.
//! Instead, the message arrives from an *aliased* address derived from the
//! L1 sender by adding a fixed offset modulo 2^160. The offset is a protocol
//! constant and must match the bridge bit for bit.
//!
//! ```text
//! l2 = (l1 + 0x1111000000000000000000000000000000001111) mod 2^160
//! l1 = (l2 - 0x1111000000000000000000000000000000001111) mod 2^160
//! ```

use soroban_sdk::{BytesN, Env};

/// Width of an L1 address in bytes.
pub const L1_ADDRESS_LEN: usize = 20;

/// Offset added to an L1 address to obtain its L2 alias (big-endian).
pub const L1_TO_L2_ALIAS_OFFSET: [u8; L1_ADDRESS_LEN] = [
    0x11, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x11, 0x11,
];

/// `(a + b) mod 2^160` over big-endian byte arrays.
pub fn wrapping_add_160(
    a: &[u8; L1_ADDRESS_LEN],
    b: &[u8; L1_ADDRESS_LEN],
) -> [u8; L1_ADDRESS_LEN] {
    let mut out = [0u8; L1_ADDRESS_LEN];
    let mut carry = 0u16;
    for i in (0..L1_ADDRESS_LEN).rev() {
        let sum = a[i] as u16 + b[i] as u16 + carry;
        out[i] = (sum & 0xff) as u8;
        carry = sum >> 8;
    }
    out
}

/// `(a - b) mod 2^160` over big-endian byte arrays.
pub fn wrapping_sub_160(
    a: &[u8; L1_ADDRESS_LEN],
    b: &[u8; L1_ADDRESS_LEN],
) -> [u8; L1_ADDRESS_LEN] {
    let mut out = [0u8; L1_ADDRESS_LEN];
    let mut borrow = 0i16;
    for i in (0..L1_ADDRESS_LEN).rev() {
        let mut diff = a[i] as i16 - b[i] as i16 - borrow;
        if diff < 0 {
            diff += 0x100;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out[i] = diff as u8;
    }
    out
}

/// Alias an L1 address into the form it takes when it arrives on L2.
pub fn apply_l1_to_l2_alias(env: &Env, l1_address: &BytesN<20>) -> BytesN<20> {
    let aliased = wrapping_add_160(&l1_address.to_array(), &L1_TO_L2_ALIAS_OFFSET);
    BytesN::from_array(env, &aliased)
}

/// Recover the L1 address behind an aliased L2 address.
pub fn undo_l1_to_l2_alias(env: &Env, l2_address: &BytesN<20>) -> BytesN<20> {
    let original = wrapping_sub_160(&l2_address.to_array(), &L1_TO_L2_ALIAS_OFFSET);
    BytesN::from_array(env, &original)
}
