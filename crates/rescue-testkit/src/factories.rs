//! Factories for test values
//!
//! Seeded, collision-free addresses and signatures so tests read as data.

use rescue_core::{Address, GuardianSignature};

/// Deterministic account address from a seed byte
pub fn test_address(seed: u8) -> Address {
    Address::repeat_byte(seed)
}

/// Deterministic token contract address from a seed byte
///
/// Offset from [`test_address`] so a token never collides with an account
/// seeded the same way.
pub fn test_token(seed: u8) -> Address {
    let mut bytes = [seed; 20];
    bytes[0] = 0xf0;
    Address::from(bytes)
}

/// Guardian approval with recognizable signature bytes
pub fn guardian_signature(seed: u8) -> GuardianSignature {
    GuardianSignature::new(test_address(seed), vec![seed; 65])
}
