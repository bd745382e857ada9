// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Static gas model for contract creation.

/// Base cost of any transaction.
pub const TX_BASE_GAS: u64 = 21_000;
/// Extra cost of a contract-creation transaction.
pub const TX_CREATE_GAS: u64 = 32_000;
pub const TX_DATA_ZERO_GAS: u64 = 4;
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;
/// Per 32-byte word of initcode (EIP-3860).
pub const INITCODE_WORD_GAS: u64 = 2;
/// Per byte of deployed code. Charged on the full bytecode as an upper bound on the runtime.
pub const CODE_DEPOSIT_GAS: u64 = 200;

/// Estimates the gas a keyless creation of `bytecode` needs.
pub fn estimate_creation_gas(bytecode: &[u8]) -> u64 {
    let len = bytecode.len() as u64;
    let zeros = bytecode.iter().filter(|&&b| b == 0).count() as u64;
    let calldata = zeros * TX_DATA_ZERO_GAS + (len - zeros) * TX_DATA_NON_ZERO_GAS;
    let words = len.div_ceil(32);
    TX_BASE_GAS + TX_CREATE_GAS + calldata + words * INITCODE_WORD_GAS + len * CODE_DEPOSIT_GAS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;

    #[test]
    fn empty_code_costs_overhead_only() {
        assert_eq!(estimate_creation_gas(&[]), 53_000);
    }

    #[test]
    fn charges_zero_and_non_zero_bytes() {
        // one word, one zero byte, one non-zero byte
        assert_eq!(estimate_creation_gas(&[0x00, 0x01]), 53_000 + 4 + 16 + 2 + 400);
    }

    #[test]
    fn fixture_estimates() {
        let deployer = fixtures::DEPLOYER.bytecode().unwrap();
        assert_eq!(estimate_creation_gas(&deployer), 335_720);
        let proxy = fixtures::PROXY.bytecode().unwrap();
        assert_eq!(estimate_creation_gas(&proxy), 175_196);
    }

    #[test]
    fn grows_with_length() {
        let short = estimate_creation_gas(&[1; 31]);
        let long = estimate_creation_gas(&[1; 33]);
        assert!(long > short);
    }
}
