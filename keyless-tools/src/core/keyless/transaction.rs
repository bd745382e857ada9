// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The canonical keyless contract-creation transaction.

use alloy::{
    consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy},
    eips::eip2718::{Decodable2718, Eip2718Error, Encodable2718},
    primitives::{Address, Bytes, Signature, SignatureError, TxHash, TxKind, B256, U256},
};

use super::KeylessDeploymentParams;

/// Public signature components shared by every keyless deployment.
///
/// This is not key material. Any `(r, s)` whose `r` is a valid curve x-coordinate recovers to
/// *some* account; nobody knows that account's private key, which is the point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeylessSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

pub const KEYLESS_SIGNATURE: KeylessSignature = KeylessSignature {
    v: 27,
    r: B256::repeat_byte(0x22),
    s: B256::repeat_byte(0x22),
};

impl KeylessSignature {
    pub fn signature(&self) -> Signature {
        Signature::new(
            U256::from_be_bytes(self.r.0),
            U256::from_be_bytes(self.s.0),
            self.v == 28,
        )
    }
}

/// Legacy contract creation with nonce 0 and no chain id.
///
/// Leaving the chain id out keeps the signing hash, and therefore the recovered sender, identical
/// on every chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedDeploymentTransaction {
    tx: TxLegacy,
}

impl UnsignedDeploymentTransaction {
    pub fn new(params: &KeylessDeploymentParams) -> Self {
        Self {
            tx: TxLegacy {
                chain_id: None,
                nonce: 0,
                gas_price: params.gas_price,
                gas_limit: params.gas_limit,
                to: TxKind::Create,
                value: U256::ZERO,
                input: params.bytecode.clone(),
            },
        }
    }

    pub fn inner(&self) -> &TxLegacy {
        &self.tx
    }

    pub fn signing_hash(&self) -> B256 {
        self.tx.signature_hash()
    }

    /// Recovers the sender implied by [`KEYLESS_SIGNATURE`] over this transaction.
    pub fn keyless_account(&self) -> Result<Address, SignatureError> {
        KEYLESS_SIGNATURE
            .signature()
            .recover_address_from_prehash(&self.signing_hash())
    }

    pub fn signed(&self) -> Signed<TxLegacy> {
        self.tx.clone().into_signed(KEYLESS_SIGNATURE.signature())
    }

    /// RLP encoding of the signed transaction, ready for `eth_sendRawTransaction`.
    pub fn raw(&self) -> Bytes {
        TxEnvelope::from(self.signed()).encoded_2718().into()
    }

    pub fn tx_hash(&self) -> TxHash {
        *self.signed().hash()
    }

    /// Balance the keyless account needs before the transaction can be admitted.
    pub fn required_balance(&self) -> U256 {
        U256::from(self.tx.gas_price) * U256::from(self.tx.gas_limit)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RawTransactionError {
    #[error("failed to decode transaction: {0}")]
    Decode(#[from] Eip2718Error),
    #[error("not a legacy transaction")]
    NotLegacy,
    #[error("failed to recover sender: {0}")]
    Recovery(#[from] SignatureError),
}

/// Decodes a raw legacy transaction and recovers its sender.
pub fn recover_raw(raw: &[u8]) -> Result<(TxLegacy, Address), RawTransactionError> {
    let envelope = TxEnvelope::decode_2718(&mut &raw[..])?;
    let signed = envelope.as_legacy().ok_or(RawTransactionError::NotLegacy)?;
    let sender = signed
        .signature()
        .recover_address_from_prehash(&signed.tx().signature_hash())?;
    Ok((signed.tx().clone(), sender))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256, bytes, keccak256};

    use super::*;

    // Well-known keyless CREATE2 factory deployment.
    const FACTORY_INITCODE: Bytes = bytes!("604580600e600039806000f350fe7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe03601600081602082378035828234f58015156039578182fd5b8082525050506014600cf3");
    const FACTORY_RAW_TX: Bytes = bytes!("f8a58085174876e800830186a08080b853604580600e600039806000f350fe7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe03601600081602082378035828234f58015156039578182fd5b8082525050506014600cf31ba02222222222222222222222222222222222222222222222222222222222222222a02222222222222222222222222222222222222222222222222222222222222222");

    fn factory_tx() -> UnsignedDeploymentTransaction {
        UnsignedDeploymentTransaction::new(&KeylessDeploymentParams::new(
            FACTORY_INITCODE,
            100_000_000_000,
            100_000,
        ))
    }

    #[test]
    fn reproduces_factory_raw_transaction() {
        let tx = factory_tx();
        assert_eq!(tx.raw(), FACTORY_RAW_TX);
        assert_eq!(tx.tx_hash(), keccak256(&FACTORY_RAW_TX));
        assert_eq!(
            tx.tx_hash(),
            b256!("eddf9e61fb9d8f5111840daef55e5fde0041f5702856532cdbb5a02998033d26")
        );
        assert_eq!(
            tx.keyless_account().unwrap(),
            address!("0x3fab184622dc19b6109349b94811493bf2a45362")
        );
    }

    #[test]
    fn construction_is_byte_identical() {
        assert_eq!(factory_tx(), factory_tx());
        assert_eq!(factory_tx().raw(), factory_tx().raw());
    }

    #[test]
    fn recovers_raw_sender() {
        let (tx, sender) = recover_raw(&FACTORY_RAW_TX).unwrap();
        assert_eq!(sender, address!("0x3fab184622dc19b6109349b94811493bf2a45362"));
        assert_eq!(tx.nonce, 0);
        assert_eq!(tx.to, TxKind::Create);
        assert_eq!(tx.chain_id, None);
        assert_eq!(tx.input, FACTORY_INITCODE);
    }

    #[test]
    fn rejects_garbage_raw_transaction() {
        assert!(recover_raw(&[0xde, 0xad]).is_err());
    }

    #[test]
    fn signature_is_fixed() {
        let signature = KEYLESS_SIGNATURE.signature();
        assert!(!signature.v());
        assert_eq!(signature.r(), U256::from_be_bytes([0x22; 32]));
        assert_eq!(signature.s(), U256::from_be_bytes([0x22; 32]));
    }

    #[test]
    fn required_balance_is_price_times_limit() {
        assert_eq!(
            factory_tx().required_balance(),
            U256::from(10_000_000_000_000_000u64)
        );
    }
}
