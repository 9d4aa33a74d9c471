use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField, Zero};
use ark_serialize::CanonicalDeserialize;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// An element of the BN254 scalar field, the field shared with the proof
/// circuit. Commitments, nullifier hashes and tree nodes are all of this
/// type; only canonical reduced values can be constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Fr::from(value))
    }

    /// Parses 32 little-endian bytes, rejecting values >= the field modulus.
    pub fn from_le_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Fr::deserialize_compressed(&bytes[..])
            .map(Self)
            .map_err(|_| Error::InvalidEncoding)
    }

    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let mut le = *bytes;
        le.reverse();
        Self::from_le_bytes(&le)
    }

    /// Parses a big-endian hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(s).map_err(|_| Error::InvalidEncoding)?;
        if raw.len() > 32 {
            return Err(Error::InvalidEncoding);
        }
        let mut bytes = [0u8; 32];
        bytes[32 - raw.len()..].copy_from_slice(&raw);
        Self::from_be_bytes(&bytes)
    }

    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.0.into_bigint().to_bytes_le());
        bytes
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.0.into_bigint().to_bytes_be());
        bytes
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub(crate) fn fr(&self) -> Fr {
        self.0
    }

    pub(crate) fn from_fr(fr: Fr) -> Self {
        Self(fr)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self})")
    }
}

impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.to_be_bytes())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::invalid_length(bytes.len(), &"32 bytes"));
        }
        let mut be = [0u8; 32];
        be.copy_from_slice(&bytes);
        FieldElement::from_be_bytes(&be)
            .map_err(|_| serde::de::Error::custom("non-canonical field element"))
    }
}
