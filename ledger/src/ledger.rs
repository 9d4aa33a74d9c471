//! Keyed collection of independent vaults.
//!
//! Each vault sits behind its own mutex and every operation holds that lock
//! for its full duration, so per-vault histories are sequential while
//! different assets make progress concurrently. Nothing here blocks on I/O.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

use pool::{FieldElement, MerklePath};

use crate::error::{Error, Result};
use crate::event::{DepositEvent, WithdrawEvent};
use crate::vault::Vault;
use crate::verifier::{ProofVerifier, WithdrawRequest};

/// Opaque identifier of a logical asset pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 32]);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for AssetId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

pub struct PoolLedger<V> {
    verifier: V,
    vaults: RwLock<HashMap<AssetId, Arc<Mutex<Vault>>>>,
}

impl<V: ProofVerifier> PoolLedger<V> {
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            vaults: RwLock::new(HashMap::new()),
        }
    }

    pub fn create_vault(&self, asset: AssetId, depth: usize, window: usize) -> Result<()> {
        // build outside the map lock; construction precomputes the tree
        let vault = Vault::new(depth, window)?;

        let mut vaults = self.vaults.write().expect("vault map lock poisoned");
        match vaults.entry(asset) {
            Entry::Occupied(_) => Err(Error::VaultAlreadyExists),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(vault)));
                info!(%asset, depth, window, "vault created");
                Ok(())
            }
        }
    }

    pub fn deposit(&self, asset: AssetId, commitment: FieldElement) -> Result<DepositEvent> {
        let vault = self.vault(asset)?;
        let mut vault = vault.lock().expect("vault lock poisoned");
        vault.deposit(commitment)
    }

    pub fn withdraw(&self, asset: AssetId, request: &WithdrawRequest) -> Result<WithdrawEvent> {
        let vault = self.vault(asset)?;
        let mut vault = vault.lock().expect("vault lock poisoned");
        vault.withdraw(&self.verifier, request)
    }

    pub fn current_root(&self, asset: AssetId) -> Result<FieldElement> {
        self.read(asset, |vault| vault.current_root())
    }

    pub fn next_leaf_index(&self, asset: AssetId) -> Result<u64> {
        self.read(asset, |vault| vault.next_leaf_index())
    }

    pub fn tree_depth(&self, asset: AssetId) -> Result<usize> {
        self.read(asset, |vault| vault.tree_depth())
    }

    pub fn is_known_root(&self, asset: AssetId, root: FieldElement) -> Result<bool> {
        self.read(asset, |vault| vault.is_known_root(root))
    }

    pub fn is_commitment_used(
        &self,
        asset: AssetId,
        commitment: FieldElement,
    ) -> Result<bool> {
        self.read(asset, |vault| vault.is_commitment_used(commitment))
    }

    pub fn is_nullifier_used(
        &self,
        asset: AssetId,
        nullifier_hash: FieldElement,
    ) -> Result<bool> {
        self.read(asset, |vault| vault.is_nullifier_used(nullifier_hash))
    }

    pub fn root_history_len(&self, asset: AssetId) -> Result<usize> {
        self.read(asset, |vault| vault.root_history_len())
    }

    pub fn merkle_path(&self, asset: AssetId, leaf_index: u64) -> Result<MerklePath> {
        self.read(asset, |vault| vault.merkle_path(leaf_index))?
    }

    fn vault(&self, asset: AssetId) -> Result<Arc<Mutex<Vault>>> {
        self.vaults
            .read()
            .expect("vault map lock poisoned")
            .get(&asset)
            .cloned()
            .ok_or(Error::UnknownVault)
    }

    fn read<T>(&self, asset: AssetId, f: impl FnOnce(&Vault) -> T) -> Result<T> {
        let vault = self.vault(asset)?;
        let vault = vault.lock().expect("vault lock poisoned");
        Ok(f(&vault))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct AcceptAll;

    impl ProofVerifier for AcceptAll {
        fn verify(&self, _proof: &[u8], _public_inputs: &[FieldElement]) -> bool {
            true
        }
    }

    fn asset(n: u8) -> AssetId {
        AssetId([n; 32])
    }

    #[test]
    fn test_vault_management() {
        let ledger = PoolLedger::new(AcceptAll);
        ledger.create_vault(asset(1), 4, 5).unwrap();

        assert_eq!(
            ledger.create_vault(asset(1), 4, 5).unwrap_err(),
            Error::VaultAlreadyExists
        );
        assert_eq!(
            ledger.deposit(asset(2), FieldElement::from_u64(1)).unwrap_err(),
            Error::UnknownVault
        );
        assert_eq!(
            ledger.create_vault(asset(3), 0, 5).unwrap_err(),
            Error::InvalidDepth(0)
        );
        assert_eq!(ledger.tree_depth(asset(1)).unwrap(), 4);
    }

    #[test]
    fn test_vaults_are_independent() {
        let ledger = PoolLedger::new(AcceptAll);
        ledger.create_vault(asset(1), 4, 5).unwrap();
        ledger.create_vault(asset(2), 4, 5).unwrap();

        let c = FieldElement::from_u64(77);
        ledger.deposit(asset(1), c).unwrap();
        // the same commitment is fine in a different vault
        ledger.deposit(asset(2), c).unwrap();

        assert!(ledger.is_commitment_used(asset(1), c).unwrap());
        assert!(ledger.is_commitment_used(asset(2), c).unwrap());
        assert_eq!(
            ledger.deposit(asset(1), c).unwrap_err(),
            Error::CommitmentAlreadyUsed
        );
    }
}
