//! Loyalty-points ledger keyed by passenger name.
//!
//! One fixed-size record per passenger. Updates rewrite the whole
//! ledger through the same temp-file replace used by the booking
//! store; the ledger is small enough that this never matters.

use std::path::{Path, PathBuf};

use farelog_error::{FareError, Result};
use farelog_types::{LoyaltyAccount, LOYALTY_RECORD_SIZE};
use tracing::{debug, warn};

use crate::fsutil;

/// Flat file of per-passenger point balances.
#[derive(Debug, Clone)]
pub struct LoyaltyLedger {
    path: PathBuf,
}

impl LoyaltyLedger {
    /// Bind to the ledger's backing file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every account. A missing file is an empty ledger.
    pub fn accounts(&self) -> Result<Vec<LoyaltyAccount>> {
        let Some(bytes) = fsutil::read_all(&self.path)? else {
            return Ok(Vec::new());
        };
        let mut accounts = Vec::with_capacity(bytes.len() / LOYALTY_RECORD_SIZE);
        let mut chunks = bytes.chunks_exact(LOYALTY_RECORD_SIZE);
        for chunk in &mut chunks {
            let account = LoyaltyAccount::from_bytes(chunk)
                .map_err(|err| FareError::corrupt(err.to_string()))?;
            accounts.push(account);
        }
        if !chunks.remainder().is_empty() {
            warn!(
                path = %self.path.display(),
                trailing = chunks.remainder().len(),
                "dropping truncated trailing bytes from loyalty ledger"
            );
        }
        Ok(accounts)
    }

    /// Current balance for `name`; a passenger with no account has 0.
    ///
    /// Name matching is byte-exact.
    pub fn points_for(&self, name: &str) -> Result<u32> {
        Ok(self
            .accounts()?
            .iter()
            .find(|a| a.name == name)
            .map_or(0, |a| a.points))
    }

    /// Add `points` to the passenger's balance, creating the account
    /// on first credit. Returns the new balance.
    pub fn credit(&self, name: &str, points: u32) -> Result<u32> {
        let mut accounts = self.accounts()?;
        let balance = match accounts.iter_mut().find(|a| a.name == name) {
            Some(account) => {
                account.points = account.points.saturating_add(points);
                account.points
            }
            None => {
                accounts.push(LoyaltyAccount {
                    name: name.to_owned(),
                    points,
                });
                points
            }
        };
        self.write_back(&accounts)?;
        debug!(name, points, balance, "loyalty points credited");
        Ok(balance)
    }

    /// Deduct `points` from the passenger's balance.
    ///
    /// Fails with [`FareError::InsufficientPoints`] when the balance
    /// cannot cover the request; the ledger is left unchanged.
    /// Returns the new balance.
    pub fn debit(&self, name: &str, points: u32) -> Result<u32> {
        let mut accounts = self.accounts()?;
        let Some(account) = accounts.iter_mut().find(|a| a.name == name) else {
            if points == 0 {
                return Ok(0);
            }
            return Err(FareError::InsufficientPoints {
                requested: points,
                available: 0,
            });
        };
        if points > account.points {
            return Err(FareError::InsufficientPoints {
                requested: points,
                available: account.points,
            });
        }
        account.points -= points;
        let balance = account.points;
        self.write_back(&accounts)?;
        debug!(name, points, balance, "loyalty points redeemed");
        Ok(balance)
    }

    fn write_back(&self, accounts: &[LoyaltyAccount]) -> Result<()> {
        let mut bytes = Vec::with_capacity(accounts.len() * LOYALTY_RECORD_SIZE);
        for account in accounts {
            bytes.extend_from_slice(&account.to_bytes());
        }
        fsutil::replace_with(&self.path, &bytes)
    }
}
