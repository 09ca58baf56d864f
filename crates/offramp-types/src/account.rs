//! Linked bank accounts and the authenticated user context.
//!
//! Account identifiers arrive as free-form user input (IBANs with spaces,
//! mixed casing, routing numbers copied from statements). Equality is defined
//! over [`normalize_identifier`], applied identically when an account is
//! stored and when a recipient is looked up — never compare raw strings.

use serde::{Deserialize, Serialize};

use crate::{CustomerId, ExternalAccountId};

/// Normalize a bank account identifier: lowercase and strip all spaces.
///
/// This is the account equality contract. Both sides of every comparison go
/// through this function.
#[must_use]
pub fn normalize_identifier(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "")
}

/// The kind of bank account, which determines the settlement rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// European IBAN account — settles over SEPA in EUR.
    Iban,
    /// US account/routing pair — settles over ACH in USD.
    Ach,
}

/// A bank account linked to the user at the banking partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Normalized identifier (see [`normalize_identifier`]).
    pub identifier: String,
    /// Account kind, chosen when the account was linked.
    pub kind: AccountKind,
    /// The partner's external-account id bound to this account.
    pub external_account_id: ExternalAccountId,
}

impl Account {
    /// Create an account, normalizing the identifier at write time.
    #[must_use]
    pub fn new(
        identifier: &str,
        kind: AccountKind,
        external_account_id: ExternalAccountId,
    ) -> Self {
        Self {
            identifier: normalize_identifier(identifier),
            kind,
            external_account_id,
        }
    }

    /// Whether this account matches a free-form recipient identifier.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.identifier == normalize_identifier(raw)
    }
}

/// Read-only context for the authenticated user, supplied by the identity
/// collaborator. The core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Our own user identifier.
    pub user_id: String,
    /// The banking partner's customer id, assigned after KYC.
    pub customer_id: CustomerId,
    /// Bank accounts linked at the partner.
    pub accounts: Vec<Account>,
}

impl UserContext {
    /// Find the linked account matching a free-form recipient identifier.
    #[must_use]
    pub fn find_account(&self, recipient: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.matches(recipient))
    }
}
