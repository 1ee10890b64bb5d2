//! Ledger error taxonomy.
//!
//! Every rejected operation maps to exactly one [`LedgerError`] and carries a
//! stable numeric code. Codes 100, 101 and 103 are the public contract with
//! existing clients; 102 and 104 fill the remaining failure classes.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// A failed ledger operation. No state is changed when one of these is returned.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    MaxEncodedLen,
    TypeInfo,
    sp_runtime::RuntimeDebug,
)]
pub enum LedgerError {
    /// Only the token owner may perform this operation.
    OwnerOnly,
    /// The caller does not hold the account it tried to spend from.
    NotTokenOwner,
    /// The source account cannot cover the requested amount.
    InsufficientBalance,
    /// Zero amounts are rejected by every mutating operation.
    InvalidAmount,
    /// A balance or the total supply would exceed `u128::MAX`.
    Overflow,
}

impl LedgerError {
    pub const fn code(self) -> u32 {
        match self {
            LedgerError::OwnerOnly => 100,
            LedgerError::NotTokenOwner => 101,
            LedgerError::InsufficientBalance => 102,
            LedgerError::InvalidAmount => 103,
            LedgerError::Overflow => 104,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LedgerError::OwnerOnly => "owner only",
            LedgerError::NotTokenOwner => "not token owner",
            LedgerError::InsufficientBalance => "insufficient balance",
            LedgerError::InvalidAmount => "invalid amount",
            LedgerError::Overflow => "arithmetic overflow",
        }
    }
}

impl TryFrom<u32> for LedgerError {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            100 => Ok(LedgerError::OwnerOnly),
            101 => Ok(LedgerError::NotTokenOwner),
            102 => Ok(LedgerError::InsufficientBalance),
            103 => Ok(LedgerError::InvalidAmount),
            104 => Ok(LedgerError::Overflow),
            other => Err(other),
        }
    }
}

impl core::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (err u{})", self.as_str(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(LedgerError::OwnerOnly.code(), 100);
        assert_eq!(LedgerError::NotTokenOwner.code(), 101);
        assert_eq!(LedgerError::InsufficientBalance.code(), 102);
        assert_eq!(LedgerError::InvalidAmount.code(), 103);
        assert_eq!(LedgerError::Overflow.code(), 104);
    }

    #[test]
    fn codes_resolve_back_to_errors() {
        for err in [
            LedgerError::OwnerOnly,
            LedgerError::NotTokenOwner,
            LedgerError::InsufficientBalance,
            LedgerError::InvalidAmount,
            LedgerError::Overflow,
        ] {
            assert_eq!(LedgerError::try_from(err.code()), Ok(err));
        }
        assert_eq!(LedgerError::try_from(99), Err(99));
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(LedgerError::OwnerOnly.to_string(), "owner only (err u100)");
    }
}
