//! Sale item lifecycle shared by tickets and user passes.
//!
//! Items start `reserved`, move to `processing` while a payment form is outstanding and end
//! up `authorized`, `cancelled` or `refunded`. [`SaleItemStatus::apply`] is the single
//! place where transitions are decided.

use std::fmt;
use std::str::FromStr;

use crate::server::error::sale::SaleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleItemStatus {
    Reserved,
    Processing,
    Authorized,
    Cancelled,
    Refunded,
}

/// Operation requested on a sale item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleAction {
    /// Payment form issued.
    Process,
    /// Payment failed, item goes back to the cart.
    Release,
    Authorize,
    Cancel,
    Refund,
}

impl SaleItemStatus {
    /// Statuses that still hold a seat or an entitlement.
    pub const VALID: [SaleItemStatus; 3] = [
        SaleItemStatus::Reserved,
        SaleItemStatus::Processing,
        SaleItemStatus::Authorized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Processing => "processing",
            Self::Authorized => "authorized",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    pub fn is_valid(&self) -> bool {
        Self::VALID.contains(self)
    }

    /// Computes the status after `action`.
    ///
    /// Applying an action to an item already in the target status returns that status
    /// unchanged so repeated gateway callbacks are harmless.
    ///
    /// # Returns
    /// - `Ok(status)` - The new status
    /// - `Err(SaleError::InvalidTransition)` - Action not allowed from this status; `kind` and
    ///   `id` only feed the error message
    pub fn apply(
        self,
        action: SaleAction,
        kind: &'static str,
        id: i32,
    ) -> Result<SaleItemStatus, SaleError> {
        use SaleAction as A;
        use SaleItemStatus as S;

        let target = action.target();
        if self == target {
            return Ok(self);
        }

        let allowed = match action {
            A::Process => matches!(self, S::Reserved),
            A::Release => matches!(self, S::Processing),
            A::Authorize => matches!(self, S::Reserved | S::Processing),
            A::Cancel => matches!(self, S::Reserved | S::Processing | S::Authorized),
            A::Refund => matches!(self, S::Authorized),
        };

        if allowed {
            Ok(target)
        } else {
            Err(SaleError::InvalidTransition {
                kind,
                id,
                status: self,
                action,
            })
        }
    }
}

impl SaleAction {
    pub fn target(&self) -> SaleItemStatus {
        match self {
            Self::Process => SaleItemStatus::Processing,
            Self::Release => SaleItemStatus::Reserved,
            Self::Authorize => SaleItemStatus::Authorized,
            Self::Cancel => SaleItemStatus::Cancelled,
            Self::Refund => SaleItemStatus::Refunded,
        }
    }
}

impl fmt::Display for SaleItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SaleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Process => "process",
            Self::Release => "release",
            Self::Authorize => "authorize",
            Self::Cancel => "cancel",
            Self::Refund => "refund",
        };
        f.write_str(name)
    }
}

impl FromStr for SaleItemStatus {
    type Err = SaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserved" => Ok(Self::Reserved),
            "processing" => Ok(Self::Processing),
            "authorized" => Ok(Self::Authorized),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            other => Err(SaleError::UnknownStatus(other.to_string())),
        }
    }
}

/// Parses a stored status column, reporting corrupt values as a database error.
pub(crate) fn parse_stored_status(value: &str) -> Result<SaleItemStatus, sea_orm::DbErr> {
    value
        .parse()
        .map_err(|e: SaleError| sea_orm::DbErr::Custom(format!("Failed to parse status: {}", e)))
}
