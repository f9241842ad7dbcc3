//! Commonly used traits.

use alloy_primitives::Address;
use std::sync::Arc;

/// Something that knows which account is currently acting.
///
/// The gateway client reads this when a request is built, so a session that changes between two
/// calls is picked up by the second one.
pub trait AccountSource: Send + Sync {
    /// Returns the acting account, if any.
    fn current_account(&self) -> Option<Address>;
}

impl AccountSource for Address {
    fn current_account(&self) -> Option<Address> {
        Some(*self)
    }
}

impl AccountSource for Option<Address> {
    fn current_account(&self) -> Option<Address> {
        *self
    }
}

impl<T: AccountSource + ?Sized> AccountSource for Arc<T> {
    fn current_account(&self) -> Option<Address> {
        (**self).current_account()
    }
}

impl<T: AccountSource + ?Sized> AccountSource for &T {
    fn current_account(&self) -> Option<Address> {
        (**self).current_account()
    }
}

/// An [`AccountSource`] that never has an account.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAccount;

impl AccountSource for NoAccount {
    fn current_account(&self) -> Option<Address> {
        None
    }
}
