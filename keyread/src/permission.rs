//! Action permissions granted to a decoded key.

use serde::{Deserialize, Serialize};

/// A cryptographic operation a key context may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
}

/// Who may invoke an [`Action`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionLevel {
    /// Not permitted.
    #[default]
    None,
    /// Only the library's own protocol code may use it; external callers
    /// may not.
    InternalOnly,
    /// Anyone may use it.
    All,
}

/// Per-action permission levels.
///
/// Built as a local value by each decoder and handed to the key context
/// in one step once the decode has fully succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionPermissions {
    encrypt: PermissionLevel,
    decrypt: PermissionLevel,
    sign: PermissionLevel,
    verify: PermissionLevel,
}

impl ActionPermissions {
    pub const fn none() -> Self {
        Self {
            encrypt: PermissionLevel::None,
            decrypt: PermissionLevel::None,
            sign: PermissionLevel::None,
            verify: PermissionLevel::None,
        }
    }

    pub const fn with(mut self, action: Action, level: PermissionLevel) -> Self {
        match action {
            Action::Encrypt => self.encrypt = level,
            Action::Decrypt => self.decrypt = level,
            Action::Sign => self.sign = level,
            Action::Verify => self.verify = level,
        }
        self
    }

    pub const fn get(&self, action: Action) -> PermissionLevel {
        match action {
            Action::Encrypt => self.encrypt,
            Action::Decrypt => self.decrypt,
            Action::Sign => self.sign,
            Action::Verify => self.verify,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    /// Whether an external caller may invoke `action`.
    pub fn allows_external(&self, action: Action) -> bool {
        self.get(action) == PermissionLevel::All
    }

    /// Whether the library's internal code may invoke `action`.
    pub fn allows_internal(&self, action: Action) -> bool {
        self.get(action) != PermissionLevel::None
    }

    pub(crate) const fn unrestricted() -> Self {
        Self::none()
            .with(Action::Encrypt, PermissionLevel::All)
            .with(Action::Decrypt, PermissionLevel::All)
            .with(Action::Sign, PermissionLevel::All)
            .with(Action::Verify, PermissionLevel::All)
    }

    pub(crate) const fn internal_crypt() -> Self {
        Self::none()
            .with(Action::Encrypt, PermissionLevel::InternalOnly)
            .with(Action::Decrypt, PermissionLevel::InternalOnly)
    }

    pub(crate) const fn internal_sign_verify() -> Self {
        Self::none()
            .with(Action::Sign, PermissionLevel::InternalOnly)
            .with(Action::Verify, PermissionLevel::InternalOnly)
    }

    pub(crate) const fn internal_verify() -> Self {
        Self::none().with(Action::Verify, PermissionLevel::InternalOnly)
    }
}
