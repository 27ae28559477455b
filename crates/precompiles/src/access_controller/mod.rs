pub mod dispatch;

pub use lyra_contracts::precompiles::{
    ACCESS_CONTROLLER_ADDRESS, AccessControllerEvent, DEFAULT_ADMIN_ROLE, IAccessController,
    IAccessController::{
        getRoleAdminCall, grantRoleCall, hasRoleCall, renounceRoleCall, revokeRoleCall,
        setRoleAdminCall,
    },
};

use alloy::{
    primitives::{Address, B256},
    sol_types::SolEvent,
};
use tracing::{debug, trace};

use crate::{
    error::{AccessControlError, Result},
    storage::{ContractStorage, Mapping, PrecompileStorageProvider, Slot, StorageCtx},
};

mod slots {
    use alloy::primitives::U256;

    pub(super) const MEMBERS: U256 = U256::ZERO;
    pub(super) const ROLE_ADMINS: U256 = U256::ONE;
    pub(super) const INITIALIZED: U256 = U256::from_limbs([2, 0, 0, 0]);
}

/// Role authorization store, predeployed at [`ACCESS_CONTROLLER_ADDRESS`].
///
/// Storage layout (matching the equivalent Solidity contract):
/// ```solidity
/// contract AccessController {
///     mapping(bytes32 => mapping(address => bool)) members;    // slot 0
///     mapping(bytes32 => bytes32) roleAdmins;                  // slot 1
///     bool initialized;                                        // slot 2
/// }
/// ```
///
/// A role's admin entry defaults to the zero word, so every role is
/// administered by `DEFAULT_ADMIN_ROLE` until `set_role_admin` reassigns it,
/// and the default admin role administers itself. Membership and admin
/// entries are independent: granting a role never touches its admin entry.
pub struct AccessController {
    storage: StorageCtx,
}

impl AccessController {
    const MEMBERS: Mapping<B256, Mapping<Address, bool>> = Mapping::new(slots::MEMBERS);
    const ROLE_ADMINS: Mapping<B256, B256> = Mapping::new(slots::ROLE_ADMINS);
    const INITIALIZED: Slot<bool> = Slot::new(slots::INITIALIZED);

    pub fn new() -> Self {
        Self {
            storage: StorageCtx,
        }
    }

    /// One-time construction: grants `DEFAULT_ADMIN_ROLE` to `default_admin`,
    /// which makes it the root of the whole role hierarchy.
    pub fn initialize(&mut self, default_admin: Address) -> Result<()> {
        if Self::INITIALIZED.read(self)? {
            return Err(AccessControlError::AlreadyInitialized.into());
        }
        Self::INITIALIZED.write(self, true)?;
        self.grant_role_unchecked(DEFAULT_ADMIN_ROLE, default_admin, default_admin)?;

        debug!(admin = %default_admin, "access controller initialized");
        Ok(())
    }

    /// Returns whether `account` holds `role`. No authorization check.
    pub fn has_role(&mut self, call: hasRoleCall) -> Result<bool> {
        self.is_member(call.role, call.account)
    }

    /// Returns the role administering `role`; the zero word (i.e.
    /// `DEFAULT_ADMIN_ROLE`) if it was never configured.
    pub fn get_role_admin(&mut self, call: getRoleAdminCall) -> Result<B256> {
        Self::ROLE_ADMINS.read(self, call.role)
    }

    /// Grants `role` to `account`. The caller must hold the role's admin role.
    pub fn grant_role(&mut self, msg_sender: Address, call: grantRoleCall) -> Result<()> {
        self.check_admin(call.role, msg_sender)?;
        self.grant_role_unchecked(call.role, call.account, msg_sender)
    }

    /// Revokes `role` from `account`. The caller must hold the role's admin
    /// role.
    pub fn revoke_role(&mut self, msg_sender: Address, call: revokeRoleCall) -> Result<()> {
        self.check_admin(call.role, msg_sender)?;
        self.revoke_role_unchecked(call.role, call.account, msg_sender)
    }

    /// Removes the caller's own membership of `role`.
    ///
    /// Self-service only: `call.account` must equal the caller. The role's
    /// admin is deliberately not consulted, so an account can always drop its
    /// own roles even after administration moved elsewhere.
    pub fn renounce_role(&mut self, msg_sender: Address, call: renounceRoleCall) -> Result<()> {
        if call.account != msg_sender {
            return Err(AccessControlError::RenounceNotSelf.into());
        }
        self.revoke_role_unchecked(call.role, call.account, msg_sender)
    }

    /// Reassigns the admin role of `call.role`. The caller must hold the
    /// role's *current* admin role; afterwards only holders of the new admin
    /// role can grant or revoke it.
    pub fn set_role_admin(&mut self, msg_sender: Address, call: setRoleAdminCall) -> Result<()> {
        self.check_admin(call.role, msg_sender)?;

        let previous = Self::ROLE_ADMINS.read(self, call.role)?;
        Self::ROLE_ADMINS.write(self, call.role, call.adminRole)?;
        self.emit_event(&IAccessController::RoleAdminChanged {
            role: call.role,
            previousAdminRole: previous,
            newAdminRole: call.adminRole,
        })?;

        trace!(role = %call.role, admin_role = %call.adminRole, "role admin reassigned");
        Ok(())
    }

    fn is_member(&mut self, role: B256, account: Address) -> Result<bool> {
        Self::MEMBERS.read_nested(self, role, account)
    }

    /// Fails with `MissingRole` unless `account` holds `role`'s admin role.
    fn check_admin(&mut self, role: B256, account: Address) -> Result<()> {
        let admin_role = Self::ROLE_ADMINS.read(self, role)?;
        if self.is_member(admin_role, account)? {
            Ok(())
        } else {
            Err(AccessControlError::MissingRole.into())
        }
    }

    /// Membership write without the admin gate; shared by `grant_role` and
    /// construction. Granting an already held role is a no-op and emits
    /// nothing.
    fn grant_role_unchecked(
        &mut self,
        role: B256,
        account: Address,
        sender: Address,
    ) -> Result<()> {
        if self.is_member(role, account)? {
            return Ok(());
        }
        Self::MEMBERS.write_nested(self, role, account, true)?;
        self.emit_event(&IAccessController::RoleGranted {
            role,
            account,
            sender,
        })
    }

    /// Membership removal shared by `revoke_role` and `renounce_role`.
    /// Revoking an absent membership is a no-op and emits nothing.
    fn revoke_role_unchecked(
        &mut self,
        role: B256,
        account: Address,
        sender: Address,
    ) -> Result<()> {
        if !self.is_member(role, account)? {
            return Ok(());
        }
        Self::MEMBERS.write_nested(self, role, account, false)?;
        self.emit_event(&IAccessController::RoleRevoked {
            role,
            account,
            sender,
        })
    }

    fn emit_event<E: SolEvent>(&mut self, event: &E) -> Result<()> {
        let address = self.address();
        self.storage().emit_event(address, event.encode_log_data())
    }
}

impl ContractStorage for AccessController {
    type Storage = StorageCtx;

    fn address(&self) -> Address {
        ACCESS_CONTROLLER_ADDRESS
    }

    fn storage(&mut self) -> &mut StorageCtx {
        &mut self.storage
    }
}

impl Default for AccessController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl AccessController {
    /// Events emitted by this contract so far, in order.
    pub fn emitted_events(&self) -> Vec<alloy::primitives::LogData> {
        self.storage.recorded_events(ACCESS_CONTROLLER_ADDRESS)
    }

    /// Asserts the contract emitted exactly `expected`, in order.
    pub fn assert_emitted_events<E: SolEvent>(&self, expected: Vec<E>) {
        let expected: Vec<_> = expected.iter().map(SolEvent::encode_log_data).collect();
        assert_eq!(self.emitted_events(), expected);
    }
}
