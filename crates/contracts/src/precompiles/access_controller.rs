pub use IAccessController::IAccessControllerEvents as AccessControllerEvent;

crate::sol! {
    /// AccessController interface for role-based authorization
    ///
    /// Roles are opaque `bytes32` identifiers; membership is tracked per
    /// (role, account) pair. Every role is administered by another role, and
    /// only holders of a role's admin role may grant or revoke it. The admin
    /// entry of a role defaults to `DEFAULT_ADMIN_ROLE` (the zero word) until
    /// it is explicitly reassigned with `setRoleAdmin`, so the default admin
    /// role bootstraps the whole hierarchy and is its own admin.
    #[derive(Debug, PartialEq, Eq)]
    #[sol(abi)]
    interface IAccessController {
        /// Returns true if `account` currently holds `role`.
        ///
        /// Pure read; performs no authorization check.
        function hasRole(bytes32 role, address account) external view returns (bool hasRole);

        /// Returns the role that administers `role`.
        ///
        /// Reads of roles that were never configured return the zero word,
        /// i.e. the default admin role.
        function getRoleAdmin(bytes32 role) external view returns (bytes32 roleAdmin);

        /// Grants `role` to `account`.
        ///
        /// The caller must hold `getRoleAdmin(role)`. Granting a role the
        /// account already holds is a no-op.
        function grantRole(bytes32 role, address account) external;

        /// Revokes `role` from `account`.
        ///
        /// The caller must hold `getRoleAdmin(role)`. Revoking a role the
        /// account does not hold is a no-op.
        function revokeRole(bytes32 role, address account) external;

        /// Removes the caller's own membership of `role`.
        ///
        /// `account` must equal the caller; the role's admin is deliberately
        /// not consulted, so any account can always drop its own roles.
        function renounceRole(bytes32 role, address account) external;

        /// Reassigns the admin role of `role` to `adminRole`.
        ///
        /// The caller must hold the role's *current* admin role.
        function setRoleAdmin(bytes32 role, bytes32 adminRole) external;

        // Events
        event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);
        event RoleRevoked(bytes32 indexed role, address indexed account, address indexed sender);
        event RoleAdminChanged(bytes32 indexed role, bytes32 indexed previousAdminRole, bytes32 indexed newAdminRole);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolInterface;

    #[test]
    fn interface_exposes_all_selectors() {
        assert_eq!(IAccessController::IAccessControllerCalls::SELECTORS.len(), 6);

        for selector in IAccessController::IAccessControllerCalls::SELECTORS {
            assert!(IAccessController::IAccessControllerCalls::valid_selector(
                *selector
            ));
        }
    }
}
