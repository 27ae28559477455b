use super::AccessController;
use crate::{
    Precompile, dispatch_call, input_cost, mutate_void, view,
    storage::PrecompileStorageProvider,
};
use alloy::{primitives::Address, sol_types::SolInterface};
use revm::precompile::{PrecompileError, PrecompileResult};
use lyra_contracts::precompiles::IAccessController::IAccessControllerCalls;

impl Precompile for AccessController {
    fn call(&mut self, calldata: &[u8], msg_sender: Address) -> PrecompileResult {
        self.storage
            .deduct_gas(input_cost(calldata.len()))
            .map_err(|_| PrecompileError::OutOfGas)?;

        dispatch_call(
            calldata,
            IAccessControllerCalls::abi_decode,
            |call| match call {
                IAccessControllerCalls::hasRole(call) => view(call, |c| self.has_role(c)),
                IAccessControllerCalls::getRoleAdmin(call) => {
                    view(call, |c| self.get_role_admin(c))
                }
                IAccessControllerCalls::grantRole(call) => {
                    mutate_void(call, msg_sender, |sender, c| self.grant_role(sender, c))
                }
                IAccessControllerCalls::revokeRole(call) => {
                    mutate_void(call, msg_sender, |sender, c| self.revoke_role(sender, c))
                }
                IAccessControllerCalls::renounceRole(call) => {
                    mutate_void(call, msg_sender, |sender, c| self.renounce_role(sender, c))
                }
                IAccessControllerCalls::setRoleAdmin(call) => {
                    mutate_void(call, msg_sender, |sender, c| self.set_role_admin(sender, c))
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        storage::{StorageCtx, hashmap::HashMapStorageProvider},
        test_util::{assert_full_coverage, check_selector_coverage, expect_precompile_revert},
    };
    use alloy::{
        primitives::{B256, keccak256},
        sol_types::SolCall,
    };
    use lyra_contracts::precompiles::IAccessController;

    fn selector_name(selector: [u8; 4]) -> Option<&'static str> {
        match selector {
            s if s == IAccessController::hasRoleCall::SELECTOR => Some("hasRole"),
            s if s == IAccessController::getRoleAdminCall::SELECTOR => Some("getRoleAdmin"),
            s if s == IAccessController::grantRoleCall::SELECTOR => Some("grantRole"),
            s if s == IAccessController::revokeRoleCall::SELECTOR => Some("revokeRole"),
            s if s == IAccessController::renounceRoleCall::SELECTOR => Some("renounceRole"),
            s if s == IAccessController::setRoleAdminCall::SELECTOR => Some("setRoleAdmin"),
            _ => None,
        }
    }

    #[test]
    fn test_access_controller_selector_coverage() -> eyre::Result<()> {
        let mut storage = HashMapStorageProvider::new(1);
        StorageCtx::enter(&mut storage, || {
            let mut controller = AccessController::new();

            let unsupported = check_selector_coverage(
                &mut controller,
                IAccessControllerCalls::SELECTORS,
                "IAccessController",
                selector_name,
            );

            assert_full_coverage([unsupported]);

            Ok(())
        })
    }

    #[test]
    fn test_grant_and_query_through_the_abi() -> eyre::Result<()> {
        let mut storage = HashMapStorageProvider::new(1);
        let admin = Address::random();
        let account = Address::random();
        let role: B256 = keccak256(b"MINTER_ROLE");
        StorageCtx::enter(&mut storage, || {
            let mut controller = AccessController::new();
            controller.initialize(admin)?;

            let calldata = IAccessController::grantRoleCall { role, account }.abi_encode();
            let output = controller.call(&calldata, admin).unwrap();
            assert!(!output.reverted);

            let calldata = IAccessController::hasRoleCall { role, account }.abi_encode();
            let output = controller.call(&calldata, Address::random()).unwrap();
            let held =
                IAccessController::hasRoleCall::abi_decode_returns(&output.bytes).unwrap();
            assert!(held);

            Ok(())
        })
    }

    #[test]
    fn test_unauthorized_grant_reverts_through_the_abi() -> eyre::Result<()> {
        let mut storage = HashMapStorageProvider::new(1);
        let admin = Address::random();
        let outsider = Address::random();
        let role: B256 = keccak256(b"MINTER_ROLE");
        StorageCtx::enter(&mut storage, || {
            let mut controller = AccessController::new();
            controller.initialize(admin)?;

            let calldata = IAccessController::grantRoleCall {
                role,
                account: outsider,
            }
            .abi_encode();
            let result = controller.call(&calldata, outsider);
            expect_precompile_revert(result, "AccessControl: account is missing role");

            Ok(())
        })
    }

    #[test]
    fn test_out_of_gas_aborts_the_call() {
        // Too small a budget to even pay the calldata charge.
        let mut storage = HashMapStorageProvider::with_gas_limit(1, 10);
        let role: B256 = keccak256(b"MINTER_ROLE");
        StorageCtx::enter(&mut storage, || {
            let mut controller = AccessController::new();

            let calldata = IAccessController::getRoleAdminCall { role }.abi_encode();
            let result = controller.call(&calldata, Address::random());
            assert!(matches!(result, Err(PrecompileError::OutOfGas)));
        });
    }
}
