use crate::errors::VMError;
use crate::state::access_list_manager::AccessListManager;
use crate::state::transient::TransientStorage;
use crate::state::world_state::WorldState;

/// Owns the three journaled stores that live for the duration of a block and threads a
/// single depth counter through all of them (§4.6 `TransactionBoundary`). `depth == 0`
/// means no active transaction; call-frame boundaries are additional stack entries above
/// the outermost transaction boundary.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    pub world_state: WorldState,
    pub transient_storage: TransientStorage,
    pub access_list: AccessListManager,
    depth: usize,
}

impl ExecutionContext {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn begin_transaction(&mut self) {
        self.world_state.begin_scope();
        self.transient_storage.begin_scope();
        self.access_list.begin_scope();
        self.depth = self.depth.saturating_add(1);
    }

    pub fn commit_transaction(&mut self) -> Result<(), VMError> {
        if self.depth == 0 {
            return Err(VMError::NoActiveTransaction);
        }
        self.world_state.commit_scope();
        self.transient_storage.commit_scope();
        self.access_list.commit_scope();
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    pub fn rollback_transaction(&mut self) -> Result<(), VMError> {
        if self.depth == 0 {
            return Err(VMError::NoActiveTransaction);
        }
        self.world_state.rollback_scope();
        self.transient_storage.rollback_scope();
        self.access_list.rollback_scope();
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    /// Runs `effect` inside a fresh scope at any depth: commits on success, rolls back
    /// (and re-raises) on failure.
    pub fn run_in_transaction_boundary<T>(
        &mut self,
        effect: impl FnOnce(&mut Self) -> Result<T, VMError>,
    ) -> Result<T, VMError> {
        self.begin_transaction();
        match effect(self) {
            Ok(value) => {
                self.commit_transaction()?;
                Ok(value)
            }
            Err(err) => {
                self.rollback_transaction()?;
                Err(err)
            }
        }
    }

    /// Identical to [`Self::run_in_transaction_boundary`], but requires an outer
    /// transaction to already be active (`depth > 0`); used for nested EVM call frames.
    pub fn run_in_call_frame_boundary<T>(
        &mut self,
        effect: impl FnOnce(&mut Self) -> Result<T, VMError>,
    ) -> Result<T, VMError> {
        if self.depth == 0 {
            return Err(VMError::NoActiveTransaction);
        }
        self.begin_transaction();
        match effect(self) {
            Ok(value) => {
                self.commit_transaction()?;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("call-frame boundary rolled back: {err}");
                self.rollback_transaction()?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethrex_exec_core::{AccountState, Address};

    #[test]
    fn depth_precondition_rejects_call_frame_boundary_at_zero() {
        let mut ctx = ExecutionContext::default();
        let result = ctx.run_in_call_frame_boundary(|_| Ok::<(), VMError>(()));
        assert_eq!(result, Err(VMError::NoActiveTransaction));
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn nesting_returns_to_same_depth_on_success_and_failure() {
        let mut ctx = ExecutionContext::default();
        ctx.begin_transaction();

        let _ = ctx.run_in_call_frame_boundary(|_| Ok::<(), VMError>(()));
        assert_eq!(ctx.depth(), 1);

        let _ = ctx.run_in_call_frame_boundary(|_| Err::<(), VMError>(VMError::InvalidGas));
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn s9_call_frame_rollback_restores_prior_values() {
        let mut ctx = ExecutionContext::default();
        let x = Address::from_low_u64_be(1);
        let slot = ethereum_types::H256::from_low_u64_be(1);
        let v1 = ethereum_types::U256::from(1);
        let v2 = ethereum_types::U256::from(2);

        ctx.world_state.set_account(
            x,
            AccountState {
                nonce: 5,
                ..Default::default()
            },
        );

        ctx.begin_transaction();
        ctx.world_state.set_account(
            x,
            AccountState {
                nonce: 6,
                ..Default::default()
            },
        );
        ctx.world_state.set_storage(x, slot, v1).unwrap();

        let result = ctx.run_in_call_frame_boundary(|inner| {
            inner.world_state.set_account(
                x,
                AccountState {
                    nonce: 9,
                    ..Default::default()
                },
            );
            inner.world_state.set_storage(x, slot, v2).unwrap();
            Err(VMError::InvalidGas)
        });
        assert!(result.is_err());

        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.world_state.get_account(x).nonce, 6);
        assert_eq!(ctx.world_state.get_storage(x, slot), v1);

        ctx.commit_transaction().unwrap();
        assert_eq!(ctx.world_state.get_account(x).nonce, 6);
        assert_eq!(ctx.world_state.get_storage(x, slot), v1);
    }
}
