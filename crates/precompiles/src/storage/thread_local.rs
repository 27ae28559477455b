//! Thread-local plumbing that scopes a storage provider to one precompile
//! call, so contract objects stay plain values instead of threading a
//! provider reference through every method.

use std::{cell::Cell, marker::PhantomData};

use alloy::primitives::{Address, LogData, U256};

use crate::{
    error::{LyraPrecompileError, Result},
    storage::PrecompileStorageProvider,
};

// Thread-local storage for accessing `PrecompileStorageProvider`
thread_local! {
    static STORAGE: Cell<Option<*mut dyn PrecompileStorageProvider>> = const { Cell::new(None) };
}

/// Thread-local storage guard for precompiles.
///
/// This guard sets up thread-local access to a storage provider for the
/// duration of its lifetime. When dropped, it cleans up the thread-local
/// storage.
///
/// # IMPORTANT
///
/// The caller must ensure that:
/// 1. Only one `StorageGuard` exists at a time, in the same thread.
/// 2. If multiple storage providers are instantiated in parallel threads,
///    they CANNOT point to the same storage addresses.
#[derive(Default)]
pub struct StorageGuard<'s> {
    _storage: PhantomData<&'s mut dyn PrecompileStorageProvider>,
}

impl<'s> StorageGuard<'s> {
    /// Creates a new storage guard, initializing thread-local storage.
    /// See type-level documentation for important notes.
    pub fn new(storage: &'s mut dyn PrecompileStorageProvider) -> Result<Self> {
        if STORAGE.with(|s| s.get()).is_some() {
            return Err(LyraPrecompileError::Fatal(
                "'StorageGuard' already initialized".to_string(),
            ));
        }

        // SAFETY: Transmuting lifetime to 'static for `Cell` storage.
        //
        // This is safe because:
        // 1. Type system ensures this guard can't outlive 's
        // 2. The Drop impl clears the thread-local before the guard is destroyed
        // 3. Only one guard can exist per thread (checked above)
        let ptr: *mut dyn PrecompileStorageProvider = storage;
        let ptr_static: *mut (dyn PrecompileStorageProvider + 'static) =
            unsafe { std::mem::transmute(ptr) };

        STORAGE.with(|s| s.set(Some(ptr_static)));

        Ok(Self::default())
    }
}

impl Drop for StorageGuard<'_> {
    fn drop(&mut self) {
        STORAGE.with(|s| s.set(None));
    }
}

/// Execute a function with access to the current thread-local storage provider.
pub fn with_storage<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&mut dyn PrecompileStorageProvider) -> Result<R>,
{
    let storage_ptr = STORAGE
        .with(|s| s.get())
        .ok_or(LyraPrecompileError::Fatal(
            "No storage context. 'StorageGuard' must be initialized".to_string(),
        ))?;

    // SAFETY:
    // - Caller must ensure NO recursive calls.
    // - Type system ensures the storage pointer is valid.
    let storage = unsafe { &mut *storage_ptr };
    f(storage)
}

/// Handle to the thread-local storage context.
///
/// `StorageCtx` is a zero-sized stand-in for the provider installed by the
/// current [`StorageGuard`]: it implements [`PrecompileStorageProvider`] by
/// forwarding every call through the thread-local pointer, and it owns the
/// [`enter`](Self::enter) entry point that installs a provider around a
/// closure. Contracts embed it as their `storage` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct StorageCtx;

impl StorageCtx {
    /// Runs `f` with `storage` installed as the thread-local provider.
    ///
    /// This is the single entry point used by dispatchers and tests; the
    /// guard is dropped (and the thread-local cleared) before returning.
    ///
    /// # Panics
    ///
    /// Panics if a storage context is already active on this thread. Nested
    /// contexts are a programming error: a precompile call owns its provider
    /// exclusively for the whole call.
    pub fn enter<R>(storage: &mut dyn PrecompileStorageProvider, f: impl FnOnce() -> R) -> R {
        let _guard = StorageGuard::new(storage)
            .expect("storage context is already active on this thread");
        f()
    }
}

impl PrecompileStorageProvider for StorageCtx {
    fn chain_id(&self) -> u64 {
        // NOTE: safe to unwrap as `chain_id()` is infallible.
        with_storage(|s| Ok(s.chain_id())).unwrap()
    }

    fn sstore(&mut self, address: Address, key: U256, value: U256) -> Result<()> {
        with_storage(|s| s.sstore(address, key, value))
    }

    fn sload(&mut self, address: Address, key: U256) -> Result<U256> {
        with_storage(|s| s.sload(address, key))
    }

    fn emit_event(&mut self, address: Address, event: LogData) -> Result<()> {
        with_storage(|s| s.emit_event(address, event))
    }

    fn deduct_gas(&mut self, gas: u64) -> Result<()> {
        with_storage(|s| s.deduct_gas(gas))
    }

    fn gas_used(&self) -> u64 {
        // NOTE: safe to unwrap as `gas_used()` is infallible.
        with_storage(|s| Ok(s.gas_used())).unwrap()
    }

    #[cfg(any(test, feature = "test-utils"))]
    fn recorded_events(&self, address: Address) -> Vec<LogData> {
        // NOTE: safe to unwrap as `recorded_events()` is infallible.
        with_storage(|s| Ok(s.recorded_events(address))).unwrap()
    }
}
