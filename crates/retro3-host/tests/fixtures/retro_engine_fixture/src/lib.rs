//! Native engine library double.
//!
//! Exports the `retro_engine_*` ABI plus two control symbols:
//!
//! ```c
//! void   retro_engine_fixture_configure(uint32_t abi_version, bool return_null, bool init_result);
//! size_t retro_engine_fixture_calls(uint8_t* out, size_t cap);
//! ```
//!
//! Calls are recorded as one byte each: `n` new, `i` initialize,
//! `d` deinitialize, `x` delete.

use std::ffi::c_void;
use std::sync::{Mutex, MutexGuard};

#[derive(Copy, Clone)]
struct Behavior {
    abi_version: u32,
    return_null: bool,
    init_result: bool,
}

static BEHAVIOR: Mutex<Behavior> =
    Mutex::new(Behavior { abi_version: 1, return_null: false, init_result: true });

static CALLS: Mutex<Vec<u8>> = Mutex::new(Vec::new());

// Panics must not unwind into the host.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn record(call: u8) {
    lock(&CALLS).push(call);
}

#[unsafe(no_mangle)]
pub extern "C" fn retro_engine_fixture_configure(abi_version: u32, return_null: bool, init_result: bool) {
    *lock(&BEHAVIOR) = Behavior { abi_version, return_null, init_result };
}

/// Copies up to `cap` recorded calls into `out`; returns the total recorded.
///
/// # Safety
/// `out` must be valid for `cap` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn retro_engine_fixture_calls(out: *mut u8, cap: usize) -> usize {
    let calls = lock(&CALLS);
    let n = calls.len().min(cap);
    if n > 0 {
        // SAFETY: the caller guarantees `out` holds `cap >= n` bytes.
        unsafe { std::ptr::copy_nonoverlapping(calls.as_ptr(), out, n) };
    }
    calls.len()
}

#[unsafe(no_mangle)]
pub extern "C" fn retro_engine_abi_version() -> u32 {
    lock(&BEHAVIOR).abi_version
}

#[unsafe(no_mangle)]
pub extern "C" fn retro_engine_new() -> *mut c_void {
    record(b'n');
    if lock(&BEHAVIOR).return_null {
        return std::ptr::null_mut();
    }
    Box::into_raw(Box::new(0u32)).cast()
}

/// # Safety
/// `engine` must come from `retro_engine_new` and not be deleted yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn retro_engine_initialize(engine: *mut c_void) -> bool {
    record(b'i');
    let ok = lock(&BEHAVIOR).init_result;
    if ok {
        // SAFETY: see the function contract.
        unsafe { *engine.cast::<u32>() = 1 };
    }
    ok
}

/// # Safety
/// `engine` must come from `retro_engine_new` and not be deleted yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn retro_engine_deinitialize(engine: *mut c_void) {
    record(b'd');
    // SAFETY: see the function contract.
    unsafe { *engine.cast::<u32>() = 0 };
}

/// # Safety
/// `engine` must come from `retro_engine_new`; it is released here.
#[cfg(not(feature = "omit-delete"))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn retro_engine_delete(engine: *mut c_void) {
    record(b'x');
    // SAFETY: see the function contract.
    drop(unsafe { Box::from_raw(engine.cast::<u32>()) });
}
