#![allow(dead_code)]

pub use execzone_test_utils::builders;
pub use execzone_test_utils::fake_executor;
pub use execzone_test_utils::{init_tracing, with_timeout};

use std::fs;
use std::path::Path;

/// True when the execution root holds no entries (or does not exist).
pub fn root_is_empty(root: &Path) -> bool {
    match fs::read_dir(root) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Whether `bin` can be found on PATH. Toolchain tests skip themselves
/// when it cannot.
pub fn have(bin: &str) -> bool {
    if which::which(bin).is_ok() {
        true
    } else {
        eprintln!("skipping: '{bin}' not found on PATH");
        false
    }
}
