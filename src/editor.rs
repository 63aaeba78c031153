//! Editor integration.
//!
//! After operations that rewrite the working tree underneath an open editor
//! (checkout, rebase), unmodified buffers can be reverted in place. The
//! editor may not be running at all, so failures are ignored.

use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Ask the running editor to revert its unmodified buffers.
pub fn revert_unmodified_buffers<P: AsRef<Path>>(cwd: P) {
    debug!("emacsclient -e (my-revert-unmodified)");
    let result = Command::new("emacsclient")
        .current_dir(cwd.as_ref())
        .args(["-e", "(my-revert-unmodified)"])
        .output();
    if let Err(e) = result {
        debug!("ignored: failed to execute emacsclient: {}", e);
    }
}
