//! Interrupt handling for the command-line front end.
//!
//! The first SIGINT trips the run's [`CancelToken`] and restores the default disposition, so a
//! second SIGINT terminates the process immediately.

use crate::core::cancel::CancelToken;
use crate::core::error::Result;

#[cfg(unix)]
mod imp {
    use super::*;
    use crate::core::error::Error;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, OnceLock};

    static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

    extern "C" fn on_interrupt(_signal: libc::c_int) {
        if let Some(flag) = INTERRUPT_FLAG.get() {
            flag.store(true, Ordering::SeqCst);
        }
        // SAFETY: signal(2) is async-signal-safe.
        unsafe {
            libc::signal(libc::SIGINT, libc::SIG_DFL);
        }
    }

    pub fn install(token: &CancelToken) -> Result<()> {
        INTERRUPT_FLAG
            .set(token.flag())
            .map_err(|_| Error::config("interrupt handler is already installed"))?;

        let handler = on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
        // SAFETY: the handler only touches an initialized atomic and calls signal(2).
        let previous = unsafe { libc::signal(libc::SIGINT, handler) };
        if previous == libc::SIG_ERR {
            return Err(std::io::Error::last_os_error().into());
        }
        Ok(())
    }
}

#[cfg(not(unix))]
mod imp {
    use super::*;

    pub fn install(token: &CancelToken) -> Result<()> {
        let _ = token;
        tracing::debug!("interrupt handling is not supported on this platform");
        Ok(())
    }
}

/// Route SIGINT to `token`. May be called at most once per process.
pub fn install_interrupt_handler(token: &CancelToken) -> Result<()> {
    imp::install(token)
}
