//! Sending signals to the selected process.

use std::io;

/// Signals the UI can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Kill,
    Interrupt,
}

impl SignalKind {
    pub fn as_raw(&self) -> libc::c_int {
        match self {
            SignalKind::Kill => libc::SIGKILL,
            SignalKind::Interrupt => libc::SIGINT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Kill => "SIGKILL",
            SignalKind::Interrupt => "SIGINT",
        }
    }
}

/// Error type for signal delivery failures.
#[derive(Debug)]
pub enum SignalError {
    /// Pid 0 or a pid that does not fit `pid_t` would address a process group.
    InvalidPid(u32),
    /// `kill(2)` failed.
    Os { pid: u32, source: io::Error },
}

impl std::fmt::Display for SignalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalError::InvalidPid(pid) => write!(f, "invalid pid {}", pid),
            SignalError::Os { pid, source } => write!(f, "cannot signal {}: {}", pid, source),
        }
    }
}

impl std::error::Error for SignalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalError::InvalidPid(_) => None,
            SignalError::Os { source, .. } => Some(source),
        }
    }
}

/// Delivers a signal to a process.
pub trait SignalDispatcher {
    fn send(&mut self, pid: u32, kind: SignalKind) -> Result<(), SignalError>;
}

/// Dispatcher backed by `kill(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KillDispatcher;

impl SignalDispatcher for KillDispatcher {
    fn send(&mut self, pid: u32, kind: SignalKind) -> Result<(), SignalError> {
        let raw_pid = libc::pid_t::try_from(pid).map_err(|_| SignalError::InvalidPid(pid))?;
        if raw_pid <= 0 {
            return Err(SignalError::InvalidPid(pid));
        }
        // SAFETY: kill has no memory-safety preconditions; raw_pid is positive
        // so it targets exactly one process.
        let rc = unsafe { libc::kill(raw_pid, kind.as_raw()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(SignalError::Os {
                pid,
                source: io::Error::last_os_error(),
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records signals instead of sending them.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingDispatcher {
        pub sent: Vec<(u32, SignalKind)>,
    }

    impl SignalDispatcher for RecordingDispatcher {
        fn send(&mut self, pid: u32, kind: SignalKind) -> Result<(), SignalError> {
            self.sent.push((pid, kind));
            Ok(())
        }
    }

    #[test]
    fn test_signal_numbers() {
        assert_eq!(SignalKind::Kill.as_raw(), libc::SIGKILL);
        assert_eq!(SignalKind::Interrupt.as_raw(), libc::SIGINT);
        assert_eq!(SignalKind::Kill.name(), "SIGKILL");
    }

    #[test]
    fn test_kill_dispatcher_rejects_group_pids() {
        let mut d = KillDispatcher;
        assert!(matches!(
            d.send(0, SignalKind::Interrupt),
            Err(SignalError::InvalidPid(0))
        ));
        assert!(matches!(
            d.send(u32::MAX, SignalKind::Interrupt),
            Err(SignalError::InvalidPid(_))
        ));
    }

    #[test]
    fn test_kill_dispatcher_reports_missing_process() {
        // pid_max is at most 2^22 on Linux
        let mut d = KillDispatcher;
        let err = d.send(i32::MAX as u32, SignalKind::Interrupt).unwrap_err();
        assert!(matches!(err, SignalError::Os { .. }));
        assert!(err.to_string().starts_with("cannot signal"));
    }
}
