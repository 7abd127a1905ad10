//! Argument vector construction for the callback command

use std::ffi::{OsStr, OsString};
use std::process::Command;

/// The exact argument vector handed to the callback.
///
/// Element 0 is the callback command itself, followed by the forwarded
/// arguments in their original order. The vector is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentVector {
    argv: Vec<OsString>,
}

impl ArgumentVector {
    /// Build `[command, extra...]` without reordering or deduplicating.
    pub fn build<I, S>(command: impl Into<OsString>, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = vec![command.into()];
        argv.extend(extra.into_iter().map(Into::into));
        Self { argv }
    }

    /// argv[0]
    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    /// argv[1..]
    pub fn tail(&self) -> &[OsString] {
        &self.argv[1..]
    }

    pub fn as_slice(&self) -> &[OsString] {
        &self.argv
    }

    pub fn len(&self) -> usize {
        self.argv.len()
    }

    /// Whether the vector has no elements; a built vector always has argv[0].
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    /// A `Command` that executes `program()` with `argv[0]` set explicitly.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(self.program());
        cmd.args(self.tail());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(self.program());
        }

        cmd
    }

    /// Space-separated rendering used by the startup banner.
    pub fn display_joined(&self) -> String {
        self.argv
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
