//! Isolated environment for driving the fslistener binary.
//!
//! Provides `TestEnv` (temp watched directory, scratch directory, isolated
//! HOME) and `RunningListener` (a spawned listener whose output is collected
//! line by line).

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// How long to wait for a line before a test gives up
pub const LINE_TIMEOUT: Duration = Duration::from_secs(5);

/// Printed once the watch is registered
pub const LISTENING_LINE: &str = "(listening for fs events...)";

pub struct TestEnv {
    root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("watched")).unwrap();
        std::fs::create_dir_all(root.path().join("scratch")).unwrap();
        std::fs::create_dir_all(root.path().join("home")).unwrap();
        Self { root }
    }

    /// The directory handed to fslistener
    pub fn watched(&self) -> PathBuf {
        self.root.path().join("watched")
    }

    /// Outside the watched tree; callbacks write their logs here
    pub fn scratch(&self) -> PathBuf {
        self.root.path().join("scratch")
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_fslistener"));
        let home = self.root.path().join("home");
        cmd.env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("FSLISTENER_LATENCY_MS")
            .env_remove("FSLISTENER_TIMEOUT_MS")
            .env_remove("FSLISTENER_KILL_GRACE_MS");
        cmd
    }

    /// Run to completion (for invocations that exit on their own)
    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    /// Spawn a long-running listener and wait until its watch is registered.
    pub fn spawn_listener(&self, args: &[&str]) -> RunningListener {
        let mut child = self
            .command()
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let stdout = collect_lines(child.stdout.take().unwrap());
        let stderr = collect_lines(child.stderr.take().unwrap());

        let listener = RunningListener {
            child,
            stdout,
            stderr,
        };
        assert!(
            listener.wait_for_stdout(|l| l == LISTENING_LINE || l.contains("\"listening\"")),
            "listener never registered its watch; stdout: {:?}, stderr: {:?}",
            listener.stdout_lines(),
            listener.stderr_lines()
        );
        listener
    }

    /// Write an executable shell script into the scratch directory
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.scratch().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

struct LineCollector {
    lines: Arc<Mutex<Vec<String>>>,
    reader: JoinHandle<()>,
}

fn collect_lines<R: Read + Send + 'static>(source: R) -> LineCollector {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = lines.clone();
    let reader = thread::spawn(move || {
        for line in BufReader::new(source).lines() {
            match line {
                Ok(line) => sink.lock().unwrap().push(line),
                Err(_) => break,
            }
        }
    });
    LineCollector { lines, reader }
}

pub struct RunningListener {
    child: Child,
    stdout: LineCollector,
    stderr: LineCollector,
}

/// Everything a stopped listener printed
#[derive(Debug)]
pub struct Finished {
    pub status: ExitStatus,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl Finished {
    pub fn stdout_count(&self, needle: &str) -> usize {
        self.stdout.iter().filter(|l| l.contains(needle)).count()
    }

    pub fn stderr_count(&self, needle: &str) -> usize {
        self.stderr.iter().filter(|l| l.contains(needle)).count()
    }
}

impl RunningListener {
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout.lines.lock().unwrap().clone()
    }

    pub fn stderr_lines(&self) -> Vec<String> {
        self.stderr.lines.lock().unwrap().clone()
    }

    pub fn wait_for_stdout(&self, matches: impl Fn(&str) -> bool) -> bool {
        wait_for(&self.stdout.lines, matches)
    }

    pub fn wait_for_stderr(&self, matches: impl Fn(&str) -> bool) -> bool {
        wait_for(&self.stderr.lines, matches)
    }

    /// Ask the listener to shut down (SIGINT) and collect its output.
    #[cfg(unix)]
    pub fn interrupt(mut self) -> Finished {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        kill(Pid::from_raw(self.child.id() as i32), Signal::SIGINT).unwrap();
        let status = wait_with_deadline(&mut self.child, LINE_TIMEOUT);
        self.finish(status)
    }

    /// Kill the listener outright and collect its output.
    pub fn kill(mut self) -> Finished {
        let _ = self.child.kill();
        let status = self.child.wait().unwrap();
        self.finish(status)
    }

    fn finish(self, status: ExitStatus) -> Finished {
        let _ = self.stdout.reader.join();
        let _ = self.stderr.reader.join();
        Finished {
            status,
            stdout: self.stdout.lines.lock().unwrap().clone(),
            stderr: self.stderr.lines.lock().unwrap().clone(),
        }
    }
}

fn wait_for(lines: &Mutex<Vec<String>>, matches: impl Fn(&str) -> bool) -> bool {
    let deadline = Instant::now() + LINE_TIMEOUT;
    while Instant::now() < deadline {
        if lines.lock().unwrap().iter().any(|l| matches(l)) {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    false
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> ExitStatus {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        thread::sleep(Duration::from_millis(20));
    }
    let _ = child.kill();
    panic!("listener did not exit within {timeout:?} after SIGINT");
}

/// Create a file inside `dir` (one logical change)
pub fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), "changed").unwrap();
}
