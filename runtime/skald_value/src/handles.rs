//! Opaque handles for OS resources.
//!
//! Files, threads, and processes are external collaborators: the value
//! system stores them and reports their kind, nothing more. There is no
//! state machine here — the host takes the resource back out (or joins the
//! thread) and does its own I/O.

use std::fmt;
use std::fs::File;
use std::process::Child;
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::errors::{ValueError, ValueResult};
use crate::value::Value;

/// Opaque handle to an open file.
pub struct FileHandle {
    inner: Mutex<Option<File>>,
}

impl FileHandle {
    pub(crate) fn new(file: File) -> Self {
        FileHandle {
            inner: Mutex::new(Some(file)),
        }
    }

    /// Take the file out of the handle. Returns None if already taken.
    pub fn take(&self) -> Option<File> {
        self.inner.lock().take()
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let taken = self.inner.lock().is_none();
        f.debug_struct("FileHandle").field("taken", &taken).finish()
    }
}

/// Opaque handle to a spawned thread producing a `Value`.
pub struct ThreadHandle {
    inner: Mutex<Option<JoinHandle<Value>>>,
}

impl ThreadHandle {
    pub(crate) fn new(handle: JoinHandle<Value>) -> Self {
        ThreadHandle {
            inner: Mutex::new(Some(handle)),
        }
    }

    /// Wait for the thread and return its value.
    ///
    /// Joining twice, or joining a panicked thread, is an error.
    pub fn join(&self) -> ValueResult {
        let Some(handle) = self.inner.lock().take() else {
            return Err(ValueError::new("thread already joined"));
        };
        handle
            .join()
            .map_err(|_| ValueError::new("thread panicked before producing a value"))
    }
}

impl fmt::Debug for ThreadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.inner.lock().is_none();
        f.debug_struct("ThreadHandle")
            .field("joined", &joined)
            .finish()
    }
}

/// Opaque handle to a spawned child process.
pub struct ProcessHandle {
    inner: Mutex<Option<Child>>,
}

impl ProcessHandle {
    pub(crate) fn new(child: Child) -> Self {
        ProcessHandle {
            inner: Mutex::new(Some(child)),
        }
    }

    /// Take the child out of the handle. Returns None if already taken.
    pub fn take(&self) -> Option<Child> {
        self.inner.lock().take()
    }

    /// Wait for the process and return its exit code as an Int.
    ///
    /// A process killed by a signal has no code and reports -1.
    pub fn wait(&self) -> ValueResult {
        let Some(mut child) = self.inner.lock().take() else {
            return Err(ValueError::new("process already waited on"));
        };
        let status = child
            .wait()
            .map_err(|e| ValueError::new(format!("wait failed: {e}")))?;
        Ok(Value::int(i64::from(status.code().unwrap_or(-1))))
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let taken = self.inner.lock().is_none();
        f.debug_struct("ProcessHandle")
            .field("taken", &taken)
            .finish()
    }
}
