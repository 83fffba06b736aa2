// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for mirror tests.
//!
//! Provides a reporter that records events, and log capture for the
//! tracing-backed reporter.

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::MirrorError;

use super::identifier::MirrorIdentifier;
use super::report::{SharedReporter, SyncAction, SyncReport, SyncReporter};

/// Reporter storing one line per event.
#[derive(Default)]
pub(super) struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub(super) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(super) fn events(&self) -> Vec<String> {
        self.events.lock().expect("events poisoned").clone()
    }

    fn push(&self, event: String) {
        self.events.lock().expect("events poisoned").push(event);
    }
}

impl SyncReporter for RecordingReporter {
    fn started(&self, action: SyncAction, subject: &str) {
        self.push(format!("started {action} {subject}"));
    }

    fn skipped(&self, action: SyncAction, subject: &str) {
        self.push(format!("skipped {action} {subject}"));
    }

    fn failed(&self, action: SyncAction, subject: &str, _error: &MirrorError) {
        self.push(format!("failed {action} {subject}"));
    }

    fn command(&self, command_line: &str) {
        self.push(format!("command {command_line}"));
    }

    fn metadata(&self, identifier: &MirrorIdentifier, file: &str) {
        self.push(format!("metadata {identifier} {file}"));
    }

    fn finished(&self, report: &SyncReport) {
        self.push(format!(
            "finished {}/{}/{}/{}",
            report.mirrored.len(),
            report.updated.len(),
            report.deleted.len(),
            report.failures.len()
        ));
    }
}

/// Upcast for APIs taking a [`SharedReporter`].
pub(super) fn as_shared(reporter: &Arc<RecordingReporter>) -> SharedReporter {
    reporter.clone()
}

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs a closure while capturing INFO and above tracing output.
///
/// Returns the captured log output as a string.
pub(super) fn run_with_logs<F>(f: F) -> Result<String>
where
    F: FnOnce() -> Result<()>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f)?;

    let guard = buffer
        .lock()
        .map_err(|_| anyhow::anyhow!("log buffer poisoned"))?;
    Ok(String::from_utf8_lossy(&guard).to_string())
}
