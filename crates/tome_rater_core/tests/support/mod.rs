//! Thread-local capture of `log` records emitted by the code under test.

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use std::cell::RefCell;

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALLED: OnceCell<()> = OnceCell::new();

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

/// Installs the capturing logger once per test binary and clears this thread's buffer.
pub fn capture_logs() {
    INSTALLED.get_or_init(|| {
        log::set_logger(&LOGGER).expect("no other logger should be installed in tests");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Drains this thread's buffer and returns the `warn` messages.
pub fn take_warnings() -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow_mut()
            .drain(..)
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message)
            .collect()
    })
}
