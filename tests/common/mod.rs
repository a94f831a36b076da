//! Shared test units for the perf-tester integration tests
//!
//! These units record their lifecycle calls so tests can assert ordering and
//! failure behaviour without depending on precise timings.

#![allow(dead_code)]

use perf_tester::{PerformanceTest, TestError};
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

/// Shared, ordered log of lifecycle events
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Create an empty call log
pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Snapshot of a call log
pub fn calls(log: &CallLog) -> Vec<String> {
    log.borrow().clone()
}

/// Unit that sleeps for a fixed time per iteration and logs its calls
pub struct SleepUnit {
    name: String,
    duration: Duration,
    log: Option<CallLog>,
    fail_initialize: bool,
    fail_run: bool,
}

impl SleepUnit {
    pub fn new(name: &str, millis: u64) -> Self {
        Self {
            name: name.to_owned(),
            duration: Duration::from_millis(millis),
            log: None,
            fail_initialize: false,
            fail_run: false,
        }
    }

    pub fn logged(mut self, log: &CallLog) -> Self {
        self.log = Some(Rc::clone(log));
        self
    }

    pub fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    pub fn failing_run(mut self) -> Self {
        self.fail_run = true;
        self
    }

    fn record(&self, event: &str) {
        if let Some(log) = &self.log {
            log.borrow_mut().push(format!("{}:{event}", self.name));
        }
    }
}

impl<D: ?Sized> PerformanceTest<D> for SleepUnit {
    fn description(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, _data: &D) -> Result<(), TestError> {
        self.record("init");
        if self.fail_initialize {
            return Err(format!("{} refused to initialize", self.name).into());
        }
        Ok(())
    }

    fn run(&mut self, _data: &D) -> Result<(), TestError> {
        self.record("run");
        if self.fail_run {
            return Err(format!("{} failed while running", self.name).into());
        }
        if !self.duration.is_zero() {
            thread::sleep(self.duration);
        }
        Ok(())
    }
}
