//! Executes suites and collects a [`Report`].
//!
//! Each check gets a fresh `before_each` and its own [`Expectations`].  Both
//! the setup step and the check body run under the runner's timeout, so a
//! load that never resolves becomes [`Outcome::TimedOut`] instead of a hang.
//! A failing check never stops the ones after it.

use std::fmt;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, info};

use super::{Expectations, Failure, PageUnderTest, Suite};

/// Default per-step timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Which step of a check ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Check,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => f.write_str("before_each"),
            Phase::Check => f.write_str("check"),
        }
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// At least one expectation did not hold.
    Failed(Vec<Failure>),
    /// A step did not finish within the runner's timeout.
    TimedOut { phase: Phase, after: Duration },
    /// `before_each` returned an error; the check body never ran.
    SetupFailed(String),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

#[derive(Debug, Clone)]
pub struct CheckReport {
    pub name: &'static str,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub name: &'static str,
    pub checks: Vec<CheckReport>,
}

impl SuiteReport {
    pub fn check(&self, name: &str) -> Option<&CheckReport> {
        self.checks.iter().find(|check| check.name == name)
    }
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub suites: Vec<SuiteReport>,
}

impl Report {
    pub fn suite(&self, name: &str) -> Option<&SuiteReport> {
        self.suites.iter().find(|suite| suite.name == name)
    }

    /// Look up a check's outcome by suite and check name.
    pub fn outcome(&self, suite: &str, check: &str) -> Option<&Outcome> {
        self.suite(suite)?.check(check).map(|report| &report.outcome)
    }

    pub fn total(&self) -> usize {
        self.suites.iter().map(|suite| suite.checks.len()).sum()
    }

    pub fn failed(&self) -> usize {
        self.suites
            .iter()
            .flat_map(|suite| &suite.checks)
            .filter(|check| !check.outcome.is_pass())
            .count()
    }

    pub fn passed(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for suite in &self.suites {
            writeln!(f, "{}", suite.name)?;
            for check in &suite.checks {
                let mark = if check.outcome.is_pass() { "ok  " } else { "FAIL" };
                writeln!(f, "  {mark} {} ({} ms)", check.name, check.elapsed.as_millis())?;
                match &check.outcome {
                    Outcome::Passed => {}
                    Outcome::Failed(failures) => {
                        for failure in failures {
                            writeln!(f, "         {failure}")?;
                        }
                    }
                    Outcome::TimedOut { phase, after } => {
                        writeln!(f, "         timed out in {phase} after {} ms", after.as_millis())?;
                    }
                    Outcome::SetupFailed(message) => {
                        writeln!(f, "         before_each failed: {message}")?;
                    }
                }
            }
        }
        write!(f, "{} checks, {} failed", self.total(), self.failed())
    }
}

/// Runs suites against a page.
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    timeout: Duration,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Runner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run every check of every suite, in declaration order.
    pub async fn run(&self, suites: &mut [Box<dyn Suite>], page: &dyn PageUnderTest) -> Report {
        let mut report = Report::default();
        for suite in suites.iter_mut() {
            let mut checks = Vec::with_capacity(suite.checks().len());
            for (index, &name) in suite.checks().iter().enumerate() {
                let started = Instant::now();
                let outcome = self.run_one(suite.as_mut(), index, page).await;
                debug!(suite = suite.name(), check = name, ?outcome, "check finished");
                checks.push(CheckReport {
                    name,
                    outcome,
                    elapsed: started.elapsed(),
                });
            }
            report.suites.push(SuiteReport {
                name: suite.name(),
                checks,
            });
        }
        info!(total = report.total(), failed = report.failed(), "check run finished");
        report
    }

    async fn run_one(&self, suite: &mut dyn Suite, index: usize, page: &dyn PageUnderTest) -> Outcome {
        match timeout(self.timeout, suite.before_each(page)).await {
            Err(_) => {
                return Outcome::TimedOut {
                    phase: Phase::Setup,
                    after: self.timeout,
                }
            }
            Ok(Err(err)) => return Outcome::SetupFailed(format!("{err:#}")),
            Ok(Ok(())) => {}
        }

        let mut expect = Expectations::default();
        if timeout(self.timeout, suite.run_check(index, page, &mut expect))
            .await
            .is_err()
        {
            return Outcome::TimedOut {
                phase: Phase::Check,
                after: self.timeout,
            };
        }

        let failures = expect.into_failures();
        if failures.is_empty() {
            Outcome::Passed
        } else {
            Outcome::Failed(failures)
        }
    }
}
