//! The three periodic tasks the home runs.

use std::sync::Arc;
use std::time::Duration;

use homesim_domain::error::HomeError;

use crate::home::Home;
use crate::ports::LogStore;
use crate::scheduler::{PeriodicTask, Scheduler};

/// Resample the environment and motion, raise alerts.
pub struct StatusRefresh<S>(pub Arc<Home<S>>);

/// Switch the light on when motion is seen.
pub struct AutoLightCheck<S>(pub Arc<Home<S>>);

/// Apply the schedule rules due this minute.
pub struct FixedScheduleCheck<S>(pub Arc<Home<S>>);

impl<S: LogStore + Send + Sync + 'static> PeriodicTask for StatusRefresh<S> {
    fn name(&self) -> &'static str {
        "status_refresh"
    }

    async fn run_once(&self) -> Result<(), HomeError> {
        self.0.refresh_status().await;
        Ok(())
    }
}

impl<S: LogStore + Send + Sync + 'static> PeriodicTask for AutoLightCheck<S> {
    fn name(&self) -> &'static str {
        "auto_light_check"
    }

    async fn run_once(&self) -> Result<(), HomeError> {
        self.0.auto_light_check().await.map(|_| ())
    }
}

impl<S: LogStore + Send + Sync + 'static> PeriodicTask for FixedScheduleCheck<S> {
    fn name(&self) -> &'static str {
        "fixed_schedule_check"
    }

    async fn run_once(&self) -> Result<(), HomeError> {
        self.0.check_schedule().await.map(|_| ())
    }
}

/// How often each task runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periods {
    pub status_refresh: Duration,
    pub auto_light_check: Duration,
    pub fixed_schedule_check: Duration,
}

impl Default for Periods {
    fn default() -> Self {
        Self {
            status_refresh: Duration::from_secs(5),
            auto_light_check: Duration::from_secs(1),
            fixed_schedule_check: Duration::from_secs(60),
        }
    }
}

/// Register the three tasks for `home` on `scheduler`.
pub fn spawn_all<S: LogStore + Send + Sync + 'static>(
    scheduler: &mut Scheduler,
    home: &Arc<Home<S>>,
    periods: Periods,
) {
    scheduler.spawn(StatusRefresh(Arc::clone(home)), periods.status_refresh);
    scheduler.spawn(AutoLightCheck(Arc::clone(home)), periods.auto_light_check);
    scheduler.spawn(
        FixedScheduleCheck(Arc::clone(home)),
        periods.fixed_schedule_check,
    );
}
