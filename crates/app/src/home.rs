//! Home: the application state shared by the presentation layer and the
//! periodic tasks.
//!
//! Every device change and the log write that records it happen while the
//! device lock is held, so manual toggles, the auto-light automation and the
//! schedule check never interleave and log entries come out in the order the
//! changes were made.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;

use homesim_domain::alert::AlertThresholds;
use homesim_domain::device::{Device, DeviceId, PowerState};
use homesim_domain::error::{HomeError, ValidationError};
use homesim_domain::log_entry::{ChangeSource, LogEntry};
use homesim_domain::reading::EnvironmentReading;
use homesim_domain::schedule::ScheduleRule;
use homesim_domain::time::{TimeOfDay, format_log_timestamp};

use crate::alert_bus::AlertBus;
use crate::ports::{AlertPublisher, Clock, Feedback, LocalClock, LogStore, RandomSource, Silent};
use crate::sensors::{EnvironmentSampler, MotionSensor};
use crate::services::event_log::EventLog;

/// What the presentation layer shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub light: PowerState,
    pub fan: PowerState,
    /// Motion result of the last status refresh.
    pub motion: bool,
    /// Reading of the last status refresh, `None` before the first one.
    pub reading: Option<EnvironmentReading>,
    /// Local time of the last status refresh.
    pub refreshed_at: Option<String>,
}

#[derive(Debug, Default, Clone)]
struct Observation {
    motion: bool,
    reading: Option<EnvironmentReading>,
    refreshed_at: Option<String>,
}

struct Devices {
    light: Device,
    fan: Device,
}

impl Devices {
    fn get(&self, id: DeviceId) -> &Device {
        match id {
            DeviceId::Light => &self.light,
            DeviceId::Fan => &self.fan,
        }
    }

    fn get_mut(&mut self, id: DeviceId) -> &mut Device {
        match id {
            DeviceId::Light => &mut self.light,
            DeviceId::Fan => &mut self.fan,
        }
    }
}

/// The simulated home: two devices, two sensors, a schedule and a log.
pub struct Home<S> {
    devices: Mutex<Devices>,
    observation: RwLock<Observation>,
    log: EventLog<S>,
    motion: MotionSensor,
    environment: EnvironmentSampler,
    alerts: Arc<dyn AlertPublisher>,
    feedback: Arc<dyn Feedback>,
    clock: Arc<dyn Clock>,
    schedule: Vec<ScheduleRule>,
    thresholds: AlertThresholds,
}

impl<S: LogStore> Home<S> {
    /// Create a builder for constructing a [`Home`].
    #[must_use]
    pub fn builder() -> HomeBuilder<S> {
        HomeBuilder::default()
    }

    /// Current state of one device.
    pub async fn device(&self, id: DeviceId) -> Device {
        *self.devices.lock().await.get(id)
    }

    /// Current state of every device, light first.
    pub async fn devices(&self) -> [Device; 2] {
        let devices = self.devices.lock().await;
        [devices.light, devices.fan]
    }

    /// The configured schedule rules.
    #[must_use]
    pub fn schedule(&self) -> &[ScheduleRule] {
        &self.schedule
    }

    /// Device states plus the result of the last status refresh.
    pub async fn status(&self) -> StatusSnapshot {
        let [light, fan] = self.devices().await;
        let observation = self
            .observation
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        StatusSnapshot {
            light: light.state,
            fan: fan.state,
            motion: observation.motion,
            reading: observation.reading,
            refreshed_at: observation.refreshed_at,
        }
    }

    /// Flip a device, click, and log the new state.
    ///
    /// The sensors are not resampled and no alerts are raised: the status
    /// keeps the observation of the last refresh until the next
    /// `StatusRefresh` cycle, instead of refreshing right after the flip.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] if the log write fails. The device
    /// keeps its new state in that case.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_device(&self, id: DeviceId) -> Result<Device, HomeError> {
        let mut devices = self.devices.lock().await;
        let device = devices.get_mut(id);
        let state = device.toggle();
        let device = *device;

        self.feedback.click();
        tracing::info!(device = %id, %state, "device toggled");

        self.log
            .append(&ChangeSource::Manual.label(id), state.as_str(), None, None)
            .await?;
        Ok(device)
    }

    /// Sample the environment and motion, store the result and raise alerts.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_status(&self) -> StatusSnapshot {
        let reading = self.environment.sample();
        let motion = self.motion.detect();
        let refreshed_at = format_log_timestamp(self.clock.now());

        *self
            .observation
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Observation {
            motion,
            reading: Some(reading),
            refreshed_at: Some(refreshed_at),
        };

        tracing::debug!(
            temperature_c = reading.temperature_c,
            humidity_pct = reading.humidity_pct,
            motion,
            "status refreshed"
        );

        for alert in self.thresholds.evaluate(reading, motion) {
            tracing::info!(%alert, "alert raised");
            self.alerts.publish(alert);
        }

        self.status().await
    }

    /// Switch the light on when motion is detected and it is off.
    ///
    /// Never switches the light off. Returns `true` when the light was
    /// switched on.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] if the log write fails.
    pub async fn auto_light_check(&self) -> Result<bool, HomeError> {
        if !self.motion.detect() {
            return Ok(false);
        }

        let mut devices = self.devices.lock().await;
        let light = devices.get_mut(DeviceId::Light);
        if light.is_on() {
            return Ok(false);
        }
        light.turn_on();

        self.feedback.click();
        tracing::info!("motion detected, light switched on");

        self.log
            .append(
                &ChangeSource::Auto.label(DeviceId::Light),
                PowerState::On.as_str(),
                None,
                None,
            )
            .await?;
        Ok(true)
    }

    /// Apply the schedule rules due at the current local minute.
    ///
    /// # Errors
    ///
    /// See [`check_schedule_at`](Self::check_schedule_at).
    pub async fn check_schedule(&self) -> Result<Vec<ScheduleRule>, HomeError> {
        let now = TimeOfDay::of(self.clock.now());
        self.check_schedule_at(now).await
    }

    /// Apply every rule whose time equals `now` exactly and log it.
    ///
    /// A due rule is applied and logged even when the device is already in
    /// the requested state. Returns the applied rules.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] on the first failed log write; rules
    /// after it are skipped for this cycle.
    #[tracing::instrument(skip(self))]
    pub async fn check_schedule_at(&self, now: TimeOfDay) -> Result<Vec<ScheduleRule>, HomeError> {
        let due: Vec<ScheduleRule> = self
            .schedule
            .iter()
            .filter(|rule| rule.is_due(now))
            .copied()
            .collect();
        if due.is_empty() {
            return Ok(due);
        }

        let mut devices = self.devices.lock().await;
        for rule in &due {
            devices.get_mut(rule.device).set(rule.action);
            tracing::info!(%rule, "schedule rule applied");

            self.log
                .append(
                    &ChangeSource::Scheduled.label(rule.device),
                    rule.action.as_str(),
                    None,
                    None,
                )
                .await?;
        }
        Ok(due)
    }

    /// The `limit` most recent log entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Storage`] when the log cannot be read.
    pub async fn recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>, HomeError> {
        self.log.query(limit).await
    }

    /// Close the log store.
    pub async fn shutdown(&self) {
        self.log.close().await;
        tracing::info!("home shut down");
    }
}

/// Step-by-step builder for [`Home`].
///
/// The store and both random sources are required. The clock defaults to
/// [`LocalClock`], feedback to [`Silent`], alerts to a fresh [`AlertBus`],
/// the schedule to [`ScheduleRule::defaults`].
pub struct HomeBuilder<S> {
    store: Option<S>,
    sensor_random: Option<Arc<dyn RandomSource>>,
    log_random: Option<Arc<dyn RandomSource>>,
    clock: Option<Arc<dyn Clock>>,
    feedback: Option<Arc<dyn Feedback>>,
    alerts: Option<Arc<dyn AlertPublisher>>,
    schedule: Option<Vec<ScheduleRule>>,
    thresholds: AlertThresholds,
}

impl<S> Default for HomeBuilder<S> {
    fn default() -> Self {
        Self {
            store: None,
            sensor_random: None,
            log_random: None,
            clock: None,
            feedback: None,
            alerts: None,
            schedule: None,
            thresholds: AlertThresholds::default(),
        }
    }
}

impl<S: LogStore> HomeBuilder<S> {
    #[must_use]
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Randomness for the motion sensor and the environment sampler.
    #[must_use]
    pub fn sensor_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.sensor_random = Some(random);
        self
    }

    /// Randomness the event log fabricates missing readings from.
    #[must_use]
    pub fn log_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.log_random = Some(random);
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub fn feedback(mut self, feedback: Arc<dyn Feedback>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    #[must_use]
    pub fn alerts(mut self, alerts: Arc<dyn AlertPublisher>) -> Self {
        self.alerts = Some(alerts);
        self
    }

    #[must_use]
    pub fn schedule(mut self, schedule: Vec<ScheduleRule>) -> Self {
        self.schedule = Some(schedule);
        self
    }

    #[must_use]
    pub fn thresholds(mut self, thresholds: AlertThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Consume the builder and produce a [`Home`] with both devices off.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the store or a random
    /// source was not provided.
    pub fn build(self) -> Result<Home<S>, HomeError> {
        let store = self.store.ok_or(ValidationError::MissingField("store"))?;
        let sensor_random = self
            .sensor_random
            .ok_or(ValidationError::MissingField("sensor_random"))?;
        let log_random = self
            .log_random
            .ok_or(ValidationError::MissingField("log_random"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(LocalClock));

        Ok(Home {
            devices: Mutex::new(Devices {
                light: Device::new(DeviceId::Light),
                fan: Device::new(DeviceId::Fan),
            }),
            observation: RwLock::new(Observation::default()),
            log: EventLog::new(store, log_random, Arc::clone(&clock)),
            motion: MotionSensor::new(Arc::clone(&sensor_random)),
            environment: EnvironmentSampler::new(sensor_random),
            alerts: self.alerts.unwrap_or_else(|| Arc::new(AlertBus::default())),
            feedback: self.feedback.unwrap_or_else(|| Arc::new(Silent)),
            clock,
            schedule: self.schedule.unwrap_or_else(ScheduleRule::defaults),
            thresholds: self.thresholds,
        })
    }
}
