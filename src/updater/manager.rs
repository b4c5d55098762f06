//! Update manager implementation
//!
//! `UpdateManager` owns every piece of update-check state. The host calls
//! [`UpdateManager::tick`] from its own loop (once per editor frame, say) and
//! keeps calling while it returns `true`. The HTTP request runs in the
//! background; its result is picked up by a later tick on the caller's thread.

use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info, warn};
use rust_i18n::t;
use semver::Version;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use super::config::UpdateCheckConfig;
use super::error::{Result, UpdateError};
use super::message::parse_server_message;
use super::notifier::{LogNotifier, UpdateNotifier};
use super::types::{HostActivity, VersionInfo};
use super::version::parse_version;
use crate::constants::*;
use crate::db::PrefStore;
use crate::http::{HttpClient, HttpResult};
use crate::libs::clock::{
    add_days_saturating, format_timestamp, parse_timestamp, Clock, SystemClock,
};
use crate::libs::pending::{Pending, PollState};

/// Starts a version request and hands back a handle to poll.
pub trait VersionFetcher: Send + Sync {
    fn fetch(&self, url: Url) -> Pending<HttpResult<String>>;
}

impl VersionFetcher for HttpClient {
    fn fetch(&self, url: Url) -> Pending<HttpResult<String>> {
        self.spawn_get_text(url)
    }
}

/// Manages the update check process
pub struct UpdateManager {
    config: UpdateCheckConfig,
    app_version: Version,
    store: Arc<dyn PrefStore>,
    fetcher: Arc<dyn VersionFetcher>,
    notifier: Arc<dyn UpdateNotifier>,
    clock: Arc<dyn Clock>,

    in_flight: Option<Pending<HttpResult<String>>>,
    force_next_check: bool,

    last_update_check: Option<DateTime<Utc>>,
    latest_version: Option<Version>,
    latest_beta_version: Option<Version>,
    latest_version_description: Option<String>,
    server_data: HashMap<String, String>,
    has_parsed_server_message: bool,
}

impl UpdateManager {
    /// Creates a new UpdateManager instance
    ///
    /// # Arguments
    /// * `config` - Schedule, endpoint and version settings
    /// * `store` - Where the last check time and server message persist
    /// * `fetcher` - Starts the version requests, usually an `HttpClient`
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidConfig` if the schedule settings fail
    /// `UpdateCheckConfig::validate`, and `UpdateError::VersionParseError` if
    /// `config.app_version` is not a version.
    pub fn new(
        config: UpdateCheckConfig,
        store: Arc<dyn PrefStore>,
        fetcher: Arc<dyn VersionFetcher>,
    ) -> Result<Self> {
        config.validate()?;
        let app_version = parse_version(&config.app_version)?;
        Ok(Self {
            config,
            app_version,
            store,
            fetcher,
            notifier: Arc::new(LogNotifier),
            clock: Arc::new(SystemClock),
            in_flight: None,
            force_next_check: false,
            last_update_check: None,
            latest_version: None,
            latest_beta_version: None,
            latest_version_description: None,
            server_data: default_server_data(),
            has_parsed_server_message: false,
        })
    }

    /// Replaces the notification target (the log by default).
    pub fn with_notifier(mut self, notifier: Arc<dyn UpdateNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replaces the clock (the system clock by default).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &UpdateCheckConfig {
        &self.config
    }

    /// The version of the package this manager checks updates for.
    pub fn app_version(&self) -> &Version {
        &self.app_version
    }

    /// Whether a version request is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    // =================================================
    // Cached state
    // =================================================

    /// Time of the last check attempt.
    ///
    /// The persisted value is parsed once and cached. An unreadable value is
    /// replaced by the current time.
    pub fn last_update_check(&mut self) -> DateTime<Utc> {
        if let Some(last) = self.last_update_check {
            return last;
        }

        let raw = self.store.get_config(CFG_LAST_UPDATE_CHECK, DEFAULT_PREF_DATE);
        match parse_timestamp(&raw) {
            Ok(last) => {
                self.last_update_check = Some(last);
                last
            }
            Err(e) => {
                let now = self.clock.now();
                self.set_last_update_check(now);
                warn!(
                    "{}",
                    t!(
                        "updater.invalid_last_check",
                        value = raw.as_str(),
                        error = e.to_string()
                    )
                );
                now
            }
        }
    }

    fn set_last_update_check(&mut self, when: DateTime<Utc>) {
        self.last_update_check = Some(when);
        self.store
            .set_config(CFG_LAST_UPDATE_CHECK, &format_timestamp(when));
    }

    /// Latest stable version announced by the server, or the app's own version.
    pub fn latest_version(&mut self) -> Version {
        self.refresh_server_message();
        self.current_latest_version()
    }

    /// Latest beta version announced by the server, or the app's own version.
    pub fn latest_beta_version(&mut self) -> Version {
        self.refresh_server_message();
        self.latest_beta_version
            .clone()
            .unwrap_or_else(|| self.app_version.clone())
    }

    /// Release notes of the latest version, empty when unknown.
    pub fn latest_version_description(&mut self) -> String {
        self.refresh_server_message();
        self.latest_version_description.clone().unwrap_or_default()
    }

    /// Looks up a server-provided URL by tag.
    ///
    /// # Arguments
    /// * `tag` - Key without the `URL:` prefix, e.g. `"documentation"` or `"changelog"`
    ///
    /// # Returns
    /// The URL, or an empty string for unknown tags
    pub fn get_url(&mut self, tag: &str) -> String {
        self.refresh_server_message();
        self.server_data
            .get(&format!("{}{}", SERVER_URL_KEY_PREFIX, tag))
            .cloned()
            .unwrap_or_default()
    }

    pub fn documentation_url(&mut self) -> String {
        self.get_url("documentation")
    }

    /// Forgets everything cached in memory. The next read goes back to the store.
    pub fn reset_cache(&mut self) {
        self.last_update_check = None;
        self.latest_version = None;
        self.latest_beta_version = None;
        self.latest_version_description = None;
        self.server_data = default_server_data();
        self.has_parsed_server_message = false;
    }

    fn current_latest_version(&self) -> Version {
        self.latest_version
            .clone()
            .unwrap_or_else(|| self.app_version.clone())
    }

    /// Parses the persisted server message the first time derived state is read.
    fn refresh_server_message(&mut self) {
        if self.has_parsed_server_message {
            return;
        }

        let server_message = self.store.get_config(CFG_SERVER_MESSAGE, "");
        if !server_message.is_empty() {
            self.parse_server_message(&server_message);
            self.show_update_notification_if_relevant();
        }
    }

    // =================================================
    // Poll loop
    // =================================================

    /// Makes the next `tick` issue a request whatever the last check time.
    pub fn check_for_updates_now(&mut self) {
        let rewound = self.clock.now() - Duration::days(FORCE_CHECK_REWIND_DAYS);
        self.set_last_update_check(rewound);
        self.force_next_check = true;
        info!("Update check requested");
    }

    /// Runs one poll step.
    ///
    /// Collects a finished request, then issues a new one if the schedule says
    /// a check is due and nothing is in flight.
    ///
    /// # Arguments
    /// * `activity` - What the host is doing; selects the schedule offset
    ///
    /// # Returns
    /// Whether a request is pending or due soon. The host can stop ticking
    /// once this is `false`.
    pub fn tick(&mut self, activity: HostActivity) -> bool {
        if let Some(pending) = self.in_flight.as_mut() {
            match pending.poll() {
                PollState::Pending => {}
                PollState::Ready(Ok(body)) => {
                    self.in_flight = None;
                    self.update_check_completed(&body);
                }
                PollState::Ready(Err(e)) => {
                    self.in_flight = None;
                    warn!(
                        "{}",
                        t!("updater.check_failed", error = UpdateError::from(e).to_string())
                    );
                    return false;
                }
                PollState::Abandoned => {
                    self.in_flight = None;
                    warn!(
                        "{}",
                        t!(
                            "updater.check_failed",
                            error = UpdateError::RequestAbandoned.to_string()
                        )
                    );
                    return false;
                }
            }
        }

        let minutes_until_update = self.minutes_until_next_check(activity);
        if self.in_flight.is_none() && (minutes_until_update < 0.0 || self.force_next_check) {
            self.issue_request();
        }

        self.in_flight.is_some() || minutes_until_update < self.config.due_soon_minutes as f64
    }

    /// Minutes until the next scheduled check; negative when overdue.
    ///
    /// A schedule that runs past the representable date range counts as
    /// never due and yields `f64::INFINITY`.
    pub fn minutes_until_next_check(&mut self, activity: HostActivity) -> f64 {
        let offset_minutes = match activity {
            HostActivity::Idle => self.config.idle_offset_minutes,
            HostActivity::Simulating => self.config.simulating_offset_minutes,
        };
        let last_check = self.last_update_check();
        let next_check = Duration::try_minutes(offset_minutes)
            .and_then(|offset| self.config.check_interval().checked_add(&offset))
            .and_then(|delay| last_check.checked_add_signed(delay));

        match next_check {
            Some(next_check) => {
                (next_check - self.clock.now()).num_milliseconds() as f64 / 60_000.0
            }
            None => {
                warn!("Next update check after {} is out of range", last_check);
                f64::INFINITY
            }
        }
    }

    /// Starts a version request. The last check time is updated right away,
    /// whether or not the request later succeeds.
    pub fn issue_request(&mut self) {
        if self.in_flight.is_some() {
            debug!("Update request already in flight");
            return;
        }

        self.force_next_check = false;
        match self.build_query_url() {
            Ok(url) => {
                debug!("Checking for updates: {}", url);
                self.in_flight = Some(self.fetcher.fetch(url));
            }
            Err(e) => error!("{}", e),
        }
        let now = self.clock.now();
        self.set_last_update_check(now);
    }

    /// The version query sent to the update server.
    ///
    /// # Returns
    /// `update_url` with `v`, `pro`, `check` and `unityversion` appended
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::InvalidUrl` if `update_url` does not parse.
    pub fn build_query_url(&self) -> Result<Url> {
        let params = [
            ("v", self.app_version.to_string()),
            ("pro", "0".to_string()),
            ("check", self.config.check_rate_param()),
            ("unityversion", self.config.host_version.clone()),
        ];
        Url::parse_with_params(&self.config.update_url, &params)
            .map_err(|e| UpdateError::InvalidUrl(self.config.update_url.clone(), e.to_string()))
    }

    fn update_check_completed(&mut self, result: &str) {
        self.store.set_config(CFG_SERVER_MESSAGE, result);
        self.parse_server_message(result);
        self.show_update_notification_if_relevant();
    }

    fn parse_server_message(&mut self, result: &str) {
        let Some(message) = parse_server_message(result) else {
            return;
        };

        self.has_parsed_server_message = true;
        self.latest_version_description = Some(message.description);
        self.server_data.extend(message.entries);

        if let Some(version) = self.server_version(SERVER_KEY_BRANCH_VERSION) {
            self.latest_version = Some(version);
        }
        if let Some(version) = self.server_version(SERVER_KEY_BETA_VERSION) {
            self.latest_beta_version = Some(version);
        }
    }

    fn server_version(&self, key: &str) -> Option<Version> {
        let Some(raw) = self.server_data.get(key) else {
            warn!("{}", t!("updater.missing_version", key = key));
            return None;
        };
        match parse_version(raw) {
            Ok(version) => Some(version),
            Err(e) => {
                warn!(
                    "{}",
                    t!("updater.invalid_version", key = key, error = e.to_string())
                );
                None
            }
        }
    }

    // =================================================
    // Notification gate
    // =================================================

    fn show_update_notification_if_relevant(&mut self) {
        let latest = self.current_latest_version();
        let now = self.clock.now();

        let remind_raw = self
            .store
            .get_config(CFG_REMIND_UPDATE_VERSION, DEFAULT_REMIND_VERSION);
        match parse_version(&remind_raw) {
            Ok(remind_version) => {
                let remind_date = parse_timestamp(
                    &self
                        .store
                        .get_config(CFG_REMIND_UPDATE_DATE, DEFAULT_PREF_DATE),
                )
                .ok();
                match remind_date {
                    Some(remind_date) if latest == remind_version => {
                        if now < remind_date {
                            debug!("Update {} snoozed until {}", latest, remind_date);
                            return;
                        }
                    }
                    _ => {
                        self.store.delete_config(CFG_REMIND_UPDATE_DATE);
                        self.store.delete_config(CFG_REMIND_UPDATE_VERSION);
                    }
                }
            }
            Err(e) => error!("{}", t!("updater.invalid_remind", error = e.to_string())),
        }

        let skip_raw = self
            .store
            .get_config(CFG_SKIP_UP_TO_VERSION, &self.app_version.to_string());
        let skip_version = parse_version(&skip_raw).unwrap_or_else(|e| {
            warn!("{}", t!("updater.invalid_skip", error = e.to_string()));
            self.app_version.clone()
        });

        if latest > skip_version && latest > self.app_version {
            self.store.delete_config(CFG_SKIP_UP_TO_VERSION);
            self.store.delete_config(CFG_REMIND_UPDATE_DATE);
            self.store.delete_config(CFG_REMIND_UPDATE_VERSION);

            let version_info = VersionInfo {
                version: latest.to_string(),
                notes: self.latest_version_description.clone().unwrap_or_default(),
            };
            info!("New version available: {}", version_info.version);
            self.notifier.notify_update_available(&version_info);
        }
    }

    /// Snoozes the notification for the current latest version.
    ///
    /// # Arguments
    /// * `days` - Length of the snooze. Values past the year 9999 snooze until
    ///   then; negative values end any snooze right away.
    pub fn remind_me_later(&mut self, days: i64) {
        let latest = self.latest_version();
        let now = self.clock.now();
        let until = add_days_saturating(now, days);
        self.store
            .set_config(CFG_REMIND_UPDATE_VERSION, &latest.to_string());
        self.store
            .set_config(CFG_REMIND_UPDATE_DATE, &format_timestamp(until));
        info!(
            "Update {} snoozed for {}",
            latest,
            humantime::format_duration((until - now).to_std().unwrap_or_default())
        );
    }

    /// Suppresses notifications for every version up to and including `version`.
    pub fn skip_version(&mut self, version: &Version) {
        self.store
            .set_config(CFG_SKIP_UP_TO_VERSION, &version.to_string());
        info!("Skipping updates up to {}", version);
    }
}

fn default_server_data() -> HashMap<String, String> {
    DEFAULT_SERVER_DATA
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
