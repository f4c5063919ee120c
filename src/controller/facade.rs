use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::controller::*;
use crate::message::HostMessage;
use crate::network::TimingsApi;
use crate::schedule::Schedule;
use crate::settings::{Location, SettingsDiff, SettingsUpdate};
use crate::view::View;

/// This facade hides all specific controllers behind one interface
/// that can react to host messages and timer ticks.
#[derive(Clone)]
pub struct Controller {
    config: Arc<Config>,
    settings: SettingsController,
    schedule: ScheduleController,
    widget: WidgetController,
}

impl Controller {
    /// Displays the initial style and header. Prayer times are not
    /// loaded until calling `reload`.
    pub async fn init(config: Config, api: Arc<dyn TimingsApi>, view: Arc<dyn View>) -> Controller {
        let settings = SettingsController::init(config.initial_settings());
        let live_settings = Arc::new(settings.clone()) as Arc<dyn LiveSettings>;

        let schedule = ScheduleController::init(&api);
        let live_schedule = Arc::new(schedule.clone()) as Arc<dyn LiveSchedule>;

        let widget = WidgetController::init(&view, &live_settings, &live_schedule);

        widget.show_style().await;
        widget.show_header(Local::now().date_naive()).await;

        Controller {
            config: Arc::new(config),
            settings,
            schedule,
            widget,
        }
    }

    pub async fn on_host_message(&self, msg: HostMessage) {
        log::debug!("{:?}", &msg);
        match msg {
            HostMessage::SettingsUpdate(update) => {
                // The load runs in the background, and reports its own outcome.
                if self.apply_settings(update).await.is_some() {
                    log::debug!("reloading prayer times after a location change");
                }
            }
        }
    }

    /// Merge a settings update, and refresh the affected widgets.
    ///
    /// If the location changed, prayer times are fetched in a spawned
    /// task, whose handle is returned.
    pub async fn apply_settings(&self, update: SettingsUpdate) -> Option<JoinHandle<()>> {
        if update.is_empty() {
            log::debug!("ignoring settings update without recognized fields");
            return None;
        }

        let diffs = self.settings.apply(update).await;

        let mut new_header = false;
        let mut new_location = false;
        let mut new_display = false;
        for diff in &diffs {
            match diff {
                SettingsDiff::NewPresentation => self.widget.show_style().await,
                SettingsDiff::NewLocation(_) => {
                    new_header = true;
                    new_location = true;
                }
                SettingsDiff::NewDisplay => {
                    new_header = true;
                    new_display = true;
                }
            }
        }

        if new_header {
            self.widget.show_header(Local::now().date_naive()).await;
        }

        if new_location {
            return Some(self.reload().await);
        }

        if new_display {
            let now = Local::now();
            let _ = self.schedule.update_next(now.time()).await;
            self.widget.show_prayers().await;
            self.widget.show_countdown(&now).await;
        }

        None
    }

    /// Fetch the prayer times for the current location in a new task.
    ///
    /// Every load that is still pending is outdated, and its
    /// result will be discarded.
    pub async fn reload(&self) -> JoinHandle<()> {
        let ticket = self.schedule.begin_load().await;
        let location = self.settings.lock_settings().await.location();

        let controller = self.clone(); // 'self' with 'static lifetime
        tokio::spawn(async move {
            controller.load_schedule(ticket, location).await;
        })
    }

    /// Fetch today's prayer times for the given location, and display them.
    ///
    /// If they cannot be fetched, an error is displayed for a moment,
    /// before falling back to a fixed schedule.
    async fn load_schedule(&self, ticket: LoadTicket, location: Location) {
        self.widget.show_loading(&location).await;

        let today = Local::now().date_naive();
        let schedule = match self.schedule.fetch(today, &location).await {
            Ok(schedule) => schedule,
            Err(e) => {
                if !self.schedule.is_latest(ticket).await {
                    return;
                }
                log::error!("failed to fetch prayer times for '{}': {}", location, e);
                self.widget.show_error().await;
                tokio::time::sleep(Duration::from_millis(self.config.fallback_delay_millis)).await;
                log::warn!("using fallback prayer times");
                Schedule::fallback()
            }
        };

        let now = Local::now();
        if self.schedule.set_schedule(ticket, schedule, now.time()).await {
            self.widget.hide_status().await;
            self.widget.show_prayers().await;
            self.widget.show_countdown(&now).await;
        }
    }

    /// Refresh the date, the next prayer, and the countdown.
    pub async fn tick(&self, now: DateTime<Local>) {
        self.widget.refresh_date(now.date_naive()).await;

        if self.schedule.update_next(now.time()).await.is_some() {
            self.widget.show_prayers().await;
        }
        self.widget.show_countdown(&now).await;
    }

    /// Tick with the current local time.
    pub async fn on_tick(&self) {
        self.tick(Local::now()).await;
    }
}
