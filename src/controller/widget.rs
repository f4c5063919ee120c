use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};
use tokio::sync::Mutex;

use crate::controller::*;
use crate::prayer::Prayer;
use crate::schedule::{format_countdown, select_display_set, DisplayMode};
use crate::settings::Location;
use crate::view::View;
use crate::widget::*;

/// This controller collects settings and schedule data,
/// to build and show widgets.
#[derive(Clone)]
pub struct WidgetController {
    state: Arc<Mutex<WidgetState>>,
    view: Arc<dyn View>,
    live_settings: Arc<dyn LiveSettings>,
    live_schedule: Arc<dyn LiveSchedule>,
}

struct WidgetState {
    /// The date currently displayed in the header.
    shown_date: Option<NaiveDate>,
}

impl WidgetController {
    pub fn init(
        view: &Arc<dyn View>,
        live_settings: &Arc<dyn LiveSettings>,
        live_schedule: &Arc<dyn LiveSchedule>,
    ) -> Self {
        WidgetController {
            state: Arc::new(Mutex::new(WidgetState { shown_date: None })),
            view: view.clone(),
            live_settings: live_settings.clone(),
            live_schedule: live_schedule.clone(),
        }
    }

    /// Apply the color, font and theme.
    pub async fn show_style(&self) {
        let settings = self.live_settings.lock_settings().await;
        let widget = StyleWidget {
            primary_color: &settings.primary_color,
            font_family: settings.font_family.as_deref(),
            theme: &settings.theme,
        };
        self.send(&widget).await;
    }

    /// Display the location, and today's date if enabled.
    pub async fn show_header(&self, today: NaiveDate) {
        let mut state = self.state.lock().await;
        let settings = self.live_settings.lock_settings().await;

        let location = settings.location().to_string();
        let date = if settings.show_current_time {
            Some(
                today
                    .format_localized("%A %-d %B %Y", settings.language.locale())
                    .to_string(),
            )
        } else {
            None
        };
        let widget = HeaderWidget {
            location: &location,
            date: date.as_deref(),
        };
        self.send(&widget).await;
        state.shown_date = Some(today);
    }

    /// Update the header if the date changed since it was last displayed.
    pub async fn refresh_date(&self, today: NaiveDate) {
        let shown_date = self.state.lock().await.shown_date;
        if shown_date != Some(today) {
            self.show_header(today).await;
        }
    }

    /// Signal that prayer times are being fetched.
    pub async fn show_loading(&self, location: &Location) {
        let settings = self.live_settings.lock_settings().await;
        let message = settings.language.loading_text(&location.to_string());
        let widget = StatusWidget {
            message: &message,
            is_error: false,
        };
        self.send(&widget).await;
    }

    /// Signal that prayer times could not be fetched.
    pub async fn show_error(&self) {
        let settings = self.live_settings.lock_settings().await;
        let widget = StatusWidget {
            message: settings.language.error_text(),
            is_error: true,
        };
        self.send(&widget).await;
    }

    pub async fn hide_status(&self) {
        self.hide::<StatusWidget>().await;
    }

    /// Display the selected prayers, and the name of the next prayer.
    ///
    /// Does nothing until there is a schedule.
    pub async fn show_prayers(&self) {
        let settings = self.live_settings.lock_settings().await;
        let schedule_state = self.live_schedule.lock_schedule().await;

        let (schedule, next_idx) = match (&schedule_state.schedule, schedule_state.next_idx) {
            (Some(schedule), Some(next_idx)) => (schedule, next_idx),
            _ => return,
        };

        let lang = settings.language;
        // A full day is listed in daily order, without a highlight.
        let highlight_next = settings.display_mode != DisplayMode::All;
        let entries = select_display_set(settings.display_mode, next_idx)
            .into_iter()
            .map(|prayer| PrayerEntry {
                icon: prayer.icon(),
                name: prayer.name(lang),
                secondary_name: Some(prayer.name(lang.secondary()))
                    .filter(|_| settings.show_secondary_name),
                native_name: Some(prayer.native_name()).filter(|_| settings.show_native_name),
                time: schedule.time(prayer),
                is_next: highlight_next && prayer.index() == next_idx,
            })
            .collect();
        self.send(&PrayerListWidget { entries }).await;

        if settings.show_countdown {
            let label = lang.next_prayer_text(Prayer::ALL[next_idx]);
            self.send(&NextPrayerWidget { label: &label }).await;
        } else {
            self.hide::<NextPrayerWidget>().await;
            self.hide::<CountdownWidget>().await;
        }
    }

    /// Display the time until the next prayer, if enabled.
    ///
    /// Does nothing until there is a schedule.
    pub async fn show_countdown(&self, now: &DateTime<Local>) {
        let settings = self.live_settings.lock_settings().await;
        if !settings.show_countdown {
            return;
        }

        let schedule_state = self.live_schedule.lock_schedule().await;
        if let (Some(schedule), Some(next_idx)) = (&schedule_state.schedule, schedule_state.next_idx)
        {
            let countdown = format_countdown(schedule.countdown(next_idx, now));
            self.send(&CountdownWidget {
                countdown: &countdown,
            })
            .await;
        }
    }

    async fn send<W: Widget>(&self, widget: &W) {
        self.view.show(widget_id(W::ID), widget.render()).await;
    }

    async fn hide<W: Widget>(&self) {
        self.view.show(widget_id(W::ID), W::hidden()).await;
    }
}
