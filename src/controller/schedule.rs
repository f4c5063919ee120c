use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::network::{TimingsApi, TimingsError};
use crate::schedule::Schedule;
use crate::settings::Location;

/// Use to look up the prayer times that are currently displayed.
#[async_trait]
pub trait LiveSchedule: Send + Sync {
    /// While holding this guard, the state is read-only, and can be referenced.
    async fn lock_schedule(&self) -> RwLockReadGuard<'_, ScheduleState>;
}

pub struct ScheduleState {
    /// The displayed prayer times, or `None` until the first load completes.
    pub schedule: Option<Schedule>,

    /// Index of the next prayer in the daily order.
    /// Only set while there is a schedule.
    pub next_idx: Option<usize>,

    /// Sequence number of the most recent load. Results of
    /// earlier loads are discarded.
    latest_load: u64,
}

/// Identifies one load of the schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone)]
pub struct ScheduleController {
    state: Arc<RwLock<ScheduleState>>,
    api: Arc<dyn TimingsApi>,
}

impl ScheduleController {
    pub fn init(api: &Arc<dyn TimingsApi>) -> Self {
        let state = ScheduleState {
            schedule: None,
            next_idx: None,
            latest_load: 0,
        };
        ScheduleController {
            state: Arc::new(RwLock::new(state)),
            api: api.clone(),
        }
    }

    /// Start a new load, which outdates every load started before.
    pub async fn begin_load(&self) -> LoadTicket {
        let mut state = self.state.write().await;
        state.latest_load += 1;
        LoadTicket(state.latest_load)
    }

    /// Returns `false` if another load was started after the one
    /// identified by this ticket.
    pub async fn is_latest(&self, ticket: LoadTicket) -> bool {
        self.state.read().await.latest_load == ticket.0
    }

    /// Fetch the prayer times for the given day and location.
    pub async fn fetch(&self, date: NaiveDate, location: &Location) -> Result<Schedule, TimingsError> {
        self.api.timings(date, location).await
    }

    /// Replace the schedule with the result of a load, unless
    /// that load was outdated in the meantime.
    ///
    /// Returns `true` if the schedule was replaced.
    pub async fn set_schedule(&self, ticket: LoadTicket, schedule: Schedule, now: NaiveTime) -> bool {
        let mut state = self.state.write().await;
        if state.latest_load != ticket.0 {
            log::debug!("discard outdated schedule {:?}", ticket);
            return false;
        }
        log::info!("using schedule {:?}", &schedule);
        state.next_idx = Some(schedule.find_next(now));
        state.schedule = Some(schedule);
        true
    }

    /// Recompute the next prayer.
    ///
    /// Returns the new index if it changed, or `None` if it did not,
    /// or if there is no schedule.
    pub async fn update_next(&self, now: NaiveTime) -> Option<usize> {
        let mut state = self.state.write().await;
        let next_idx = state.schedule.as_ref()?.find_next(now);
        if state.next_idx == Some(next_idx) {
            return None;
        }
        state.next_idx = Some(next_idx);
        Some(next_idx)
    }
}

#[async_trait]
impl LiveSchedule for ScheduleController {
    async fn lock_schedule(&self) -> RwLockReadGuard<'_, ScheduleState> {
        self.state.read().await
    }
}
