use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use serde_json::json;

use salah::config::Config;
use salah::controller::Controller;
use salah::message::HostMessage;
use salah::network::{TimingsApi, TimingsError};
use salah::schedule::Schedule;
use salah::settings::{Location, SettingsUpdate};
use salah::view::View;

type Respond = Box<dyn Fn(&Location) -> (Duration, Option<Schedule>) + Send + Sync>;

/// Answers with a delay and a schedule chosen per location,
/// or with an error if there is no schedule.
struct MockApi {
    requests: Mutex<Vec<Location>>,
    respond: Respond,
}

impl MockApi {
    fn new(respond: Respond) -> Arc<MockApi> {
        Arc::new(MockApi {
            requests: Mutex::new(Vec::new()),
            respond,
        })
    }

    fn requests(&self) -> Vec<Location> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TimingsApi for MockApi {
    async fn timings(&self, _date: NaiveDate, location: &Location) -> Result<Schedule, TimingsError> {
        self.requests.lock().unwrap().push(location.clone());
        let (delay, schedule) = (self.respond)(location);
        tokio::time::sleep(delay).await;
        schedule.ok_or(TimingsError::BadStatus(500))
    }
}

/// Records every widget that is shown.
#[derive(Default)]
struct MockView {
    shown: Mutex<Vec<(String, String)>>,
}

impl MockView {
    fn all(&self, widget_id: &str) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == widget_id)
            .map(|(_, html)| html.clone())
            .collect()
    }

    fn last(&self, widget_id: &str) -> String {
        self.all(widget_id).pop().unwrap_or_default()
    }
}

#[async_trait]
impl View for MockView {
    async fn show(&self, widget_id: &str, html: String) {
        self.shown
            .lock()
            .unwrap()
            .push((widget_id.to_string(), html));
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    let local = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap();
    Local.from_local_datetime(&local).earliest().unwrap()
}

fn other_schedule() -> Schedule {
    Schedule::new([hm(6, 49), hm(13, 41), hm(16, 40), hm(19, 9), hm(20, 28)])
}

fn always(schedule: Option<Schedule>) -> Respond {
    Box::new(move |_: &Location| (Duration::from_millis(0), schedule.clone()))
}

/// Creates a controller with the given config, without a fallback delay.
async fn setup(api: &Arc<MockApi>, config_str: &str) -> Result<(Controller, Arc<MockView>)> {
    // Enable logging output
    let _ = env_logger::builder().is_test(true).try_init();

    let mut config = Config::parse_str(config_str)?;
    config.fallback_delay_millis = 0;

    let view = Arc::new(MockView::default());
    let controller = Controller::init(
        config,
        api.clone() as Arc<dyn TimingsApi>,
        view.clone() as Arc<dyn View>,
    )
    .await;
    Ok((controller, view))
}

const SHOW_ALL: &str = r#"
[defaults]
displayCount = "all"
"#;

fn update(settings: serde_json::Value) -> SettingsUpdate {
    SettingsUpdate::from_json(&settings)
}

#[tokio::test]
async fn test_init_renders_style_and_header() -> Result<()> {
    let api = MockApi::new(always(None));
    let (_controller, view) = setup(&api, "").await?;

    assert!(view.last("style").contains("#2d7c47"));
    assert!(view.last("header").contains("Paris, France"));
    assert!(api.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_load_schedule() -> Result<()> {
    let api = MockApi::new(always(Some(other_schedule())));
    let (controller, view) = setup(&api, SHOW_ALL).await?;

    controller.reload().await.await?;

    assert_eq!(
        vec![Location::City {
            city: "Paris".to_string(),
            country: "France".to_string(),
        }],
        api.requests()
    );

    let statuses = view.all("status");
    assert!(statuses[0].contains("Chargement des heures pour Paris, France"));
    assert!(view.last("status").contains("hidden"));

    let list = view.last("prayer_list");
    for time in &["06:49", "13:41", "16:40", "19:09", "20:28"] {
        assert!(list.contains(time), "missing {} in {}", time, list);
    }
    assert!(!list.contains("next-prayer"));
    Ok(())
}

#[tokio::test]
async fn test_fetch_failure_uses_fallback() -> Result<()> {
    let api = MockApi::new(always(None));
    let (controller, view) = setup(&api, SHOW_ALL).await?;

    controller.reload().await.await?;

    let statuses = view.all("status");
    assert!(statuses
        .iter()
        .any(|html| html.contains("Erreur de chargement des heures de prière")));
    assert!(view.last("status").contains("hidden"));

    let list = view.last("prayer_list");
    for time in &["05:30", "12:45", "16:15", "19:30", "21:00"] {
        assert!(list.contains(time), "missing {} in {}", time, list);
    }
    Ok(())
}

#[tokio::test]
async fn test_color_change_does_not_fetch() -> Result<()> {
    let api = MockApi::new(always(Some(other_schedule())));
    let (controller, view) = setup(&api, "").await?;
    controller.reload().await.await?;

    let reload = controller
        .apply_settings(update(json!({ "primaryColor": "#abcdef" })))
        .await;

    assert!(reload.is_none());
    assert_eq!(1, api.requests().len());
    assert!(view.last("style").contains("#abcdef"));
    Ok(())
}

#[tokio::test]
async fn test_unrecognized_settings_change_nothing() -> Result<()> {
    let api = MockApi::new(always(Some(other_schedule())));
    let (controller, view) = setup(&api, "").await?;
    controller.reload().await.await?;
    let shown = view.shown.lock().unwrap().len();

    let reload = controller
        .apply_settings(update(json!({ "city": 42, "wallpaper": "dunes" })))
        .await;

    assert!(reload.is_none());
    assert_eq!(1, api.requests().len());
    assert_eq!(shown, view.shown.lock().unwrap().len());
    Ok(())
}

#[tokio::test]
async fn test_city_change_fetches() -> Result<()> {
    let api = MockApi::new(always(Some(other_schedule())));
    let (controller, view) = setup(&api, "").await?;
    controller.reload().await.await?;

    let reload = controller
        .apply_settings(update(json!({ "city": "Casablanca", "country": "Morocco" })))
        .await;
    reload.expect("expected a reload").await?;

    let requests = api.requests();
    assert_eq!(2, requests.len());
    assert_eq!(
        Location::City {
            city: "Casablanca".to_string(),
            country: "Morocco".to_string(),
        },
        requests[1]
    );
    assert!(view.last("header").contains("Casablanca, Morocco"));
    Ok(())
}

#[tokio::test]
async fn test_geolocation_change_fetches() -> Result<()> {
    let api = MockApi::new(always(Some(other_schedule())));
    let (controller, _view) = setup(&api, "").await?;

    let msg = HostMessage::from_json(
        r#"{
            "type": "SETTINGS_UPDATE",
            "source": "MyWallpaperHost",
            "settings": { "geolocation": { "latitude": 33.5731, "longitude": -7.5898 } }
        }"#,
    )?;
    let HostMessage::SettingsUpdate(settings) = msg;
    controller
        .apply_settings(settings)
        .await
        .expect("expected a reload")
        .await?;

    assert_eq!(
        vec![Location::Coordinates {
            latitude: 33.5731,
            longitude: -7.5898,
        }],
        api.requests()
    );
    Ok(())
}

#[tokio::test]
async fn test_host_message_reloads_in_background() -> Result<()> {
    let api = MockApi::new(always(Some(other_schedule())));
    let (controller, view) = setup(&api, SHOW_ALL).await?;

    let msg = HostMessage::from_json(
        r#"{
            "type": "SETTINGS_UPDATE",
            "source": "MyWallpaperHost",
            "settings": { "city": "Fes", "country": "Morocco" }
        }"#,
    )?;
    controller.on_host_message(msg).await;

    for _ in 0..100 {
        if !view.all("prayer_list").is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(1, api.requests().len());
    assert!(view.last("prayer_list").contains("06:49"));
    Ok(())
}

#[tokio::test]
async fn test_outdated_schedule_is_discarded() -> Result<()> {
    let api = MockApi::new(Box::new(|location: &Location| match location {
        Location::City { city, .. } if city == "Lyon" => {
            (Duration::from_millis(200), Some(other_schedule()))
        }
        _ => (Duration::from_millis(0), Some(Schedule::fallback())),
    }));
    let (controller, view) = setup(&api, SHOW_ALL).await?;

    let slow = controller
        .apply_settings(update(json!({ "city": "Lyon" })))
        .await
        .expect("expected a reload");
    let fast = controller
        .apply_settings(update(json!({ "city": "Rabat", "country": "Morocco" })))
        .await
        .expect("expected a reload");
    fast.await?;
    slow.await?;

    assert_eq!(2, api.requests().len());
    let list = view.last("prayer_list");
    assert!(list.contains("05:30"));
    assert!(!list.contains("06:49"));
    assert_eq!(1, view.all("prayer_list").len());
    Ok(())
}

#[tokio::test]
async fn test_tick_without_schedule() -> Result<()> {
    let api = MockApi::new(always(None));
    let (controller, view) = setup(&api, "").await?;

    controller.tick(at(11, 42, 57)).await;

    assert!(view.all("countdown").is_empty());
    assert!(view.all("prayer_list").is_empty());
    Ok(())
}

#[tokio::test]
async fn test_tick_updates_countdown() -> Result<()> {
    let api = MockApi::new(always(Some(Schedule::fallback())));
    let (controller, view) = setup(&api, "").await?;
    controller.reload().await.await?;

    controller.tick(at(11, 42, 57)).await;
    assert_eq!(r#"<div id="countdown" class="next-prayer-countdown">01:02:03</div>"#, view.last("countdown").trim());
    assert!(view.last("next_prayer").contains("Dhohr dans"));

    controller.tick(at(12, 39, 51)).await;
    assert!(view.last("countdown").contains("05:09"));

    // Dhuhr has passed, so Asr is next
    controller.tick(at(12, 45, 0)).await;
    assert!(view.last("next_prayer").contains("Asr dans"));
    assert!(view.last("countdown").contains("03:30:00"));

    // After Isha, the countdown continues until Fajr of the next day
    controller.tick(at(22, 0, 0)).await;
    assert!(view.last("next_prayer").contains("Fadjr dans"));
    assert!(view.last("countdown").contains("07:30:00"));
    Ok(())
}

#[tokio::test]
async fn test_display_count_follows_next_prayer() -> Result<()> {
    let api = MockApi::new(always(Some(Schedule::fallback())));
    let (controller, view) = setup(&api, "").await?;
    controller.reload().await.await?;

    controller.tick(at(20, 0, 0)).await;
    let list = view.last("prayer_list");
    assert!(list.contains("Icha"));
    assert!(list.contains("Fadjr"));
    assert!(!list.contains("Dhohr"));
    assert_eq!(1, list.matches("next-prayer").count());

    controller
        .apply_settings(update(json!({ "displayCount": "remaining" })))
        .await;
    controller.tick(at(20, 0, 0)).await;
    let list = view.last("prayer_list");
    assert!(list.contains("Icha"));
    assert!(!list.contains("Fadjr"));
    Ok(())
}

#[tokio::test]
async fn test_hide_countdown() -> Result<()> {
    let api = MockApi::new(always(Some(Schedule::fallback())));
    let (controller, view) = setup(&api, "").await?;
    controller.reload().await.await?;

    let reload = controller
        .apply_settings(update(json!({ "showCountdown": false })))
        .await;
    assert!(reload.is_none());
    assert!(view.last("countdown").contains("hidden"));
    assert!(view.last("next_prayer").contains("hidden"));

    controller.tick(at(11, 42, 57)).await;
    assert!(view.last("countdown").contains("hidden"));
    assert!(!view
        .all("countdown")
        .iter()
        .any(|html| html.contains("01:02:03")));
    Ok(())
}
