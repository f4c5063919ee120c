/// The widget's entry-point.
///
/// Host messages are read from stdin, one JSON object per line, and
/// rendered widgets are written to stdout. The widget runs until stdin
/// is closed, or it is interrupted.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    use std::sync::Arc;
    use std::time::Duration;

    use dotenv::dotenv;

    use salah::config::Config;
    use salah::constants::VERSION;
    use salah::controller::Controller;
    use salah::message::{forward_lines, HostMessage};
    use salah::network::{AladhanApi, TimingsApi};
    use salah::timer::Ticker;
    use salah::view::{StdoutView, View};

    // Read environment variables from an '.env' file in the working directory.
    // We use these env vars:
    //  - RUST_LOG
    //  - SALAH_CONFIG
    let using_env_file = dotenv().is_ok();

    env_logger::init(); // Use log::* to write to stderr

    if using_env_file {
        log::info!("using .env file")
    }
    log::info!("using salah version '{}'", *VERSION);

    let config = Config::load();
    let tick_period = Duration::from_millis(config.tick_millis);

    let api = Arc::new(AladhanApi::new(&config)) as Arc<dyn TimingsApi>;
    let view = Arc::new(StdoutView::new()) as Arc<dyn View>;

    let controller = Controller::init(config, api, view).await;
    let _ = controller.reload().await;

    let mut ticker = {
        let controller = controller.clone();
        Ticker::start(tick_period, move || {
            let controller = controller.clone();
            async move { controller.on_tick().await }
        })
    };

    let mut messages = forward_lines(tokio::io::stdin());
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    log::info!("running message loop...");
    loop {
        tokio::select! {
            next_msg = messages.recv() => match next_msg {
                Some(line) => match HostMessage::from_json(&line) {
                    Ok(msg) => controller.on_host_message(msg).await,
                    Err(e) => log::debug!("{}: {}", e, line),
                },
                None => {
                    log::info!("host message channel closed");
                    break;
                }
            },
            _ = &mut shutdown => {
                log::info!("interrupted");
                break;
            }
        }
    }

    ticker.stop();

    // A pending read from stdin would keep the runtime from shutting down.
    std::process::exit(0);
}
