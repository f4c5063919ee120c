use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// The surface rendered widgets are displayed on.
#[async_trait]
pub trait View: Send + Sync {
    /// Display a rendered widget, replacing any previous widget
    /// with the same ID.
    async fn show(&self, widget_id: &str, html: String);
}

/// Writes every rendered widget to stdout, as one line of
/// `<widget id>\t<html>`, for the host to pick up.
pub struct StdoutView {
    out: Mutex<Stdout>,
}

impl StdoutView {
    pub fn new() -> Self {
        StdoutView {
            out: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutView {
    fn default() -> Self {
        StdoutView::new()
    }
}

#[async_trait]
impl View for StdoutView {
    async fn show(&self, widget_id: &str, html: String) {
        let line = format!("{}\t{}\n", widget_id, one_line(&html));
        let mut out = self.out.lock().await;
        let res = async {
            out.write_all(line.as_bytes()).await?;
            out.flush().await
        }
        .await;
        if let Err(e) = res {
            log::warn!("failed to write widget '{}': {}", widget_id, e);
        }
    }
}

/// Join the trimmed lines of a template, so that every widget
/// fits on a single line.
fn one_line(html: &str) -> String {
    html.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line() {
        let html = "<div>\n  <span>05:09</span>\n\n</div>\n";
        assert_eq!("<div><span>05:09</span></div>", one_line(html));
    }
}
