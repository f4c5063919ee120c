use serde::Serialize;

use crate::widget::Widget;

/// An overlay that is displayed while prayer times are loading,
/// or when loading them failed.
///
/// # Sending
/// - Send this widget before fetching prayer times.
/// - Hide it once the times are displayed.
#[derive(Serialize, Debug)]
pub struct StatusWidget<'a> {
    pub message: &'a str,
    pub is_error: bool,
}

impl Widget for StatusWidget<'_> {
    const FILE: &'static str = "status.j2";
}
