use serde::Serialize;

use crate::widget::Widget;

/// A header with the location that prayer times are displayed for,
/// and today's date.
///
/// # Sending
/// - Send this widget whenever the location changes.
/// - Send it whenever the date changes, or is toggled.
#[derive(Serialize, Debug)]
pub struct HeaderWidget<'a> {
    /// f.e. "Paris, France"
    pub location: &'a str,

    /// f.e. "lundi 19 octobre 2026", or `None` if the date is not shown.
    pub date: Option<&'a str>,
}

impl Widget for HeaderWidget<'_> {
    const FILE: &'static str = "header.j2";
}
