use serde::Serialize;

use crate::widget::Widget;

/// Custom properties that style every other widget.
///
/// # Sending
/// - Send this widget at startup.
/// - Has to be re-sent whenever the color, font or theme changes.
#[derive(Serialize, Debug)]
pub struct StyleWidget<'a> {
    /// A CSS color, f.e. "#2d7c47".
    pub primary_color: &'a str,

    /// A CSS font family, or `None` to keep the host's font.
    pub font_family: Option<&'a str>,

    /// The theme name, applied as a class on the widget root.
    pub theme: &'a str,
}

impl Widget for StyleWidget<'_> {
    const FILE: &'static str = "style.j2";
}
