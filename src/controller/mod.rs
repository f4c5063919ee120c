pub use facade::Controller;
pub(self) use schedule::*;
pub(self) use settings::*;
pub(self) use widget::*;

mod facade;
mod schedule;
mod settings;
mod widget;
