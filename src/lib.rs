pub mod config;
pub mod constants;
pub mod controller;
pub mod message;
pub mod network;
pub mod prayer;
pub mod schedule;
pub mod settings;
pub mod timer;
pub mod view;
pub mod widget;
