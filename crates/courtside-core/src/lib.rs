// Library root: the data-shaping core of the dashboard.
//
// Everything here is free of UI-framework types so the controller can be
// driven by the terminal shell, by tests, or by any other event host.

pub mod chart;
pub mod client;
pub mod config;
pub mod controller;
pub mod directory;
pub mod error;
pub mod model;
pub mod provider;
