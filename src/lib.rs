//! 核心计算逻辑独立成库，CLI 之外也便于后续 GUI 或服务端复用。

pub mod animation;
pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod hydraulics;
pub mod i18n;
pub mod numeric;
pub mod report;
pub mod ui_cli;
pub mod velocity;
