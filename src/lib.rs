pub mod app;
pub mod client;
pub mod config;
pub mod humanize;
pub mod observability;
pub mod session;
pub mod storage;
pub mod tools;
pub mod widget;
