//! `TaskDesk`: terminal client for creating caseworker tasks.

pub mod app;
pub mod config;
pub mod confirmation;
pub mod datetime;
pub mod form;
pub mod gateway;
pub mod net;
pub mod session;
pub mod ui;
