#![forbid(unsafe_code)]

mod admin;
mod auth;
mod courses;
mod dispatch;
mod learner;
mod lessons;
mod media;
mod notes;
mod views;

pub(crate) use dispatch::dispatch_tool;
