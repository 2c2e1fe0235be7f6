//! HTTP route modules for the survey front end.
//!
//! - `survey`: token entry point (`GET`/`POST /s/{token}`)
//! - `terminal`: thank-you and review screens, catch-all redirect
//! - `health`: liveness probe

pub mod health;
pub mod survey;
pub mod terminal;
