//! Regform - schema-driven terminal forms
//!
//! Forms are declared as a [`schema::Schema`], checked by the pure
//! [`validator::validate`], driven by a [`state::FormController`] and
//! handed to an injected [`submit::SubmitEffect`] once accepted.

pub mod app;
pub mod config;
pub mod error;
pub mod forms;
pub mod platform;
pub mod schema;
pub mod state;
pub mod submit;
pub mod ui;
pub mod validator;
