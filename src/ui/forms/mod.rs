//! Form rendering module
//!
//! - `field_renderer`: one field with its error messages
//! - `form_view`: a whole form with its submit button

mod field_renderer;
mod form_view;

pub use form_view::draw_form;
