//! Response body formatting and display helpers.
//!
//! [`format_pretty`] and [`is_structured`] are pure and safe to call on any
//! text; the presentation layer uses them to decide how to show a body.

pub mod display;
pub mod json;

pub use display::{
    display_body, format_elapsed, format_headers, reason_phrase, status_text, summarize, StatusClass,
};
pub use json::{format_pretty, is_structured};
