//! Form Module - Input Collector & Rendering
//!
//! Pure state/event reducer plus the HTML surface the HTTP host serves.

pub mod format;
pub mod page;
pub mod render;

pub use format::{format_currency, format_score};
pub use page::{render_input_error, render_page};
pub use render::{render, Block, FormEvent, FormState, PanelStatus, View};
