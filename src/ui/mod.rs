//! Presentation layer - pure functions from state to output

pub mod markup;
pub mod view;

pub use markup::{render_html, render_text};
pub use view::{BookCard, View, render};
