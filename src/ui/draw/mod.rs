//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `cards`: Student card layout shared by the list and search results
//! - `components`: Reusable UI components (header, footer, toast, placeholders)
//! - `modals`: Modal dialogs (forms, confirmation, URL input)
//! - `panels`: One panel per tab
//! - `styling`: Color schemes and style constants

mod cards;
mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header, render_toast};
pub use modals::{render_confirm_modal, render_form_modal, render_url_input_modal};
pub use panels::{
    render_data_structures_tab, render_search_tab, render_statistics_tab, render_students_tab,
};
pub use styling::SPINNER;
