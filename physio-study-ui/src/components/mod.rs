//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod file_manager;
pub mod loading;
pub mod nav;
pub mod response_panel;
pub mod toast;

pub use file_manager::FileManager;
pub use loading::InlineLoading;
pub use nav::Nav;
pub use response_panel::ResponsePanel;
pub use toast::Toast;
