//! `plugin-dashboard` - view-model logic for the plugin dashboard's "developed by me" page.
//!
//! Rendering, the HTTP client and the toast layer live elsewhere; this crate only sees them
//! through [`PluginApi`] and [`Notifier`].

#![warn(missing_docs)]

mod api;
mod developed_by_me;
mod notify;

pub use api::{
    ApiError, ApiResponse, CODE_OK, PluginApi, PluginId, PluginSummary, decode_plugin_list,
};
pub use developed_by_me::{BELONG_DEVELOPED_BY_ME, DevelopedByMe, PluginCard, RefreshOutcome};
pub use notify::{Notice, Notifier, Severity};
