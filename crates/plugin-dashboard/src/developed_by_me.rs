use crate::api::{PluginApi, PluginSummary};
use crate::notify::{Notice, Notifier};

/// Card ownership tag for plugins the user developed.
pub const BELONG_DEVELOPED_BY_ME: u8 = 3;

/// One plugin card to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginCard<'a> {
    /// The listed plugin.
    pub plugin: &'a PluginSummary,
    /// Ownership tag the card renders with.
    pub belong: u8,
}

/// What a [`DevelopedByMe::refresh`] call ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list was replaced; carries the new plugin count.
    Loaded(usize),
    /// The API answered with a non-zero code.
    Rejected,
    /// The request itself failed.
    Failed,
}

/// State of the "developed by me" plugin list.
///
/// Starts empty (the page shows its "no data" placeholder) until a refresh succeeds. Failed
/// refreshes keep whatever was listed before and tell the user through the [`Notifier`].
#[derive(Debug, Clone, Default)]
pub struct DevelopedByMe {
    plugins: Vec<PluginSummary>,
}

impl DevelopedByMe {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the list again. Failures are reported through `notifier` and leave the list as is.
    pub async fn refresh<A, N>(&mut self, api: &A, notifier: &N) -> RefreshOutcome
    where
        A: PluginApi + ?Sized,
        N: Notifier + ?Sized,
    {
        match api.my_plugins().await {
            Ok(res) if res.is_ok() => {
                self.plugins = res.data.unwrap_or_default();
                RefreshOutcome::Loaded(self.plugins.len())
            }
            Ok(res) => {
                let message = res
                    .error_text()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("request failed (code {})", res.code));
                tracing::debug!(code = res.code, %message, "plugin list rejected");
                notifier.notify(Notice::error(message));
                RefreshOutcome::Rejected
            }
            Err(error) => {
                tracing::debug!(%error, "plugin list request failed");
                notifier.notify(Notice::error(error.to_string()));
                RefreshOutcome::Failed
            }
        }
    }

    /// Plugins from the last successful refresh.
    pub fn plugins(&self) -> &[PluginSummary] {
        &self.plugins
    }

    /// `true` when the page should show the "no data" placeholder.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Cards for the current list, all tagged [`BELONG_DEVELOPED_BY_ME`].
    pub fn cards(&self) -> impl Iterator<Item = PluginCard<'_>> {
        self.plugins.iter().map(|plugin| PluginCard {
            plugin,
            belong: BELONG_DEVELOPED_BY_ME,
        })
    }
}
