//! What the UI should show, derived from the session in one place.

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// Token entry is shown until a connection is established.
    pub show_token_form: bool,
    /// Repository, branch and pull-request form.
    pub show_pr_form: bool,
    pub can_download: bool,
    pub can_analyze: bool,
    pub show_loading: bool,
}

impl Visibility {
    /// Pure function of the session; call it after every mutation.
    pub fn compute(session: &Session) -> Self {
        let connected = session.is_connected();
        let generated = session.generated.is_some();
        Self {
            show_token_form: !connected,
            show_pr_form: connected && generated,
            can_download: generated,
            can_analyze: session.quality_file.is_some(),
            show_loading: session.loading.is_active(),
        }
    }
}
