use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::service::auth::DiscordAuthService;

impl<'a> DiscordAuthService<'a> {
    /// Generates the Discord authorize URL for the dashboard login.
    ///
    /// Requests the `identify` and `guilds` scopes.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Authorize URL and the `state` the callback must echo
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("guilds".to_string()))
            .url()
    }
}
