//! Runtime settings shared by the server and the CLI

use crate::models::DuplicatePolicy;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// User the unparameterized `/favorite/...` routes act on.
pub const DEFAULT_FAVORITE_USER_ID: i32 = 2;

/// Favorite endpoint settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoritesConfig {
    /// User targeted by `/favorite/{kind}/{id}` routes
    pub default_user_id: i32,
    /// Handling of repeated favorites
    pub duplicates: DuplicatePolicy,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            default_user_id: DEFAULT_FAVORITE_USER_ID,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

/// Rewrite a `postgres://` scheme to `postgresql://`.
///
/// Any other URL is returned unchanged.
///
/// ```
/// use starfav_server::config::normalize_database_url;
///
/// assert_eq!(
///     normalize_database_url("postgres://db/starfav"),
///     "postgresql://db/starfav"
/// );
/// ```
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{}", rest),
        None => url.to_owned(),
    }
}
