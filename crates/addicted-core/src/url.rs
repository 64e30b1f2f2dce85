//! URL helper functions for addic7ed.com
//!
//! Provides path construction for the episode listing endpoint and joining
//! of relative links onto the site root.

/// Login form endpoint
pub const LOGIN_PATH: &str = "/dologin.php";

/// Sentinel path the site redirects to when the daily download quota is spent
pub const DOWNLOAD_EXCEEDED_PATH: &str = "/downloadexceeded.php";

/// Builds the episode listing path for a show/season/episode combination
///
/// Season and episode are formatted as plain decimal with no padding, the
/// way the site expects them.
///
/// # Example
/// ```
/// use addicted_core::url::build_episode_path;
/// let path = build_episode_path("1234", 2, 5);
/// assert_eq!(path, "/re_episode.php?ep=1234-2x5");
/// ```
pub fn build_episode_path(show_id: &str, season: u32, episode: u32) -> String {
    format!(
        "/re_episode.php?ep={}-{}x{}",
        urlencoding::encode(show_id),
        season,
        episode
    )
}

/// Joins a relative path onto the site root
///
/// Tolerates links with or without a leading slash, as found in the
/// subtitle listing markup.
///
/// # Example
/// ```
/// use addicted_core::url::join;
/// let url = join("https://www.addic7ed.com", "/original/123/0");
/// assert_eq!(url, "https://www.addic7ed.com/original/123/0");
/// ```
pub fn join(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
