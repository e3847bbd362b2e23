//! User agent selection and standard request headers

use rand::seq::SliceRandom;

/// Pick a user agent from the configured pool, or `None` if it is empty
pub fn pick_user_agent(pool: &[String]) -> Option<&str> {
    pool.choose(&mut rand::thread_rng()).map(String::as_str)
}

/// Standard accept header for HTML requests
pub fn accept_html() -> &'static str {
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
}
