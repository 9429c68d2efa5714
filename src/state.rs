use std::sync::Arc;

use crate::config::Config;
use crate::db::UserStore;
use crate::rate_limit::LoginRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub config: Config,
    pub login_limiter: LoginRateLimiter,
}
