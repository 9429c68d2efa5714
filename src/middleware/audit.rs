use crate::models::{Role, UserId};

/// Emit an audit event on the `audit` target. Called explicitly in handlers
/// after account mutations and authentication outcomes.
pub fn log_event(actor: Option<UserId>, action: &str, subject: Option<UserId>, role: Option<Role>) {
    tracing::info!(
        target: "audit",
        actor = ?actor,
        action,
        subject = ?subject,
        role = role.map(|r| r.as_str()),
        "audit event"
    );
}
