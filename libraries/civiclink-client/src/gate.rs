//! Navigation guard for views that need a signed-in user.

use crate::client::CivicClient;
use std::fmt;

/// Top-level views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Landing,
    Login,
    Signup,
    Dashboard,
    ReportIssue,
}

impl View {
    /// Views that require an authenticated session
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Dashboard | Self::ReportIssue)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::ReportIssue => "/report-issue",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Render(View),
    Redirect(View),
}

/// Stateless guard; evaluate it on every navigation.
pub struct AuthGate;

impl AuthGate {
    /// Decide whether `view` may be shown.
    pub fn resolve(view: View, authenticated: bool) -> GateDecision {
        if view.is_protected() && !authenticated {
            GateDecision::Redirect(View::Login)
        } else {
            GateDecision::Render(view)
        }
    }

    /// Decide against the client's current session.
    pub async fn check(client: &CivicClient, view: View) -> GateDecision {
        Self::resolve(view, client.is_authenticated().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_views_redirect_to_login() {
        assert_eq!(
            AuthGate::resolve(View::Dashboard, false),
            GateDecision::Redirect(View::Login)
        );
        assert_eq!(
            AuthGate::resolve(View::ReportIssue, false),
            GateDecision::Redirect(View::Login)
        );
    }

    #[test]
    fn test_authenticated_users_pass() {
        assert_eq!(
            AuthGate::resolve(View::Dashboard, true),
            GateDecision::Render(View::Dashboard)
        );
    }

    #[test]
    fn test_public_views_always_render() {
        for view in [View::Landing, View::Login, View::Signup] {
            assert_eq!(AuthGate::resolve(view, false), GateDecision::Render(view));
        }
    }
}
