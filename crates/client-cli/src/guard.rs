//! Route guard: decides, per navigation, whether a view is reachable
//! given current session state.

use crate::session::Session;

/// The client-side route surface. `Home`, `Login`, `CreatePassword` and
/// the meeting-call shell are public; everything else requires an
/// authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    CreatePassword,
    MeetingCall(String),
    Dashboard,
    Meetings,
    Recordings,
    Notifications,
    Calendar,
    ActionItems,
    Reminders,
    Participants,
    Chats,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::CreatePassword => "/create-password".to_string(),
            Route::MeetingCall(meeting_id) => format!("/meeting-call/{meeting_id}"),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Meetings => "/meetings".to_string(),
            Route::Recordings => "/recordings".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Calendar => "/calendar".to_string(),
            Route::ActionItems => "/action-items".to_string(),
            Route::Reminders => "/reminders".to_string(),
            Route::Participants => "/participants".to_string(),
            Route::Chats => "/chats".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Route::Home | Route::Login | Route::CreatePassword | Route::MeetingCall(_)
        )
    }

    /// Every protected route, for guard checks that iterate the surface.
    pub fn protected() -> [Route; 9] {
        [
            Route::Dashboard,
            Route::Meetings,
            Route::Recordings,
            Route::Notifications,
            Route::Calendar,
            Route::ActionItems,
            Route::Reminders,
            Route::Participants,
            Route::Chats,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Denied: send the user to the login view, replacing history so back
    /// navigation does not loop into the protected view.
    RedirectToLogin,
}

/// Pure function of current session state. Must be re-evaluated on every
/// navigation attempt, never cached: the session can change (logout)
/// while the app is running.
pub fn can_enter(route: &Route, session: &Session) -> RouteDecision {
    if route.requires_auth() && !session.is_authenticated() {
        RouteDecision::RedirectToLogin
    } else {
        RouteDecision::Allow
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use shared::{Identity, Role};

    fn logged_out() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::restore(SessionStore::at_dir(dir.path()));
        (dir, session)
    }

    fn logged_in() -> (tempfile::TempDir, Session) {
        let (dir, mut session) = logged_out();
        session
            .login(Identity {
                user_id: "u-1".to_string(),
                name: "Test".to_string(),
                email: "a@b.com".to_string(),
                role: Role::Member,
            })
            .unwrap();
        (dir, session)
    }

    #[test]
    fn test_unauthenticated_is_redirected_from_every_protected_route() {
        let (_dir, session) = logged_out();
        for route in Route::protected() {
            assert_eq!(
                can_enter(&route, &session),
                RouteDecision::RedirectToLogin,
                "route {} should redirect",
                route.path()
            );
        }
    }

    #[test]
    fn test_public_routes_never_redirect() {
        let (_dir, session) = logged_out();
        for route in [
            Route::Home,
            Route::Login,
            Route::CreatePassword,
            Route::MeetingCall("m-1".to_string()),
        ] {
            assert_eq!(can_enter(&route, &session), RouteDecision::Allow);
        }
    }

    #[test]
    fn test_authenticated_session_enters_protected_routes() {
        let (_dir, session) = logged_in();
        for route in Route::protected() {
            assert_eq!(can_enter(&route, &session), RouteDecision::Allow);
        }
    }

    #[test]
    fn test_guard_reflects_logout_immediately() {
        let (_dir, mut session) = logged_in();
        assert_eq!(
            can_enter(&Route::Dashboard, &session),
            RouteDecision::Allow
        );
        session.logout().unwrap();
        assert_eq!(
            can_enter(&Route::Dashboard, &session),
            RouteDecision::RedirectToLogin
        );
    }
}
