//! Login state and route gating.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The fixed credential table, as (username, password).
pub const MOCK_USERS: &[(&str, &str)] = &[("admin", "1234"), ("wendy", "5678")];

/// Session errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Check a username/password pair against [`MOCK_USERS`].
pub fn check_credentials(username: &str, password: &str) -> bool {
    MOCK_USERS
        .iter()
        .any(|(user, pass)| *user == username && *pass == password)
}

/// Who is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
}

impl Session {
    /// Log in. On failure the session is left unchanged.
    pub fn login(&mut self, username: &str, password: &str) -> SessionResult<()> {
        if !check_credentials(username, password) {
            return Err(SessionError::InvalidCredentials);
        }
        self.logged_in = true;
        self.username = Some(username.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
        self.username = None;
    }

    /// The current user, if logged in.
    pub fn user(&self) -> Option<&str> {
        if self.logged_in {
            self.username.as_deref()
        } else {
            None
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user().is_some()
    }
}

/// Application screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Projects,
    Editor { project_id: String },
}

impl Route {
    /// Redirect according to the session: screens behind login go to
    /// [`Route::Login`] when logged out, and the login screen goes to
    /// [`Route::Projects`] when logged in.
    pub fn guard(self, session: &Session) -> Route {
        match (self, session.is_logged_in()) {
            (Route::Login, true) => Route::Projects,
            (Route::Projects | Route::Editor { .. }, false) => Route::Login,
            (route, _) => route,
        }
    }

    /// Parse a path such as `/project/<id>`.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim().trim_end_matches('/');
        match path {
            "" | "/" | "/projects" => Some(Route::Projects),
            "/login" => Some(Route::Login),
            _ => path
                .strip_prefix("/project/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::Editor {
                    project_id: id.to_string(),
                }),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Projects => f.write_str("/projects"),
            Route::Editor { project_id } => write!(f, "/project/{project_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_known_users() {
        let mut session = Session::default();
        assert!(session.login("admin", "1234").is_ok());
        assert_eq!(session.user(), Some("admin"));

        let mut session = Session::default();
        assert!(session.login("wendy", "5678").is_ok());
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let mut session = Session::default();
        assert_eq!(session.login("admin", "wrong"), Err(SessionError::InvalidCredentials));
        assert!(!session.is_logged_in());
        assert_eq!(
            SessionError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_logout() {
        let mut session = Session::default();
        session.login("admin", "1234").unwrap();
        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.username.is_none());
    }

    #[test]
    fn test_guard_redirects() {
        let logged_out = Session::default();
        let mut logged_in = Session::default();
        logged_in.login("admin", "1234").unwrap();
        let editor = Route::Editor {
            project_id: "p1".to_string(),
        };

        assert_eq!(Route::Projects.guard(&logged_out), Route::Login);
        assert_eq!(editor.clone().guard(&logged_out), Route::Login);
        assert_eq!(Route::Login.guard(&logged_out), Route::Login);
        assert_eq!(Route::Login.guard(&logged_in), Route::Projects);
        assert_eq!(editor.clone().guard(&logged_in), editor);
    }

    #[test]
    fn test_route_paths() {
        let route = Route::Editor {
            project_id: "abc".to_string(),
        };
        assert_eq!(route.to_string(), "/project/abc");
        assert_eq!(Route::from_path("/project/abc"), Some(route));
        assert_eq!(Route::from_path("/"), Some(Route::Projects));
        assert_eq!(Route::from_path("/login"), Some(Route::Login));
        assert_eq!(Route::from_path("/nowhere"), None);
    }
}
