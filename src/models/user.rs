use serde::{Deserialize, Serialize};

/// A user record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// Display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Registration payload for `POST /users/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            name: None,
            bio: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }
}

/// The locally persisted subset of a [`User`].
///
/// Present exactly when someone is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl SessionUser {
    /// The fixed account used by `--demo`.
    pub fn demo() -> Self {
        Self {
            id: Some("6938f6f4c4638c608cd5fc7f".to_string()),
            username: "alice".to_string(),
            email: "alice@redk.com".to_string(),
            name: Some("Alice Smith".to_string()),
            bio: Some("Full-stack developer passionate about NoSQL databases".to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: (!user.id.is_empty()).then(|| user.id.clone()),
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
        }
    }
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        SessionUser::from(&user)
    }
}

/// A follow suggestion, ranked server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub mutual_connections: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ignores_unknown_fields() {
        let json = r#"{
            "id": "abc",
            "username": "carol",
            "email": "carol@x.io",
            "followers_count": 3
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "carol");
        assert!(user.name.is_none());
        assert_eq!(user.display_name(), "carol");
    }

    #[test]
    fn test_new_user_omits_absent_optionals() {
        let payload = serde_json::to_value(NewUser::new("carol", "carol@x.io")).unwrap();
        assert_eq!(payload, serde_json::json!({"username": "carol", "email": "carol@x.io"}));

        let payload =
            serde_json::to_value(NewUser::new("dan", "d@x.io").with_name("Dan").with_bio("hi"))
                .unwrap();
        assert_eq!(payload["name"], "Dan");
        assert_eq!(payload["bio"], "hi");
    }

    #[test]
    fn test_session_user_from_user() {
        let user = User {
            id: "u1".to_string(),
            username: "carol".to_string(),
            email: "carol@x.io".to_string(),
            name: Some("Carol".to_string()),
            bio: None,
            created_at: Some("2024-01-01T00:00:00".to_string()),
        };
        let session = SessionUser::from(&user);
        assert_eq!(session.id.as_deref(), Some("u1"));
        assert_eq!(session.display_name(), "Carol");
    }

    #[test]
    fn test_demo_user() {
        let demo = SessionUser::demo();
        assert_eq!(demo.username, "alice");
        assert_eq!(demo.email, "alice@redk.com");
    }

    #[test]
    fn test_suggestion_mutuals_optional() {
        let s: Suggestion = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert!(s.mutual_connections.is_none());
        let s: Suggestion =
            serde_json::from_str(r#"{"username":"bob","mutual_connections":2}"#).unwrap();
        assert_eq!(s.mutual_connections, Some(2));
    }
}
