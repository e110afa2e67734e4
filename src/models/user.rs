use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role of a directory user. Closed set: admins see everything, supervisors
/// aggregate a team of managers, managers see only their own proposals.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Admin,
    Supervisor,
    Manager,
}

/// A user in the directory consumed by the visibility filter.
///
/// Credentials are a plaintext username/password pair looked up against the
/// directory, matching the system this replaces; this is not an
/// authentication scheme, and nothing here should be mistaken for one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
    /// Display name, matched (as a substring) against proposal manager names.
    pub name: String,
    pub role: UserRole,
    /// Supervisor this manager reports to, if any.
    pub supervisor_id: Option<Uuid>,
    /// Manager ids on this supervisor's team. Only meaningful for supervisors.
    #[serde(default)]
    pub team_members: Vec<Uuid>,
}

impl User {
    pub fn new(username: &str, password: &str, name: &str, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: password.to_string(),
            is_admin: role == UserRole::Admin,
            name: name.to_string(),
            role,
            supervisor_id: None,
            team_members: Vec::new(),
        }
    }
}

/// The predefined seed directory.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new("admin", "admin123", "Administrador", UserRole::Admin),
        User::new("aline", "mudar123", "Aline", UserRole::Manager),
        User::new("supervisor1", "mudar123", "Carlos Supervisor", UserRole::Supervisor),
        User::new("supervisor2", "mudar123", "Maria Supervisora", UserRole::Supervisor),
        User::new("vendedor1", "mudar123", "João Vendas", UserRole::Manager),
        User::new("vendedor2", "mudar123", "Ana Vendas", UserRole::Manager),
        User::new("vendedor3", "mudar123", "Pedro Vendas", UserRole::Manager),
        User::new("vendedor4", "mudar123", "Lucia Vendas", UserRole::Manager),
        User::new("vendedor5", "mudar123", "Roberto Vendas", UserRole::Manager),
        User::new("vendedor6", "mudar123", "Camila Vendas", UserRole::Manager),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized() {
        let user = User::new("aline", "mudar123", "Aline", UserRole::Manager);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("mudar123"));
        assert!(json.contains("\"role\":\"manager\""));
    }

    #[test]
    fn seed_directory_has_one_admin() {
        let users = seed_users();
        assert_eq!(users.iter().filter(|u| u.is_admin).count(), 1);
        assert_eq!(
            users.iter().filter(|u| u.role == UserRole::Supervisor).count(),
            2
        );
    }
}
