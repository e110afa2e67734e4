//! User directory and role-based visibility.
//!
//! The directory is the external user store the visibility filter depends on:
//! `{id, name, role, team_members[]}` records plus the plaintext credential
//! pairs the legacy system used for login. Transport-level security is
//! explicitly out of scope here; nothing in this module is an authentication
//! scheme to imitate.

pub mod visibility;

use std::sync::RwLock;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::user::{User, UserRole};

pub use visibility::filter_proposals;

/// Payload for creating a directory user.
#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub role: UserRole,
}

/// Partial update for a directory user. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

/// In-memory user directory with the team-management rules of the legacy
/// system. Reads hand out clones; the lock is never held across an await.
pub struct UserDirectory {
    users: RwLock<Vec<User>>,
}

impl UserDirectory {
    pub fn new(seed: Vec<User>) -> Self {
        Self {
            users: RwLock::new(seed),
        }
    }

    /// All users, in directory order.
    pub fn snapshot(&self) -> Vec<User> {
        self.users.read().expect("directory lock poisoned").clone()
    }

    pub fn get(&self, id: Uuid) -> Result<User, ServiceError> {
        self.users
            .read()
            .expect("directory lock poisoned")
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    /// Plaintext username/password lookup, exactly as the legacy login did.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        tracing::debug!(%username, "login attempt");
        self.users
            .read()
            .expect("directory lock poisoned")
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
            .ok_or_else(|| ServiceError::Unauthorized("invalid credentials".to_string()))
    }

    pub fn create_user(&self, new: NewUser) -> User {
        let user = User::new(&new.username, &new.password, &new.name, new.role);
        self.users
            .write()
            .expect("directory lock poisoned")
            .push(user.clone());
        tracing::info!(user_id = %user.id, username = %user.username, "user created");
        user
    }

    pub fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User, ServiceError> {
        let mut users = self.users.write().expect("directory lock poisoned");
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;

        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(role) = update.role {
            user.role = role;
            user.is_admin = role == UserRole::Admin;
        }
        Ok(user.clone())
    }

    /// Delete a user, refusing to remove the acting user themselves or the
    /// seed admin account, and detaching any team links the user held.
    pub fn delete_user(&self, id: Uuid, acting_user: Uuid) -> Result<(), ServiceError> {
        if id == acting_user {
            return Err(ServiceError::InvalidOperation(
                "cannot delete the logged-in user".to_string(),
            ));
        }

        let mut users = self.users.write().expect("directory lock poisoned");
        let target = users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;

        if target.username == "admin" {
            return Err(ServiceError::InvalidOperation(
                "cannot delete the seed admin account".to_string(),
            ));
        }

        match target.role {
            UserRole::Manager => {
                if let Some(supervisor_id) = target.supervisor_id {
                    if let Some(supervisor) = users.iter_mut().find(|u| u.id == supervisor_id) {
                        supervisor.team_members.retain(|m| *m != id);
                    }
                }
            }
            UserRole::Supervisor => {
                for user in users.iter_mut() {
                    if user.supervisor_id == Some(id) {
                        user.supervisor_id = None;
                    }
                }
            }
            UserRole::Admin => {}
        }

        users.retain(|u| u.id != id);
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Put a manager on a supervisor's team, moving them off any previous
    /// team first.
    pub fn assign_team_member(
        &self,
        supervisor_id: Uuid,
        manager_id: Uuid,
    ) -> Result<(), ServiceError> {
        let mut users = self.users.write().expect("directory lock poisoned");

        let manager = users
            .iter()
            .find(|u| u.id == manager_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", manager_id)))?;
        if manager.role != UserRole::Manager {
            return Err(ServiceError::InvalidOperation(
                "only managers can be assigned to a team".to_string(),
            ));
        }
        if !users.iter().any(|u| u.id == supervisor_id) {
            return Err(ServiceError::NotFound(format!(
                "User {} not found",
                supervisor_id
            )));
        }

        if let Some(previous) = manager.supervisor_id.filter(|p| *p != supervisor_id) {
            if let Some(prev_supervisor) = users.iter_mut().find(|u| u.id == previous) {
                prev_supervisor.team_members.retain(|m| *m != manager_id);
            }
        }

        let supervisor = users
            .iter_mut()
            .find(|u| u.id == supervisor_id)
            .expect("supervisor presence checked above");
        if !supervisor.team_members.contains(&manager_id) {
            supervisor.team_members.push(manager_id);
        }

        let manager = users
            .iter_mut()
            .find(|u| u.id == manager_id)
            .expect("manager presence checked above");
        manager.supervisor_id = Some(supervisor_id);

        Ok(())
    }

    pub fn remove_team_member(
        &self,
        supervisor_id: Uuid,
        manager_id: Uuid,
    ) -> Result<(), ServiceError> {
        let mut users = self.users.write().expect("directory lock poisoned");

        let supervisor = users
            .iter_mut()
            .find(|u| u.id == supervisor_id)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", supervisor_id)))?;
        supervisor.team_members.retain(|m| *m != manager_id);

        let manager = users
            .iter_mut()
            .find(|u| u.id == manager_id)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", manager_id)))?;
        manager.supervisor_id = None;

        Ok(())
    }

    pub fn team_members(&self, supervisor_id: Uuid) -> Result<Vec<User>, ServiceError> {
        let users = self.users.read().expect("directory lock poisoned");
        let supervisor = users
            .iter()
            .find(|u| u.id == supervisor_id)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", supervisor_id)))?;

        Ok(users
            .iter()
            .filter(|u| supervisor.team_members.contains(&u.id))
            .cloned()
            .collect())
    }
}

/// The user a request acts as, resolved from the `x-user-id` header against
/// the directory. Token-based transport is out of scope; this keeps the
/// read-time visibility projection testable end to end.
#[derive(Clone, Debug)]
pub struct ActingUser(pub User);

pub const USER_ID_HEADER: &str = "x-user-id";

#[async_trait::async_trait]
impl FromRequestParts<crate::AppState> for ActingUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ServiceError::Unauthorized(format!("missing {} header", USER_ID_HEADER))
            })?;

        let id = Uuid::parse_str(raw)
            .map_err(|_| ServiceError::Unauthorized(format!("invalid {} header", USER_ID_HEADER)))?;

        let user = state
            .directory
            .get(id)
            .map_err(|_| ServiceError::Unauthorized("unknown user".to_string()))?;

        Ok(ActingUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::seed_users;

    fn directory() -> UserDirectory {
        UserDirectory::new(seed_users())
    }

    fn id_of(directory: &UserDirectory, name: &str) -> Uuid {
        directory
            .snapshot()
            .iter()
            .find(|u| u.name == name)
            .unwrap()
            .id
    }

    #[test]
    fn authenticate_matches_exact_credentials() {
        let dir = directory();
        assert!(dir.authenticate("aline", "mudar123").is_ok());
        assert!(dir.authenticate("aline", "wrong").is_err());
        assert!(dir.authenticate("nobody", "mudar123").is_err());
    }

    #[test]
    fn seed_admin_cannot_be_deleted() {
        let dir = directory();
        let admin = id_of(&dir, "Administrador");
        let aline = id_of(&dir, "Aline");
        assert!(dir.delete_user(admin, aline).is_err());
    }

    #[test]
    fn self_delete_is_refused() {
        let dir = directory();
        let aline = id_of(&dir, "Aline");
        assert!(dir.delete_user(aline, aline).is_err());
    }

    #[test]
    fn assigning_a_manager_moves_them_between_teams() {
        let dir = directory();
        let carlos = id_of(&dir, "Carlos Supervisor");
        let maria = id_of(&dir, "Maria Supervisora");
        let ana = id_of(&dir, "Ana Vendas");

        dir.assign_team_member(carlos, ana).unwrap();
        assert_eq!(dir.team_members(carlos).unwrap().len(), 1);

        dir.assign_team_member(maria, ana).unwrap();
        assert!(dir.team_members(carlos).unwrap().is_empty());
        assert_eq!(dir.team_members(maria).unwrap()[0].id, ana);
        assert_eq!(dir.get(ana).unwrap().supervisor_id, Some(maria));
    }

    #[test]
    fn only_managers_join_teams() {
        let dir = directory();
        let carlos = id_of(&dir, "Carlos Supervisor");
        let maria = id_of(&dir, "Maria Supervisora");
        assert!(dir.assign_team_member(carlos, maria).is_err());
    }

    #[test]
    fn deleting_a_supervisor_detaches_their_managers() {
        let dir = directory();
        let admin = id_of(&dir, "Administrador");
        let carlos = id_of(&dir, "Carlos Supervisor");
        let ana = id_of(&dir, "Ana Vendas");

        dir.assign_team_member(carlos, ana).unwrap();
        dir.delete_user(carlos, admin).unwrap();
        assert_eq!(dir.get(ana).unwrap().supervisor_id, None);
    }
}
