//! In-memory storage implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::team::{Team, TeamDraft, TeamId, TeamRepository};
use crate::domain::user::{User, UserDraft, UserId, UserRepository};
use crate::domain::DomainError;

/// Both tables plus their ID sequences, guarded together
#[derive(Debug)]
struct Tables {
    users: BTreeMap<UserId, User>,
    teams: BTreeMap<TeamId, Team>,
    next_user_id: i64,
    next_team_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            teams: BTreeMap::new(),
            next_user_id: 1,
            next_team_id: 1,
        }
    }
}

impl Tables {
    fn allocate_user_id(&mut self) -> Result<UserId, DomainError> {
        let id = UserId::new(self.next_user_id)
            .map_err(|e| DomainError::internal(format!("User ID sequence corrupted: {}", e)))?;
        self.next_user_id += 1;
        Ok(id)
    }

    fn allocate_team_id(&mut self) -> Result<TeamId, DomainError> {
        let id = TeamId::new(self.next_team_id)
            .map_err(|e| DomainError::internal(format!("Team ID sequence corrupted: {}", e)))?;
        self.next_team_id += 1;
        Ok(id)
    }
}

/// Thread-safe in-memory store for users and teams
///
/// Useful for testing and development. Data is lost when the process
/// terminates. IDs start at 1 and are never reused; listings come back in
/// ID order, like a primary-key scan.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read().await;

        let users = tables
            .users
            .values()
            .filter(|u| u.belongs_to(team_id))
            .cloned()
            .collect();

        Ok(users)
    }

    async fn create(&self, draft: UserDraft) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        let id = tables.allocate_user_id()?;
        let user = User::new(id, draft);
        tables.users.insert(id, user.clone());

        Ok(user)
    }

    async fn create_batch(&self, drafts: Vec<UserDraft>) -> Result<Vec<User>, DomainError> {
        let mut tables = self.tables.write().await;

        // Allocate every ID before touching the table so a failure leaves it unchanged
        let mut users = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let id = tables.allocate_user_id()?;
            users.push(User::new(id, draft));
        }

        for user in &users {
            tables.users.insert(user.id(), user.clone());
        }

        Ok(users)
    }

    async fn update(&self, user: User) -> Result<Option<User>, DomainError> {
        let mut tables = self.tables.write().await;

        match tables.users.get_mut(&user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.remove(&id))
    }

    async fn delete_from_team(
        &self,
        team_id: TeamId,
        id: UserId,
    ) -> Result<Option<User>, DomainError> {
        let mut tables = self.tables.write().await;

        let matches = tables
            .users
            .get(&id)
            .is_some_and(|u| u.belongs_to(team_id));

        if !matches {
            return Ok(None);
        }

        Ok(tables.users.remove(&id))
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.teams.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.teams.values().cloned().collect())
    }

    async fn create(&self, draft: TeamDraft) -> Result<Team, DomainError> {
        let mut tables = self.tables.write().await;

        let id = tables.allocate_team_id()?;
        let team = Team::new(id, draft);
        tables.teams.insert(id, team.clone());

        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Option<Team>, DomainError> {
        let mut tables = self.tables.write().await;

        match tables.teams.get_mut(&team.id()) {
            Some(stored) => {
                *stored = team.clone();
                Ok(Some(team))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(tables.teams.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> UserDraft {
        UserDraft::new(name, 30, "5551234567")
    }

    fn team_id(value: i64) -> TeamId {
        TeamId::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let store = InMemoryStore::new();

        let created = UserRepository::create(&store, draft("Ann")).await.unwrap();
        assert_eq!(created.id().value(), 1);

        let retrieved = UserRepository::get(&store, created.id()).await.unwrap();
        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let store = InMemoryStore::new();

        let first = UserRepository::create(&store, draft("Ann")).await.unwrap();
        UserRepository::delete(&store, first.id()).await.unwrap();
        let second = UserRepository::create(&store, draft("Bob")).await.unwrap();

        assert_eq!(first.id().value(), 1);
        assert_eq!(second.id().value(), 2);
    }

    #[tokio::test]
    async fn test_list_users_in_id_order() {
        let store = InMemoryStore::new();

        for name in ["Ann", "Bob", "Cy"] {
            UserRepository::create(&store, draft(name)).await.unwrap();
        }

        let names: Vec<String> = UserRepository::list(&store)
            .await
            .unwrap()
            .iter()
            .map(|u| u.name().to_string())
            .collect();

        assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
    }

    #[tokio::test]
    async fn test_list_by_team() {
        let store = InMemoryStore::new();

        UserRepository::create(&store, draft("Ann").with_team(team_id(1)))
            .await
            .unwrap();
        UserRepository::create(&store, draft("Bob").with_team(team_id(1)))
            .await
            .unwrap();
        UserRepository::create(&store, draft("Cy").with_team(team_id(2)))
            .await
            .unwrap();
        UserRepository::create(&store, draft("Di")).await.unwrap();

        let members = store.list_by_team(team_id(1)).await.unwrap();
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|u| u.belongs_to(team_id(1))));

        let empty = store.list_by_team(team_id(9)).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_create_batch() {
        let store = InMemoryStore::new();

        let users = store
            .create_batch(vec![draft("Ann"), draft("Bob")])
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id().value(), 1);
        assert_eq!(users[1].id().value(), 2);
        assert_eq!(UserRepository::list(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = InMemoryStore::new();
        let ghost = User::new(UserId::new(7).unwrap(), draft("Ghost"));

        let result = UserRepository::update(&store, ghost).await.unwrap();
        assert!(result.is_none());
        assert!(UserRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_user() {
        let store = InMemoryStore::new();
        let mut user = UserRepository::create(&store, draft("Ann")).await.unwrap();

        user.apply(UserDraft::new("Anne", 31, "5559999999"));
        UserRepository::update(&store, user.clone()).await.unwrap();

        let stored = UserRepository::get(&store, user.id()).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Anne");
        assert_eq!(stored.age(), 31);
    }

    #[tokio::test]
    async fn test_delete_user_twice() {
        let store = InMemoryStore::new();
        let user = UserRepository::create(&store, draft("Ann")).await.unwrap();

        let first = UserRepository::delete(&store, user.id()).await.unwrap();
        assert_eq!(first, Some(user.clone()));

        let second = UserRepository::delete(&store, user.id()).await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_delete_from_team_requires_membership() {
        let store = InMemoryStore::new();
        let user = UserRepository::create(&store, draft("Ann").with_team(team_id(1)))
            .await
            .unwrap();

        let wrong_team = store.delete_from_team(team_id(2), user.id()).await.unwrap();
        assert!(wrong_team.is_none());
        assert!(UserRepository::get(&store, user.id()).await.unwrap().is_some());

        let removed = store.delete_from_team(team_id(1), user.id()).await.unwrap();
        assert_eq!(removed, Some(user.clone()));
        assert!(UserRepository::get(&store, user.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_team_crud() {
        let store = InMemoryStore::new();

        let mut team = TeamRepository::create(&store, TeamDraft::new("Core"))
            .await
            .unwrap();
        assert_eq!(team.id().value(), 1);
        assert!(store.exists(team.id()).await.unwrap());

        team.apply(TeamDraft::new("Platform"));
        let updated = TeamRepository::update(&store, team.clone()).await.unwrap();
        assert_eq!(updated.unwrap().name(), "Platform");

        let deleted = TeamRepository::delete(&store, team.id()).await.unwrap();
        assert!(deleted.is_some());
        assert!(!store.exists(team.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_deleting_team_keeps_users() {
        let store = InMemoryStore::new();
        let team = TeamRepository::create(&store, TeamDraft::new("Core"))
            .await
            .unwrap();
        UserRepository::create(&store, draft("Ann").with_team(team.id()))
            .await
            .unwrap();

        TeamRepository::delete(&store, team.id()).await.unwrap();

        let users = UserRepository::list(&store).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].team_id(), Some(team.id()));
    }

    #[tokio::test]
    async fn test_user_and_team_sequences_are_independent() {
        let store = InMemoryStore::new();

        let team = TeamRepository::create(&store, TeamDraft::new("Core"))
            .await
            .unwrap();
        let user = UserRepository::create(&store, draft("Ann")).await.unwrap();

        assert_eq!(team.id().value(), 1);
        assert_eq!(user.id().value(), 1);
    }
}
