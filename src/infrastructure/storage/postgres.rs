//! PostgreSQL storage implementation with connection pooling

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;

use crate::domain::team::{Team, TeamDraft, TeamId, TeamRepository};
use crate::domain::user::{User, UserDraft, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/roster".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

const CREATE_TEAMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS teams (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
"#;

// team_id carries no foreign key: deleting a team leaves its users with a
// stale reference, and the service checks the reference on write.
const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        phone TEXT NOT NULL,
        team_id BIGINT
    )
"#;

const CREATE_USERS_TEAM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_team_id ON users (team_id)";

const USER_COLUMNS: &str = "id, name, age, phone, team_id";

/// PostgreSQL store for users and teams
///
/// Listings are ordered by primary key. Batch inserts run in one transaction.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new store with connection pooling
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Ensures the `teams` and `users` tables exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        for statement in [CREATE_TEAMS_TABLE, CREATE_USERS_TABLE, CREATE_USERS_TEAM_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to create schema: {}", e)))?;
        }

        info!("PostgreSQL schema ready");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE team_id = $1 ORDER BY id",
            USER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(team_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list team users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn create(&self, draft: UserDraft) -> Result<User, DomainError> {
        let query = format!(
            r#"
            INSERT INTO users (name, age, phone, team_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&draft.name)
            .bind(draft.age)
            .bind(&draft.phone)
            .bind(draft.team_id.map(|t| t.value()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create user: {}", e)))?;

        row_to_user(&row)
    }

    async fn create_batch(&self, drafts: Vec<UserDraft>) -> Result<Vec<User>, DomainError> {
        let query = format!(
            r#"
            INSERT INTO users (name, age, phone, team_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let mut users = Vec::with_capacity(drafts.len());

        // Dropping `tx` on an early return rolls the whole batch back
        for draft in &drafts {
            let row = sqlx::query(&query)
                .bind(&draft.name)
                .bind(draft.age)
                .bind(&draft.phone)
                .bind(draft.team_id.map(|t| t.value()))
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to create users: {}", e)))?;

            users.push(row_to_user(&row)?);
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit users: {}", e)))?;

        Ok(users)
    }

    async fn update(&self, user: User) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"
            UPDATE users
            SET name = $2, age = $3, phone = $4, team_id = $5
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user.id().value())
            .bind(user.name())
            .bind(user.age())
            .bind(user.phone())
            .bind(user.team_id().map(|t| t.value()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let query = format!("DELETE FROM users WHERE id = $1 RETURNING {}", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn delete_from_team(
        &self,
        team_id: TeamId,
        id: UserId,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "DELETE FROM users WHERE id = $1 AND team_id = $2 RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.value())
            .bind(team_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl TeamRepository for PostgresStore {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM teams WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn create(&self, draft: TeamDraft) -> Result<Team, DomainError> {
        let row = sqlx::query("INSERT INTO teams (name) VALUES ($1) RETURNING id, name")
            .bind(&draft.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create team: {}", e)))?;

        row_to_team(&row)
    }

    async fn update(&self, team: Team) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("UPDATE teams SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(team.id().value())
            .bind(team.name())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn delete(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("DELETE FROM teams WHERE id = $1 RETURNING id, name")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn exists(&self, id: TeamId) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1) AS exists")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check team: {}", e)))?;

        row.try_get("exists")
            .map_err(|e| DomainError::storage(format!("Failed to read team check: {}", e)))
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: i64 = column(row, "id")?;
    let team_id: Option<i64> = column(row, "team_id")?;

    let user_id = UserId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    let team_id = match team_id {
        None | Some(0) => None,
        Some(value) => Some(
            TeamId::new(value)
                .map_err(|e| DomainError::storage(format!("Invalid team ID in database: {}", e)))?,
        ),
    };

    let draft = UserDraft {
        name: column(row, "name")?,
        age: column(row, "age")?,
        phone: column(row, "phone")?,
        team_id,
    };

    Ok(User::new(user_id, draft))
}

fn row_to_team(row: &PgRow) -> Result<Team, DomainError> {
    let id: i64 = column(row, "id")?;
    let team_id = TeamId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid team ID in database: {}", e)))?;

    let name: String = column(row, "name")?;

    Ok(Team::new(team_id, TeamDraft::new(name)))
}
