use crate::core::store::{MatchStore, StoreError};
use crate::models::{ConsentDecision, Match, Project, Role, User};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresError> for StoreError {
    fn from(value: PostgresError) -> Self {
        StoreError::new(value)
    }
}

/// Consent Store and Match Ledger backed by PostgreSQL.
///
/// Each consent side is a one-row-per-pair decision table, so recording a
/// decision is a single upsert and the approved/declined sets are mutually
/// exclusive by construction. The match ledger carries a UNIQUE constraint
/// on (freelancer_id, project_id); that constraint, not application logic,
/// is what serializes concurrent reciprocal likes.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(url, max_connections.unwrap_or(10), min_connections.unwrap_or(1)).await
    }

    /// Active freelancers, for the ranking port
    pub async fn list_freelancers(&self) -> Result<Vec<User>, PostgresError> {
        let query = r#"
            SELECT id, name, role, skills, hourly_rate, is_active, created_at
            FROM users
            WHERE role = 'freelancer' AND is_active
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(map_user).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn map_user(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get::<Role, _>("role"),
        skills: row.get("skills"),
        hourly_rate: row.get("hourly_rate"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    }
}

fn map_project(row: &PgRow) -> Project {
    Project {
        id: row.get("id"),
        client_id: row.get("client_id"),
        title: row.get("title"),
        skills: row.get("skills"),
        budget: row.get("budget"),
        created_at: row.get("created_at"),
    }
}

fn map_match(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        freelancer_id: row.get("freelancer_id"),
        project_id: row.get("project_id"),
        client_id: row.get("client_id"),
        created_at: row.get("created_at"),
    }
}

impl MatchStore for PostgresStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = r#"
            SELECT id, name, role, skills, hourly_rate, is_active, created_at
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(row.as_ref().map(map_user))
    }

    async fn project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let query = r#"
            SELECT id, client_id, title, skills, budget, created_at
            FROM projects
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(row.as_ref().map(map_project))
    }

    async fn record_client_decision(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
        decision: ConsentDecision,
    ) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO project_consents (project_id, freelancer_id, decision, decided_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (project_id, freelancer_id)
            DO UPDATE SET
                decision = EXCLUDED.decision,
                decided_at = EXCLUDED.decided_at
        "#;

        sqlx::query(query)
            .bind(project_id)
            .bind(freelancer_id)
            .bind(decision)
            .execute(&self.pool)
            .await
            .map_err(StoreError::new)?;

        tracing::debug!(
            "Recorded client decision: project {} -> freelancer {} ({:?})",
            project_id,
            freelancer_id,
            decision
        );

        Ok(())
    }

    async fn record_freelancer_decision(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
        decision: ConsentDecision,
    ) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO freelancer_consents (freelancer_id, project_id, decision, decided_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (freelancer_id, project_id)
            DO UPDATE SET
                decision = EXCLUDED.decision,
                decided_at = EXCLUDED.decided_at
        "#;

        sqlx::query(query)
            .bind(freelancer_id)
            .bind(project_id)
            .bind(decision)
            .execute(&self.pool)
            .await
            .map_err(StoreError::new)?;

        tracing::debug!(
            "Recorded freelancer decision: freelancer {} -> project {} ({:?})",
            freelancer_id,
            project_id,
            decision
        );

        Ok(())
    }

    async fn client_decision(
        &self,
        project_id: Uuid,
        freelancer_id: Uuid,
    ) -> Result<Option<ConsentDecision>, StoreError> {
        let query = r#"
            SELECT decision
            FROM project_consents
            WHERE project_id = $1 AND freelancer_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(project_id)
            .bind(freelancer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(row.map(|r| r.get("decision")))
    }

    async fn freelancer_decision(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<ConsentDecision>, StoreError> {
        let query = r#"
            SELECT decision
            FROM freelancer_consents
            WHERE freelancer_id = $1 AND project_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(freelancer_id)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(row.map(|r| r.get("decision")))
    }

    async fn declined_freelancers(&self, project_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let query = r#"
            SELECT freelancer_id
            FROM project_consents
            WHERE project_id = $1 AND decision = 'declined'
        "#;

        let rows = sqlx::query(query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(rows.iter().map(|r| r.get("freelancer_id")).collect())
    }

    async fn create_match_if_absent(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
        client_id: Uuid,
    ) -> Result<(Match, bool), StoreError> {
        // The unique pair constraint decides the race. The losing insert
        // affects zero rows and reads the winner's record instead.
        let insert = r#"
            INSERT INTO matches (freelancer_id, project_id, client_id)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT matches_pair_unique DO NOTHING
            RETURNING id, freelancer_id, project_id, client_id, created_at
        "#;

        let inserted = sqlx::query(insert)
            .bind(freelancer_id)
            .bind(project_id)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        if let Some(row) = inserted {
            return Ok((map_match(&row), true));
        }

        let select = r#"
            SELECT id, freelancer_id, project_id, client_id, created_at
            FROM matches
            WHERE freelancer_id = $1 AND project_id = $2
        "#;

        let row = sqlx::query(select)
            .bind(freelancer_id)
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok((map_match(&row), false))
    }

    async fn find_match(
        &self,
        freelancer_id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Match>, StoreError> {
        let query = r#"
            SELECT id, freelancer_id, project_id, client_id, created_at
            FROM matches
            WHERE freelancer_id = $1 AND project_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(freelancer_id)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(row.as_ref().map(map_match))
    }
}
