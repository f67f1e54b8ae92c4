//! PostgreSQL teacher repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::teacher::{
    ProfileFields, TeacherId, TeacherProfile, TeacherRepository, TeacherWithStats, UserPublicView,
};
use crate::domain::user::{UserId, UserRole};
use crate::domain::DomainError;

/// PostgreSQL implementation of TeacherRepository
#[derive(Debug, Clone)]
pub struct PostgresTeacherRepository {
    pool: PgPool,
}

impl PostgresTeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "id, user_id, name, subject, bio, image_path, experience, \
                               achievements, telegram, instagram, created_at, updated_at";

#[async_trait]
impl TeacherRepository for PostgresTeacherRepository {
    async fn get(&self, id: TeacherId) -> Result<Option<TeacherProfile>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get teacher: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_profile(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<TeacherProfile>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM teachers WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get teacher by user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_profile(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, profile: TeacherProfile) -> Result<TeacherProfile, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teachers (id, user_id, name, subject, bio, image_path, experience,
                                  achievements, telegram, instagram, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.user_id().as_uuid())
        .bind(profile.name())
        .bind(profile.subject())
        .bind(profile.bio())
        .bind(profile.image_path())
        .bind(profile.experience())
        .bind(profile.achievements())
        .bind(profile.telegram())
        .bind(profile.instagram())
        .bind(profile.created_at())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "User '{}' already has a teacher profile",
                    profile.user_id()
                ))
            } else if msg.contains("foreign key") {
                DomainError::validation(format!(
                    "Owner '{}' does not reference a user",
                    profile.user_id()
                ))
            } else {
                DomainError::storage(format!("Failed to create teacher: {}", e))
            }
        })?;

        Ok(profile)
    }

    async fn update(&self, profile: &TeacherProfile) -> Result<TeacherProfile, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE teachers
            SET name = $2, subject = $3, bio = $4, image_path = $5, experience = $6,
                achievements = $7, telegram = $8, instagram = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.name())
        .bind(profile.subject())
        .bind(profile.bio())
        .bind(profile.image_path())
        .bind(profile.experience())
        .bind(profile.achievements())
        .bind(profile.telegram())
        .bind(profile.instagram())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update teacher: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Teacher '{}' not found",
                profile.id()
            )));
        }

        Ok(profile.clone())
    }

    async fn list_by_likes(&self) -> Result<Vec<TeacherWithStats>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.user_id, t.name, t.subject, t.bio, t.image_path, t.experience,
                   t.achievements, t.telegram, t.instagram, t.created_at, t.updated_at,
                   u.name AS owner_name, u.email AS owner_email, u.role AS owner_role,
                   COALESCE(array_agg(l.user_id) FILTER (WHERE l.user_id IS NOT NULL), '{}')
                       AS liked_by,
                   COUNT(l.user_id) AS like_count
            FROM teachers t
            JOIN users u ON u.id = t.user_id
            LEFT JOIN likes l ON l.teacher_id = t.id
            GROUP BY t.id, t.user_id, t.name, t.subject, t.bio, t.image_path, t.experience,
                     t.achievements, t.telegram, t.instagram, t.created_at, t.updated_at,
                     u.name, u.email, u.role
            ORDER BY like_count DESC, t.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list teachers: {}", e)))?;

        let mut entries = Vec::with_capacity(rows.len());

        for row in rows {
            let profile = row_to_profile(&row)?;

            let owner_role: String = row.get("owner_role");
            let owner_role = UserRole::parse(&owner_role).ok_or_else(|| {
                DomainError::storage(format!("Invalid role in database: {}", owner_role))
            })?;

            let liked_by: Vec<Uuid> = row.get("liked_by");
            let like_count: i64 = row.get("like_count");

            entries.push(TeacherWithStats {
                user: UserPublicView {
                    id: profile.user_id(),
                    name: row.get("owner_name"),
                    email: row.get("owner_email"),
                    role: owner_role,
                },
                likes: liked_by.into_iter().map(UserId::from_uuid).collect(),
                like_count: like_count as u64,
                profile,
            });
        }

        Ok(entries)
    }

    async fn add_like(&self, user_id: UserId, teacher_id: TeacherId) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO likes (user_id, teacher_id) VALUES ($1, $2)")
            .bind(user_id.as_uuid())
            .bind(teacher_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let msg = e.to_string();

                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    DomainError::conflict("Already liked this teacher")
                } else if msg.contains("foreign key") {
                    DomainError::not_found(format!("Teacher '{}' not found", teacher_id))
                } else {
                    DomainError::storage(format!("Failed to record like: {}", e))
                }
            })?;

        Ok(())
    }

    async fn like_count(&self, teacher_id: TeacherId) -> Result<u64, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE teacher_id = $1")
                .bind(teacher_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to count likes: {}", e)))?;

        Ok(count as u64)
    }
}

fn row_to_profile(row: &sqlx::postgres::PgRow) -> Result<TeacherProfile, DomainError> {
    let id: Uuid = row.get("id");
    let user_id: Uuid = row.get("user_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let fields = ProfileFields {
        name: row.get("name"),
        subject: row.get("subject"),
        bio: row.get("bio"),
        experience: row.get("experience"),
        achievements: row.get("achievements"),
        telegram: row.get("telegram"),
        instagram: row.get("instagram"),
    };

    Ok(TeacherProfile::from_parts(
        TeacherId::from_uuid(id),
        UserId::from_uuid(user_id),
        fields,
        row.get("image_path"),
        created_at,
        updated_at,
    ))
}
