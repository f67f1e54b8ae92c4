//! Teacher directory service: profile management, listings and likes

use std::sync::Arc;

use tracing::debug;

use crate::domain::teacher::{
    ProfileFields, TeacherId, TeacherProfile, TeacherRepository, TeacherWithStats,
};
use crate::domain::user::Identity;
use crate::domain::DomainError;

/// Teacher directory service
#[derive(Debug)]
pub struct TeacherService<R: TeacherRepository> {
    repository: Arc<R>,
}

impl<R: TeacherRepository> TeacherService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a profile owned by the caller. Teachers only, one profile
    /// per user.
    pub async fn create_profile(
        &self,
        identity: Identity,
        fields: ProfileFields,
        image_path: Option<String>,
    ) -> Result<TeacherProfile, DomainError> {
        if !identity.role.is_teacher() {
            return Err(DomainError::forbidden("Only teachers can create a profile"));
        }

        if self.repository.get_by_user(identity.id).await?.is_some() {
            return Err(DomainError::conflict(
                "You already have a teacher profile",
            ));
        }

        let profile = TeacherProfile::new(identity.id, fields, image_path);
        let profile = self.repository.create(profile).await?;

        debug!(teacher_id = %profile.id(), user_id = %identity.id, "Created teacher profile");
        Ok(profile)
    }

    /// Update a profile. The caller must own it; a supplied image path
    /// replaces the stored one, otherwise it is kept.
    pub async fn update_profile(
        &self,
        identity: Identity,
        id: TeacherId,
        fields: ProfileFields,
        image_path: Option<String>,
    ) -> Result<TeacherProfile, DomainError> {
        let mut profile = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Teacher '{}' not found", id)))?;

        if !profile.is_owned_by(identity.id) {
            return Err(DomainError::forbidden(
                "Only the profile owner can update it",
            ));
        }

        profile.apply_update(fields, image_path);
        let profile = self.repository.update(&profile).await?;

        debug!(teacher_id = %profile.id(), "Updated teacher profile");
        Ok(profile)
    }

    /// List all profiles ordered by like count descending
    pub async fn list_teachers(&self) -> Result<Vec<TeacherWithStats>, DomainError> {
        self.repository.list_by_likes().await
    }

    /// Record a like from the caller for the given teacher
    pub async fn like(&self, identity: Identity, teacher_id: TeacherId) -> Result<(), DomainError> {
        self.repository.add_like(identity.id, teacher_id).await?;

        debug!(teacher_id = %teacher_id, user_id = %identity.id, "Recorded like");
        Ok(())
    }

    /// Get a single profile
    pub async fn get(&self, id: TeacherId) -> Result<Option<TeacherProfile>, DomainError> {
        self.repository.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{User, UserId, UserRepository, UserRole};
    use crate::infrastructure::account::InMemoryUserRepository;
    use crate::infrastructure::teacher::InMemoryTeacherRepository;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        service: TeacherService<InMemoryTeacherRepository>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let repo = Arc::new(InMemoryTeacherRepository::new(users.clone()));
        Fixture {
            users,
            service: TeacherService::new(repo),
        }
    }

    async fn teacher_identity(fx: &Fixture, email: &str) -> Identity {
        fx.users
            .create(User::new("T", email, "hash", UserRole::Teacher))
            .await
            .unwrap()
            .identity()
    }

    fn user_identity() -> Identity {
        Identity {
            id: UserId::generate(),
            role: UserRole::User,
        }
    }

    fn fields(subject: &str) -> ProfileFields {
        ProfileFields {
            name: "T".to_string(),
            subject: subject.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_non_teacher_cannot_create_profile() {
        let fx = fixture();

        let result = fx
            .service
            .create_profile(user_identity(), fields("Math"), None)
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
        assert!(fx.service.list_teachers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_teacher_creates_profile() {
        let fx = fixture();
        let identity = teacher_identity(&fx, "t@x.com").await;

        let profile = fx
            .service
            .create_profile(identity, fields("Math"), Some("/uploads/pic.png".into()))
            .await
            .unwrap();

        assert_eq!(profile.user_id(), identity.id);
        assert_eq!(profile.subject(), "Math");
        assert_eq!(profile.image_path(), Some("/uploads/pic.png"));
    }

    #[tokio::test]
    async fn test_second_profile_rejected() {
        let fx = fixture();
        let identity = teacher_identity(&fx, "t@x.com").await;

        fx.service
            .create_profile(identity, fields("Math"), None)
            .await
            .unwrap();

        let second = fx
            .service
            .create_profile(identity, fields("Physics"), None)
            .await;

        assert!(matches!(second, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_requires_ownership() {
        let fx = fixture();
        let owner = teacher_identity(&fx, "owner@x.com").await;
        let intruder = teacher_identity(&fx, "other@x.com").await;

        let profile = fx
            .service
            .create_profile(owner, fields("Math"), None)
            .await
            .unwrap();

        let result = fx
            .service
            .update_profile(intruder, profile.id(), fields("Hacked"), None)
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden { .. })));

        // Profile untouched
        let stored = fx.service.get(profile.id()).await.unwrap().unwrap();
        assert_eq!(stored.subject(), "Math");
    }

    #[tokio::test]
    async fn test_update_unknown_profile() {
        let fx = fixture();
        let identity = teacher_identity(&fx, "t@x.com").await;

        let result = fx
            .service
            .update_profile(identity, TeacherId::generate(), fields("Math"), None)
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_image_without_new_upload() {
        let fx = fixture();
        let identity = teacher_identity(&fx, "t@x.com").await;

        let profile = fx
            .service
            .create_profile(identity, fields("Math"), Some("/uploads/old.png".into()))
            .await
            .unwrap();

        let updated = fx
            .service
            .update_profile(identity, profile.id(), fields("Physics"), None)
            .await
            .unwrap();

        assert_eq!(updated.subject(), "Physics");
        assert_eq!(updated.image_path(), Some("/uploads/old.png"));
    }

    #[tokio::test]
    async fn test_like_and_ordering() {
        let fx = fixture();
        let a_owner = teacher_identity(&fx, "a@x.com").await;
        let b_owner = teacher_identity(&fx, "b@x.com").await;

        let a = fx
            .service
            .create_profile(a_owner, fields("Math"), None)
            .await
            .unwrap();
        let b = fx
            .service
            .create_profile(b_owner, fields("Physics"), None)
            .await
            .unwrap();

        // Three likes for A, one for B
        for i in 0..3 {
            let fan = teacher_identity(&fx, &format!("fan{}@x.com", i)).await;
            fx.service.like(fan, a.id()).await.unwrap();
        }
        let fan = teacher_identity(&fx, "solo@x.com").await;
        fx.service.like(fan, b.id()).await.unwrap();

        let listing = fx.service.list_teachers().await.unwrap();
        assert_eq!(listing[0].profile.id(), a.id());
        assert_eq!(listing[1].profile.id(), b.id());
    }

    #[tokio::test]
    async fn test_duplicate_like() {
        let fx = fixture();
        let owner = teacher_identity(&fx, "t@x.com").await;
        let fan = teacher_identity(&fx, "fan@x.com").await;

        let profile = fx
            .service
            .create_profile(owner, fields("Math"), None)
            .await
            .unwrap();

        fx.service.like(fan, profile.id()).await.unwrap();
        let second = fx.service.like(fan, profile.id()).await;

        assert!(matches!(second, Err(DomainError::Conflict { .. })));
    }
}
