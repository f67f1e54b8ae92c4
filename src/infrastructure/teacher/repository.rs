//! In-memory teacher repository implementation

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::teacher::{
    Like, TeacherId, TeacherProfile, TeacherRepository, TeacherWithStats, UserPublicView,
};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::account::InMemoryUserRepository;

/// In-memory implementation of TeacherRepository.
///
/// Shares a user repository so listings can embed owner records, the same
/// join the Postgres implementation performs.
#[derive(Debug)]
pub struct InMemoryTeacherRepository {
    profiles: Arc<RwLock<HashMap<TeacherId, TeacherProfile>>>,
    likes: Arc<RwLock<HashSet<Like>>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryTeacherRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
            likes: Arc::new(RwLock::new(HashSet::new())),
            users,
        }
    }

    async fn owner(&self, user_id: UserId) -> Result<User, DomainError> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::storage(format!("Owner '{}' missing for profile", user_id)))
    }
}

#[async_trait]
impl TeacherRepository for InMemoryTeacherRepository {
    async fn get(&self, id: TeacherId) -> Result<Option<TeacherProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&id).cloned())
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Option<TeacherProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().find(|p| p.user_id() == user_id).cloned())
    }

    async fn create(&self, profile: TeacherProfile) -> Result<TeacherProfile, DomainError> {
        let mut profiles = self.profiles.write().await;

        if profiles.values().any(|p| p.user_id() == profile.user_id()) {
            return Err(DomainError::conflict(format!(
                "User '{}' already has a teacher profile",
                profile.user_id()
            )));
        }

        profiles.insert(profile.id(), profile.clone());
        Ok(profile)
    }

    async fn update(&self, profile: &TeacherProfile) -> Result<TeacherProfile, DomainError> {
        let mut profiles = self.profiles.write().await;

        if !profiles.contains_key(&profile.id()) {
            return Err(DomainError::not_found(format!(
                "Teacher '{}' not found",
                profile.id()
            )));
        }

        profiles.insert(profile.id(), profile.clone());
        Ok(profile.clone())
    }

    async fn list_by_likes(&self) -> Result<Vec<TeacherWithStats>, DomainError> {
        let profiles = self.profiles.read().await;
        let likes = self.likes.read().await;

        let mut entries = Vec::with_capacity(profiles.len());

        for profile in profiles.values() {
            let liked_by: Vec<UserId> = likes
                .iter()
                .filter(|like| like.teacher_id == profile.id())
                .map(|like| like.user_id)
                .collect();

            let owner = self.owner(profile.user_id()).await?;

            entries.push(TeacherWithStats {
                like_count: liked_by.len() as u64,
                likes: liked_by,
                user: UserPublicView::from(&owner),
                profile: profile.clone(),
            });
        }

        entries.sort_by(|a, b| {
            b.like_count
                .cmp(&a.like_count)
                .then(a.profile.created_at().cmp(&b.profile.created_at()))
        });

        Ok(entries)
    }

    async fn add_like(&self, user_id: UserId, teacher_id: TeacherId) -> Result<(), DomainError> {
        let profiles = self.profiles.read().await;

        if !profiles.contains_key(&teacher_id) {
            return Err(DomainError::not_found(format!(
                "Teacher '{}' not found",
                teacher_id
            )));
        }

        let mut likes = self.likes.write().await;

        if !likes.insert(Like::new(user_id, teacher_id)) {
            return Err(DomainError::conflict("Already liked this teacher"));
        }

        Ok(())
    }

    async fn like_count(&self, teacher_id: TeacherId) -> Result<u64, DomainError> {
        let likes = self.likes.read().await;
        Ok(likes.iter().filter(|l| l.teacher_id == teacher_id).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::teacher::ProfileFields;
    use crate::domain::user::UserRole;

    async fn setup() -> (Arc<InMemoryUserRepository>, InMemoryTeacherRepository) {
        let users = Arc::new(InMemoryUserRepository::new());
        let teachers = InMemoryTeacherRepository::new(users.clone());
        (users, teachers)
    }

    async fn register_teacher(users: &InMemoryUserRepository, email: &str) -> User {
        users
            .create(User::new("T", email, "hash", UserRole::Teacher))
            .await
            .unwrap()
    }

    fn fields(subject: &str) -> ProfileFields {
        ProfileFields {
            name: "T".to_string(),
            subject: subject.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_one_profile_per_user() {
        let (users, teachers) = setup().await;
        let owner = register_teacher(&users, "t@x.com").await;

        teachers
            .create(TeacherProfile::new(owner.id(), fields("Math"), None))
            .await
            .unwrap();

        let second = teachers
            .create(TeacherProfile::new(owner.id(), fields("Physics"), None))
            .await;

        assert!(matches!(second, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_profile() {
        let (users, teachers) = setup().await;
        let owner = register_teacher(&users, "t@x.com").await;

        let never_stored = TeacherProfile::new(owner.id(), fields("Math"), None);
        let result = teachers.update(&never_stored).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_like_rejected() {
        let (users, teachers) = setup().await;
        let owner = register_teacher(&users, "t@x.com").await;
        let fan = register_teacher(&users, "fan@x.com").await;

        let profile = teachers
            .create(TeacherProfile::new(owner.id(), fields("Math"), None))
            .await
            .unwrap();

        teachers.add_like(fan.id(), profile.id()).await.unwrap();
        let second = teachers.add_like(fan.id(), profile.id()).await;

        assert!(matches!(second, Err(DomainError::Conflict { .. })));
        assert_eq!(teachers.like_count(profile.id()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_like_unknown_teacher() {
        let (users, teachers) = setup().await;
        let fan = register_teacher(&users, "fan@x.com").await;

        let result = teachers.add_like(fan.id(), TeacherId::generate()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_ordered_by_like_count() {
        let (users, teachers) = setup().await;
        let a_owner = register_teacher(&users, "a@x.com").await;
        let b_owner = register_teacher(&users, "b@x.com").await;

        let a = teachers
            .create(TeacherProfile::new(a_owner.id(), fields("Math"), None))
            .await
            .unwrap();
        let b = teachers
            .create(TeacherProfile::new(b_owner.id(), fields("Physics"), None))
            .await
            .unwrap();

        for i in 0..3 {
            let fan = register_teacher(&users, &format!("fan{}@x.com", i)).await;
            teachers.add_like(fan.id(), a.id()).await.unwrap();
        }
        let fan = register_teacher(&users, "solo@x.com").await;
        teachers.add_like(fan.id(), b.id()).await.unwrap();

        let listing = teachers.list_by_likes().await.unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].profile.id(), a.id());
        assert_eq!(listing[0].like_count, 3);
        assert_eq!(listing[1].profile.id(), b.id());
        assert_eq!(listing[1].like_count, 1);
        assert_eq!(listing[0].user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_list_ties_fall_back_to_creation_order() {
        let (users, teachers) = setup().await;
        let mut expected = Vec::new();

        for i in 0..3 {
            let owner = register_teacher(&users, &format!("t{}@x.com", i)).await;
            let profile = teachers
                .create(TeacherProfile::new(owner.id(), fields("Math"), None))
                .await
                .unwrap();
            expected.push(profile.id());
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let listing = teachers.list_by_likes().await.unwrap();
        let got: Vec<_> = listing.iter().map(|t| t.profile.id()).collect();

        assert_eq!(got, expected);
    }
}
