//! Teacher profile repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{TeacherId, TeacherProfile, TeacherWithStats};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for teacher profiles and likes
#[async_trait]
pub trait TeacherRepository: Send + Sync + Debug {
    /// Get a profile by its ID
    async fn get(&self, id: TeacherId) -> Result<Option<TeacherProfile>, DomainError>;

    /// Get the profile owned by the given user, if any
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<TeacherProfile>, DomainError>;

    /// Persist a new profile. Fails with `Conflict` if the owning user
    /// already has one.
    async fn create(&self, profile: TeacherProfile) -> Result<TeacherProfile, DomainError>;

    /// Overwrite an existing profile. Fails with `NotFound` if the ID is
    /// unknown.
    async fn update(&self, profile: &TeacherProfile) -> Result<TeacherProfile, DomainError>;

    /// List all profiles with owner and likes, ordered by like count
    /// descending; ties fall back to creation time ascending.
    async fn list_by_likes(&self) -> Result<Vec<TeacherWithStats>, DomainError>;

    /// Record a like. Fails with `Conflict` if the (user, teacher) pair
    /// already exists and `NotFound` if the teacher does not.
    async fn add_like(&self, user_id: UserId, teacher_id: TeacherId) -> Result<(), DomainError>;

    /// Count likes for a single teacher
    async fn like_count(&self, teacher_id: TeacherId) -> Result<u64, DomainError>;
}
