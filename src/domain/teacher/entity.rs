//! Teacher profile entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::{User, UserId, UserRole};

/// Teacher profile identifier backed by a UUIDv4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(Uuid);

impl TeacherId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable profile fields, shared between create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub name: String,
    pub subject: String,
    pub bio: String,
    /// Years of experience
    pub experience: i32,
    pub achievements: Vec<String>,
    pub telegram: Option<String>,
    pub instagram: Option<String>,
}

/// Teacher profile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherProfile {
    id: TeacherId,
    /// Owning user; one profile per user
    user_id: UserId,
    name: String,
    subject: String,
    bio: String,
    /// Public path of the uploaded profile image, if any
    image_path: Option<String>,
    experience: i32,
    achievements: Vec<String>,
    telegram: Option<String>,
    instagram: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TeacherProfile {
    /// Create a new profile owned by the given user
    pub fn new(user_id: UserId, fields: ProfileFields, image_path: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            id: TeacherId::generate(),
            user_id,
            name: fields.name,
            subject: fields.subject,
            bio: fields.bio,
            image_path,
            experience: fields.experience,
            achievements: fields.achievements,
            telegram: fields.telegram,
            instagram: fields.instagram,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct a profile from stored fields
    pub fn from_parts(
        id: TeacherId,
        user_id: UserId,
        fields: ProfileFields,
        image_path: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name: fields.name,
            subject: fields.subject,
            bio: fields.bio,
            image_path,
            experience: fields.experience,
            achievements: fields.achievements,
            telegram: fields.telegram,
            instagram: fields.instagram,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TeacherId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    pub fn experience(&self) -> i32 {
        self.experience
    }

    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    pub fn telegram(&self) -> Option<&str> {
        self.telegram.as_deref()
    }

    pub fn instagram(&self) -> Option<&str> {
        self.instagram.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the given user owns this profile
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Overwrite the editable fields. A `Some` image path replaces the
    /// stored one; `None` keeps whatever was there before.
    pub fn apply_update(&mut self, fields: ProfileFields, image_path: Option<String>) {
        self.name = fields.name;
        self.subject = fields.subject;
        self.bio = fields.bio;
        self.experience = fields.experience;
        self.achievements = fields.achievements;
        self.telegram = fields.telegram;
        self.instagram = fields.instagram;

        if image_path.is_some() {
            self.image_path = image_path;
        }

        self.updated_at = Utc::now();
    }
}

/// Like: a unique endorsement linking one user to one teacher profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub user_id: UserId,
    pub teacher_id: TeacherId,
}

impl Like {
    pub fn new(user_id: UserId, teacher_id: TeacherId) -> Self {
        Self {
            user_id,
            teacher_id,
        }
    }
}

/// Public view of a user embedded in directory listings.
/// Carries no password hash by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublicView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for UserPublicView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
        }
    }
}

/// A teacher profile joined with its owner and like relations, as returned
/// by the directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherWithStats {
    #[serde(flatten)]
    pub profile: TeacherProfile,
    pub user: UserPublicView,
    /// Users who liked this teacher
    pub likes: Vec<UserId>,
    pub like_count: u64,
}
