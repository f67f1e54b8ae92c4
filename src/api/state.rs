//! Application state for shared services

use std::sync::Arc;

use crate::domain::teacher::{
    ProfileFields, TeacherId, TeacherProfile, TeacherRepository, TeacherWithStats,
};
use crate::domain::user::{Identity, User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::account::{
    AccountService, LoginOutcome, PasswordHasher, RegisterRequest,
};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::teacher::TeacherService;
use crate::infrastructure::uploads::ImageStore;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub teacher_service: Arc<dyn TeacherServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub image_store: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(
        account_service: Arc<dyn AccountServiceTrait>,
        teacher_service: Arc<dyn TeacherServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            account_service,
            teacher_service,
            jwt_service,
            image_store,
        }
    }
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError>;
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, DomainError>;
}

/// Trait for teacher directory operations
#[async_trait::async_trait]
pub trait TeacherServiceTrait: Send + Sync {
    async fn create_profile(
        &self,
        identity: Identity,
        fields: ProfileFields,
        image_path: Option<String>,
    ) -> Result<TeacherProfile, DomainError>;

    async fn update_profile(
        &self,
        identity: Identity,
        id: TeacherId,
        fields: ProfileFields,
        image_path: Option<String>,
    ) -> Result<TeacherProfile, DomainError>;

    async fn list_teachers(&self) -> Result<Vec<TeacherWithStats>, DomainError>;

    async fn like(&self, identity: Identity, teacher_id: TeacherId) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, H> AccountServiceTrait for AccountService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        AccountService::register(self, request).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, DomainError> {
        AccountService::login(self, email, password).await
    }
}

#[async_trait::async_trait]
impl<R: TeacherRepository + 'static> TeacherServiceTrait for TeacherService<R> {
    async fn create_profile(
        &self,
        identity: Identity,
        fields: ProfileFields,
        image_path: Option<String>,
    ) -> Result<TeacherProfile, DomainError> {
        TeacherService::create_profile(self, identity, fields, image_path).await
    }

    async fn update_profile(
        &self,
        identity: Identity,
        id: TeacherId,
        fields: ProfileFields,
        image_path: Option<String>,
    ) -> Result<TeacherProfile, DomainError> {
        TeacherService::update_profile(self, identity, id, fields, image_path).await
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherWithStats>, DomainError> {
        TeacherService::list_teachers(self).await
    }

    async fn like(&self, identity: Identity, teacher_id: TeacherId) -> Result<(), DomainError> {
        TeacherService::like(self, identity, teacher_id).await
    }
}
