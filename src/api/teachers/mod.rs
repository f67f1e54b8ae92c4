//! Teacher directory API endpoints
//!
//! Profile create/update (multipart with optional image), the like-ranked
//! directory listing, and the like action.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use bytes::Bytes;
use serde::Serialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::teacher::{ProfileFields, TeacherId, TeacherProfile, TeacherWithStats};

/// Create the teacher directory router
pub fn create_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/teacher", post(create_teacher))
        .route("/teacher/{id}", put(update_teacher))
        .route("/teachers", get(list_teachers))
        .route("/like/{teacher_id}", post(like_teacher))
}

/// An uploaded image file from the multipart form
struct UploadedImage {
    filename: String,
    content: Bytes,
}

/// Profile fields plus the optional image, as parsed from the form
struct ProfileForm {
    fields: ProfileFields,
    image: Option<UploadedImage>,
}

/// Parse the multipart profile form.
///
/// Text fields: name, subject, bio, experience, telegram, instagram.
/// `achievements` may repeat, one entry per occurrence; the singular
/// `achievement` is accepted as an alias and lands in the same list.
/// The file field is `image`.
async fn parse_profile_form(mut multipart: Multipart) -> Result<ProfileForm, ApiError> {
    let mut fields = ProfileFields::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "image".to_string());

                let content = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read image upload: {}", e))
                })?;

                if !content.is_empty() {
                    image = Some(UploadedImage { filename, content });
                }
            }
            _ => {
                let value = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read field '{}': {}", name, e))
                })?;

                match name.as_str() {
                    "name" => fields.name = value,
                    "subject" => fields.subject = value,
                    "bio" => fields.bio = value,
                    "experience" => {
                        fields.experience = value.trim().parse().map_err(|_| {
                            ApiError::bad_request("Field 'experience' must be an integer")
                        })?;
                    }
                    "achievements" | "achievement" => fields.achievements.push(value),
                    "telegram" => fields.telegram = Some(value).filter(|v| !v.is_empty()),
                    "instagram" => fields.instagram = Some(value).filter(|v| !v.is_empty()),
                    // Unknown fields are ignored, matching lenient form handling
                    _ => {}
                }
            }
        }
    }

    Ok(ProfileForm { fields, image })
}

/// Parse a path segment into a teacher id, answering the JSON error
/// envelope on malformed input instead of axum's plain-text rejection.
fn parse_teacher_id(raw: &str) -> Result<TeacherId, ApiError> {
    TeacherId::parse(raw)
        .map_err(|_| ApiError::bad_request(format!("Invalid teacher id '{}'", raw)))
}

async fn store_image(
    state: &AppState,
    image: Option<UploadedImage>,
) -> Result<Option<String>, ApiError> {
    match image {
        Some(img) => {
            let path = state.image_store.save(&img.filename, img.content).await?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// Create a teacher profile
///
/// POST /api/teachers/teacher (bearer auth, multipart)
///
/// Teachers only; one profile per account.
pub async fn create_teacher(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<TeacherProfile>), ApiError> {
    // Gate before touching the image store so a rejected caller leaves no
    // file behind
    if !identity.role.is_teacher() {
        return Err(ApiError::forbidden("Only teachers can create a profile"));
    }

    let form = parse_profile_form(multipart).await?;
    let image_path = store_image(&state, form.image).await?;

    let profile = state
        .teacher_service
        .create_profile(identity, form.fields, image_path)
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Update a teacher profile
///
/// PUT /api/teachers/teacher/{id} (bearer auth, multipart)
///
/// Owner only. A newly uploaded image replaces the stored one; omitting the
/// file keeps it.
pub async fn update_teacher(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<TeacherProfile>), ApiError> {
    let id = parse_teacher_id(&id)?;

    let form = parse_profile_form(multipart).await?;
    let image_path = store_image(&state, form.image).await?;

    let profile = state
        .teacher_service
        .update_profile(identity, id, form.fields, image_path)
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

/// List all teachers ordered by like count descending
///
/// GET /api/teachers/teachers
pub async fn list_teachers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherWithStats>>, ApiError> {
    let teachers = state.teacher_service.list_teachers().await?;
    Ok(Json(teachers))
}

/// Like response
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: String,
}

/// Like a teacher
///
/// POST /api/teachers/like/{teacher_id} (bearer auth)
///
/// At most one like per (user, teacher) pair; a repeat answers 400.
pub async fn like_teacher(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    Path(teacher_id): Path<String>,
) -> Result<Json<LikeResponse>, ApiError> {
    let teacher_id = parse_teacher_id(&teacher_id)?;

    state
        .teacher_service
        .like(identity, teacher_id)
        .await
        .map_err(|e| match e {
            // An unknown teacher is a client-caused failure on this route
            crate::domain::DomainError::NotFound { message } => ApiError::bad_request(message),
            other => other.into(),
        })?;

    Ok(Json(LikeResponse {
        message: "Like recorded".to_string(),
    }))
}
