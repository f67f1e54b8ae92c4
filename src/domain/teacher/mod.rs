//! Teacher directory domain: profiles, likes and the repository trait

mod entity;
mod repository;

pub use entity::{
    Like, ProfileFields, TeacherId, TeacherProfile, TeacherWithStats, UserPublicView,
};
pub use repository::TeacherRepository;
