use bevy::prelude::*;
use rapier3d::prelude::RigidBodyHandle;
use thiserror::Error;

/// Errors surfaced synchronously by the object factories and the physics
/// adapter. Construction is validated before any body or mesh exists, so a
/// failed spawn never leaks a half-built object.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("extent must be positive and finite, got {0}")]
    InvalidExtent(f32),

    #[error("position must be finite, got {0}")]
    NonFinitePosition(Vec3),

    #[error("no rigid body for handle {0:?}")]
    UnknownBody(RigidBodyHandle),
}
