pub mod registry;
pub mod world;

pub use registry::{ObjectHandle, ObjectKind, SceneObject, SceneObjects, unregister_where};
pub use world::PhysicsWorld;
