use bevy::prelude::*;
use rapier3d::prelude::RigidBodyHandle;

use super::world::PhysicsWorld;

/// Whether an object is integrated by the solver or pinned in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Dynamic,
    Static,
}

/// One logical scene object: a rigid body and the mesh entity rendered for
/// it, created together and torn down together. The registry owns the
/// pairing; the physics world and the render world own the resources behind
/// the two handles.
#[derive(Clone, Copy, Debug)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub body: RigidBodyHandle,
    pub mesh: Entity,
}

/// Stable handle into the registry. The generation changes whenever a slot is
/// reused, so a handle kept across a removal stops resolving instead of
/// aliasing the new occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

struct Slot {
    generation: u32,
    entry: Option<SceneObject>,
}

/// Slot arena of all registered scene objects. Removal is O(1) via a free
/// list; traversal skips empty slots and is a fresh pass on every call.
#[derive(Resource, Default)]
pub struct SceneObjects {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl SceneObjects {
    pub fn register(&mut self, object: SceneObject) -> ObjectHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(object);
            ObjectHandle {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                entry: Some(object),
            });
            ObjectHandle {
                index: self.slots.len() as u32 - 1,
                generation: 0,
            }
        }
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SceneObject> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let object = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Some(object)
    }

    /// Remove every object matching `predicate` and hand the removed entries
    /// back so the caller can release the paired resources.
    pub fn drain_where<F>(&mut self, mut predicate: F) -> Vec<SceneObject>
    where
        F: FnMut(&SceneObject) -> bool,
    {
        let mut removed = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.as_ref().is_some_and(&mut predicate) {
                if let Some(object) = slot.entry.take() {
                    slot.generation = slot.generation.wrapping_add(1);
                    self.free.push(index as u32);
                    self.live -= 1;
                    removed.push(object);
                }
            }
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entry.as_ref().map(|object| {
                (
                    ObjectHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    object,
                )
            })
        })
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn count_kind(&self, kind: ObjectKind) -> usize {
        self.iter().filter(|(_, object)| object.kind == kind).count()
    }
}

/// Unregister every object matching `predicate`, cascading the removal
/// through both adapters: the rigid body leaves the physics world and the
/// mesh entity is despawned. After this returns (and the queued despawns
/// apply), no removed handle resolves anywhere.
pub fn unregister_where<F>(
    objects: &mut SceneObjects,
    physics: &mut PhysicsWorld,
    commands: &mut Commands,
    predicate: F,
) where
    F: FnMut(&SceneObject) -> bool,
{
    for object in objects.drain_where(predicate) {
        if !physics.remove_body(object.body) {
            warn!(body = ?object.body, "registry pointed at an already-removed body");
        }
        if let Ok(mut entity) = commands.get_entity(object.mesh) {
            entity.despawn();
        }
    }
}
