use std::any::{type_name, TypeId};
use std::collections::HashMap;

/// Identity of a concrete object type known to the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
}

impl TypeDescriptor {
    /// Descriptor for the concrete type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// The `TypeId` of the described type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}

/// A registered type and the sequential id it was assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    pub id: u32,
    pub descriptor: TypeDescriptor,
}

/// Mapping from concrete type to its registration.
///
/// Registering a type twice keeps the first registration.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: HashMap<TypeId, Registration>,
    next_id: u32,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Returns the registration and whether it was new.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> (Registration, bool) {
        if let Some(existing) = self.entries.get(&descriptor.type_id) {
            return (*existing, false);
        }
        let registration = Registration {
            id: self.next_id,
            descriptor,
        };
        self.next_id += 1;
        self.entries.insert(descriptor.type_id, registration);
        (registration, true)
    }

    /// Look up the registration for a type, if any.
    pub fn get(&self, type_id: &TypeId) -> Option<&Registration> {
        self.entries.get(type_id)
    }

    /// Returns `true` if the type has been registered.
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.entries.contains_key(type_id)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no type has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registrations ordered by id.
    pub fn registrations(&self) -> Vec<Registration> {
        let mut all: Vec<Registration> = self.entries.values().copied().collect();
        all.sort_by_key(|r| r.id);
        all
    }
}
