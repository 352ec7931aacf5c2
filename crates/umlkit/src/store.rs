//! Class storage.
//!
//! [`EntityStore`] owns every [`Class`] of a diagram. Classes live in an arena
//! addressed by [`ClassId`]; an insertion-ordered name index maps display
//! names to ids. Renaming a class only rewrites the index, so anything that
//! holds an id keeps pointing at the right class.
//!
//! Mutations are crate-private: outside code goes through
//! [`DiagramManager`](crate::DiagramManager), which keeps the store and the
//! relationship graph in step.

use indexmap::IndexMap;

use umlkit_core::{
    error::{EntityKind, ModelError, ModelResult},
    identifier::ClassId,
    model::Class,
    ordered::rekey,
};

/// Arena of classes with an insertion-ordered name index.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    slots: Vec<Option<Class>>,
    index: IndexMap<String, ClassId>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of classes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the store holds no classes.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if a class with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the id of the named class.
    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.index.get(name).copied()
    }

    /// Looks up a class by name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.id_of(name).and_then(|id| self.class_by_id(id))
    }

    /// Looks up a class by id. Ids of deleted classes resolve to `None`.
    pub fn class_by_id(&self, id: ClassId) -> Option<&Class> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the current name of the class with this id.
    pub fn name_of(&self, id: ClassId) -> Option<&str> {
        self.class_by_id(id).map(Class::name)
    }

    /// Iterates over classes in list order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.index.values().filter_map(|id| self.class_by_id(*id))
    }

    /// Returns the classes sorted by name, without changing list order.
    pub fn sorted_classes(&self) -> Vec<&Class> {
        let mut classes: Vec<&Class> = self.classes().collect();
        classes.sort_by(|a, b| a.name().cmp(b.name()));
        classes
    }

    pub(crate) fn class_mut(&mut self, name: &str) -> Option<&mut Class> {
        let id = self.id_of(name)?;
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub(crate) fn require_class_mut(&mut self, name: &str) -> ModelResult<&mut Class> {
        self.class_mut(name)
            .ok_or_else(|| ModelError::not_found(EntityKind::Class, name))
    }

    /// Adds an empty class at the end of the list.
    pub(crate) fn add_class(&mut self, name: &str) -> ModelResult<ClassId> {
        if self.contains(name) {
            return Err(ModelError::conflict(EntityKind::Class, name));
        }

        let id = ClassId::new(self.slots.len());
        self.slots.push(Some(Class::new(name)));
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Removes a class from the index and the arena, returning it.
    ///
    /// The slot stays allocated so the id is never handed out again.
    pub(crate) fn remove_class(&mut self, name: &str) -> ModelResult<(ClassId, Class)> {
        let id = self
            .index
            .shift_remove(name)
            .ok_or_else(|| ModelError::not_found(EntityKind::Class, name))?;
        let class = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or_else(|| ModelError::not_found(EntityKind::Class, name))?;
        Ok((id, class))
    }

    /// Re-keys a class under a new name, keeping its id, its contents and its
    /// position in the list.
    pub(crate) fn rename_class(&mut self, old: &str, new: &str) -> ModelResult<ClassId> {
        if !self.contains(old) {
            return Err(ModelError::not_found(EntityKind::Class, old));
        }
        if self.contains(new) {
            return Err(ModelError::conflict(EntityKind::Class, new));
        }

        let id = *rekey(&mut self.index, old, new)
            .ok_or_else(|| ModelError::not_found(EntityKind::Class, old))?;
        if let Some(class) = self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            class.set_name(new);
        }
        Ok(id)
    }

    /// Reorders the class list by name.
    pub(crate) fn sort_by_name(&mut self) {
        self.index.sort_keys();
    }

    /// Drops every class.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}
