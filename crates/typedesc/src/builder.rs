// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builders for aggregate types.
//!
//! The builders accumulate fields and install them in one `register` step,
//! so the final layout appears at a single observable point. Incremental
//! construction via [`TypeRegistry::add_field`] remains available for
//! callers that discover fields one at a time.

use crate::descriptor::TypeId;
use crate::errors::RegistryError;
use crate::registry::TypeRegistry;

/// Builder for struct types.
#[derive(Debug)]
pub struct StructBuilder {
    name: String,
    fields: Vec<(String, TypeId)>,
}

impl StructBuilder {
    /// Start a struct with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.fields.push((name.into(), type_id));
        self
    }

    /// Register the struct and install its fields.
    pub fn register(self, registry: &mut TypeRegistry) -> Result<TypeId, RegistryError> {
        let id = registry.register_struct(&self.name)?;
        for (name, type_id) in self.fields {
            registry.add_field(id, &name, type_id)?;
        }
        Ok(id)
    }
}

/// Builder for union types.
#[derive(Debug)]
pub struct UnionBuilder {
    name: String,
    fields: Vec<(String, TypeId)>,
}

impl UnionBuilder {
    /// Start a union with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append an overlaying field.
    pub fn field(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.fields.push((name.into(), type_id));
        self
    }

    /// Register the union and install its fields.
    pub fn register(self, registry: &mut TypeRegistry) -> Result<TypeId, RegistryError> {
        let id = registry.register_union(&self.name)?;
        for (name, type_id) in self.fields {
            registry.add_field(id, &name, type_id)?;
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_builder() {
        let mut registry = TypeRegistry::new();
        let f64_id = registry.lookup("double").unwrap();

        let point = StructBuilder::new("point3d")
            .field("x", f64_id)
            .field("y", f64_id)
            .field("z", f64_id)
            .register(&mut registry)
            .unwrap();

        let descriptor = registry.get(point);
        assert_eq!(descriptor.name(), "point3d");
        assert_eq!(descriptor.fields().len(), 3);
        assert_eq!(descriptor.size(), 24);
        assert_eq!(descriptor.field("y").map(|f| f.offset()), Some(8));
    }

    #[test]
    fn test_union_builder() {
        let mut registry = TypeRegistry::new();
        let int = registry.lookup("int").unwrap();
        let double = registry.lookup("double").unwrap();

        let value = UnionBuilder::new("value")
            .field("as_int", int)
            .field("as_double", double)
            .register(&mut registry)
            .unwrap();

        let descriptor = registry.get(value);
        assert_eq!(descriptor.size(), 8);
        assert!(descriptor.fields().iter().all(|f| f.offset() == 0));
    }

    #[test]
    fn test_builder_duplicate_name_rejected() {
        let mut registry = TypeRegistry::new();
        StructBuilder::new("twice").register(&mut registry).unwrap();
        let err = StructBuilder::new("twice").register(&mut registry).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("twice".to_string()));
    }
}
