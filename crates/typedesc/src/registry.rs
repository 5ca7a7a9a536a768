// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-indexed arena of type descriptors.
//!
//! The registry owns every descriptor for its own lifetime and hands out
//! [`TypeId`] handles. Composite types (pointers, arrays) are derived on
//! demand from textual names and memoized, so re-resolving the same
//! compound name returns the identical handle.

use crate::descriptor::{Field, TypeDescriptor, TypeId};
use crate::errors::RegistryError;
use crate::layout::AggregateLayout;
use crate::Category;
use std::collections::HashMap;

/// Built-in scalar set installed by [`TypeRegistry::new`]: C spellings plus
/// fixed-width aliases. LP64 sizes for the `long` family.
const BUILTIN_SCALARS: &[(&str, usize, Category)] = &[
    ("char", 1, Category::SInt),
    ("short", 2, Category::SInt),
    ("int", 4, Category::SInt),
    ("long", 8, Category::SInt),
    ("long long", 8, Category::SInt),
    ("unsigned char", 1, Category::UInt),
    ("unsigned short", 2, Category::UInt),
    ("unsigned int", 4, Category::UInt),
    ("unsigned long", 8, Category::UInt),
    ("unsigned long long", 8, Category::UInt),
    ("float", 4, Category::Float),
    ("double", 8, Category::Float),
    ("int8_t", 1, Category::SInt),
    ("int16_t", 2, Category::SInt),
    ("int32_t", 4, Category::SInt),
    ("int64_t", 8, Category::SInt),
    ("uint8_t", 1, Category::UInt),
    ("uint16_t", 2, Category::UInt),
    ("uint32_t", 4, Category::UInt),
    ("uint64_t", 8, Category::UInt),
];

/// In-memory store of type descriptors keyed by name.
///
/// Explicit and injectable: own one at the composition root and pass it by
/// reference to whatever needs name resolution. Tests get a fresh registry
/// each, so there is no hidden global state to bleed between them.
pub struct TypeRegistry {
    /// Append-only descriptor arena; a `TypeId` is an index into it.
    types: Vec<TypeDescriptor>,
    /// Name (and cached alternate spellings) to arena index.
    by_name: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Create a registry pre-populated with the built-in scalar types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for &(name, size, category) in BUILTIN_SCALARS {
            registry.insert(TypeDescriptor::scalar(name, size, category));
        }
        log::debug!("installed {} built-in scalar types", BUILTIN_SCALARS.len());
        registry
    }

    /// Create a registry with no built-ins.
    pub fn empty() -> Self {
        Self {
            types: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Number of registered descriptors (alternate spellings not counted).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All canonical type names, sorted for determinism.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|t| t.name().to_string()).collect();
        names.sort();
        names
    }

    /// Access a descriptor by handle.
    ///
    /// Handles are only meaningful for the registry that issued them.
    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.index()]
    }

    /// Exact-match lookup by name. Never mutates the registry.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name.trim()).copied()
    }

    /// Register a descriptor under its name.
    ///
    /// A second registration under an existing name is rejected: silently
    /// replacing a cache slot would change type identity under the feet of
    /// every holder of the old handle.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<TypeId, RegistryError> {
        if self.by_name.contains_key(descriptor.name()) {
            log::warn!("duplicate type registration rejected: {}", descriptor.name());
            return Err(RegistryError::DuplicateName(descriptor.name().to_string()));
        }
        Ok(self.insert(descriptor))
    }

    /// Register an empty struct type.
    pub fn register_struct(&mut self, name: &str) -> Result<TypeId, RegistryError> {
        self.register(TypeDescriptor::struct_type(name))
    }

    /// Register an empty union type.
    pub fn register_union(&mut self, name: &str) -> Result<TypeId, RegistryError> {
        self.register(TypeDescriptor::union_type(name))
    }

    /// Register an enum type: a named signed-integer alias.
    pub fn register_enum(&mut self, name: &str) -> Result<TypeId, RegistryError> {
        self.register(TypeDescriptor::enum_type(name))
    }

    /// Register a scalar type.
    pub fn register_scalar(
        &mut self,
        name: &str,
        size: usize,
        category: Category,
    ) -> Result<TypeId, RegistryError> {
        self.register(TypeDescriptor::scalar(name, size, category))
    }

    /// Register a new name for an existing type: same size, category and
    /// structure, distinct identity.
    pub fn register_alias(&mut self, name: &str, of: TypeId) -> Result<TypeId, RegistryError> {
        let mut descriptor = self.get(of).clone();
        descriptor.rename(name);
        self.register(descriptor)
    }

    /// Resolve a textual type name, deriving and caching composite types on
    /// demand.
    ///
    /// Grammar: a registered base name, optionally followed by `*` and
    /// `[N]` suffixes in any combination. The rightmost suffix binds
    /// outermost: `"foo*[4]"` is an array of 4 pointers to foo, while
    /// `"foo[4]*"` is a pointer to an array of 4 foo. Base names are
    /// free-form (spaces allowed, e.g. `"unsigned int"` or `"struct foo"`).
    ///
    /// Returns `None` for a bare identifier that is not registered: a type
    /// is never fabricated from an unknown name.
    pub fn resolve(&mut self, name: &str) -> Option<TypeId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(&id) = self.by_name.get(trimmed) {
            return Some(id);
        }
        if let Some(prefix) = trimmed.strip_suffix('*') {
            let base = self.resolve(prefix)?;
            let id = self.pointer_to(base);
            self.cache_spelling(trimmed, id);
            return Some(id);
        }
        if let Some(inner) = trimmed.strip_suffix(']') {
            let open = inner.rfind('[')?;
            let dimension: usize = inner[open + 1..].trim().parse().ok()?;
            let base = self.resolve(&inner[..open])?;
            let id = self.array_of(base, dimension).ok()?;
            self.cache_spelling(trimmed, id);
            return Some(id);
        }
        log::debug!("unresolvable type name: {:?}", trimmed);
        None
    }

    /// Derive (or reuse) the pointer type to `base`.
    ///
    /// The pointer's size is the platform pointer width, independent of
    /// the pointee.
    pub fn pointer_to(&mut self, base: TypeId) -> TypeId {
        let name = format!("{}*", self.get(base).name());
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        log::debug!("synthesizing pointer type {}", name);
        self.insert(TypeDescriptor::pointer(name, base))
    }

    /// Derive (or reuse) the array type of `dimension` elements of `base`.
    pub fn array_of(&mut self, base: TypeId, dimension: usize) -> Result<TypeId, RegistryError> {
        if dimension == 0 {
            return Err(RegistryError::InvalidDimension { dimension });
        }
        let (basename, element_size) = {
            let element = self.get(base);
            (element.name().to_string(), element.size())
        };
        let name = format!("{}[{}]", basename, dimension);
        if let Some(&id) = self.by_name.get(&name) {
            return Ok(id);
        }
        log::debug!("synthesizing array type {}", name);
        Ok(self.insert(TypeDescriptor::array(&basename, base, dimension, element_size)))
    }

    /// Append a field to a struct or union and recompute its layout.
    pub fn add_field(
        &mut self,
        owner: TypeId,
        name: &str,
        field_type: TypeId,
    ) -> Result<(), RegistryError> {
        self.add_field_entry(owner, Field::new(name, field_type))
    }

    /// Append an already-built [`Field`] to a struct or union.
    ///
    /// Calling this on a scalar or indirect type is a misuse and is
    /// rejected rather than silently accepted, which would corrupt the
    /// size invariants.
    pub fn add_field_entry(&mut self, owner: TypeId, field: Field) -> Result<(), RegistryError> {
        let descriptor = self.get(owner);
        if AggregateLayout::for_category(descriptor.category()).is_none() {
            return Err(RegistryError::NotAnAggregate {
                name: descriptor.name().to_string(),
                category: descriptor.category(),
            });
        }
        self.types[owner.index()].fields_mut().push(field);
        self.fields_changed(owner);
        Ok(())
    }

    /// Re-run an aggregate's layout pass.
    ///
    /// `add_field` already does this; call it explicitly after growing a
    /// nested aggregate that `owner` embeds, so the stale offsets and size
    /// are brought forward. No-op for non-aggregates.
    pub fn recompute_layout(&mut self, owner: TypeId) {
        self.fields_changed(owner);
    }

    /// Render a human-readable structural description, recursing into
    /// nested aggregates with each level indented by `prefix`.
    pub fn render(&self, id: TypeId, prefix: &str) -> String {
        let descriptor = self.get(id);
        match descriptor.category() {
            Category::Struct | Category::Union => {
                let keyword = if descriptor.category() == Category::Struct {
                    "struct"
                } else {
                    "union"
                };
                let mut out = format!(
                    "{}{} {} ({} bytes)",
                    prefix,
                    keyword,
                    descriptor.name(),
                    descriptor.size()
                );
                for field in descriptor.fields() {
                    let field_type = self.get(field.type_id());
                    out.push('\n');
                    if matches!(field_type.category(), Category::Struct | Category::Union) {
                        out.push_str(&format!(
                            "{}  {} @ {}:\n",
                            prefix,
                            field.name(),
                            field.offset()
                        ));
                        out.push_str(&self.render(field.type_id(), &format!("{}    ", prefix)));
                    } else {
                        out.push_str(&format!(
                            "{}  {}: {} @ {}",
                            prefix,
                            field.name(),
                            field_type.name(),
                            field.offset()
                        ));
                    }
                }
                out
            }
            _ => format!(
                "{}{} ({} bytes)",
                prefix,
                descriptor.name(),
                descriptor.size()
            ),
        }
    }

    /// Unchecked arena insert; callers guarantee the name is free.
    fn insert(&mut self, descriptor: TypeDescriptor) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.by_name.insert(descriptor.name().to_string(), id);
        self.types.push(descriptor);
        id
    }

    /// Cache an alternate spelling (stray whitespace) of a derived type so
    /// the exact query string hits on re-resolution.
    fn cache_spelling(&mut self, spelling: &str, id: TypeId) {
        if !self.by_name.contains_key(spelling) {
            self.by_name.insert(spelling.to_string(), id);
        }
    }

    /// Full layout pass over `owner`'s field list: assign every offset and
    /// the total size from the current field type sizes.
    fn fields_changed(&mut self, owner: TypeId) {
        let descriptor = &self.types[owner.index()];
        let Some(policy) = AggregateLayout::for_category(descriptor.category()) else {
            return;
        };
        let sizes: Vec<usize> = descriptor
            .fields()
            .iter()
            .map(|f| self.types[f.type_id().index()].size())
            .collect();
        let (offsets, total) = policy.assign(&sizes);

        let descriptor = &mut self.types[owner.index()];
        descriptor.set_size(total);
        for (field, offset) in descriptor.fields_mut().iter_mut().zip(offsets) {
            field.set_offset(offset);
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
