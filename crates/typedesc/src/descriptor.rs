// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors and fields.

use crate::{ENUM_SIZE, POINTER_SIZE};
use std::hash::{Hash, Hasher};

/// Stable handle to a type stored in a [`TypeRegistry`](crate::TypeRegistry).
///
/// Handles are plain arena indices: cheap to copy, valid for the lifetime of
/// the registry that issued them. All cross-type references (a field's type,
/// an array's element, a pointer's pointee) are expressed as `TypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Category of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Array,
    Pointer,
    SInt,
    UInt,
    Float,
    Struct,
    Union,
}

impl Category {
    /// True for scalar categories (signed/unsigned integers, floats).
    pub fn is_simple(self) -> bool {
        matches!(self, Self::SInt | Self::UInt | Self::Float)
    }

    /// True for categories defined in terms of another type.
    pub fn is_indirect(self) -> bool {
        matches!(self, Self::Array | Self::Pointer)
    }
}

/// A named field inside a struct or union.
///
/// The offset is owned by the containing aggregate's layout pass; clients
/// only read it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    type_id: TypeId,
    offset: usize,
}

impl Field {
    /// Create a field referencing the given type. The offset starts at 0
    /// and is assigned when the owning aggregate recomputes its layout.
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            offset: 0,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle of the field's type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Byte offset within the owning aggregate.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }
}

/// Array bookkeeping: element count plus the display strings used to
/// synthesize the array's name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ArrayInfo {
    dimension: usize,
    basename: String,
    dim_string: String,
}

/// A single type descriptor: name, byte size, category, and (for arrays and
/// pointers) the type it derives from.
///
/// Equality and hashing use the name only: two descriptors with the same
/// name describe the same type, so descriptors work as map keys without
/// reference comparison.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    size: usize,
    category: Category,
    next_type: Option<TypeId>,
    array: Option<ArrayInfo>,
    fields: Vec<Field>,
}

impl TypeDescriptor {
    fn base(name: impl Into<String>, size: usize, category: Category) -> Self {
        Self {
            name: name.into(),
            size,
            category,
            next_type: None,
            array: None,
            fields: Vec::new(),
        }
    }

    /// Create a scalar descriptor. `category` must be one of the simple
    /// categories.
    pub fn scalar(name: impl Into<String>, size: usize, category: Category) -> Self {
        debug_assert!(category.is_simple(), "scalar requires a simple category");
        Self::base(name, size, category)
    }

    /// Create an empty struct descriptor (size 0 until fields are added).
    pub fn struct_type(name: impl Into<String>) -> Self {
        Self::base(name, 0, Category::Struct)
    }

    /// Create an empty union descriptor (size 0 until fields are added).
    pub fn union_type(name: impl Into<String>) -> Self {
        Self::base(name, 0, Category::Union)
    }

    /// Create an enum descriptor: a named signed-integer alias with no
    /// field list.
    pub fn enum_type(name: impl Into<String>) -> Self {
        Self::base(name, ENUM_SIZE, Category::SInt)
    }

    /// Pointer to `pointee`. Size is the platform pointer width, never
    /// derived from the pointee.
    pub(crate) fn pointer(name: String, pointee: TypeId) -> Self {
        let mut descriptor = Self::base(name, POINTER_SIZE, Category::Pointer);
        descriptor.next_type = Some(pointee);
        descriptor
    }

    /// `dimension` contiguous elements of `element`.
    pub(crate) fn array(
        basename: &str,
        element: TypeId,
        dimension: usize,
        element_size: usize,
    ) -> Self {
        let dim_string = format!("[{}]", dimension);
        let name = format!("{}{}", basename, dim_string);
        let mut descriptor = Self::base(name, dimension * element_size, Category::Array);
        descriptor.next_type = Some(element);
        descriptor.array = Some(ArrayInfo {
            dimension,
            basename: basename.to_string(),
            dim_string,
        });
        descriptor
    }

    /// Type name, unique within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte size. 0 for an aggregate with no fields yet.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Category tag.
    pub fn category(&self) -> Category {
        self.category
    }

    /// True for scalar categories.
    pub fn is_simple(&self) -> bool {
        self.category.is_simple()
    }

    /// True iff the descriptor references another type (array element or
    /// pointer pointee, available via [`next_type`](Self::next_type)).
    pub fn is_indirect(&self) -> bool {
        self.category.is_indirect()
    }

    /// Element type (arrays) or pointee (pointers).
    pub fn next_type(&self) -> Option<TypeId> {
        self.next_type
    }

    /// Element count, for arrays.
    pub fn dimension(&self) -> Option<usize> {
        self.array.as_ref().map(|a| a.dimension)
    }

    /// Element type name the array was derived from.
    pub fn basename(&self) -> Option<&str> {
        self.array.as_ref().map(|a| a.basename.as_str())
    }

    /// Rendered dimension suffix, e.g. `"[10]"`.
    pub fn dim_string(&self) -> Option<&str> {
        self.array.as_ref().map(|a| a.dim_string.as_str())
    }

    /// Ordered field list. Empty for non-aggregates.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Vec<Field> {
        &mut self.fields
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_predicates() {
        assert!(Category::SInt.is_simple());
        assert!(Category::UInt.is_simple());
        assert!(Category::Float.is_simple());
        assert!(!Category::Array.is_simple());
        assert!(!Category::Pointer.is_simple());
        assert!(!Category::Struct.is_simple());
        assert!(!Category::Union.is_simple());

        assert!(Category::Array.is_indirect());
        assert!(Category::Pointer.is_indirect());
        assert!(!Category::SInt.is_indirect());
        assert!(!Category::Struct.is_indirect());
    }

    #[test]
    fn test_equality_by_name() {
        let a = TypeDescriptor::struct_type("foo");
        let b = TypeDescriptor::scalar("foo", 4, Category::SInt);
        let c = TypeDescriptor::struct_type("bar");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_enum_is_integer_alias() {
        let e = TypeDescriptor::enum_type("color");
        assert_eq!(e.category(), Category::SInt);
        assert_eq!(e.size(), ENUM_SIZE);
        assert!(e.is_simple());
        assert!(e.fields().is_empty());
    }

    #[test]
    fn test_empty_aggregate_has_zero_size() {
        let s = TypeDescriptor::struct_type("empty");
        assert_eq!(s.size(), 0);
        assert_eq!(s.category(), Category::Struct);
        assert!(s.next_type().is_none());
    }

    #[test]
    fn test_array_display_strings() {
        let element = TypeId(0);
        let a = TypeDescriptor::array("int", element, 10, 4);
        assert_eq!(a.name(), "int[10]");
        assert_eq!(a.basename(), Some("int"));
        assert_eq!(a.dim_string(), Some("[10]"));
        assert_eq!(a.dimension(), Some(10));
        assert_eq!(a.size(), 40);
        assert_eq!(a.next_type(), Some(element));
    }
}
