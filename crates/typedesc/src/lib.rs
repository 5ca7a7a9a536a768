// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type-description registry for native data layouts.
//!
//! Models native data types (scalars, structs, unions, enums, arrays,
//! pointers) as a graph of introspectable descriptors, builds composite
//! types on demand from textual type names, and computes structural layout
//! (field offsets, aggregate size) for structs and unions. Intended for
//! code generators and marshalling layers that must reason about foreign
//! type shapes without a compiler front end.
//!
//! # Features
//!
//! - **TypeRegistry**: name-indexed arena of all known type descriptors
//! - **Name resolution**: `"foo*"` / `"foo[4]"` suffixes derive pointer and
//!   array types from any registered base type, memoized by name
//! - **Layout**: sequential struct layout and overlaying union layout,
//!   recomputed on every field append
//! - **Builder API**: fluent construction of struct and union types
//!
//! # Example
//!
//! ```rust
//! use typedesc::{StructBuilder, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! let int32 = registry.lookup("int32_t").unwrap();
//! let double = registry.lookup("double").unwrap();
//!
//! let sample = StructBuilder::new("sample")
//!     .field("id", int32)
//!     .field("value", double)
//!     .register(&mut registry)
//!     .unwrap();
//! assert_eq!(registry.get(sample).size(), 12);
//!
//! // Derived types come from textual names.
//! let ptr = registry.resolve("sample*").unwrap();
//! assert!(registry.get(ptr).is_indirect());
//! let arr = registry.resolve("sample[4]").unwrap();
//! assert_eq!(registry.get(arr).size(), 48);
//! ```
//!
//! # Concurrency
//!
//! The registry carries no internal synchronization; every mutating
//! operation takes `&mut self`, so single-writer access is enforced by the
//! borrow checker. Wrap the registry in a mutex if multiple threads must
//! resolve not-yet-cached names.

mod builder;
mod descriptor;
mod errors;
mod layout;
mod registry;

pub use builder::{StructBuilder, UnionBuilder};
pub use descriptor::{Category, Field, TypeDescriptor, TypeId};
pub use errors::RegistryError;
pub use layout::AggregateLayout;
pub use registry::TypeRegistry;

/// Byte size of every pointer type, regardless of pointee.
pub const POINTER_SIZE: usize = std::mem::size_of::<usize>();

/// Byte size of an enum, which registers as a thin signed-integer alias.
pub const ENUM_SIZE: usize = 4;
