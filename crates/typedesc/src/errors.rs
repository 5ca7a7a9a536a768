// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for registry operations.
//!
//! Unknown-name resolution is not an error: [`TypeRegistry::resolve`]
//! returns `None` for names that cannot be derived, and callers decide
//! whether to register the missing base type and retry.
//!
//! [`TypeRegistry::resolve`]: crate::TypeRegistry::resolve

use crate::Category;
use std::fmt;

/// Errors produced by the type registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A type with this name is already registered.
    DuplicateName(String),
    /// `add_field` was called on a type that has no field list.
    NotAnAggregate {
        /// Name of the misused type.
        name: String,
        /// Its actual category.
        category: Category,
    },
    /// Array derivation with a zero element count.
    InvalidDimension {
        /// Offending dimension.
        dimension: usize,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName(name) => {
                write!(f, "type already registered: {}", name)
            }
            RegistryError::NotAnAggregate { name, category } => {
                write!(f, "cannot add field to {:?} type: {}", category, name)
            }
            RegistryError::InvalidDimension { dimension } => {
                write!(f, "invalid array dimension: {}", dimension)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
