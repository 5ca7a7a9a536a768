// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field placement policies for aggregate types.
//!
//! Layout is a pure function of the ordered field sizes, so the policies
//! live apart from the registry and are testable in isolation. A future
//! packed/aligned variant slots in as another case here.

use crate::Category;

/// How an aggregate places its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateLayout {
    /// Struct layout: fields follow each other, size is the sum. No
    /// compiler padding is modeled; sizes must already account for it.
    Sequential,
    /// Union layout: all fields overlay offset 0, size is the max.
    Overlay,
}

impl AggregateLayout {
    /// Policy for a category, or `None` for types without a field list.
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::Struct => Some(Self::Sequential),
            Category::Union => Some(Self::Overlay),
            _ => None,
        }
    }

    /// Assign one offset per field size. Returns the offsets and the
    /// aggregate's total size. Always a full forward pass: layout is
    /// append-only and there is no removal to patch around.
    pub fn assign(&self, sizes: &[usize]) -> (Vec<usize>, usize) {
        match self {
            Self::Sequential => {
                let mut offsets = Vec::with_capacity(sizes.len());
                let mut cursor = 0;
                for &size in sizes {
                    offsets.push(cursor);
                    cursor += size;
                }
                (offsets, cursor)
            }
            Self::Overlay => {
                let total = sizes.iter().copied().max().unwrap_or(0);
                (vec![0; sizes.len()], total)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_assignment() {
        let (offsets, total) = AggregateLayout::Sequential.assign(&[4, 2, 8]);
        assert_eq!(offsets, vec![0, 4, 6]);
        assert_eq!(total, 14);
    }

    #[test]
    fn test_overlay_assignment() {
        let (offsets, total) = AggregateLayout::Overlay.assign(&[4, 2, 8]);
        assert_eq!(offsets, vec![0, 0, 0]);
        assert_eq!(total, 8);
    }

    #[test]
    fn test_empty_field_list() {
        assert_eq!(AggregateLayout::Sequential.assign(&[]), (vec![], 0));
        assert_eq!(AggregateLayout::Overlay.assign(&[]), (vec![], 0));
    }

    #[test]
    fn test_policy_per_category() {
        assert_eq!(
            AggregateLayout::for_category(Category::Struct),
            Some(AggregateLayout::Sequential)
        );
        assert_eq!(
            AggregateLayout::for_category(Category::Union),
            Some(AggregateLayout::Overlay)
        );
        assert_eq!(AggregateLayout::for_category(Category::SInt), None);
        assert_eq!(AggregateLayout::for_category(Category::Pointer), None);
    }

    #[test]
    fn test_order_sensitivity() {
        let (a, total_a) = AggregateLayout::Sequential.assign(&[2, 4, 8]);
        let (b, total_b) = AggregateLayout::Sequential.assign(&[4, 2, 8]);
        assert_ne!(a, b);
        assert_eq!(total_a, total_b);
    }
}
