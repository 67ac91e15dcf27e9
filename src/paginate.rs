// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size, 1-indexed pages.
//!
//! `total_pages` is never zero: an empty result is "page 1 of 1, nothing on
//! it", which is what the pager UI wants to render. A page past the end is
//! served empty rather than clamped, so a caller holding a stale page number
//! sees an empty page instead of silently jumping elsewhere. Use
//! [`clamp_page`] when jumping is what you want.

use crate::contracts::check_page_consistent;

/// One page sliced out of a larger sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The requested page, after clamping values below 1.
    pub page: usize,
    pub total_pages: usize,
}

/// Number of pages needed for `total` items.
///
/// A `page_size` of zero means "everything on one page".
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        1
    } else {
        total.div_ceil(page_size).max(1)
    }
}

/// Pull `page` back into `1..=total_pages`.
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total, page_size))
}

/// Slice out page `page` (1-indexed) of `page_size` items.
///
/// Page 0 is treated as page 1. `page_size == 0` returns every item on a
/// single page.
pub fn paginate<T>(records: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total = records.len();
    let page = page.max(1);
    let pages = total_pages(total, page_size);

    let items: Vec<T> = if page_size == 0 {
        if page == 1 {
            records
        } else {
            Vec::new()
        }
    } else {
        let start = (page - 1).saturating_mul(page_size);
        records.into_iter().skip(start).take(page_size).collect()
    };

    check_page_consistent(total, page_size, pages, items.len());
    Page {
        items,
        page,
        total_pages: pages,
    }
}
