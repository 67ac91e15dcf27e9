// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for descriptor and filter parsing.
//!
//! Whatever a caller hands over, parsing either fails cleanly or yields a
//! descriptor the engine can execute without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabula::testing::sample_drivers;
use tabula::{FieldFilter, QueryDescriptor, QueryEngine, SortSpec};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    static DRIVERS: std::sync::OnceLock<Vec<tabula::MapRecord>> = std::sync::OnceLock::new();
    let drivers = DRIVERS.get_or_init(sample_drivers);
    let engine = QueryEngine::default();

    if let Ok(descriptor) = serde_json::from_str::<QueryDescriptor>(text) {
        let view = engine.execute(drivers, &descriptor);
        // INVARIANT: pages are never zero and never hold more than a page
        assert!(view.total_pages >= 1);
        assert!(view.items.len() <= view.page_size.max(1));
        assert!(view.total_count <= drivers.len());
    }

    if let Ok(filter) = text.parse::<FieldFilter>() {
        let descriptor = QueryDescriptor::new().with_filter(filter);
        let view = engine.execute(drivers, &descriptor);
        assert!(view.total_count <= drivers.len());
    }

    if let Ok(spec) = text.parse::<SortSpec>() {
        // INVARIANT: the text form round-trips
        assert_eq!(spec.to_string().parse::<SortSpec>().ok(), Some(spec.clone()));
        let descriptor = QueryDescriptor::new().with_sort(Some(spec));
        assert_eq!(engine.execute(drivers, &descriptor).total_count, drivers.len());
    }
});
