// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skintag::classifier::{classify, Classification};
use skintag::query::{FilterState, QueryEngine};

#[derive(Arbitrary, Debug)]
struct Input {
    filenames: Vec<String>,
    selection: (String, String, String, String),
}

fuzz_target!(|input: Input| {
    for name in &input.filenames {
        if let Classification::Tagged(record) = classify(name) {
            assert_ne!(record.rarity, "uncommom");
            assert!(!record.gender.is_empty());
        }
    }

    let report = skintag::classifier::classify_all(&input.filenames);
    let json = report.catalog.to_json_pretty().expect("catalog serializes");
    let reloaded = skintag::Catalog::from_json_str(&json).expect("catalog reloads");
    assert_eq!(reloaded, report.catalog);

    let (class, gender, skin_set, color) = input.selection;
    let selection = FilterState { class, gender, skin_set, color, ..FilterState::default() };
    let _ = QueryEngine::new(&report.catalog).view(&selection);
});
