//! Deterministic fixture data for the demo screen and harness rendering.

/// Items shown when the config file does not list any.
pub fn demo_items() -> Vec<String> {
    [
        "Apple",
        "Apricot",
        "Banana",
        "Blackberry",
        "Blueberry",
        "Cherry",
        "Grape",
        "Lemon",
        "Mango",
        "Orange",
        "Peach",
        "Pear",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Item list exercised by the interaction harness.
pub fn harness_items() -> Vec<String> {
    ["Abb", "Abc", "A", "B", "C"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}
