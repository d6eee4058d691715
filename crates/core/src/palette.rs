// crates/core/src/palette.rs
//! Series colours for group-mode charts.
//!
//! Assignment is positional: the n-th series gets `PALETTE[n % len]`. The
//! mapping is not stable across queries whose series sets differ.

pub const PALETTE: &[&str] = &[
    "#8884d8", "#82ca9d", "#ffc658", "#ff7300", "#0088fe", "#00c49f", "#ffbb28", "#ff8042",
];

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
