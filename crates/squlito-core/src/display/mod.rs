//! Text layout for result grids.

pub mod grid;

pub use grid::{
    COLUMN_SEPARATOR, GridRender, MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, compute_table,
    compute_table_capped, format_cell, hit_test_column,
};
