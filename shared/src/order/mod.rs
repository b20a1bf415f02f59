//! Order composition
//!
//! The server stores an order's meals as a flat list. Screens work with
//! line items instead: one [`MealLine`] per distinct meal with a quantity.
//! This module holds the conversion rules both ways, totals, and the plan
//! used when a whole line has to be removed one unit at a time.

pub mod composition;
pub mod removal;

// Re-exports
pub use composition::{
    LineChange, MealLine, add_unit_to_lines, expand_lines, group_meals, lines_total, meals_total,
    remove_unit_from_lines,
};
pub use removal::{RemovalPlan, RemovalProgress, RemovalStep};
