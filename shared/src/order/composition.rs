//! Grouping a flat meal list into line items

use crate::models::{Meal, MealId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One distinct meal of an order together with how many units it has
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealLine {
    pub meal: Meal,
    /// Always at least 1; a line at zero no longer exists
    pub quantity: u32,
}

/// Outcome of taking one unit off a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// Line still present with this many units left
    Decremented(u32),
    /// Last unit removed, the line is gone
    Removed,
}

impl MealLine {
    pub fn new(meal: Meal) -> Self {
        Self { meal, quantity: 1 }
    }

    pub fn meal_id(&self) -> MealId {
        self.meal.id
    }

    /// `price × quantity`
    pub fn subtotal(&self) -> Decimal {
        self.meal.price * Decimal::from(self.quantity)
    }

    /// Take one unit off this line
    ///
    /// Returns [`LineChange::Removed`] when the line held a single unit; the
    /// caller drops the line in that case. Quantity is never left at zero.
    pub fn remove_unit(&mut self) -> LineChange {
        if self.quantity > 1 {
            self.quantity -= 1;
            LineChange::Decremented(self.quantity)
        } else {
            LineChange::Removed
        }
    }
}

/// Group a flat meal list into lines
///
/// Lines keep the order in which each meal id first appears.
pub fn group_meals(meals: &[Meal]) -> Vec<MealLine> {
    let mut lines: Vec<MealLine> = Vec::new();
    for meal in meals {
        match lines.iter_mut().find(|line| line.meal.id == meal.id) {
            Some(line) => line.quantity += 1,
            None => lines.push(MealLine::new(meal.clone())),
        }
    }
    lines
}

/// Expand lines back into a flat list of meal ids, `quantity` copies each
///
/// This is also the body a bulk addition sends.
pub fn expand_lines(lines: &[MealLine]) -> Vec<MealId> {
    lines
        .iter()
        .flat_map(|line| std::iter::repeat_n(line.meal.id, line.quantity as usize))
        .collect()
}

/// Sum of `price × quantity` over all lines
pub fn lines_total(lines: &[MealLine]) -> Decimal {
    lines.iter().map(MealLine::subtotal).sum()
}

/// Sum of prices over a flat meal list
pub fn meals_total(meals: &[Meal]) -> Decimal {
    meals.iter().map(|meal| meal.price).sum()
}

/// Add one unit of `meal` to `lines`
///
/// Increments an existing line, otherwise appends a new one. Returns the
/// resulting quantity.
pub fn add_unit_to_lines(lines: &mut Vec<MealLine>, meal: &Meal) -> u32 {
    match lines.iter_mut().find(|line| line.meal.id == meal.id) {
        Some(line) => {
            line.quantity += 1;
            line.quantity
        }
        None => {
            lines.push(MealLine::new(meal.clone()));
            1
        }
    }
}

/// Remove one unit of `meal_id` from `lines`
///
/// Returns `None` when no line holds that meal.
pub fn remove_unit_from_lines(lines: &mut Vec<MealLine>, meal_id: MealId) -> Option<LineChange> {
    let idx = lines.iter().position(|line| line.meal.id == meal_id)?;
    let change = lines[idx].remove_unit();
    if change == LineChange::Removed {
        lines.remove(idx);
    }
    Some(change)
}
