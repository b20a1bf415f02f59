//! Unit-by-unit removal of a whole line
//!
//! The server only knows how to remove one unit of a meal per request, so
//! clearing a line of quantity `q` is `q` requests issued strictly in order.
//! [`RemovalPlan`] is that ordered task list plus the count of steps the
//! server has confirmed.

use super::MealLine;
use crate::models::{MealId, OrderId};

/// One unit removal to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalStep {
    pub order_id: OrderId,
    pub meal_id: MealId,
    /// 1-based position in the plan
    pub seq: u32,
}

/// Where a plan stands after a confirmed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalProgress {
    Continue { remaining: u32 },
    Finished,
}

/// Ordered list of `requested` unit removals for one meal of one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    order_id: OrderId,
    meal_id: MealId,
    requested: u32,
    completed: u32,
}

impl RemovalPlan {
    pub fn new(order_id: OrderId, meal_id: MealId, quantity: u32) -> Self {
        Self {
            order_id,
            meal_id,
            requested: quantity,
            completed: 0,
        }
    }

    /// Plan that clears `line` entirely
    pub fn for_line(order_id: OrderId, line: &MealLine) -> Self {
        Self::new(order_id, line.meal.id, line.quantity)
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn meal_id(&self) -> MealId {
        self.meal_id
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    /// Steps the server has confirmed so far
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn remaining(&self) -> u32 {
        self.requested - self.completed
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.requested
    }

    /// The step to send next, `None` once every step is confirmed
    pub fn next_step(&self) -> Option<RemovalStep> {
        (!self.is_finished()).then(|| RemovalStep {
            order_id: self.order_id,
            meal_id: self.meal_id,
            seq: self.completed + 1,
        })
    }

    /// Record that the step returned by [`next_step`](Self::next_step) succeeded
    pub fn complete_step(&mut self) -> RemovalProgress {
        if !self.is_finished() {
            self.completed += 1;
        }
        match self.remaining() {
            0 => RemovalProgress::Finished,
            remaining => RemovalProgress::Continue { remaining },
        }
    }

    /// Every step of the plan in send order
    pub fn steps(&self) -> impl Iterator<Item = RemovalStep> + '_ {
        (1..=self.requested).map(|seq| RemovalStep {
            order_id: self.order_id,
            meal_id: self.meal_id,
            seq,
        })
    }
}
