//! Discount module.
//!
//! Contains discount definitions, the eligibility evaluator, and the
//! amount calculator. Evaluation and calculation are pure functions of the
//! definition snapshot and the cart context.

mod amount;
mod definition;
mod eligibility;

pub use amount::{calculate, AffectedItem, DiscountApplication};
pub use definition::{
    BuyXGetYReward, DiscountDefinition, DiscountScope, DiscountStatus, DiscountValue,
    MinimumRequirement,
};
pub use eligibility::{evaluate, Eligibility, IneligibilityReason};
