pub mod category;
pub mod common;
pub mod expense;
pub mod recurring;
pub mod seeds;
pub mod tag;

pub use category::{Category, CategoryColor, CategoryRef};
pub use common::{Amounted, Displayable, Identifiable};
pub use expense::ExpenseEntry;
pub use recurring::RecurringExpense;
pub use tag::Tag;
