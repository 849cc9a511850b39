pub mod category_service;
pub mod expense_service;
pub mod summary_service;
pub mod tag_service;

pub use category_service::CategoryService;
pub use expense_service::ExpenseService;
pub use summary_service::{
    Breakdown, BreakdownEntry, BudgetProgress, CumulativePoint, DailyTotal, SummaryService,
    UNCATEGORIZED, UNTAGGED,
};
pub use tag_service::TagService;

use crate::errors::ValidationError;

pub type ServiceResult<T> = Result<T, ValidationError>;
