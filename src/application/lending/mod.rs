mod errors;
mod lending_desk;
mod lending_service;
mod overdue_detection;

pub use errors::{DeskError, Result};
pub use lending_desk::{LendOutcome, LendingDesk, NO_ACTIVE_LOAN, ReturnOutcome};
pub use lending_service::{
    ServiceDependencies, lend_book, register_book, register_member, return_book,
};
pub use overdue_detection::detect_overdue_loans;
