pub mod book;
pub mod commands;
pub mod errors;
pub mod events;
pub mod loan;
pub mod member;
pub mod policy;
pub mod value_objects;

pub use book::Book;
pub use errors::*;
pub use events::*;
pub use loan::{Loan, LoanStatus};
pub use member::Member;
pub use policy::LendingPolicy;
pub use value_objects::*;
