//! # finboard-fixtures
//!
//! Mock users, transactions, advisors and categories for the finboard
//! front end. The records are data only; nothing here validates them beyond
//! deserialization.
//!
//! ```rust
//! use finboard_fixtures::{Fixtures, TransactionKind};
//!
//! let fixtures = Fixtures::load().unwrap();
//! let sarah = fixtures.user_by_email("sarah@example.com").unwrap();
//! assert_eq!(fixtures.transactions_for_user(sarah.id).len(), 4);
//! assert!(!fixtures.categories_of_kind(TransactionKind::Expense).is_empty());
//! ```

mod error;
mod fixtures;
pub mod records;

pub use error::{FixtureError, Result};
pub use fixtures::Fixtures;
pub use records::{Advisor, Category, Role, Transaction, TransactionKind, User, UserStats};
