pub mod expense;
pub mod group;
pub mod member;
pub mod settlement;

pub use expense::{Category, Expense, ExpenseShare, Payer};
pub use group::Group;
pub use member::Member;
pub use settlement::{GroupTotals, MouseConsequence, Party, Transfer};
