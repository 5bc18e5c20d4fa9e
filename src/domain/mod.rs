pub mod balance;
pub mod bill;
pub mod common;
pub mod due_date;

pub use balance::Balance;
pub use bill::{sample_bills, Bill, BillDraft};
pub use common::{parse_amount, Amounted, Displayable, NamedEntity};
pub use due_date::{is_due_date_format, parse_month_day};
