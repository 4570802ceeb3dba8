//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod deposit;
pub mod deposit_schedule;
pub mod deposit_schedule_history;
pub mod form941_filing;
pub mod lookback_period;
pub mod safe_harbor_tracking;
pub mod schedule_b_entry;

// Re-export specific types to avoid conflicts
pub use deposit::{
    Column as DepositColumn, DepositStatus, Entity as Deposit, Model as DepositModel,
};
pub use deposit_schedule::DepositSchedule;
pub use deposit_schedule_history::{
    Column as ScheduleHistoryColumn, Entity as ScheduleHistory, Model as ScheduleHistoryModel,
};
pub use form941_filing::{
    Column as FilingColumn, Entity as Filing, FilingStatus, Model as FilingModel,
};
pub use lookback_period::{
    Column as LookbackPeriodColumn, Entity as LookbackPeriod, Model as LookbackPeriodModel,
};
pub use safe_harbor_tracking::{
    Column as SafeHarborColumn, Entity as SafeHarbor, Model as SafeHarborModel,
};
pub use schedule_b_entry::{
    Column as ScheduleBColumn, Entity as ScheduleB, Model as ScheduleBModel,
};
