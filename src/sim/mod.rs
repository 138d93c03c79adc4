/// Hour-by-hour storage and backup dispatch.
pub mod balance;
pub mod kpi;
pub mod types;
