pub mod payroll;
pub mod recap;
pub mod recap_calculator;

pub use payroll::{PayrollPolicy, PayrollService};
pub use recap::{
    PayrollHoursSummary, RecapOutcome, RecapProviderTrait, RecapService, RecapStatistics,
};
pub use recap_calculator::{calculate, working_days_in_month, RecapInputs, RecapPolicy};
