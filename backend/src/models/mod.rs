pub mod attendance;
pub mod attendance_recap;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod period;
pub mod shift;

pub use attendance::Attendance;
pub use attendance_recap::{AttendanceRecap, RecapCalculation, RecapStatus};
pub use employee::Employee;
pub use leave::{Leave, LeaveStatus};
pub use payroll::{Payroll, PayrollDerivation, PayrollStatus};
pub use period::Period;
pub use shift::Shift;
