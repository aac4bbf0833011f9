pub mod attendance;
pub mod attendance_recap;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod shift;

pub use attendance::{AttendanceRepositoryTrait, PgAttendanceRepository};
pub use attendance_recap::{AttendanceRecapRepositoryTrait, PgAttendanceRecapRepository};
pub use employee::{EmployeeRepositoryTrait, PgEmployeeRepository};
pub use leave::{LeaveRepositoryTrait, PgLeaveRepository};
pub use payroll::{PayrollRepositoryTrait, PgPayrollRepository};
pub use shift::{PgShiftRepository, ShiftRepositoryTrait};
