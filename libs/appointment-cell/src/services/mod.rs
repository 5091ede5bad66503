pub mod assignment;
pub mod booking;
pub mod queries;

pub use assignment::DoctorAssignmentService;
pub use booking::{parse_appointment_datetime, AppointmentBookingService};
pub use queries::AppointmentQueryService;
