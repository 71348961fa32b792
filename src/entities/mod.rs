pub mod courses;
pub mod equipment;
pub mod equipment_rentals;
pub mod holes;
pub mod payments;
pub mod range_sessions;
pub mod scorecard_holes;
pub mod scorecards;
pub mod system_settings;
pub mod tee_times;
pub mod users;
pub mod weather_logs;

pub use courses as course_entity;
pub use equipment as equipment_entity;
pub use equipment_rentals as equipment_rental_entity;
pub use holes as hole_entity;
pub use payments as payment_entity;
pub use range_sessions as range_session_entity;
pub use scorecard_holes as scorecard_hole_entity;
pub use scorecards as scorecard_entity;
pub use system_settings as system_setting_entity;
pub use tee_times as tee_time_entity;
pub use users as user_entity;
pub use weather_logs as weather_log_entity;

pub use equipment::ConditionStatus;
pub use equipment_rentals::RentalStatus;
pub use payments::{ReferenceType, TransactionStatus};
pub use range_sessions::{BucketSize, SessionStatus};
pub use tee_times::{BookingStatus, PaymentStatus};
pub use users::UserRole;
