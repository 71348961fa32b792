pub mod admin;
pub mod auth;
pub mod course;
pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod payment;
pub mod range;
pub mod scorecard;
pub mod staff;
pub mod tee_time;
pub mod weather;

pub use admin::admin_config;
pub use auth::auth_config;
pub use course::course_config;
pub use dashboard::dashboard_config;
pub use equipment::equipment_config;
pub use health::health_config;
pub use payment::payment_config;
pub use range::range_config;
pub use scorecard::scorecard_config;
pub use staff::staff_config;
pub use tee_time::tee_time_config;
pub use weather::weather_config;
