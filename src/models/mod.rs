pub mod common;
pub mod course;
pub mod equipment;
pub mod health;
pub mod pagination;
pub mod payment;
pub mod range;
pub mod scorecard;
pub mod setting;
pub mod stats;
pub mod tee_time;
pub mod user;
pub mod weather;

pub use common::*;
pub use course::*;
pub use equipment::*;
pub use health::*;
pub use pagination::*;
pub use payment::*;
pub use range::*;
pub use scorecard::*;
pub use setting::*;
pub use stats::*;
pub use tee_time::*;
pub use user::*;
pub use weather::*;
