pub mod jwt;
pub mod money;
pub mod password;
pub mod time;
pub mod validation;

pub use jwt::*;
pub use money::*;
pub use password::*;
pub use time::*;
pub use validation::*;
