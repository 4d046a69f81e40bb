mod auth;
mod comment;
mod order;
mod payment;
mod product;
mod review;
mod user;

pub use auth::*;
pub use comment::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use review::*;
pub use user::*;
