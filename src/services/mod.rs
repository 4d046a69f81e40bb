pub mod firebase_service;
pub mod order_service;
pub mod stripe_service;

pub use firebase_service::{FirebaseVerifier, TokenVerifier};
pub use order_service::OrderService;
