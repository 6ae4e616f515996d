pub mod bearer_token;
pub mod email;
pub mod page;
pub mod password;
pub mod recovery_token;
pub mod role;
pub mod user;
