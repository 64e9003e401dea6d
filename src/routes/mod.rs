pub mod auth;
pub mod courts;
pub mod games;
pub mod health;
pub mod teams;
