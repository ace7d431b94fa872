pub mod credential;
pub mod throttle;
pub mod token;
