pub mod present;
pub mod review;
pub mod session;
