pub mod chemical_forms;
pub mod otp_challenges;
pub mod sessions;
pub mod users;
