pub mod draft;
pub mod paper;
pub mod question;
