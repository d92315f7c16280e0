pub mod contact;
pub mod project;
