pub mod dashboard;
pub mod index;
