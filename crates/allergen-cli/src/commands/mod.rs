pub mod catalog;
pub mod check;
pub mod lint;
