pub mod form;
pub mod money;
