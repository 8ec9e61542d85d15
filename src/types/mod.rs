pub mod forms;
pub mod views;
