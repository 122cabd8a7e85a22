pub mod list_controller;
pub mod remove_controller;

pub use list_controller::ListController;
pub use remove_controller::RemoveController;
