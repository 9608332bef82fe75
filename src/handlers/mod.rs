pub mod admin;
pub mod dealer;
pub mod forms;
pub mod product;
pub mod upload;
