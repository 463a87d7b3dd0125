pub mod login_item;
pub mod permissions;
