pub mod inspect;
pub mod install;
pub mod status;
pub mod toggle_logging;
pub mod uninstall;
