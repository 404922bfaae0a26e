//! Command implementations.

pub mod check_config;
pub mod init_config;
pub mod run;

pub use self::check_config::execute_check_config;
pub use self::init_config::execute_init_config;
pub use self::run::execute_run;
