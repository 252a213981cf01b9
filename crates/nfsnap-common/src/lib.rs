pub mod env;
pub mod options;
pub mod snapshot_case;
