//! Placeholder tokens substituted for volatile content.

pub const USER: &str = "[USER]";
pub const TIMESTAMP: &str = "[TIMESTAMP]";
pub const NXF_HASH: &str = "[NXF_HASH]";
pub const NFT_HASH: &str = "[NFT_HASH]";
pub const REVISION: &str = "[REVISION]";
pub const PATH: &str = "[PATH]";
pub const RUN_NAME: &str = "[RUN_NAME]";
pub const CONTAINER: &str = "[CONTAINER]";
pub const VERSION: &str = "[VERSION]";
pub const FILTERED: &str = "[FILTERED]";
