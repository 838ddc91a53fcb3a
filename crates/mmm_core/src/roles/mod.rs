pub mod pool;
pub mod types;

pub use pool::{build_pool, RoleCounts, RolePool};
pub use types::{PlayerRole, Team};
