mod blocked;
pub use blocked::{BlockedCache, CacheConfig};

mod order;
pub use order::{OrderExt, ThreadOrderExt};

mod stance;
pub use stance::{branch_stances, count_stances};

mod thread;
pub use thread::Thread;

mod tree;
pub use tree::{build_tree, top_level_forest, CommentNode, Nodes};

mod fuzz;
#[cfg(test)]
mod testing;

pub mod api {
    pub use agora_api::*;
}

pub mod prelude {
    pub use crate::{OrderExt, ThreadOrderExt};
}
