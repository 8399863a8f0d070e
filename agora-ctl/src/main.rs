use std::{path::PathBuf, sync::Arc, time::Duration};

use agora_client::{
    api::{Order, ThreadOrder},
    BlockedCache, CacheConfig, Thread,
};
use anyhow::Context;

mod render;
mod snapshot;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Thread snapshot to read, as written by generate-test-data
    #[structopt(short, long)]
    input: PathBuf,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Print the reply tree
    Tree {
        /// Only print top-level comments
        #[structopt(long)]
        top_level_only: bool,

        /// One of created-asc, created-desc, score-asc, score-desc
        #[structopt(long, default_value = "created-desc")]
        order_top: Order,

        /// Order of every reply list
        #[structopt(long, default_value = "created-asc")]
        order_replies: Order,
    },

    /// Print stance statistics as JSON
    Stats {
        /// Only count top-level comments
        #[structopt(long)]
        top_level_only: bool,

        /// Print the statistics of every branch, keyed by comment id
        #[structopt(long)]
        per_branch: bool,
    },
}

fn cache_config() -> anyhow::Result<CacheConfig> {
    match std::env::var("AGORA_BLOCK_CACHE_TTL") {
        Err(_) => Ok(CacheConfig::default()),
        Ok(secs) => {
            let secs = secs
                .parse::<u64>()
                .context("parsing AGORA_BLOCK_CACHE_TTL as a number of seconds")?;
            Ok(CacheConfig {
                ttl: Duration::from_secs(secs),
            })
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let snapshot = snapshot::load(&opt.input)?;
    let store = Arc::new(snapshot::to_store(&snapshot));
    let cache = BlockedCache::new(store.clone(), cache_config()?);
    let thread = Thread::load(&*store, &cache, snapshot.viewer, snapshot.claim_id)
        .await
        .context("loading thread from snapshot")?;

    match opt.cmd {
        Command::Tree {
            top_level_only,
            order_top,
            order_replies,
        } => {
            let forest = match top_level_only {
                true => thread.top_level(&order_top),
                false => thread.tree(&ThreadOrder {
                    top_level: order_top,
                    replies: order_replies,
                }),
            };
            let mut out = String::new();
            render::tree(&mut out, &forest).context("rendering thread")?;
            print!("{out}");
            let counts = match top_level_only {
                true => thread.top_level_stances(),
                false => thread.stances(),
            };
            println!("{}", render::summary(&counts));
        }
        Command::Stats {
            top_level_only,
            per_branch,
        } => {
            let json = match (per_branch, top_level_only) {
                (true, _) => serde_json::to_string_pretty(&thread.branch_stances()),
                (false, true) => serde_json::to_string_pretty(&thread.top_level_stances()),
                (false, false) => serde_json::to_string_pretty(&thread.stances()),
            }
            .context("serializing stance statistics")?;
            println!("{json}");
        }
    }

    Ok(())
}
