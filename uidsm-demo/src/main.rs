//! 读取 DTO 数组（或响应信封），装配实体图并输出各类型实体的统计。
//!
//! ```text
//! uidsm-demo data/review.json --select Comment
//! RUST_LOG=debug uidsm-demo data/response.json --envelope
//! ```
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uidsm_model::model::EntityKind;
use uidsm_model::{DtoRegistry, assemble};

#[derive(Debug, Parser)]
#[command(name = "uidsm-demo", version, about = "Assemble a UI-DSM DTO payload")]
struct Cli {
    /// DTO 数组（或带 --envelope 时的响应信封）JSON 文件
    payload: PathBuf,

    /// 输入为 `{ isRequestSuccessful, errors, entities }` 响应信封
    #[arg(long)]
    envelope: bool,

    /// 输出该类型（实体名或 DTO 标签）全部实体的标识
    #[arg(long, value_name = "KIND")]
    select: Option<EntityKind>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let json = fs::read_to_string(&cli.payload)
        .with_context(|| format!("reading {}", cli.payload.display()))?;

    let registry = DtoRegistry::standard();
    let decoded = if cli.envelope {
        registry.decode_response(&json)
    } else {
        registry.deserialize_batch(&json)
    };
    let dtos = decoded.inspect_err(|err| warn!(error = %err, "payload rejected"))?;
    info!(dtos = dtos.len(), "payload decoded");

    let graph = assemble(dtos).inspect_err(|err| {
        warn!(error = %err, cause = %err.root_cause(), "assembly failed");
    })?;
    for (kind, count) in graph.count_by_type() {
        info!(kind, count, "assembled");
    }

    if let Some(kind) = cli.select {
        let ids: Vec<_> = graph
            .iter()
            .filter(|entity| entity.type_name() == kind.name())
            .map(|entity| entity.entity_id())
            .collect();
        info!(%kind, selected = ids.len(), "selection");
        for id in ids {
            println!("{id}");
        }
    }

    Ok(())
}
