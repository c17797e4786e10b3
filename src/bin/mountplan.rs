use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use mountplan::{LayoutState, SizeSpec, TreeDocument};

#[derive(Parser, Debug)]
#[command(name = "mountplan", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the mount sequence of a layout tree.
    Dump(InputArgs),
    /// Print counts of the reduced outputs as JSON.
    Stats(InputArgs),
    /// Check whether the reduced tree can be reused for a new measurement request.
    Compat(CompatArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input tree document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct CompatArgs {
    /// Input tree document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Requested width: `exactly:<px>`, `at_most:<px>` or `unspecified`.
    #[arg(long)]
    width: SizeSpec,

    /// Requested height: `exactly:<px>`, `at_most:<px>` or `unspecified`.
    #[arg(long)]
    height: SizeSpec,

    /// Also require the root component id to match.
    #[arg(long)]
    component_id: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Dump(args) => cmd_dump(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Compat(args) => cmd_compat(args),
    }
}

fn load(in_path: &Path, debug_dump: bool) -> anyhow::Result<LayoutState> {
    let mut doc = TreeDocument::from_path(in_path)?;
    if debug_dump {
        doc.opts.diagnostics.debug_mode = true;
    }
    let pending = mountplan::reduce(&doc.request())
        .with_context(|| format!("reduce '{}'", in_path.display()))?;
    Ok(pending.commit())
}

fn cmd_dump(args: InputArgs) -> anyhow::Result<()> {
    let state = load(&args.in_path, true)?;
    print!("{}", state.dump_mount_sequence()?);
    Ok(())
}

fn cmd_stats(args: InputArgs) -> anyhow::Result<()> {
    let state = load(&args.in_path, false)?;
    let mut by_type = BTreeMap::<&str, usize>::new();
    for unit in state.mountable_outputs() {
        *by_type.entry(unit.unit_type.name()).or_default() += 1;
    }
    let stats = serde_json::json!({
        "root": state.root_name(),
        "width": state.width(),
        "height": state.height(),
        "mountable_outputs": state.mountable_output_count(),
        "units_by_type": by_type,
        "visibility_outputs": state.visibility_output_count(),
        "transition_ids": state.transition_id_mapping().len(),
        "working_range_registrations": state.working_range_container().map_or(0, |c| c.len()),
        "has_excluded_units": state.incremental_mount_view().has_excluded_units(),
    });
    println!("{}", serde_json::to_string_pretty(&stats).context("serialize stats")?);
    Ok(())
}

fn cmd_compat(args: CompatArgs) -> anyhow::Result<()> {
    let state = load(&args.in_path, false)?;
    let compatible = match args.component_id {
        Some(id) => state.is_compatible_component_and_spec(id, args.width, args.height),
        None => state.is_compatible_spec(args.width, args.height),
    };
    let out = serde_json::json!({
        "measured": state.measured(),
        "width": args.width.to_string(),
        "height": args.height.to_string(),
        "compatible": compatible,
    });
    println!("{}", serde_json::to_string_pretty(&out).context("serialize result")?);
    Ok(())
}
