use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::{self, StoreError};
use crate::model::config::{AppConfig, FilterOption, SortOption};
use crate::model::list::TodoList;
use crate::model::todo::SectionKind;
use crate::ops::replay::{self, GestureTrace, ReplayOptions};
use crate::ops::todo_ops;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Data directory, its config, and the resolved store path
struct Context {
    config: AppConfig,
    store_path: PathBuf,
}

impl Context {
    fn load(data_dir: &Path) -> Result<Context, StoreError> {
        let config = config_io::read_config(data_dir)?;
        let store_path = config_io::store_path(data_dir, &config);
        Ok(Context { config, store_path })
    }

    fn load_list(&self) -> Result<TodoList, StoreError> {
        let loaded = store::load_todos(&self.store_path)?;
        if !loaded.dropped.is_empty() {
            eprintln!(
                "warning: skipped {} unreadable record(s) in {}",
                loaded.dropped.len(),
                self.store_path.display()
            );
        }
        Ok(loaded.list)
    }

    fn save_list(&self, list: &TodoList) -> Result<(), StoreError> {
        store::save_todos(&self.store_path, list)
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = match &cli.data_dir {
        Some(dir) => fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let ctx = Context::load(&data_dir)?;

    match cli.command {
        Commands::List(args) => cmd_list(&ctx, args, json),
        Commands::Add(args) => cmd_add(&ctx, args, json),
        Commands::Done(args) => cmd_set_completed(&ctx, args.id, true),
        Commands::Reopen(args) => cmd_set_completed(&ctx, args.id, false),
        Commands::Edit(args) => cmd_edit(&ctx, args),
        Commands::Rm(args) => cmd_rm(&ctx, args),
        Commands::Mv(args) => cmd_mv(&ctx, args),
        Commands::Drag(args) => cmd_drag(&ctx, args, json),
    }
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_sort(arg: Option<&str>, fallback: SortOption) -> Result<SortOption, String> {
    match arg {
        None => Ok(fallback),
        Some(s) => SortOption::parse(s).ok_or_else(|| {
            format!(
                "unknown sort '{}' (expected default, date-asc, date-desc, title-az, title-za)",
                s
            )
        }),
    }
}

fn parse_filter(arg: Option<&str>, fallback: FilterOption) -> Result<FilterOption, String> {
    match arg {
        None => Ok(fallback),
        Some(s) => FilterOption::parse(s)
            .ok_or_else(|| format!("unknown filter '{}' (expected all, completed, uncompleted)", s)),
    }
}

fn parse_section(s: &str) -> Result<SectionKind, String> {
    SectionKind::parse(s)
        .ok_or_else(|| format!("unknown section '{}' (expected unfinished or finished)", s))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> CmdResult {
    let sort = parse_sort(args.sort.as_deref(), ctx.config.ui.sort)?;
    let filter = parse_filter(args.filter.as_deref(), ctx.config.ui.filter)?;
    let list = ctx.load_list()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&list_json(&list, filter, sort))?
        );
    } else {
        println!(
            "{}",
            render_list(&list, filter, sort, ctx.config.ui.title_width)
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs, json: bool) -> CmdResult {
    let mut list = ctx.load_list()?;
    let id = todo_ops::add_item(&mut list, args.title, args.description, args.at)?;
    ctx.save_list(&list)?;

    if json {
        println!("{}", serde_json::to_string(&IdJson { id })?);
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_set_completed(ctx: &Context, id: u32, completed: bool) -> CmdResult {
    let mut list = ctx.load_list()?;
    todo_ops::set_completed(&mut list, id, completed)?;
    ctx.save_list(&list)?;
    Ok(())
}

fn cmd_edit(ctx: &Context, args: EditArgs) -> CmdResult {
    if args.title.is_none() && args.description.is_none() {
        return Err("nothing to change: pass --title and/or --description".into());
    }
    let mut list = ctx.load_list()?;
    todo_ops::edit_item(&mut list, args.id, args.title, args.description)?;
    ctx.save_list(&list)?;
    Ok(())
}

fn cmd_rm(ctx: &Context, args: IdArg) -> CmdResult {
    let mut list = ctx.load_list()?;
    let removed = todo_ops::delete_item(&mut list, args.id)?;
    ctx.save_list(&list)?;
    println!("deleted #{} \"{}\"", removed.id, removed.title);
    Ok(())
}

fn cmd_mv(ctx: &Context, args: MvArgs) -> CmdResult {
    let section = parse_section(&args.section)?;
    let mut list = ctx.load_list()?;
    todo_ops::move_in_section(&mut list, section, args.from, args.to)?;
    ctx.save_list(&list)?;
    Ok(())
}

fn cmd_drag(ctx: &Context, args: DragArgs, json: bool) -> CmdResult {
    let section = parse_section(&args.section)?;
    let sort = parse_sort(args.sort.as_deref(), ctx.config.ui.sort)?;
    let trace_text = fs::read_to_string(&args.trace)
        .map_err(|e| format!("could not read trace {}: {}", args.trace, e))?;
    let trace: GestureTrace = serde_json::from_str(&trace_text)
        .map_err(|e| format!("could not parse trace {}: {}", args.trace, e))?;

    let mut list = ctx.load_list()?;
    let options = ReplayOptions {
        sort,
        record_steps: args.steps,
        style: ctx.config.drag.clone(),
    };
    let outcome = replay::replay_trace(&mut list, section, &trace, &options)?;
    if outcome.commits.iter().any(|c| c.applied) {
        ctx.save_list(&list)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_replay(&outcome, &list));
    }
    Ok(())
}
