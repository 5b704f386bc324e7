//! # CLI Layer
//!
//! Dispatch from parsed arguments to [`DictApi`] calls, and from results to
//! the printers. No dictionary logic lives here.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_tracing()`: Installs the stderr subscriber
//! - `data_dir()`: Resolves the store root
//! - `handle_*()`: Per-command handlers that call the API and print

use super::print::{
    print_alphabet_counts, print_alphabets, print_entries, print_entry_detail, print_json,
    print_keyed_entries, print_messages, print_page, print_stats,
};
use super::setup::{Cli, Commands, WordArgs};
use anyhow::{anyhow, bail, Context};
use bpydictapp::api::{BrowseQuery, DictApi};
use bpydictapp::commands::CmdResult;
use bpydictapp::model::Entry;
use bpydictapp::store::fs_backend::FsBackend;
use clap::Parser;
use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: DictApi<FsBackend>,
    json: bool,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = data_dir(cli.data_dir)?;
    let api = DictApi::open(&root)
        .with_context(|| format!("opening dictionary store at {}", root.display()))?;
    let ctx = AppContext {
        api,
        json: cli.json,
    };

    match cli.command {
        Commands::Init => handle_result(&ctx, ctx.api.init()?),
        Commands::List => handle_list(&ctx),
        Commands::Get { id } => handle_get(&ctx, &id),
        Commands::Alphabets { counts } => handle_alphabets(&ctx, counts),
        Commands::Letter { letter } => handle_letter(&ctx, &letter),
        Commands::Search { term, language } => {
            handle_result(&ctx, ctx.api.search_entries(&term, &language)?)
        }
        Commands::Suggest {
            term,
            language,
            limit,
        } => handle_result(
            &ctx,
            ctx.api.autocomplete_entries(&term, &language, limit)?,
        ),
        Commands::Submit(word) => {
            handle_result(&ctx, ctx.api.submit_pending_entry(entry_from(word))?)
        }
        Commands::Pending => handle_result(&ctx, ctx.api.list_pending_entries()?),
        Commands::Approve { id } => handle_result(&ctx, ctx.api.approve_pending_entry(&id)?),
        Commands::Reject { id } => handle_result(&ctx, ctx.api.reject_pending_entry(&id)?),
        Commands::Add(word) => handle_result(&ctx, ctx.api.create_entry(entry_from(word))?),
        Commands::Update {
            id,
            bpy,
            bn,
            en,
            patch,
        } => handle_update(&ctx, &id, bpy, bn, en, patch),
        Commands::Delete { id } => handle_result(&ctx, ctx.api.delete_entry(&id)?),
        Commands::Stats => handle_stats(&ctx),
        Commands::Words {
            page,
            limit,
            search,
            alphabet,
        } => handle_words(
            &ctx,
            BrowseQuery {
                page,
                limit,
                search,
                alphabet,
            },
        ),
        Commands::Doctor => handle_doctor(&ctx),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("BPYDICT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let dirs = ProjectDirs::from("org", "bpydict", "bpydict")
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --data-dir"))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn entry_from(word: WordArgs) -> Entry {
    let entry = Entry::new(word.bpy, word.bn, word.en);
    if word.categories.is_empty() {
        entry
    } else {
        entry.with_extra("cat", Value::from(word.categories))
    }
}

/// Queries print their listed words; mutations print only their messages.
fn handle_result(ctx: &AppContext, result: CmdResult) -> anyhow::Result<()> {
    if ctx.json {
        return print_json(&result);
    }
    let is_query = result.affected_entries.is_empty() && result.messages.is_empty();
    if is_query || !result.listed_entries.is_empty() {
        print_keyed_entries(&result.listed_entries);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> anyhow::Result<()> {
    let entries = ctx.api.list_all_entries();
    if ctx.json {
        return print_json(&entries);
    }
    print_entries(&entries);
    Ok(())
}

fn handle_get(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let keyed = ctx.api.get_entry(id)?;
    if ctx.json {
        return print_json(&keyed);
    }
    print_entry_detail(&keyed)
}

fn handle_alphabets(ctx: &AppContext, counts: bool) -> anyhow::Result<()> {
    if counts {
        let counts = ctx.api.alphabet_counts();
        if ctx.json {
            return print_json(&counts);
        }
        print_alphabet_counts(&counts);
    } else {
        let keys = ctx.api.list_alphabet_keys();
        if ctx.json {
            return print_json(keys);
        }
        print_alphabets(keys);
    }
    Ok(())
}

fn handle_letter(ctx: &AppContext, letter: &str) -> anyhow::Result<()> {
    if !ctx.api.alphabet().contains(letter) {
        bail!("\"{}\" is not a letter of the alphabet", letter);
    }
    let entries = ctx.api.list_entries_for_key(letter);
    if ctx.json {
        return print_json(&entries);
    }
    print_entries(&entries);
    Ok(())
}

fn handle_update(
    ctx: &AppContext,
    id: &str,
    bpy: Option<String>,
    bn: Option<String>,
    en: Option<String>,
    patch: Option<String>,
) -> anyhow::Result<()> {
    let mut fields = match patch {
        Some(raw) => match serde_json::from_str::<Value>(&raw).context("parsing --patch")? {
            Value::Object(map) => map,
            _ => bail!("--patch must be a JSON object"),
        },
        None => Map::new(),
    };
    for (name, value) in [("bpy", bpy), ("bn", bn), ("en", en)] {
        if let Some(value) = value {
            fields.insert(name.to_string(), Value::String(value));
        }
    }
    if fields.is_empty() {
        bail!("nothing to update; pass --bpy, --bn, --en or --patch");
    }
    handle_result(ctx, ctx.api.update_entry(id, &fields)?)
}

fn handle_stats(ctx: &AppContext) -> anyhow::Result<()> {
    let stats = ctx.api.stats()?;
    if ctx.json {
        return print_json(&stats);
    }
    print_stats(&stats);
    Ok(())
}

fn handle_words(ctx: &AppContext, query: BrowseQuery) -> anyhow::Result<()> {
    let page = ctx.api.browse_entries(&query)?;
    if ctx.json {
        return print_json(&page);
    }
    print_page(&page);
    Ok(())
}

fn handle_doctor(ctx: &AppContext) -> anyhow::Result<()> {
    let report = ctx.api.doctor()?;
    if ctx.json {
        return print_json(&report);
    }
    print_messages(&report.messages());
    Ok(())
}
