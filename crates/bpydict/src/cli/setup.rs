use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bpydict", bin_name = "bpydict", version)]
#[command(
    about = "Bishnupriya Manipuri / Bengali / English dictionary store",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store root (defaults to the platform data directory)
    #[arg(long, global = true, env = "BPYDICT_DATA_DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// The three texts of a word plus its category tags.
#[derive(Args, Debug)]
pub struct WordArgs {
    /// Bishnupriya Manipuri text
    pub bpy: String,

    /// Bengali text
    #[arg(long, default_value = "")]
    pub bn: String,

    /// English text
    #[arg(long, default_value = "")]
    pub en: String,

    /// Category tag (repeatable)
    #[arg(long = "cat")]
    pub categories: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the store directories
    Init,

    /// List every approved word
    List,

    /// Show one word by id
    Get { id: String },

    /// List the partition letters
    Alphabets {
        /// Include word counts
        #[arg(long)]
        counts: bool,
    },

    /// List the words filed under one letter
    Letter { letter: String },

    /// Search words containing a term
    Search {
        term: String,

        /// Language of the term: bpy, bn or en
        #[arg(short, long, default_value = "bpy")]
        language: String,
    },

    /// Suggest words for a partial term, prefix matches first
    Suggest {
        term: String,

        /// Language of the term: bpy, bn or en
        #[arg(short, long, default_value = "bpy")]
        language: String,

        /// Maximum suggestions (defaults to the configured limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Submit a word for review
    Submit(WordArgs),

    /// List submissions awaiting review
    Pending,

    /// Approve a submission
    Approve { id: String },

    /// Reject a submission
    Reject { id: String },

    /// Add an approved word directly
    Add(WordArgs),

    /// Change fields of an approved word
    Update {
        id: String,

        #[arg(long)]
        bpy: Option<String>,

        #[arg(long)]
        bn: Option<String>,

        #[arg(long)]
        en: Option<String>,

        /// Extra fields as a JSON object, merged shallowly
        #[arg(long)]
        patch: Option<String>,
    },

    /// Delete an approved word
    Delete { id: String },

    /// Dashboard statistics
    Stats,

    /// Browse approved words page by page
    Words {
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Words per page (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Filter by a term in any language
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to one letter
        #[arg(short, long)]
        alphabet: Option<String>,
    },

    /// Check the store for malformed, stray and misplaced data
    Doctor,
}
