//! Command-line argument parsing for the headless workbench
//!
//! Supports:
//! - Opening a binary at a chosen analysis level
//! - Opening a saved project by name
//! - Listing saved and recent projects

use clap::Parser;
use std::path::PathBuf;

use crate::engine::AnalysisLevel;

/// A binary analysis workbench core
#[derive(Parser, Debug)]
#[command(name = "binsight", version, about = "A binary analysis workbench core")]
pub struct CliArgs {
    /// Binary file to open
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Open a saved project by name instead of a file
    #[arg(short = 'p', long, value_name = "NAME", conflicts_with = "file")]
    pub project: Option<String>,

    /// Analysis level (0 = skip, 1 = basic, 2 = full, 3 = experimental)
    #[arg(short = 'A', long, value_name = "N")]
    pub anal: Option<u8>,

    /// List saved projects and exit
    #[arg(long)]
    pub list_projects: bool,
}

/// What the process should do after parsing arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Start with no session
    Empty,
    /// Open a binary for analysis
    OpenFile { path: PathBuf, level: AnalysisLevel },
    /// Open a saved project
    OpenProject(String),
    /// Print saved projects and exit
    ListProjects,
}

impl CliArgs {
    /// Convert parsed CLI args into a startup mode
    ///
    /// `default_level` comes from the user config and applies when no
    /// `-A` flag was given.
    pub fn into_mode(self, default_level: AnalysisLevel) -> StartupMode {
        if self.list_projects {
            return StartupMode::ListProjects;
        }
        if let Some(name) = self.project {
            return StartupMode::OpenProject(name);
        }
        match self.file {
            Some(path) => StartupMode::OpenFile {
                path,
                level: self.anal.map(AnalysisLevel::from_cli).unwrap_or(default_level),
            },
            None => StartupMode::Empty,
        }
    }
}
