//! Command tree construction: a depth-first, bottom-up directory walk.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{TreeError, TreeResult};
use crate::filter::{classify, display_name, Eligibility};
use crate::help::{resolve_help, HelpDoc};

/// A command node: a group backed by a directory, or a leaf backed by one
/// executable file. Immutable once built; the tree lives for one process run.
#[derive(Debug, Clone)]
pub enum CommandNode {
    Group(GroupNode),
    Leaf(LeafNode),
}

#[derive(Debug, Clone)]
pub struct GroupNode {
    pub name: String,
    pub path: PathBuf,
    pub help: HelpDoc,
    pub children: BTreeMap<String, CommandNode>,
}

#[derive(Debug, Clone)]
pub struct LeafNode {
    pub name: String,
    /// Absolute path of the executable this leaf dispatches to.
    pub path: PathBuf,
    pub help: HelpDoc,
}

impl CommandNode {
    pub fn name(&self) -> &str {
        match self {
            CommandNode::Group(g) => &g.name,
            CommandNode::Leaf(l) => &l.name,
        }
    }

    pub fn help(&self) -> &HelpDoc {
        match self {
            CommandNode::Group(g) => &g.help,
            CommandNode::Leaf(l) => &l.help,
        }
    }
}

/// Build the command tree rooted at `dir`.
///
/// Entries are processed in sorted file-name order; when two entries reduce to
/// the same display name, the later one in that order wins. A directory that
/// cannot be listed fails the whole build. Symlink cycles are detected via
/// canonical paths and rejected.
pub fn build(dir: &Path) -> TreeResult<BTreeMap<String, CommandNode>> {
    let mut visited = HashSet::new();
    build_dir(dir, &mut visited)
}

fn build_dir(
    dir: &Path,
    visited: &mut HashSet<PathBuf>,
) -> TreeResult<BTreeMap<String, CommandNode>> {
    let canonical = dir.canonicalize().map_err(|e| TreeError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    if !visited.insert(canonical.clone()) {
        return Err(TreeError::Cycle(dir.to_path_buf()));
    }

    // Listing from the canonical path keeps every stored node path absolute,
    // even when the root is given relative (the default `./thicket` is).
    let mut entries: Vec<PathBuf> = std::fs::read_dir(&canonical)
        .map_err(|e| TreeError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(|e| TreeError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
    entries.sort();

    let mut nodes = BTreeMap::new();
    for path in entries {
        debug!("Considering {}", path.display());
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => {
                debug!("Skipping entry with non-UTF-8 name: {}", path.display());
                continue;
            }
        };

        // An entry vanishing mid-scan is not fatal; the directory listing was.
        let eligibility = match classify(&path) {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let name = display_name(&file_name).to_string();
        let node = match eligibility {
            Eligibility::Skip => {
                debug!("Rejecting {}", path.display());
                continue;
            }
            Eligibility::Group => {
                debug!("Recursing down {}", path.display());
                let children = build_dir(&path, visited)?;
                let help = degraded_help(&path);
                CommandNode::Group(GroupNode {
                    name: name.clone(),
                    path: path.clone(),
                    help,
                    children,
                })
            }
            Eligibility::Leaf => {
                let help = degraded_help(&path);
                CommandNode::Leaf(LeafNode {
                    name: name.clone(),
                    path: path.clone(),
                    help,
                })
            }
        };

        if nodes.insert(name, node).is_some() {
            debug!("Display name collision on {}, later entry wins", file_name);
        }
    }

    Ok(nodes)
}

/// Resolve help, degrading to empty strings on failure so one broken node
/// never suppresses its siblings.
fn degraded_help(path: &Path) -> HelpDoc {
    resolve_help(path).unwrap_or_else(|e| {
        debug!("No help for {}: {}", path.display(), e);
        HelpDoc::default()
    })
}

/// Follow a chain of names down the tree, returning the node it ends at.
pub fn find<'a>(
    nodes: &'a BTreeMap<String, CommandNode>,
    names: &[String],
) -> Option<&'a CommandNode> {
    let (first, rest) = names.split_first()?;
    let node = nodes.get(first)?;
    if rest.is_empty() {
        return Some(node);
    }
    match node {
        CommandNode::Group(g) => find(&g.children, rest),
        CommandNode::Leaf(_) => None,
    }
}
