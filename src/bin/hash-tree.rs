//! hash-tree CLI
//!
//! Builds a SHA-256 hash tree where every file given on the command line is
//! one leaf, in argument order.

use anyhow::{Context, Result};
use clap::Parser;
use hash_tree::{
    build_tree_with, logging, Leaf, LeafError, Parallelism, Sha256Hasher, TreeNode, TreeOptions,
};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "hash-tree", version, about = "Compute the Merkle root of a list of files")]
struct Cli {
    /// Files to hash, one leaf each
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// sequential, leaves or leaves-and-levels
    #[arg(long, default_value_t = Parallelism::Sequential)]
    parallelism: Parallelism,

    /// Print every node instead of only the root
    #[arg(long)]
    tree: bool,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// A file leaf, opened only while its digest is computed.
struct FileLeaf(PathBuf);

impl Leaf for FileLeaf {
    fn write_leaf<W: Write>(&mut self, out: &mut W) -> Result<(), LeafError> {
        let file = File::open(&self.0).with_context(|| format!("opening {}", self.0.display()))?;
        io::copy(&mut BufReader::new(file), out)
            .with_context(|| format!("reading {}", self.0.display()))?;
        Ok(())
    }
}

fn run(cli: &Cli) -> Result<String> {
    let leaves: Vec<FileLeaf> = cli.files.iter().cloned().map(FileLeaf).collect();

    let root = build_tree_with(
        Sha256Hasher::new,
        leaves,
        TreeOptions::with_parallelism(cli.parallelism),
    )
    .context("building hash tree")?;

    if cli.tree {
        let mut out = String::new();
        render(&root, 0, &mut out);
        Ok(out.trim_end().to_string())
    } else {
        Ok(root.digest_hex())
    }
}

fn render(node: &TreeNode, depth: usize, out: &mut String) {
    let kind = if node.is_leaf() { "leaf" } else { "node" };
    out.push_str(&format!("{}{} {}\n", "  ".repeat(depth), kind, node));
    if let (Some(left), Some(right)) = (node.left(), node.right()) {
        render(left, depth + 1, out);
        render(right, depth + 1, out);
    }
}
