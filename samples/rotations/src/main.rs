//! Rotations Sample Application Entry Point
//!
//! Inserts and removes a configurable key sequence in an `AvlTree`, printing
//! the tree after every step. Run with `RUST_LOG=avltree=trace` to see each
//! rotation as it happens.

mod config;

use avltree::avl::{AvlTree, NodeRef};
use avltree::equal_paths::equal_paths;
use config::DemoConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,avltree=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load configuration from environment: {e}");
            tracing::info!("Using default configuration");
            DemoConfig::default()
        }
    };
    tracing::info!(
        "Configuration loaded: {} inserts, {} removals",
        config.keys.len(),
        config.removals.len()
    );

    let mut tree = AvlTree::new();
    for (position, &key) in config.keys.iter().enumerate() {
        tracing::info!("insert {key}");
        tree.insert(key, position);
        println!("{}", render(&tree));
    }
    for key in &config.removals {
        match tree.remove(key) {
            Some(_) => tracing::info!("remove {key}"),
            None => tracing::info!("remove {key}: not present"),
        }
        println!("{}", render(&tree));
    }

    if let Err(violation) = tree.validate() {
        tracing::error!("tree failed validation: {violation}");
        std::process::exit(1);
    }
    tracing::info!(
        "{} entries, height {}, leaves at equal depth: {}",
        tree.len(),
        tree.height(),
        equal_paths(tree.root())
    );
}

/// Draws the tree sideways, right subtree on top, one node per line.
fn render(tree: &AvlTree<i64, usize>) -> String {
    fn draw(node: Option<NodeRef<'_, i64, usize>>, depth: usize, out: &mut String) {
        let Some(node) = node else { return };
        draw(node.right(), depth + 1, out);
        out.push_str(&format!(
            "{:indent$}{} ({:+})\n",
            "",
            node.key(),
            node.balance(),
            indent = depth * 4
        ));
        draw(node.left(), depth + 1, out);
    }

    let mut out = String::new();
    draw(tree.root(), 0, &mut out);
    if out.is_empty() {
        out.push_str("(empty)\n");
    }
    out
}
