//! A viewer session: one tree, driven by commands.

use crate::command::Command;
use crate::config::{Config, RenderConfig};
use crate::render;
use anyhow::Context;
use quadtree::{Point, Quadtree, Region};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::{debug, info};

/// What applying a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Inserted(bool),
    /// The point cleared from the targeted leaf, if any.
    Removed(Option<Point>),
    Drawn(PathBuf),
    Dumped(String),
    Scattered { attempted: usize, inserted: usize },
    Cleared,
    Stats { points: usize, nodes: usize, depth: usize },
}

/// Owns the tree the harness edits and renders.
#[derive(Debug)]
pub struct Session {
    tree: Quadtree,
    render: RenderConfig,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let region = Region::square(config.tree.size);
        info!("Created quadtree over [{}]", region);
        Self {
            tree: Quadtree::with_options(region, config.tree.options()),
            render: config.render.clone(),
        }
    }

    #[inline]
    pub fn tree(&self) -> &Quadtree {
        &self.tree
    }

    pub fn apply(&mut self, command: Command) -> anyhow::Result<Outcome> {
        let outcome = match command {
            Command::Insert(point) => {
                let inserted = self.tree.insert(point);
                debug!("insert ({}, {}) -> {}", point.x, point.y, inserted);
                Outcome::Inserted(inserted)
            }
            Command::Remove(point) => {
                let removed = self.tree.take(point);
                debug!("remove ({}, {}) -> {:?}", point.x, point.y, removed);
                Outcome::Removed(removed)
            }
            Command::Draw(path) => {
                let path = path.unwrap_or_else(|| self.render.output.clone());
                let svg = render::render_svg(&self.tree, &self.render);
                std::fs::write(&path, svg)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Drew {} nodes to {}", self.tree.node_count(), path.display());
                Outcome::Drawn(path)
            }
            Command::Dump => Outcome::Dumped(render::render_text(&self.tree)),
            Command::Scatter { count, seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                let inserted = self.scatter(&mut rng, count);
                info!("Scattered {}/{} points", inserted, count);
                Outcome::Scattered { attempted: count, inserted }
            }
            Command::Clear => {
                self.tree.clear();
                Outcome::Cleared
            }
            Command::Stats => Outcome::Stats {
                points: self.tree.len(),
                nodes: self.tree.node_count(),
                depth: self.tree.depth(),
            },
        };

        if cfg!(debug_assertions) {
            self.tree
                .validate()
                .context("quadtree invariant broken after command")?;
        }

        Ok(outcome)
    }

    fn scatter(&mut self, rng: &mut impl Rng, count: usize) -> usize {
        let region = *self.tree.region();
        (0..count)
            .filter(|_| {
                let point = Point::new(
                    rng.random_range(region.min_x..region.max_x),
                    rng.random_range(region.min_y..region.max_y),
                );
                self.tree.insert(point)
            })
            .count()
    }
}
