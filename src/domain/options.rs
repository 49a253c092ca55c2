use std::{fmt, str::FromStr};

/// Where the builder is allowed to spread work across the rayon pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// One hash function instance, one thread.
    #[default]
    Sequential,
    /// Leaf digests are computed in parallel with one hasher per worker.
    Leaves,
    /// Leaf digests and the pairs of each reduction level are computed in parallel.
    LeavesAndLevels,
}

impl Parallelism {
    pub fn parallel_leaves(self) -> bool {
        !matches!(self, Parallelism::Sequential)
    }

    pub fn parallel_levels(self) -> bool {
        matches!(self, Parallelism::LeavesAndLevels)
    }
}

impl fmt::Display for Parallelism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Parallelism::Sequential => "sequential",
            Parallelism::Leaves => "leaves",
            Parallelism::LeavesAndLevels => "leaves-and-levels",
        })
    }
}

impl FromStr for Parallelism {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Parallelism::Sequential),
            "leaves" => Ok(Parallelism::Leaves),
            "leaves-and-levels" => Ok(Parallelism::LeavesAndLevels),
            other => Err(anyhow::anyhow!(
                "unknown parallelism '{other}', expected sequential, leaves or leaves-and-levels"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOptions {
    pub parallelism: Parallelism,
}

impl TreeOptions {
    pub fn with_parallelism(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }
}
