use crate::domain::options::{Parallelism, TreeOptions};

#[napi(object, js_name = "HashTreeOptions")]
#[derive(Clone, Default)]
pub struct HashTreeOptionsJs {
  /// `sequential` (default), `leaves` or `leaves-and-levels`.
  pub parallelism: Option<String>,
}

impl TryFrom<HashTreeOptionsJs> for TreeOptions {
  type Error = anyhow::Error;

  fn try_from(options: HashTreeOptionsJs) -> anyhow::Result<Self> {
    let parallelism = match options.parallelism {
      Some(mode) => mode.parse::<Parallelism>()?,
      None => Parallelism::default(),
    };
    Ok(TreeOptions::with_parallelism(parallelism))
  }
}
