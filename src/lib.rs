pub mod annotate;
pub mod error;
pub mod loaders;
pub mod settings;
pub mod snippets;
pub mod writer;

pub use crate::annotate::{annotate_snippets, run_batch, write_results, BatchSummary};
pub use crate::error::Error;
pub use crate::loaders::load_stats;
pub use crate::settings::{Output, OutputFormat, Settings};
pub use crate::snippets::{load_snippets, read_snippets, Snippet};
pub use crate::writer::{link_writer, JsonlLinkWriter, LinkWriter, TsvLinkWriter};
