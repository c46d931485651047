use serde::Serialize;
use std::io::{self, Write};

use linker::DisambiguationResult;

use crate::settings::OutputFormat;

/// Placeholder written in the last TSV column.
pub const PAGE_ID_MARKER: &str = "page-id";

/// Sink for the links of annotated documents.
pub trait LinkWriter {
    fn write_links(&mut self, doc_id: &str, result: &DisambiguationResult) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()>;
}

/// `doc_id<TAB>score<TAB>entity<TAB>mention<TAB>page-id`, one line per link.
pub struct TsvLinkWriter<W: Write> {
    out: W,
}

impl<W: Write> TsvLinkWriter<W> {
    pub fn new(out: W) -> Self {
        TsvLinkWriter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LinkWriter for TsvLinkWriter<W> {
    fn write_links(&mut self, doc_id: &str, result: &DisambiguationResult) -> io::Result<()> {
        for link in result.iter() {
            // `{:?}` keeps the fraction of whole scores: `1.0`, not `1`.
            writeln!(
                self.out,
                "{}\t{:?}\t{}\t{}\t{}",
                doc_id, link.score, link.entity, link.mention, PAGE_ID_MARKER
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[derive(Serialize)]
struct JsonLink<'a> {
    doc_id: &'a str,
    mention: &'a str,
    entity: &'a str,
    score: f64,
}

/// One JSON object per link.
pub struct JsonlLinkWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonlLinkWriter<W> {
    pub fn new(out: W) -> Self {
        JsonlLinkWriter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LinkWriter for JsonlLinkWriter<W> {
    fn write_links(&mut self, doc_id: &str, result: &DisambiguationResult) -> io::Result<()> {
        for link in result.iter() {
            let record = JsonLink {
                doc_id,
                mention: &link.mention,
                entity: &link.entity,
                score: link.score,
            };
            serde_json::to_writer(&mut self.out, &record)?;
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

pub fn link_writer<'w, W: Write + 'w>(format: OutputFormat, out: W) -> Box<dyn LinkWriter + 'w> {
    match format {
        OutputFormat::Tsv => Box::new(TsvLinkWriter::new(out)),
        OutputFormat::Jsonl => Box::new(JsonlLinkWriter::new(out)),
    }
}
