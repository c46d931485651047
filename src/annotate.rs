//! Batch annotation of snippet files.
use log::info;
use pbr::ProgressBar;
use rayon::prelude::*;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use common::Timer;
use linker::{DisambiguationResult, Linker};

use crate::error::Error;
use crate::snippets::Snippet;
use crate::writer::LinkWriter;

/// Totals over an annotated batch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BatchSummary {
    pub documents: usize,
    pub links: usize,
    pub failures: usize,
}

/// Advance a shared progress bar, returning the new count. A bar poisoned by
/// a panicking worker keeps counting.
fn tick<W: Write>(pb: &Mutex<ProgressBar<W>>) -> u64 {
    pb.lock().unwrap_or_else(PoisonError::into_inner).inc()
}

/// Annotate every snippet, using `jobs` worker threads (0 for one per core).
/// Results come back in snippet order whatever the number of workers.
pub fn annotate_snippets(
    linker: &Linker,
    snippets: &[Snippet],
    jobs: usize,
    progress: bool,
) -> Result<Vec<DisambiguationResult>, Error> {
    let pb = if progress {
        let mut pb = ProgressBar::on(io::stderr(), snippets.len() as u64);
        pb.message("Annotating ");
        Some(Mutex::new(pb))
    } else {
        None
    };
    let annotate = |snippet: &Snippet| {
        let result = linker.annotate_text(&snippet.id, &snippet.text);
        if let Some(pb) = &pb {
            tick(pb);
        }
        result
    };

    let results: Vec<DisambiguationResult> = if jobs == 1 {
        snippets.iter().map(annotate).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| Error::Threads(e.to_string()))?;
        pool.install(|| snippets.par_iter().map(annotate).collect())
    };

    if let Some(pb) = pb {
        pb.into_inner().unwrap_or_else(PoisonError::into_inner).finish();
    }
    Ok(results)
}

/// Write each result under the id of its snippet.
pub fn write_results(
    writer: &mut dyn LinkWriter,
    snippets: &[Snippet],
    results: &[DisambiguationResult],
) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    for (snippet, result) in snippets.iter().zip(results) {
        writer.write_links(&snippet.id, result)?;
        summary.documents += 1;
        summary.links += result.len();
        summary.failures += result.failures().len();
    }
    writer.finish()?;
    Ok(summary)
}

/// Annotate a batch and write the links out.
pub fn run_batch(
    linker: &Linker,
    snippets: &[Snippet],
    writer: &mut dyn LinkWriter,
    jobs: usize,
    progress: bool,
) -> Result<BatchSummary, Error> {
    let mut timer = Timer::new();
    let results = annotate_snippets(linker, snippets, jobs, progress)?;
    timer.finish("Annotation");
    let summary = write_results(writer, snippets, &results)?;
    info!(
        "{} documents, {} links, {} failed mentions",
        summary.documents, summary.links, summary.failures
    );
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::writer::TsvLinkWriter;
    use std::panic::{self, AssertUnwindSafe};
    use storage::{CommonnessTable, InlinkTable, PairInlinkTable, StatsStore};

    fn stats() -> StatsStore {
        let commonness = CommonnessTable::from_counts(vec![
            ("paris", "Paris_France", 80),
            ("paris", "Paris_Hilton", 20),
            ("paris", "_total", 100),
            ("louvre", "Louvre", 10),
            ("louvre", "_total", 10),
        ]);
        StatsStore::new(commonness, InlinkTable::default(), PairInlinkTable::default())
    }

    fn snippets() -> Vec<Snippet> {
        (0..20)
            .map(|i| Snippet {
                id: i.to_string(),
                text: if i % 2 == 0 {
                    "Paris".to_owned()
                } else {
                    "the Louvre in Paris".to_owned()
                },
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let stats = stats();
        let linker = Linker::new(&stats).unwrap();
        let snippets = snippets();
        let sequential = annotate_snippets(&linker, &snippets, 1, false).unwrap();
        let parallel = annotate_snippets(&linker, &snippets, 4, false).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(sequential[0].len(), 1);
        assert_eq!(sequential[1].len(), 2);
    }

    #[test]
    fn test_run_batch() {
        let stats = stats();
        let linker = Linker::new(&stats).unwrap();
        let snippets = &snippets()[..2];
        let mut writer = TsvLinkWriter::new(Vec::new());
        let summary = run_batch(&linker, snippets, &mut writer, 1, false).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                documents: 2,
                links: 3,
                failures: 0
            }
        );
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("0\t0.8\tParis_France\tparis\tpage-id\n"));
    }

    #[test]
    fn test_poisoned_progress_keeps_counting() {
        let pb = Mutex::new(ProgressBar::on(Vec::new(), 3));
        assert_eq!(tick(&pb), 1);
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = pb.lock();
            panic!("worker failed");
        }));
        assert!(pb.is_poisoned());
        assert_eq!(tick(&pb), 2);
    }
}
