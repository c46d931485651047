use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use bzip2::read::BzDecoder;
use log::debug;

/// Open a statistics file for buffered reading.
///
/// Files with a `.bz2` extension are decompressed on the fly; anything else is
/// read as plain text.
pub fn open_stats<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if is_bzip(path) {
        debug!("opening {:?} as bzip2", path);
        let buf = BufReader::with_capacity(8192 * 4, file);
        let dec = BzDecoder::new(buf);
        Ok(Box::new(BufReader::with_capacity(8192 * 16, dec)))
    } else {
        Ok(Box::new(BufReader::with_capacity(8192 * 16, file)))
    }
}

fn is_bzip(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("bz2"))
        .unwrap_or(false)
}

#[cfg(test)]
mod test {
    use super::*;
    use bzip2::write::BzEncoder;
    use bzip2::Compression;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    fn read_all(path: &Path) -> String {
        let mut out = String::new();
        open_stats(path).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_open_plain_file() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("inlinks.tsv");
        std::fs::write(&path, "Paris\t10\n").unwrap();
        assert_eq!(read_all(&path), "Paris\t10\n");
    }

    #[test]
    fn test_open_bzip_file() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("inlinks.tsv.bz2");
        {
            let file = File::create(&path).unwrap();
            let mut enc = BzEncoder::new(file, Compression::Best);
            enc.write_all(b"Paris\t10\nLyon\t4\n").unwrap();
            enc.finish().unwrap();
        }
        assert_eq!(read_all(&path), "Paris\t10\nLyon\t4\n");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let tmp_dir = TempDir::new().unwrap();
        assert!(open_stats(tmp_dir.path().join("nope.tsv")).is_err());
    }
}
