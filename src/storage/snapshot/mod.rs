// Snapshot persistence
//
// A snapshot is the live entries of a list written as flat records in ascending key order:
//
// ┌──────────────┬────────────────┬──────────────┬────────────────┬─────
// │ key (K::W)   │ value (V::W)   │ key (K::W)   │ value (V::W)   │ ...
// └──────────────┴────────────────┴──────────────┴────────────────┴─────
//
// No header, no count and no delimiters. The reader has to know K and V to know the record width.
// It is a flat dump for reload, not a log: nothing is validated beyond the record boundary and the
// per-type decode.
//
// save walks level 0 under one shared lock. load clears and re-inserts under one exclusive lock, so
// readers never observe a load in progress. A load that fails part way keeps the records before the
// bad one.

pub mod record;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::error::SnapshotError;
use crate::storage::comparator::Comparator;
use crate::storage::skiplist::SkipList;

pub use record::FixedRecord;

impl<K, V, C> SkipList<K, V, C>
where
    K: FixedRecord,
    V: FixedRecord,
    C: Comparator<K>,
{
    #[inline]
    fn record_width() -> Result<usize, SnapshotError> {
        match K::WIDTH + V::WIDTH {
            0 => Err(SnapshotError::ZeroWidthRecord),
            width => Ok(width),
        }
    }

    /// Writes every entry to `path`, replacing the file. Returns the number of records written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<usize, SnapshotError> {
        let path = path.as_ref();
        // Checked before File::create truncates an existing snapshot
        Self::record_width()?;
        let mut writer = BufWriter::new(File::create(path)?);

        let records = self.save_to(&mut writer)?;
        writer.flush()?;

        info!(path = %path.display(), records, "saved skip list snapshot");
        Ok(records)
    }

    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<usize, SnapshotError> {
        let width = Self::record_width()?;
        let mut buf = vec![0u8; width];

        let guard = self.read();
        let mut records = 0;

        for node in guard.list.iter() {
            let (key, value) = buf.split_at_mut(K::WIDTH);
            node.key().encode(key);
            node.value().encode(value);
            writer.write_all(&buf)?;
            records += 1;
        }

        Ok(records)
    }

    /// Replaces the contents with the records in `path`.
    ///
    /// Returns the number of records read, which is more than `size()` if the file held duplicate keys.
    /// If the file can't be opened the list is left untouched and `SnapshotError::Open` is returned.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<usize, SnapshotError> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                warn!(path = %path.display(), error = %source, "could not open skip list snapshot");
                return Err(SnapshotError::Open {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let records = self.load_from(&mut BufReader::new(file))?;
        info!(path = %path.display(), records, "loaded skip list snapshot");
        Ok(records)
    }

    pub fn load_from<R: Read>(&self, reader: &mut R) -> Result<usize, SnapshotError> {
        let width = Self::record_width()?;
        let mut buf = vec![0u8; width];

        let mut guard = self.write();
        guard.list.clear();

        let mut records = 0;
        loop {
            match read_record(reader, &mut buf)? {
                0 => break,
                n if n < width => {
                    return Err(SnapshotError::Truncated {
                        records,
                        trailing: n,
                    });
                }
                _ => {}
            }

            let (key, value) = buf.split_at(K::WIDTH);
            let (Some(key), Some(value)) = (K::decode(key), V::decode(value)) else {
                return Err(SnapshotError::Corrupt { record: records });
            };

            guard.insert(key, value);
            records += 1;
        }

        Ok(records)
    }
}

// Fills `buf` as far as the reader allows. Returns the bytes read, which is less than the buffer only at
// the end of input.
fn read_record<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkipListConfig;
    use std::io::Cursor;

    fn list<K: Ord, V>() -> SkipList<K, V> {
        SkipList::from_config(SkipListConfig::new(8, 0.5).with_seed(5)).unwrap()
    }

    #[test]
    fn records_are_flat_and_ordered() {
        let list = list::<u16, u8>();
        list.insert(0x0302, 9);
        list.insert(0x0001, 7);

        let mut out = Vec::new();
        assert_eq!(list.save_to(&mut out).unwrap(), 2);
        assert_eq!(out, vec![0x01, 0x00, 7, 0x02, 0x03, 9]);
    }

    #[test]
    fn load_replaces_contents() {
        let source = list::<u32, i64>();
        for k in 0..50u32 {
            source.insert(k * 3, -(k as i64));
        }
        let mut bytes = Vec::new();
        source.save_to(&mut bytes).unwrap();

        let target = list::<u32, i64>();
        target.insert(1, 1);

        assert_eq!(target.load_from(&mut Cursor::new(bytes)).unwrap(), 50);
        assert_eq!(target.size(), 50);
        assert_eq!(target.find(&1), None);
        assert_eq!(target.find(&147), Some(-49));
        assert_eq!(target.entries(), source.entries());
    }

    #[test]
    fn duplicate_records_counted_not_inserted() {
        let mut bytes = Vec::new();
        for (k, v) in [(1u8, 10u8), (1, 11), (2, 20)] {
            bytes.extend([k, v]);
        }

        let target = list::<u8, u8>();
        assert_eq!(target.load_from(&mut Cursor::new(bytes)).unwrap(), 3);
        assert_eq!(target.size(), 2);
        assert_eq!(target.find(&1), Some(10));
    }

    #[test]
    fn trailing_partial_record() {
        let bytes = vec![1, 0, 0, 0, 2, 0, 0, 0, 9];
        let target = list::<u32, u32>();

        let err = target.load_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Truncated {
                records: 1,
                trailing: 1
            }
        ));
        // Records before the partial one stay loaded
        assert_eq!(target.size(), 1);
        assert_eq!(target.find(&1), Some(2));
    }

    #[test]
    fn undecodable_record() {
        let target = list::<u8, bool>();
        let err = target
            .load_from(&mut Cursor::new(vec![1, 1, 2, 7]))
            .unwrap_err();

        assert!(matches!(err, SnapshotError::Corrupt { record: 1 }));
        assert_eq!(target.size(), 1);
        assert_eq!(target.find(&1), Some(true));
        assert_eq!(target.find(&2), None);
    }

    #[test]
    fn zero_width_rejected() {
        let target = list::<[u8; 0], [u8; 0]>();
        let err = target.save_to(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, SnapshotError::ZeroWidthRecord));
    }

    #[test]
    fn failed_save_keeps_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("list.snap");
        std::fs::write(&path, [1u8; 8]).unwrap();

        let list = list::<[u8; 0], [u8; 0]>();
        let err = list.save(&path).unwrap_err();

        assert!(matches!(err, SnapshotError::ZeroWidthRecord));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1u8; 8]);
    }

    #[test]
    fn empty_input_empties_list() {
        let target = list::<u8, u8>();
        target.insert(1, 1);

        assert_eq!(target.load_from(&mut io::empty()).unwrap(), 0);
        assert!(target.is_empty());
    }
}
