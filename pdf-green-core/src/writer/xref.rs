//! Cross-reference sections and file trailers in byte form

use crate::error::{Result, SyntaxError};
use crate::objects::{Dictionary, Object, ObjectId};
use crate::syntax::check_xref_offset;
use std::io::Write;

/// Byte offset of an in-use object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefRecord {
    pub id: ObjectId,
    pub offset: u64,
}

impl XRefRecord {
    pub fn new(id: ObjectId, offset: u64) -> Self {
        Self { id, offset }
    }
}

/// One line of an xref table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct XRefLine {
    pub offset: u64,
    pub generation: u16,
    pub in_use: bool,
}

impl XRefLine {
    /// Head of the free list, object 0
    pub(crate) const FREE_HEAD: XRefLine = XRefLine {
        offset: 0,
        generation: 65535,
        in_use: false,
    };

    pub(crate) fn to_record_string(self) -> String {
        format!(
            "{:010} {:05} {} \n",
            self.offset,
            self.generation,
            if self.in_use { 'n' } else { 'f' }
        )
    }
}

/// Groups records into subsections of consecutive object numbers.
///
/// Object 0 is always present as the free-list head. When an object number
/// appears more than once, the last record wins. Offsets must fit the
/// ten-digit record field.
pub(crate) fn subsections(records: &[XRefRecord]) -> Result<Vec<(u32, Vec<XRefLine>)>> {
    if let Some(record) = records.iter().find(|r| r.id.number() == 0) {
        return Err(SyntaxError::InvalidOperation(format!(
            "object {} uses number 0, which is reserved for the free-list head",
            record.id
        )));
    }

    for record in records {
        check_xref_offset(record.offset)?;
    }

    let mut sorted: Vec<XRefRecord> = records.to_vec();
    // Stable, so duplicates stay in input order and dedup keeps the last
    sorted.sort_by_key(|r| r.id.number());
    sorted.reverse();
    sorted.dedup_by_key(|r| r.id.number());
    sorted.reverse();

    let mut groups: Vec<(u32, Vec<XRefLine>)> = vec![(0, vec![XRefLine::FREE_HEAD])];
    for record in sorted {
        let line = XRefLine {
            offset: record.offset,
            generation: record.id.generation(),
            in_use: true,
        };
        match groups.last_mut() {
            Some((start, lines)) if *start as usize + lines.len() == record.id.number() as usize => {
                lines.push(line)
            }
            _ => groups.push((record.id.number(), vec![line])),
        }
    }

    Ok(groups)
}

/// Writes `xref` followed by the subsections for `records`.
pub fn write_xref_section<W: Write>(records: &[XRefRecord], out: &mut W) -> Result<()> {
    let groups = subsections(records)?;
    tracing::debug!(
        records = records.len(),
        subsections = groups.len(),
        "writing xref section"
    );

    out.write_all(b"xref\n")?;
    for (start, lines) in &groups {
        writeln!(out, "{} {}", start, lines.len())?;
        for line in lines {
            out.write_all(line.to_record_string().as_bytes())?;
        }
    }
    Ok(())
}

/// Writes the trailer dictionary, `startxref` and the end-of-file marker.
pub fn write_trailer<W: Write>(trailer: &Dictionary, startxref: u64, out: &mut W) -> Result<()> {
    out.write_all(b"trailer\n")?;
    Object::Dictionary(trailer.clone()).write_pdf(out)?;
    write!(out, "\nstartxref\n{startxref}\n%%EOF\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: u32, offset: u64) -> XRefRecord {
        XRefRecord::new(ObjectId::new(number, 0), offset)
    }

    #[test]
    fn test_record_string_is_twenty_bytes() {
        assert_eq!(XRefLine::FREE_HEAD.to_record_string(), "0000000000 65535 f \n");
        let line = XRefLine {
            offset: 1234,
            generation: 2,
            in_use: true,
        };
        assert_eq!(line.to_record_string(), "0000001234 00002 n \n");
        assert_eq!(line.to_record_string().len(), 20);
    }

    #[test]
    fn test_consecutive_numbers_share_a_subsection() {
        let groups = subsections(&[record(2, 30), record(1, 15)]).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, 0);
        assert_eq!(groups[0].1.len(), 3);
        assert_eq!(groups[0].1[1].offset, 15);
    }

    #[test]
    fn test_gaps_start_new_subsections() {
        let groups = subsections(&[record(1, 15), record(5, 90), record(6, 120)]).unwrap();
        let shape: Vec<(u32, usize)> = groups.iter().map(|(s, l)| (*s, l.len())).collect();
        assert_eq!(shape, vec![(0, 2), (5, 2)]);
    }

    #[test]
    fn test_duplicate_numbers_keep_last() {
        let groups = subsections(&[record(1, 15), record(1, 40)]).unwrap();
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].offset, 40);
    }

    #[test]
    fn test_object_zero_is_rejected() {
        assert!(matches!(
            subsections(&[record(0, 15)]),
            Err(SyntaxError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_offsets_must_fit_ten_digits() {
        let largest = subsections(&[record(1, 9_999_999_999)]).unwrap();
        assert_eq!(largest[0].1[1].to_record_string(), "9999999999 00000 n \n");

        match subsections(&[record(1, 15), record(2, 10_000_000_000)]) {
            Err(SyntaxError::ArgumentOutOfRange { param, value, limit }) => {
                assert_eq!(param, "offset");
                assert_eq!(value, 10_000_000_000);
                assert_eq!(limit, 9_999_999_999);
            }
            other => panic!("expected offset error, got {other:?}"),
        }

        let mut out = Vec::new();
        assert!(write_xref_section(&[record(1, u64::MAX)], &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_xref_section() {
        let mut out = Vec::new();
        write_xref_section(&[record(1, 15), record(3, 60)], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "xref\n0 2\n0000000000 65535 f \n0000000015 00000 n \n3 1\n0000000060 00000 n \n"
        );
    }

    #[test]
    fn test_write_trailer() {
        let mut trailer = Dictionary::new();
        trailer.set("Size", 4);
        trailer.set("Root", ObjectId::new(1, 0));

        let mut out = Vec::new();
        write_trailer(&trailer, 512, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "trailer\n<</Size 4 /Root 1 0 R>>\nstartxref\n512\n%%EOF\n"
        );
    }
}
