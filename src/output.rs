//! Intercept records: one `name,left,right` line per decoded frame.
use crate::image::io::ensure_parent_dir;
use crate::lanes::LaneCandidates;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Placeholder printed for a side without a lane.
pub const MISSING: &str = "None";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    pub frame: String,
    pub left: Option<i32>,
    pub right: Option<i32>,
}

impl FrameRecord {
    pub fn new(frame: impl Into<String>, lanes: &LaneCandidates) -> Self {
        Self {
            frame: frame.into(),
            left: lanes.left_x(),
            right: lanes.right_x(),
        }
    }
}

struct Side(Option<i32>);

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(x) => write!(f, "{x}"),
            None => f.write_str(MISSING),
        }
    }
}

impl fmt::Display for FrameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.frame, Side(self.left), Side(self.right))
    }
}

/// Line-oriented record sink.
pub struct InterceptWriter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> InterceptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, rows: 0 }
    }

    pub fn write_record(&mut self, record: &FrameRecord) -> io::Result<()> {
        writeln!(self.out, "{record}")?;
        self.rows += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and hands back the underlying sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl InterceptWriter<BufWriter<File>> {
    /// Creates (or truncates) the CSV file at `path`.
    pub fn create(path: &Path) -> Result<Self, String> {
        ensure_parent_dir(path)?;
        let file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::Intercept;

    fn hit(x: i32) -> Intercept {
        Intercept {
            x,
            y: 300,
            anchor: [x, 0],
        }
    }

    #[test]
    fn absent_sides_print_none() {
        let lanes = LaneCandidates {
            left: Some(hit(10)),
            right: None,
        };
        let record = FrameRecord::new("f1.png", &lanes);
        assert_eq!(record.to_string(), "f1.png,10,None");

        let empty = FrameRecord::new("f2.png", &LaneCandidates::default());
        assert_eq!(empty.to_string(), "f2.png,None,None");
    }

    #[test]
    fn negative_and_large_values_are_printed_verbatim() {
        let lanes = LaneCandidates {
            left: Some(hit(-35)),
            right: Some(hit(10_400)),
        };
        assert_eq!(FrameRecord::new("a", &lanes).to_string(), "a,-35,10400");
    }

    #[test]
    fn writer_emits_one_line_per_record() {
        let mut writer = InterceptWriter::new(Vec::new());
        let lanes = LaneCandidates {
            left: Some(hit(10)),
            right: Some(hit(190)),
        };
        writer
            .write_record(&FrameRecord::new("a.png", &lanes))
            .unwrap();
        writer
            .write_record(&FrameRecord::new("b.png", &LaneCandidates::default()))
            .unwrap();
        assert_eq!(writer.rows(), 2);
        let bytes = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "a.png,10,190\nb.png,None,None\n"
        );
    }
}
