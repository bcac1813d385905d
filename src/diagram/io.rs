//! Flat-text persistence of interaction diagrams
//!
//! Format: one header line with the total point count, then one point per
//! line as whitespace-separated `angle_idx level_idx N My Mz`, grouped by
//! angle row. Reading the dump back reconstructs a diagram equivalent for
//! capacity-factor queries; row angles are regenerated from the stored
//! angle indices, so the reload is not bit-identical.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::diagram::{AngleRow, DiagramPoint, InteractionDiagram};
use crate::error::{SectionError, SectionResult};

impl InteractionDiagram {
    /// Dump every stored point to a writer
    pub fn write_points<W: Write>(&self, writer: &mut W) -> SectionResult<()> {
        let count: usize = self.rows().iter().map(|r| r.points.len()).sum();
        writeln!(writer, "{count}")?;
        for row in self.rows() {
            for p in &row.points {
                writeln!(
                    writer,
                    "{} {} {} {} {}",
                    p.angle_idx, p.level_idx, p.n, p.my, p.mz
                )?;
            }
        }
        Ok(())
    }

    /// Reconstruct a diagram from a point dump
    pub fn read_points<R: BufRead>(reader: R) -> SectionResult<Self> {
        let mut lines = reader.lines();
        let header = lines
            .next()
            .ok_or_else(|| SectionError::MalformedDump("empty dump".to_string()))??;
        let count: usize = header
            .trim()
            .parse()
            .map_err(|_| SectionError::MalformedDump(format!("bad point count '{header}'")))?;

        let mut grouped: BTreeMap<usize, Vec<DiagramPoint>> = BTreeMap::new();
        let mut read = 0usize;
        for line in lines {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 5 {
                return Err(SectionError::MalformedDump(format!(
                    "expected 5 fields, got {}: '{line}'",
                    fields.len()
                )));
            }
            let parse = |s: &str| -> SectionResult<f64> {
                s.parse()
                    .map_err(|_| SectionError::MalformedDump(format!("bad number '{s}'")))
            };
            let angle_idx: usize = fields[0].parse().map_err(|_| {
                SectionError::MalformedDump(format!("bad angle index '{}'", fields[0]))
            })?;
            let level_idx: usize = fields[1].parse().map_err(|_| {
                SectionError::MalformedDump(format!("bad level index '{}'", fields[1]))
            })?;
            let point = DiagramPoint {
                n: parse(fields[2])?,
                my: parse(fields[3])?,
                mz: parse(fields[4])?,
                angle_idx,
                level_idx,
            };
            grouped.entry(angle_idx).or_default().push(point);
            read += 1;
        }
        if read != count {
            return Err(SectionError::MalformedDump(format!(
                "header promises {count} points, found {read}"
            )));
        }

        let n_angles = grouped.keys().next_back().map_or(0, |last| last + 1);
        let n_levels = grouped.values().map(|p| p.len()).max().unwrap_or(0);
        let rows: Vec<AngleRow> = grouped
            .into_iter()
            .map(|(angle_idx, mut points)| {
                points.sort_by_key(|p| p.level_idx);
                AngleRow {
                    theta: std::f64::consts::TAU * angle_idx as f64 / n_angles as f64,
                    points,
                }
            })
            .collect();
        InteractionDiagram::from_rows(rows, n_angles, n_levels, Vec::new())
    }

    /// Serialize the full diagram (rows, metadata, warnings) to JSON
    pub fn to_json(&self) -> SectionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a diagram from its JSON form
    pub fn from_json(json: &str) -> SectionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
