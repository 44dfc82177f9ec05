use crate::protocol::encoding::Decoder;
use crate::HdbResult;

/// Sentinel: the statement succeeded but the number of affected rows cannot
/// be determined.
pub const RA_SUCCESS_NO_INFO: i32 = -2;

/// Sentinel: the statement failed; the matching error is transported in the
/// error part of the same reply and is linked up during error fusion.
pub const RA_EXECUTION_FAILED: i32 = -3;

/// Per-statement row counts of a (batch) execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowsAffected {
    /// Index of the first statement this part refers to.
    pub ofs: usize,
    rows: Vec<i32>,
}

impl RowsAffected {
    pub fn rows(&self) -> &[i32] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all regular row counts (sentinels count as zero).
    pub fn total(&self) -> u64 {
        self.rows
            .iter()
            .filter(|&&v| v >= 0)
            .map(|&v| u64::from(v.unsigned_abs()))
            .sum()
    }

    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        no_of_args: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        self.rows.clear();
        self.rows.reserve(no_of_args);
        for _ in 0..no_of_args {
            self.rows.push(dec.i32());
        }
        dec.check()
    }
}

impl std::fmt::Display for RowsAffected {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            match *row {
                RA_SUCCESS_NO_INFO => writeln!(
                    fmt,
                    "statement {}: success, affected rows not available",
                    self.ofs + i
                )?,
                RA_EXECUTION_FAILED => {
                    writeln!(fmt, "statement {}: execution failed", self.ofs + i)?;
                }
                count => writeln!(fmt, "statement {}: {count} affected rows", self.ofs + i)?,
            }
        }
        Ok(())
    }
}
