use crate::protocol::encoding::Transcoder;
use crate::{HdbError, HdbResult};
use byteorder::{LittleEndian, WriteBytesExt};

/// Typed little-endian writer over a (buffered) byte stream.
///
/// Mirror image of [`Decoder`](crate::protocol::encoding::Decoder): sticky
/// error, per-part byte counter, pluggable text transcoding. Once the sticky
/// error is set all writes are dropped; the error surfaces on `check()` or
/// `flush()`.
pub struct Encoder<W> {
    wr: W,
    transcoder: Box<dyn Transcoder>,
    cnt: usize,
    failed: bool,
    err: Option<HdbError>,
}

impl<W> std::fmt::Debug for Encoder<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("cnt", &self.cnt)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl<W: std::io::Write> Encoder<W> {
    pub fn new(wr: W, transcoder: Box<dyn Transcoder>) -> Self {
        Self {
            wr,
            transcoder,
            cnt: 0,
            failed: false,
            err: None,
        }
    }

    pub fn cnt(&self) -> usize {
        self.cnt
    }
    pub fn reset_cnt(&mut self) {
        self.cnt = 0;
    }

    pub fn reset_error(&mut self) {
        self.failed = false;
        self.err = None;
    }

    pub fn check(&mut self) -> HdbResult<()> {
        if self.failed {
            match self.err.take() {
                Some(e) => Err(e),
                None => Err(HdbError::Impl("encoder error was already consumed")),
            }
        } else {
            Ok(())
        }
    }

    /// Surfaces the sticky error and flushes the underlying writer.
    pub fn flush(&mut self) -> HdbResult<()> {
        self.check()?;
        Ok(self.wr.flush()?)
    }

    /// Gives up the encoder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.wr
    }

    /// Replaces the text transcoder.
    pub fn set_transcoder(&mut self, transcoder: Box<dyn Transcoder>) {
        self.transcoder = transcoder;
    }

    fn record(&mut self, e: HdbError) {
        if !self.failed {
            self.failed = true;
            self.err = Some(e);
        }
    }

    fn put(&mut self, res: std::io::Result<()>, width: usize) {
        match res {
            Ok(()) => self.cnt += width,
            Err(e) => self.record(e.into()),
        }
    }

    pub fn u8(&mut self, v: u8) {
        if self.failed {
            return;
        }
        let res = self.wr.write_u8(v);
        self.put(res, 1);
    }

    pub fn i8(&mut self, v: i8) {
        self.u8(v as u8);
    }

    pub fn i16(&mut self, v: i16) {
        if self.failed {
            return;
        }
        let res = self.wr.write_i16::<LittleEndian>(v);
        self.put(res, 2);
    }

    pub fn u16(&mut self, v: u16) {
        self.i16(v as i16);
    }

    pub fn i32(&mut self, v: i32) {
        if self.failed {
            return;
        }
        let res = self.wr.write_i32::<LittleEndian>(v);
        self.put(res, 4);
    }

    pub fn u32(&mut self, v: u32) {
        self.i32(v as i32);
    }

    pub fn i64(&mut self, v: i64) {
        if self.failed {
            return;
        }
        let res = self.wr.write_i64::<LittleEndian>(v);
        self.put(res, 8);
    }

    pub fn u64(&mut self, v: u64) {
        self.i64(v as i64);
    }

    pub fn f32(&mut self, v: f32) {
        self.u32(v.to_bits());
    }

    pub fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    pub fn bytes(&mut self, v: &[u8]) {
        if self.failed {
            return;
        }
        let res = self.wr.write_all(v);
        self.put(res, v.len());
    }

    /// Emits `n` zero bytes (padding is always zero-filled).
    pub fn zeroes(&mut self, n: usize) {
        const ZEROES: [u8; 16] = [0; 16];
        let mut remaining = n;
        while remaining > 0 {
            let chunk = remaining.min(ZEROES.len());
            self.bytes(&ZEROES[0..chunk]);
            remaining -= chunk;
        }
    }

    /// Transcodes the string to its wire representation and emits it
    /// (without any length prefix).
    pub fn string(&mut self, s: &str) {
        let wire = self.transcoder.encode(s);
        self.bytes(&wire);
    }
}

#[cfg(test)]
mod test {
    use super::Encoder;
    use crate::protocol::encoding::Cesu8Transcoder;

    fn encoder() -> Encoder<Vec<u8>> {
        Encoder::new(Vec::new(), Box::new(Cesu8Transcoder))
    }

    #[test]
    fn test_primitives_and_cnt() {
        let mut enc = encoder();
        enc.u8(42);
        enc.i16(-1);
        enc.u32(70_000);
        enc.zeroes(3);
        assert_eq!(enc.cnt(), 10);
        assert!(enc.flush().is_ok());
        assert_eq!(enc.wr, [42, 0xFF, 0xFF, 0x70, 0x11, 0x01, 0x00, 0, 0, 0]);
    }

    #[test]
    fn test_string_is_transcoded() {
        let mut enc = encoder();
        enc.string("a💩");
        assert_eq!(enc.wr, cesu8::to_cesu8("a💩").into_owned());
        assert_eq!(enc.cnt(), 7);
    }
}
