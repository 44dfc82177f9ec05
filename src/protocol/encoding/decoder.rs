use crate::protocol::encoding::Transcoder;
use crate::{HdbError, HdbResult};
use byteorder::{LittleEndian, ReadBytesExt};

/// Typed little-endian reader over a (buffered) byte stream.
///
/// The decoder carries a sticky error: once any primitive fails, all
/// subsequent reads are no-ops returning zero values until the error is
/// fetched and reset at a part or message boundary. This lets part decoders
/// be written as straight-line sequences of primitive calls with a single
/// `check()` at the end.
///
/// The per-part byte counter (`cnt`) is reset by the `Reader` before each
/// part and is the basis for buffer-length and padding accounting.
pub struct Decoder<R> {
    rdr: R,
    transcoder: Box<dyn Transcoder>,
    cnt: usize,
    failed: bool,
    err: Option<HdbError>,
}

impl<R> std::fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("cnt", &self.cnt)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl<R: std::io::Read> Decoder<R> {
    pub fn new(rdr: R, transcoder: Box<dyn Transcoder>) -> Self {
        Self {
            rdr,
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

    pub fn set_transcoder(&mut self, transcoder: Box<dyn Transcoder>) {
        self.transcoder = transcoder;
    }

    pub fn has_error(&self) -> bool {
        self.failed
    }

    /// Takes the sticky error, if any. The no-op state persists until
    /// `reset_error` is called.
    pub fn take_error(&mut self) -> Option<HdbError> {
        self.err.take()
    }

    pub fn reset_error(&mut self) {
        self.failed = false;
        self.err = None;
    }

    /// Surfaces the sticky error; to be called at part or message boundaries.
    pub fn check(&mut self) -> HdbResult<()> {
        if self.failed {
            match self.err.take() {
                Some(e) => Err(e),
                None => Err(HdbError::Impl("decoder error was already consumed")),
            }
        } else {
            Ok(())
        }
    }

    fn record(&mut self, e: HdbError) {
        if !self.failed {
            self.failed = true;
            self.err = Some(e);
        }
    }

    pub fn u8(&mut self) -> u8 {
        if self.failed {
            return 0;
        }
        match self.rdr.read_u8() {
            Ok(v) => {
                self.cnt += 1;
                v
            }
            Err(e) => {
                self.record(e.into());
                0
            }
        }
    }

    pub fn i8(&mut self) -> i8 {
        self.u8() as i8
    }

    pub fn i16(&mut self) -> i16 {
        if self.failed {
            return 0;
        }
        match self.rdr.read_i16::<LittleEndian>() {
            Ok(v) => {
                self.cnt += 2;
                v
            }
            Err(e) => {
                self.record(e.into());
                0
            }
        }
    }

    pub fn u16(&mut self) -> u16 {
        self.i16() as u16
    }

    pub fn i32(&mut self) -> i32 {
        if self.failed {
            return 0;
        }
        match self.rdr.read_i32::<LittleEndian>() {
            Ok(v) => {
                self.cnt += 4;
                v
            }
            Err(e) => {
                self.record(e.into());
                0
            }
        }
    }

    pub fn u32(&mut self) -> u32 {
        self.i32() as u32
    }

    pub fn i64(&mut self) -> i64 {
        if self.failed {
            return 0;
        }
        match self.rdr.read_i64::<LittleEndian>() {
            Ok(v) => {
                self.cnt += 8;
                v
            }
            Err(e) => {
                self.record(e.into());
                0
            }
        }
    }

    pub fn u64(&mut self) -> u64 {
        self.i64() as u64
    }

    pub fn f32(&mut self) -> f32 {
        f32::from_bits(self.u32())
    }

    pub fn f64(&mut self) -> f64 {
        f64::from_bits(self.u64())
    }

    /// Reads exactly `len` raw bytes.
    pub fn bytes(&mut self, len: usize) -> Vec<u8> {
        if self.failed || len == 0 {
            return Vec::new();
        }
        let mut vec = vec![0_u8; len];
        match self.rdr.read_exact(&mut vec) {
            Ok(()) => {
                self.cnt += len;
                vec
            }
            Err(e) => {
                self.record(e.into());
                Vec::new()
            }
        }
    }

    /// Reads and discards `n` bytes. Padding bytes are not inspected.
    pub fn skip(&mut self, n: usize) {
        if self.failed || n == 0 {
            return;
        }
        let mut buffer = [0_u8; 512];
        let mut remaining = n;
        while remaining > 0 {
            let chunk = remaining.min(buffer.len());
            match self.rdr.read_exact(&mut buffer[0..chunk]) {
                Ok(()) => {
                    self.cnt += chunk;
                    remaining -= chunk;
                }
                Err(e) => {
                    self.record(e.into());
                    return;
                }
            }
        }
    }

    /// Reads `len` wire bytes and transcodes them to UTF-8.
    /// A transcoding failure becomes a sticky decoder error.
    pub fn string(&mut self, len: usize) -> String {
        let bytes = self.bytes(len);
        if self.failed {
            return String::new();
        }
        match self.transcoder.decode(bytes) {
            Ok(s) => s,
            Err(e) => {
                self.record(e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::Decoder;
    use crate::protocol::encoding::Cesu8Transcoder;

    fn decoder(bytes: &[u8]) -> Decoder<std::io::Cursor<Vec<u8>>> {
        Decoder::new(
            std::io::Cursor::new(bytes.to_vec()),
            Box::new(Cesu8Transcoder),
        )
    }

    #[test]
    fn test_primitives_and_cnt() {
        let mut dec = decoder(&[0x2A, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(dec.u8(), 42);
        assert_eq!(dec.i16(), -1);
        assert_eq!(dec.i32(), 1);
        assert_eq!(dec.cnt(), 7);
        assert!(dec.check().is_ok());
    }

    #[test]
    fn test_sticky_error_makes_reads_no_ops() {
        let mut dec = decoder(&[0x01]);
        assert_eq!(dec.u8(), 1);
        assert_eq!(dec.u32(), 0); // stream exhausted
        assert!(dec.has_error());
        assert_eq!(dec.i64(), 0);
        assert_eq!(dec.cnt(), 1); // failed reads do not count
        assert!(dec.check().is_err());
        dec.reset_error();
        assert!(dec.check().is_ok());
    }

    #[test]
    fn test_string_transcodes_cesu8() {
        let wire = cesu8::to_cesu8("grü💩e").into_owned();
        let mut dec = decoder(&wire);
        assert_eq!(dec.string(wire.len()), "grü💩e");
        assert_eq!(dec.cnt(), wire.len());
    }

    #[test]
    fn test_bad_cesu8_is_sticky() {
        let mut dec = decoder(&[0xED, 0xA0, 0x80, 0x2A]);
        assert_eq!(dec.string(3), "");
        assert!(dec.has_error());
        assert_eq!(dec.u8(), 0); // no-op despite remaining byte
    }
}
