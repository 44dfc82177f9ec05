use crate::cancellation::CancellationToken;
use crate::protocol::encoding::{Cesu8Transcoder, Decoder, Transcoder};
use crate::protocol::headers::{
    MessageHeader, PartHeader, SegmentHeader, PART_HEADER_SIZE, SEGMENT_HEADER_SIZE,
};
use crate::protocol::init::{InitReply, InitRequest};
use crate::protocol::parts::{RowsAffected, ServerErrors, RA_EXECUTION_FAILED};
use crate::protocol::{pad_bytes, FunctionCode, Part, PartAttributes, PartKind};
use crate::{HdbError, HdbResult};
use std::collections::HashMap;

// Which side of the connection this reader listens to; determines the prolog
// record and the trace prefix.
#[derive(Debug, Clone, Copy)]
enum Side {
    Db,
    Client,
}

impl Side {
    fn prefix(self) -> &'static str {
        match self {
            Self::Db => "←",
            Self::Client => "→",
        }
    }
}

/// Protocol reader: iterates one message (header → segments → parts) and
/// dispatches each part to a caller-supplied handler.
///
/// Parts the handler does not consume are skipped; error and rows-affected
/// parts are always materialized, because the outcome of the message is fused
/// from them after the last segment (see `iterate_parts`).
///
/// The reader is not concurrency-safe with itself; the enclosing driver must
/// serialize calls per connection.
pub struct Reader<R> {
    prot_trace: bool,
    side: Side,

    dec: Decoder<R>,

    // reusable header scratch
    mh: MessageHeader,
    sh: SegmentHeader,
    ph: PartHeader,

    read_bytes: u64,
    cur_segm: usize,
    num_part: usize,
    cnt_part: usize,
    part_consumed: bool,

    // decoder prototypes, one per kind, so that skip-then-parse does not
    // reallocate on every message
    part_cache: HashMap<PartKind, Part>,

    last_errors: Option<ServerErrors>,
    last_rows_affected: Option<RowsAffected>,
    part_decode_failed: bool,
}

impl<R> std::fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("side", &self.side)
            .field("read_bytes", &self.read_bytes)
            .finish_non_exhaustive()
    }
}

impl<R: std::io::Read> Reader<R> {
    /// Creates a reader for the database side of a connection: it expects the
    /// init reply as prolog and reply messages afterwards.
    ///
    /// `rdr` should be buffered (e.g. a `BufReader` around the socket).
    pub fn new_db(rdr: R, prot_trace: bool) -> Self {
        Self::new(rdr, prot_trace, Side::Db)
    }

    /// Creates a reader for the client side of a connection (trace tooling,
    /// tests): it expects the init request as prolog.
    pub fn new_client(rdr: R, prot_trace: bool) -> Self {
        Self::new(rdr, prot_trace, Side::Client)
    }

    fn new(rdr: R, prot_trace: bool, side: Side) -> Self {
        Self {
            prot_trace,
            side,
            dec: Decoder::new(rdr, Box::new(Cesu8Transcoder)),
            mh: MessageHeader::default(),
            sh: SegmentHeader::default(),
            ph: PartHeader::default(),
            read_bytes: 0,
            cur_segm: 0,
            num_part: 0,
            cnt_part: 0,
            part_consumed: false,
            part_cache: HashMap::new(),
            last_errors: None,
            last_rows_affected: None,
            part_decode_failed: false,
        }
    }

    /// Replaces the text transcoder (CESU-8 by default).
    #[must_use]
    pub fn with_transcoder(mut self, transcoder: Box<dyn Transcoder>) -> Self {
        self.dec.set_transcoder(transcoder);
        self
    }

    /// Returns the session id of the last decoded message header.
    pub fn session_id(&self) -> i64 {
        self.mh.session_id
    }

    /// Returns the function code of the last decoded reply segment.
    pub fn function_code(&self) -> FunctionCode {
        self.sh.function_code
    }

    /// Reads the handshake record that precedes all messages.
    pub fn read_prolog(&mut self, ctx: &CancellationToken) -> HdbResult<()> {
        if ctx.is_cancelled() {
            return Err(HdbError::Cancelled);
        }
        match self.side {
            Side::Db => {
                let mut reply = InitReply::default();
                reply.decode(&mut self.dec)?;
                if self.prot_trace {
                    debug!("{} INI: {}", self.side.prefix(), reply);
                }
            }
            Side::Client => {
                let mut request = InitRequest::default();
                request.decode(&mut self.dec)?;
                if self.prot_trace {
                    debug!("{} INI: {}", self.side.prefix(), request);
                }
            }
        }
        Ok(())
    }

    /// Reads and discards all parts of the next message.
    /// Error and rows-affected parts are still evaluated.
    pub fn skip_parts(&mut self, ctx: &CancellationToken) -> HdbResult<()> {
        self.iterate_parts(ctx, |_kind, _attrs, _part_read| Ok(()))
    }

    /// Iterates through all parts of the next message.
    ///
    /// For every part, `handler` is called with the part kind, the part
    /// attributes, and a [`PartRead`] with which it can decode the part into
    /// a caller-owned [`Part`] instance. If the handler does not consume the
    /// `PartRead`, the part is skipped.
    ///
    /// After the last segment the collected error and rows-affected parts are
    /// fused: per-statement failures get their statement index assigned, and
    /// a warning-only error list is logged and turned into `Ok`.
    pub fn iterate_parts<F>(&mut self, ctx: &CancellationToken, handler: F) -> HdbResult<()>
    where
        F: FnMut(PartKind, PartAttributes, PartRead<'_, R>) -> HdbResult<()>,
    {
        match self.iterate_parts_inner(ctx, handler) {
            Ok(()) => self.check_error(),
            Err(e) => {
                self.reset_read_state();
                Err(e)
            }
        }
    }

    fn iterate_parts_inner<F>(&mut self, ctx: &CancellationToken, mut handler: F) -> HdbResult<()>
    where
        F: FnMut(PartKind, PartAttributes, PartRead<'_, R>) -> HdbResult<()>,
    {
        if ctx.is_cancelled() {
            return Err(HdbError::Cancelled);
        }

        self.mh.decode(&mut self.dec)?;
        // header bytes are excluded from var_part_length: start at zero
        self.read_bytes = 0;
        if self.prot_trace {
            debug!("{} MSH: {}", self.side.prefix(), self.mh);
        }

        let no_of_segm = usize::try_from(self.mh.no_of_segm)
            .map_err(|_| HdbError::Framing(format!("invalid no_of_segm {}", self.mh.no_of_segm)))?;

        for i in 0..no_of_segm {
            if ctx.is_cancelled() {
                return self.drain_cancelled();
            }
            self.cur_segm = i + 1;

            self.sh.decode(&mut self.dec)?;
            self.read_bytes += u64::from(SEGMENT_HEADER_SIZE);
            if self.prot_trace {
                debug!("{} SGH: {}", self.side.prefix(), self.sh);
            }

            self.num_part = usize::try_from(self.sh.no_of_parts).map_err(|_| {
                HdbError::Framing(format!("invalid no_of_parts {}", self.sh.no_of_parts))
            })?;
            self.cnt_part = 0;

            for _ in 0..self.num_part {
                self.ph.decode(&mut self.dec)?;
                self.read_bytes += u64::from(PART_HEADER_SIZE);
                if self.prot_trace {
                    debug!("{} PRH: {}", self.side.prefix(), self.ph);
                }

                self.cnt_part += 1;
                self.part_consumed = false;

                let kind = self.ph.part_kind;
                let attrs = self.ph.part_attributes;
                handler(kind, attrs, PartRead { rdr: &mut *self })?;

                if !self.part_consumed {
                    self.skip_current()?;
                }

                if ctx.is_cancelled() {
                    return self.drain_cancelled();
                }
            }
        }
        Ok(())
    }

    // Decides how to deal with an unconsumed part: skip it verbatim, unless
    // tracing requires decoding, the kind takes part in error fusion, or a
    // cached decoder exists.
    fn skip_current(&mut self) -> HdbResult<()> {
        let kind = self.ph.part_kind;

        if !(self.prot_trace || matches!(kind, PartKind::Error | PartKind::RowsAffected)) {
            return self.skip_part();
        }

        if let Some(mut part) = self.part_cache.remove(&kind) {
            let res = self.read_into(&mut part);
            self.part_cache.insert(kind, part);
            return res;
        }

        match kind.try_default_part() {
            None => self.skip_part(), // cannot be instantiated generically
            Some(mut part) => {
                let res = self.read_into(&mut part);
                self.part_cache.insert(kind, part);
                res
            }
        }
    }

    fn skip_part(&mut self) -> HdbResult<()> {
        self.dec.reset_cnt();
        self.dec.skip(self.buffer_length()?);
        if self.prot_trace {
            debug!(
                "{} PRT: *skipped {:?}",
                self.side.prefix(),
                self.ph.part_kind
            );
        }
        self.read_bytes += self.dec.cnt() as u64;
        let pad = self.skip_padding()?;
        self.read_bytes += pad;
        Ok(())
    }

    fn read_into(&mut self, part: &mut Part) -> HdbResult<()> {
        self.part_consumed = true;
        self.dec.reset_cnt();

        let num_arg = self.ph.num_arg();
        let buffer_length = self.buffer_length()?;
        // decode errors must not abort here: the stream has to be kept
        // aligned first, the error is returned afterwards
        let res = part.decode(self.ph.part_attributes, num_arg, buffer_length, &mut self.dec);
        if res.is_err() {
            self.part_decode_failed = true;
        }

        match part {
            Part::Error(server_errors) => self.last_errors = Some(server_errors.clone()),
            Part::RowsAffected(rows_affected) => {
                self.last_rows_affected = Some(rows_affected.clone());
            }
            _ => {}
        }

        if self.prot_trace {
            debug!("{} PRT: {:?}", self.side.prefix(), part);
        }

        let cnt = self.dec.cnt();
        match cnt.cmp(&buffer_length) {
            std::cmp::Ordering::Less => {
                // The decoder consumed less than the declared buffer length.
                // A future server version may place meaningful trailing
                // fields here; they are skipped, not rejected.
                self.dec.skip(buffer_length - cnt);
            }
            std::cmp::Ordering::Greater => {
                panic!("protocol error: read bytes {cnt} > buffer length {buffer_length}");
            }
            std::cmp::Ordering::Equal => {}
        }

        self.read_bytes += self.dec.cnt() as u64;
        let pad = self.skip_padding()?;
        self.read_bytes += pad;
        res
    }

    fn buffer_length(&self) -> HdbResult<usize> {
        usize::try_from(self.ph.buffer_length).map_err(|_| {
            HdbError::Framing(format!("invalid buffer length {}", self.ph.buffer_length))
        })
    }

    #[allow(clippy::cast_possible_wrap)]
    #[allow(clippy::cast_sign_loss)]
    fn skip_padding(&mut self) -> HdbResult<u64> {
        let last_part_of_message =
            self.cnt_part == self.num_part && self.cur_segm == usize::try_from(self.mh.no_of_segm).unwrap_or(0);

        if !last_part_of_message {
            let pad = pad_bytes(self.buffer_length()?);
            self.dec.skip(pad);
            return Ok(pad as u64);
        }

        // last part of the last segment:
        // its padding is whatever remains of the var-part length
        let pad = i64::from(self.mh.var_part_length) - self.read_bytes as i64;
        match pad {
            p if p < 0 => Err(HdbError::Framing(format!(
                "bytes read {} exceed variable part length {}",
                self.read_bytes, self.mh.var_part_length
            ))),
            0 => Ok(0),
            p => {
                self.dec.skip(p as usize);
                Ok(p as u64)
            }
        }
    }

    fn drain_cancelled(&mut self) -> HdbResult<()> {
        // prefer draining the remainder of the message, so that the
        // connection stays usable
        #[allow(clippy::cast_possible_wrap)]
        let remaining = i64::from(self.mh.var_part_length) - self.read_bytes as i64;
        if remaining > 0 {
            #[allow(clippy::cast_sign_loss)]
            self.dec.skip(remaining as usize);
        }
        if self.dec.has_error() {
            let e = self
                .dec
                .take_error()
                .unwrap_or(HdbError::Cancelled)
                .break_connection();
            self.reset_read_state();
            return Err(e);
        }
        self.reset_read_state();
        Err(HdbError::Cancelled)
    }

    // Error fusion, performed after the last segment; resets all per-message
    // state so the reader can be reused.
    fn check_error(&mut self) -> HdbResult<()> {
        let last_errors = self.last_errors.take();
        let last_rows_affected = self.last_rows_affected.take();
        let part_decode_failed = std::mem::replace(&mut self.part_decode_failed, false);
        let dec_err = self.dec.take_error();
        self.dec.reset_error();

        if let Some(e) = dec_err {
            return Err(e);
        }
        if part_decode_failed {
            return Err(HdbError::Impl(
                "a part decoder failed, and the error was consumed by the part handler",
            ));
        }

        let Some(mut errors) = last_errors else {
            return Ok(());
        };

        if let Some(rows_affected) = last_rows_affected {
            // assign statement indexes to the errors of failed statements
            let mut j = 0;
            for (i, &rows) in rows_affected.rows().iter().enumerate() {
                if rows == RA_EXECUTION_FAILED {
                    errors.set_stmt_no(j, rows_affected.ofs + i);
                    j += 1;
                }
            }
        }

        if errors.only_warnings() {
            for warning in errors.iter() {
                warn!("{warning}");
            }
            return Ok(());
        }

        Err(HdbError::DbError { source: errors })
    }

    fn reset_read_state(&mut self) {
        self.last_errors = None;
        self.last_rows_affected = None;
        self.part_decode_failed = false;
        self.dec.take_error();
        self.dec.reset_error();
    }
}

/// Loan that allows a part handler to decode the current part.
///
/// Consuming it with [`read`](Self::read) decodes the part into a
/// caller-owned [`Part`]; dropping it unconsumed makes the reader skip the
/// part.
pub struct PartRead<'a, R> {
    rdr: &'a mut Reader<R>,
}

impl<R> std::fmt::Debug for PartRead<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PartRead").finish_non_exhaustive()
    }
}

impl<R: std::io::Read> PartRead<'_, R> {
    /// Decodes the current part into `part`.
    ///
    /// The instance must match the announced part kind; for the
    /// metadata-dependent kinds it must have been created with the metadata
    /// attached (e.g. [`ResultSet::for_metadata`](crate::ResultSet::for_metadata)).
    ///
    /// # Panics
    ///
    /// Panics if the decoder consumes more bytes than the part header
    /// declared; that is a bug in the part decoder, not a server fault.
    pub fn read(self, part: &mut Part) -> HdbResult<()> {
        self.rdr.read_into(part)
    }
}
