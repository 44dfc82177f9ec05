use crate::cancellation::CancellationToken;
use crate::protocol::encoding::{Cesu8Transcoder, Encoder, Transcoder};
use crate::protocol::headers::{
    MessageHeader, PartHeader, SegmentHeader, SegmentKind, PART_HEADER_SIZE, SEGMENT_HEADER_SIZE,
};
use crate::protocol::init::InitRequest;
use crate::protocol::parts::ClientInfo;
use crate::protocol::{pad_bytes, MessageType, Part, PartAttributes};
use crate::{HdbError, HdbResult};
use std::collections::HashMap;

/// Protocol writer: assembles one request message from typed [`Part`]s.
///
/// Requests always consist of exactly one segment. Sizes and header offsets
/// are computed up front, so the message is emitted in one forward pass.
///
/// The writer is not concurrency-safe with itself; the enclosing driver must
/// serialize calls per connection.
pub struct Writer<W> {
    prot_trace: bool,

    enc: Encoder<W>,

    // session variables, transmitted as client-info part on the first
    // message whose type supports them
    sv: Option<HashMap<String, String>>,
    sv_sent: bool,

    command_options: u8,
    packet_count: i32,

    // reusable header scratch
    mh: MessageHeader,
    sh: SegmentHeader,
    ph: PartHeader,
}

impl<W> std::fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Writer")
            .field("sv_sent", &self.sv_sent)
            .field("packet_count", &self.packet_count)
            .finish_non_exhaustive()
    }
}

impl<W: std::io::Write> Writer<W> {
    /// `wr` should be buffered (e.g. a `BufWriter` around the socket).
    pub fn new(wr: W, prot_trace: bool) -> Self {
        Self {
            prot_trace,
            enc: Encoder::new(wr, Box::new(Cesu8Transcoder)),
            sv: None,
            sv_sent: false,
            command_options: 0,
            packet_count: -1,
            mh: MessageHeader::default(),
            sh: SegmentHeader::default(),
            ph: PartHeader::default(),
        }
    }

    /// Configures session variables; they are sent once, piggybacked as a
    /// client-info part on the first message that supports client info.
    #[must_use]
    pub fn with_session_variables(mut self, sv: HashMap<String, String>) -> Self {
        self.sv = Some(sv);
        self
    }

    /// Replaces the text transcoder (CESU-8 by default).
    #[must_use]
    pub fn with_transcoder(mut self, transcoder: Box<dyn Transcoder>) -> Self {
        self.enc.set_transcoder(transcoder);
        self
    }

    /// Sets the command options bits used for subsequent messages
    /// (e.g. [`HOLD_CURSORS_OVER_COMMIT`](crate::protocol::HOLD_CURSORS_OVER_COMMIT)).
    pub fn set_command_options(&mut self, command_options: u8) {
        self.command_options = command_options;
    }

    /// Gives up the writer and returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.enc.into_inner()
    }

    /// Writes the 14-byte handshake request that precedes all messages.
    pub fn write_prolog(&mut self, ctx: &CancellationToken) -> HdbResult<()> {
        if ctx.is_cancelled() {
            return Err(HdbError::Cancelled);
        }
        let request = InitRequest::new_client();
        request.encode(&mut self.enc)?;
        if self.prot_trace {
            debug!("→ INI: {request}");
        }
        self.enc.flush()
    }

    /// Assembles and sends one request message.
    ///
    /// Any underlying failure is wrapped into
    /// [`HdbError::ConnectionBroken`], so that the enclosing pool discards
    /// the connection.
    pub fn write(
        &mut self,
        ctx: &CancellationToken,
        session_id: i64,
        message_type: MessageType,
        commit: bool,
        parts: &[Part],
    ) -> HdbResult<()> {
        self.write_inner(ctx, session_id, message_type, commit, parts)
            .map_err(|e| match e {
                // nothing was sent yet, the connection is still healthy
                HdbError::Cancelled => HdbError::Cancelled,
                e => e.break_connection(),
            })
    }

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    fn write_inner(
        &mut self,
        ctx: &CancellationToken,
        session_id: i64,
        message_type: MessageType,
        commit: bool,
        parts: &[Part],
    ) -> HdbResult<()> {
        if ctx.is_cancelled() {
            return Err(HdbError::Cancelled);
        }

        // piggyback session variables on the first supporting message
        let o_client_info: Option<Part> = match self.sv {
            Some(ref sv) if !self.sv_sent && message_type.client_info_supported() => {
                self.sv_sent = true;
                Some(Part::ClientInfo(ClientInfo::from(sv)))
            }
            _ => None,
        };
        let all_parts: Vec<&Part> = o_client_info.iter().chain(parts.iter()).collect();

        let num_parts = all_parts.len();
        let mut part_sizes = Vec::with_capacity(num_parts);
        // u64, so that oversized messages are detected instead of wrapped
        let mut size = u64::from(SEGMENT_HEADER_SIZE) + num_parts as u64 * u64::from(PART_HEADER_SIZE);
        for part in &all_parts {
            let s = part.body_size()?;
            part_sizes.push(s);
            size += (s + pad_bytes(s)) as u64;
        }

        if size > u64::from(u32::MAX) {
            return Err(HdbError::ImplDetailed(format!(
                "message size {size} exceeds maximum message header value {}",
                u32::MAX
            )));
        }
        if size > i32::MAX as u64 {
            return Err(HdbError::ImplDetailed(format!(
                "message size {size} exceeds maximum segment header value {}",
                i32::MAX
            )));
        }

        self.packet_count += 1;

        debug!(
            "Writer::write() of type {message_type:?} for session_id = {session_id}, \
             packet_count = {}, size = {size}",
            self.packet_count
        );

        // MESSAGE HEADER
        self.mh.session_id = session_id;
        self.mh.packet_count = self.packet_count;
        self.mh.var_part_length = size as u32;
        self.mh.var_part_size = size as u32;
        self.mh.no_of_segm = 1;
        self.mh.encode(&mut self.enc)?;
        if self.prot_trace {
            debug!("→ MSH: {}", self.mh);
        }

        // SEGMENT HEADER
        self.sh.segment_length = size as i32;
        self.sh.segment_ofs = 0;
        self.sh.no_of_parts = num_parts as i16;
        self.sh.segment_no = 1;
        self.sh.segment_kind = SegmentKind::Request;
        self.sh.message_type = message_type;
        self.sh.commit = commit;
        self.sh.command_options = self.command_options;
        self.sh.encode(&mut self.enc)?;
        if self.prot_trace {
            debug!("→ SGH: {}", self.sh);
        }

        // PARTS, each padded to an 8-byte boundary; the buffer-size hint in
        // each part header is the capacity that remains at that point
        let mut buffer_size = size - u64::from(SEGMENT_HEADER_SIZE);
        for (part, part_size) in all_parts.iter().zip(part_sizes) {
            let pad = pad_bytes(part_size);

            self.ph.part_kind = part.kind();
            self.ph.part_attributes = PartAttributes::default();
            self.ph.set_num_arg(part.count()?)?;
            self.ph.buffer_length = part_size as i32;
            self.ph.buffer_size = buffer_size as i32;
            self.ph.encode(&mut self.enc)?;
            if self.prot_trace {
                debug!("→ PRH: {}", self.ph);
            }

            self.enc.reset_cnt();
            part.emit(&mut self.enc)?;
            debug_assert_eq!(
                self.enc.cnt(),
                part_size,
                "emitted bytes of {:?} differ from its size()",
                part.kind()
            );
            self.enc.zeroes(pad);
            if self.prot_trace {
                debug!("→ PRT: {part:?}");
            }

            buffer_size -= u64::from(PART_HEADER_SIZE) + (part_size + pad) as u64;
        }

        self.enc.flush()?;
        trace!("message is written and flushed");
        Ok(())
    }
}
