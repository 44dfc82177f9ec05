//! The three fixed-layout headers of the message → segment → part framing.
//!
//! Header instances are reusable scratch owned by `Reader` and `Writer`;
//! decode overwrites every field, so no reset is needed between messages.

use crate::protocol::encoding::{Decoder, Encoder};
use crate::protocol::{FunctionCode, MessageType, PartAttributes, PartKind};
use crate::{HdbError, HdbResult};

pub(crate) const MESSAGE_HEADER_SIZE: u32 = 32;
pub(crate) const SEGMENT_HEADER_SIZE: u32 = 24;
pub(crate) const PART_HEADER_SIZE: u32 = 16;

// MESSAGE HEADER: 32 bytes
#[derive(Debug, Default)]
pub(crate) struct MessageHeader {
    pub session_id: i64,
    pub packet_count: i32,
    pub var_part_length: u32,
    pub var_part_size: u32,
    pub no_of_segm: i16,
}

impl MessageHeader {
    pub fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        self.session_id = dec.i64(); // I8
        self.packet_count = dec.i32(); // I4
        self.var_part_length = dec.u32(); // UI4
        self.var_part_size = dec.u32(); // UI4
        self.no_of_segm = dec.i16(); // I2
        dec.skip(10); // I1 + B[9] filler
        dec.check()
    }

    pub fn encode<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.i64(self.session_id); // I8
        enc.i32(self.packet_count); // I4
        enc.u32(self.var_part_length); // UI4
        enc.u32(self.var_part_size); // UI4
        enc.i16(self.no_of_segm); // I2
        enc.zeroes(10); // I1 + B[9] filler
        enc.check()
    }
}

impl std::fmt::Display for MessageHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "session_id = {}, packet_count = {}, var_part_length = {}, \
             var_part_size = {}, no_of_segm = {}",
            self.session_id,
            self.packet_count,
            self.var_part_length,
            self.var_part_size,
            self.no_of_segm
        )
    }
}

/// Specifies the layout of the kind-dependent tail of the segment header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentKind {
    Request,
    Reply,
    Error,
}

impl SegmentKind {
    fn from_i8(val: i8) -> HdbResult<Self> {
        match val {
            1 => Ok(Self::Request),
            2 => Ok(Self::Reply),
            5 => Ok(Self::Error),
            _ => Err(HdbError::Framing(format!("invalid segment kind {val}"))),
        }
    }

    fn to_i8(self) -> i8 {
        match self {
            Self::Request => 1,
            Self::Reply => 2,
            Self::Error => 5,
        }
    }
}

// SEGMENT HEADER: 24 bytes
#[derive(Debug)]
pub(crate) struct SegmentHeader {
    pub segment_length: i32,
    pub segment_ofs: i32,
    pub no_of_parts: i16,
    pub segment_no: i16,
    pub segment_kind: SegmentKind,
    // request segments only
    pub message_type: MessageType,
    pub commit: bool,
    pub command_options: u8,
    // reply segments only
    pub function_code: FunctionCode,
}

impl Default for SegmentHeader {
    fn default() -> Self {
        Self {
            segment_length: 0,
            segment_ofs: 0,
            no_of_parts: 0,
            segment_no: 0,
            segment_kind: SegmentKind::Request,
            message_type: MessageType::ExecuteDirect,
            commit: false,
            command_options: 0,
            function_code: FunctionCode::Nil,
        }
    }
}

impl SegmentHeader {
    pub fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        self.segment_length = dec.i32(); // I4
        self.segment_ofs = dec.i32(); // I4
        self.no_of_parts = dec.i16(); // I2
        self.segment_no = dec.i16(); // I2
        let kind = dec.i8(); // I1
        dec.check()?;
        self.segment_kind = SegmentKind::from_i8(kind)?;
        match self.segment_kind {
            SegmentKind::Request => {
                self.message_type = MessageType::from_i8(dec.i8()); // I1
                self.commit = dec.i8() != 0; // I1
                self.command_options = dec.u8(); // I1
                dec.skip(8); // B[8] reserved
            }
            SegmentKind::Reply | SegmentKind::Error => {
                dec.skip(1); // I1 reserved
                self.function_code = FunctionCode::from_i16(dec.i16()); // I2
                dec.skip(8); // B[8] reserved
            }
        }
        dec.check()
    }

    // only request segments are ever encoded by a client
    pub fn encode<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.i32(self.segment_length); // I4
        enc.i32(self.segment_ofs); // I4
        enc.i16(self.no_of_parts); // I2
        enc.i16(self.segment_no); // I2
        enc.i8(self.segment_kind.to_i8()); // I1
        enc.i8(self.message_type.to_i8()); // I1
        enc.i8(i8::from(self.commit)); // I1
        enc.u8(self.command_options); // I1
        enc.zeroes(8); // B[8] reserved
        enc.check()
    }
}

impl std::fmt::Display for SegmentHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "segment_length = {}, no_of_parts = {}, segment_no = {}, kind = {:?}",
            self.segment_length, self.no_of_parts, self.segment_no, self.segment_kind,
        )?;
        match self.segment_kind {
            SegmentKind::Request => write!(
                f,
                ", message_type = {:?}, commit = {}",
                self.message_type, self.commit
            ),
            SegmentKind::Reply | SegmentKind::Error => {
                write!(f, ", function_code = {:?}", self.function_code)
            }
        }
    }
}

// PART HEADER: 16 bytes
#[derive(Debug)]
pub(crate) struct PartHeader {
    pub part_kind: PartKind,
    pub part_attributes: PartAttributes,
    pub argument_count: i16,
    pub big_argument_count: i32,
    pub buffer_length: i32,
    pub buffer_size: i32,
}

impl Default for PartHeader {
    fn default() -> Self {
        Self {
            part_kind: PartKind::Command,
            part_attributes: PartAttributes::default(),
            argument_count: 0,
            big_argument_count: 0,
            buffer_length: 0,
            buffer_size: 0,
        }
    }
}

impl PartHeader {
    pub fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        self.part_kind = PartKind::from_i8(dec.i8()); // I1
        self.part_attributes = PartAttributes::new(dec.u8()); // U1 (documented as I1)
        self.argument_count = dec.i16(); // I2
        self.big_argument_count = dec.i32(); // I4
        self.buffer_length = dec.i32(); // I4
        self.buffer_size = dec.i32(); // I4
        dec.check()
    }

    pub fn encode<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.i8(self.part_kind.to_i8()); // I1
        enc.u8(self.part_attributes.bits()); // U1
        enc.i16(self.argument_count); // I2
        enc.i32(self.big_argument_count); // I4
        enc.i32(self.buffer_length); // I4
        enc.i32(self.buffer_size); // I4
        enc.check()
    }

    /// The count of inner elements, read from the 16-bit slot, or from the
    /// 32-bit overflow slot if the 16-bit slot carries the big-form marker.
    #[allow(clippy::cast_sign_loss)]
    pub fn num_arg(&self) -> usize {
        if self.argument_count == -1 {
            self.big_argument_count as usize
        } else {
            self.argument_count as usize
        }
    }

    /// Stores the count of inner elements, choosing the 16-bit or the 32-bit
    /// field by magnitude.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    pub fn set_num_arg(&mut self, num_arg: usize) -> HdbResult<()> {
        match num_arg {
            n if n < i16::MAX as usize => {
                self.argument_count = n as i16;
                self.big_argument_count = 0;
            }
            n if i32::try_from(n).is_ok() => {
                self.argument_count = -1;
                self.big_argument_count = n as i32;
            }
            _ => {
                return Err(HdbError::Impl("part count bigger than i32::MAX"));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for PartHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "part_kind = {:?}, attributes = {:?}, num_arg = {}, buffer_length = {}, \
             buffer_size = {}",
            self.part_kind,
            self.part_attributes,
            self.num_arg(),
            self.buffer_length,
            self.buffer_size
        )
    }
}

#[cfg(test)]
mod test {
    use super::PartHeader;

    #[test]
    fn test_num_arg_forms() {
        let mut ph = PartHeader::default();

        ph.set_num_arg(3).unwrap();
        assert_eq!((ph.argument_count, ph.big_argument_count), (3, 0));
        assert_eq!(ph.num_arg(), 3);

        ph.set_num_arg(70_000).unwrap();
        assert_eq!((ph.argument_count, ph.big_argument_count), (-1, 70_000));
        assert_eq!(ph.num_arg(), 70_000);

        assert!(ph.set_num_arg(usize::try_from(i64::MAX).unwrap()).is_err());
    }
}
