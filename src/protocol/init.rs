//! The initial handshake that precedes all message traffic on a connection.
//!
//! The client opens with a fixed 14-byte request carrying product and
//! protocol versions plus the byte-order option; the server answers with an
//! 8-byte reply. Unlike everything that follows, the version fields of these
//! records are big-endian - they are exchanged before the endianness option
//! takes effect.

use crate::protocol::encoding::{Decoder, Encoder};
use crate::HdbResult;

pub(crate) const PRODUCT_VERSION_MAJOR: i8 = 4;
pub(crate) const PRODUCT_VERSION_MINOR: i16 = 20;
pub(crate) const PROTOCOL_VERSION_MAJOR: i8 = 4;
pub(crate) const PROTOCOL_VERSION_MINOR: i16 = 1;

const FILLER: i32 = -1;
const OPTION_ID_SWAPKIND: u8 = 1;
const LITTLE_ENDIAN: u8 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Version {
    pub major: i8,
    pub minor: i16,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

fn be_i16<R: std::io::Read>(dec: &mut Decoder<R>) -> i16 {
    let b = dec.bytes(2);
    if b.len() == 2 {
        i16::from_be_bytes([b[0], b[1]])
    } else {
        0
    }
}

// 14-byte client → server opening record.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct InitRequest {
    pub product: Version,
    pub protocol: Version,
    pub num_options: u8,
    pub endianness: u8,
}

impl InitRequest {
    pub fn new_client() -> Self {
        Self {
            product: Version {
                major: PRODUCT_VERSION_MAJOR,
                minor: PRODUCT_VERSION_MINOR,
            },
            protocol: Version {
                major: PROTOCOL_VERSION_MAJOR,
                minor: PROTOCOL_VERSION_MINOR,
            },
            num_options: 1,
            endianness: LITTLE_ENDIAN,
        }
    }

    pub fn encode<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.bytes(&FILLER.to_be_bytes()); // I4
        enc.i8(self.product.major); // I1
        enc.bytes(&self.product.minor.to_be_bytes()); // I2
        enc.i8(self.protocol.major); // I1
        enc.bytes(&self.protocol.minor.to_be_bytes()); // I2
        enc.u8(0); // I1 reserved
        enc.u8(self.num_options); // I1
        enc.u8(OPTION_ID_SWAPKIND); // I1
        enc.u8(self.endianness); // I1
        enc.check()
    }

    pub fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        dec.skip(4); // I4 filler
        self.product.major = dec.i8();
        self.product.minor = be_i16(dec);
        self.protocol.major = dec.i8();
        self.protocol.minor = be_i16(dec);
        dec.skip(1); // reserved
        self.num_options = dec.u8();
        dec.skip(1); // option id
        self.endianness = dec.u8();
        dec.check()
    }
}

impl std::fmt::Display for InitRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "product = {}, protocol = {}, endianness = {}",
            self.product,
            self.protocol,
            if self.endianness == LITTLE_ENDIAN {
                "little-endian"
            } else {
                "big-endian"
            }
        )
    }
}

// 8-byte server → client answer.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct InitReply {
    pub product: Version,
    pub protocol: Version,
}

impl InitReply {
    pub fn encode<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.i8(self.product.major); // I1
        enc.bytes(&self.product.minor.to_be_bytes()); // I2
        enc.i8(self.protocol.major); // I1
        enc.bytes(&self.protocol.minor.to_be_bytes()); // I2
        enc.zeroes(2); // B2 reserved
        enc.check()
    }

    pub fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        self.product.major = dec.i8();
        self.product.minor = be_i16(dec);
        self.protocol.major = dec.i8();
        self.protocol.minor = be_i16(dec);
        dec.skip(2); // B2 reserved
        dec.check()
    }
}

impl std::fmt::Display for InitReply {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "product = {}, protocol = {}",
            self.product, self.protocol
        )
    }
}

#[cfg(test)]
mod test {
    use super::{InitReply, InitRequest};
    use crate::protocol::encoding::{Cesu8Transcoder, Decoder, Encoder};

    #[test]
    fn test_init_request_is_14_bytes_and_roundtrips() {
        let req = InitRequest::new_client();
        let mut enc = Encoder::new(Vec::new(), Box::new(Cesu8Transcoder));
        req.encode(&mut enc).unwrap();
        assert_eq!(enc.cnt(), 14);

        let mut dec = Decoder::new(
            std::io::Cursor::new(enc.into_inner()),
            Box::new(Cesu8Transcoder),
        );
        let mut parsed = InitRequest::default();
        parsed.decode(&mut dec).unwrap();
        assert_eq!(parsed, req);
    }

    #[test]
    fn test_init_reply_is_8_bytes_and_roundtrips() {
        let rep = InitReply {
            product: super::Version {
                major: 4,
                minor: 20,
            },
            protocol: super::Version { major: 4, minor: 1 },
        };
        let mut enc = Encoder::new(Vec::new(), Box::new(Cesu8Transcoder));
        rep.encode(&mut enc).unwrap();
        assert_eq!(enc.cnt(), 8);

        let mut dec = Decoder::new(
            std::io::Cursor::new(enc.into_inner()),
            Box::new(Cesu8Transcoder),
        );
        let mut parsed = InitReply::default();
        parsed.decode(&mut dec).unwrap();
        assert_eq!(parsed, rep);
    }
}
