//! Structures and methods to build and parse protocol headers and packets

use thiserror::Error;

/// Protocol magic carried at the start of every header
pub const IDENTIFIER: &[u8; 10] = b"ESC/VP.net";

/// Protocol version this client speaks, sent in every request header
pub const PROTOCOL_VERSION: u8 = 16;

/// Encoded size of a [Header]
pub const HEADER_SIZE: usize = 16;

/// Encoded size of a [Packet]
pub const PACKET_SIZE: usize = 18;

/// Type of message a [Header] announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// No-op message
    Null,
    /// Greeting opening a password exchange
    Hello,
    /// Password submission
    Password,
    /// Connection request
    Connect,
    /// Type byte this client does not know about
    Unknown(u8),
}

impl MessageType {
    /// Wire value of this message type
    pub fn code(self) -> u8 {
        match self {
            MessageType::Null => 0,
            MessageType::Hello => 1,
            MessageType::Password => 2,
            MessageType::Connect => 3,
            MessageType::Unknown(code) => code,
        }
    }

    /// Map a wire value back to a message type
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => MessageType::Null,
            1 => MessageType::Hello,
            2 => MessageType::Password,
            3 => MessageType::Connect,
            code => MessageType::Unknown(code),
        }
    }
}

/// What a [Packet] carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketId {
    /// Empty packet
    Null,
    /// Current password
    Password,
    /// Replacement password
    NewPassword,
    /// Name the device advertises itself under
    ProjectorName,
    /// Image data
    Im,
    /// Command payload
    Command,
    /// Identifier byte this client does not know about
    Unknown(u8),
}

impl PacketId {
    /// Wire value of this packet identifier
    pub fn code(self) -> u8 {
        match self {
            PacketId::Null => 0,
            PacketId::Password => 1,
            PacketId::NewPassword => 2,
            PacketId::ProjectorName => 3,
            PacketId::Im => 4,
            PacketId::Command => 5,
            PacketId::Unknown(code) => code,
        }
    }

    /// Map a wire value back to a packet identifier
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => PacketId::Null,
            1 => PacketId::Password,
            2 => PacketId::NewPassword,
            3 => PacketId::ProjectorName,
            4 => PacketId::Im,
            5 => PacketId::Command,
            code => PacketId::Unknown(code),
        }
    }
}

/// Status a device answers a connection request with
///
/// Requests carry the wire value 0 in the status field, which maps to
/// [Status::Unknown]. An unrecognized value is not a parse error, only the
/// handshake decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Connection accepted
    Ok,
    /// Request was malformed
    BadRequest,
    /// Password required or wrong
    Unauthorized,
    /// Access denied
    Forbidden,
    /// Operation not allowed
    NotAllowed,
    /// Device is busy or otherwise unavailable
    Unavailable,
    /// Protocol version not supported by the device
    InvalidVersion,
    /// Status byte this client does not know about
    Unknown(u8),
}

impl Status {
    /// Wire value of this status
    pub fn code(self) -> u8 {
        match self {
            Status::Ok => 32,
            Status::BadRequest => 64,
            Status::Unauthorized => 65,
            Status::Forbidden => 67,
            Status::NotAllowed => 69,
            Status::Unavailable => 83,
            Status::InvalidVersion => 85,
            Status::Unknown(code) => code,
        }
    }

    /// Map a wire value back to a status
    pub fn from_code(code: u8) -> Self {
        match code {
            32 => Status::Ok,
            64 => Status::BadRequest,
            65 => Status::Unauthorized,
            67 => Status::Forbidden,
            69 => Status::NotAllowed,
            83 => Status::Unavailable,
            85 => Status::InvalidVersion,
            code => Status::Unknown(code),
        }
    }
}

/// Fixed 16 byte header framing the connection handshake
///
/// The 10 byte protocol magic and the 2 reserved bytes are not stored: the
/// magic is constant and checked on parse, the reserved bytes are opaque.
#[derive(Debug, PartialEq)]
pub struct Header {
    /// Protocol version (always [PROTOCOL_VERSION] on requests)
    pub version: u8,
    /// Message type this header announces
    pub message_type: MessageType,
    /// Response status (wire value 0 on requests)
    pub status: Status,
    /// Number of [Packet] records following this header
    pub packet_count: u8,
}

impl Header {
    /// Create a request header with the fixed protocol version and an empty status
    pub fn request(message_type: MessageType, packet_count: u8) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            message_type,
            status: Status::Unknown(0),
            packet_count,
        }
    }

    /// Convert this header into bytes ready to be sent
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0_u8; HEADER_SIZE];
        bytes[..10].copy_from_slice(IDENTIFIER);
        bytes[10] = self.version;
        bytes[11] = self.message_type.code();
        // bytes 12 and 13 are reserved and stay zero
        bytes[14] = self.status.code();
        bytes[15] = self.packet_count;
        bytes
    }

    /// Parse a header from exactly [HEADER_SIZE] bytes
    pub fn from_bytes(input: &[u8]) -> Result<Self, Error> {
        if input.len() != HEADER_SIZE {
            return Err(Error::InvalidLength {
                expected: HEADER_SIZE,
                got: input.len(),
            });
        }

        if &input[..10] != IDENTIFIER {
            let mut identifier = [0_u8; 10];
            identifier.copy_from_slice(&input[..10]);
            return Err(Error::InvalidIdentifier(identifier));
        }

        Ok(Self {
            version: input[10],
            message_type: MessageType::from_code(input[11]),
            status: Status::from_code(input[14]),
            packet_count: input[15],
        })
    }
}

/// A fixed 18 byte payload unit following a request header
#[derive(Debug, PartialEq)]
pub struct Packet {
    /// What this packet carries
    pub identifier: PacketId,
    /// Attribute byte, protocol-defined per identifier and passed through untouched
    pub attribute: u8,
    /// Fixed width text payload, NUL padded
    pub text: [u8; 16],
}

impl Packet {
    /// Create a new packet from a text payload
    ///
    /// At most the first 16 bytes of `text` are kept, anything longer is
    /// dropped. Shorter payloads leave the remaining bytes zero.
    pub fn new(identifier: PacketId, attribute: u8, text: &str) -> Self {
        let mut field = [0_u8; 16];
        let len = text.len().min(16);
        field[..len].copy_from_slice(&text.as_bytes()[..len]);
        Self {
            identifier,
            attribute,
            text: field,
        }
    }

    /// Convert this packet into bytes ready to be sent
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut bytes = [0_u8; PACKET_SIZE];
        bytes[0] = self.identifier.code();
        bytes[1] = self.attribute;
        bytes[2..].copy_from_slice(&self.text);
        bytes
    }

    /// Parse a packet from exactly [PACKET_SIZE] bytes
    ///
    /// The text field is returned verbatim, trailing NUL bytes included.
    pub fn from_bytes(input: &[u8]) -> Result<Self, Error> {
        if input.len() != PACKET_SIZE {
            return Err(Error::InvalidLength {
                expected: PACKET_SIZE,
                got: input.len(),
            });
        }

        let mut text = [0_u8; 16];
        text.copy_from_slice(&input[2..]);

        Ok(Self {
            identifier: PacketId::from_code(input[0]),
            attribute: input[1],
            text,
        })
    }
}

/// Error that can occur during header or packet parsing
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not the exact encoded size of the value being parsed
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Exact size the parser needs
        expected: usize,
        /// Size it was given
        got: usize,
    },
    /// Header does not start with the protocol magic
    #[error("invalid identifier: {:?}", String::from_utf8_lossy(.0))]
    InvalidIdentifier([u8; 10]),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_encode_connect_header() {
        let bytes = Header::request(MessageType::Connect, 0).to_bytes();

        assert_eq!(&bytes[..10], b"ESC/VP.net");
        assert_eq!(bytes[10], PROTOCOL_VERSION);
        assert_eq!(bytes[11], 3);
        assert_eq!(&bytes[12..], &[0, 0, 0, 0]);
    }

    #[test]
    fn should_round_trip_headers() {
        for (message_type, count) in [
            (MessageType::Null, 0),
            (MessageType::Hello, 1),
            (MessageType::Password, 2),
            (MessageType::Connect, 5),
        ] {
            let header = Header::request(message_type, count);
            let decoded = Header::from_bytes(&header.to_bytes()).unwrap();

            assert_eq!(decoded.version, PROTOCOL_VERSION);
            assert_eq!(decoded.message_type, message_type);
            assert_eq!(decoded.status, Status::Unknown(0));
            assert_eq!(decoded.packet_count, count);
        }
    }

    #[test]
    fn should_decode_response_status() {
        let mut bytes = Header::request(MessageType::Connect, 0).to_bytes();

        bytes[14] = 32;
        assert_eq!(Header::from_bytes(&bytes).unwrap().status, Status::Ok);

        bytes[14] = 64;
        assert_eq!(
            Header::from_bytes(&bytes).unwrap().status,
            Status::BadRequest
        );

        bytes[14] = 7;
        assert_eq!(
            Header::from_bytes(&bytes).unwrap().status,
            Status::Unknown(7)
        );
    }

    #[test]
    fn should_reject_wrong_header_length() {
        assert!(matches!(
            Header::from_bytes(&[0; 15]),
            Err(Error::InvalidLength {
                expected: 16,
                got: 15
            })
        ));
        assert!(matches!(
            Header::from_bytes(&[0; 17]),
            Err(Error::InvalidLength {
                expected: 16,
                got: 17
            })
        ));
    }

    #[test]
    fn should_reject_corrupted_identifier() {
        let reference = Header::request(MessageType::Connect, 0).to_bytes();

        for position in 0..10 {
            let mut bytes = reference;
            bytes[position] ^= 0xFF;

            assert!(matches!(
                Header::from_bytes(&bytes),
                Err(Error::InvalidIdentifier(_))
            ));
        }
    }

    #[test]
    fn should_round_trip_packets() {
        let packet = Packet::new(PacketId::Command, 1, "KEY 3B");
        let decoded = Packet::from_bytes(&packet.to_bytes()).unwrap();

        assert_eq!(decoded.identifier, PacketId::Command);
        assert_eq!(decoded.attribute, 1);
        assert_eq!(&decoded.text[..6], b"KEY 3B");
        assert!(decoded.text[6..].iter().all(|it| *it == 0));
    }

    #[test]
    fn should_truncate_long_packet_text() {
        let packet = Packet::new(PacketId::ProjectorName, 0, "conference room projector");

        assert_eq!(&packet.text, b"conference room ");
        assert_eq!(packet.to_bytes().len(), PACKET_SIZE);
    }

    #[test]
    fn should_reject_wrong_packet_length() {
        assert!(matches!(
            Packet::from_bytes(&[0; 17]),
            Err(Error::InvalidLength {
                expected: 18,
                got: 17
            })
        ));
        assert!(matches!(
            Packet::from_bytes(&[0; 19]),
            Err(Error::InvalidLength {
                expected: 18,
                got: 19
            })
        ));
    }
}
