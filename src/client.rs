//! Communicate with an ESC/VP.net projector

use std::{
    io::{BufRead, BufReader, Read, Write},
    net::{Shutdown, SocketAddr, TcpStream},
};

use crate::{
    commands,
    proto::{self, Header, MessageType, Status},
};

/// A trait representing a valid ESC/VP.net stream to communicate on
pub trait EscVpStream: Read + Write {}
impl<T: Read + Write> EscVpStream for T {}

/// A session on which text commands can be executed
///
/// Only the connection handshake can produce a session, so holding one
/// means the device already accepted the connection. The session owns its
/// stream exclusively and serves one command at a time.
#[derive(Debug)]
pub struct EscVpSession<S: EscVpStream> {
    reader: BufReader<S>,
}

impl EscVpSession<TcpStream> {
    /// Dial a projector over TCP and run the connection handshake
    pub fn connect_tcp(addr: SocketAddr) -> Result<Self, crate::Error> {
        let connection = TcpStream::connect(addr)?;
        Self::connect(connection)
    }

    /// Close this session, shutting the underlying socket down
    pub fn close(self) -> Result<(), crate::Error> {
        self.reader.into_inner().shutdown(Shutdown::Both)?;
        Ok(())
    }
}

impl<S: EscVpStream> EscVpSession<S> {
    /// Run the connection handshake over an already opened stream
    ///
    /// Sends a connection request and waits for the device's response
    /// header. Any status other than [Status::Ok] refuses the connection
    /// and the stream is dropped.
    pub fn connect(mut stream: S) -> Result<Self, crate::Error> {
        stream.write_all(&Header::request(MessageType::Connect, 0).to_bytes())?;

        let mut response = [0_u8; proto::HEADER_SIZE];
        stream.read_exact(&mut response)?;

        let header = Header::from_bytes(&response)?;

        if header.status != Status::Ok {
            return Err(crate::Error::ConnectionStatus(header.status));
        }

        tracing::debug!(version = header.version, "connection established");

        Ok(Self {
            reader: BufReader::new(stream),
        })
    }

    /// Execute a text command and return the device's answer
    ///
    /// The answer is returned as the device sent it, with the `:` line
    /// prefix and surrounding whitespace removed; no further parsing is
    /// applied. A command the device refuses fails with
    /// [crate::Error::CommandFailed], the session stays usable afterwards.
    pub fn execute(&mut self, command: &str) -> Result<String, crate::Error> {
        let mut request = Vec::with_capacity(command.len() + 1);
        request.extend_from_slice(command.as_bytes());
        request.push(b'\r');
        self.reader.get_mut().write_all(&request)?;

        let mut line = Vec::new();
        self.reader.read_until(b'\r', &mut line)?;

        if line.last() != Some(&b'\r') {
            return Err(crate::Error::UnexpectedEndOfStream);
        }

        let answer = String::from_utf8_lossy(&line);
        let answer = answer.trim().trim_start_matches(':');

        if answer == "ERR" {
            return Err(crate::Error::CommandFailed);
        }

        tracing::debug!(command, answer, "command executed");

        Ok(answer.to_string())
    }

    /// Release the underlying stream without shutting it down
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}

/// A high level controller for the common projector commands
///
/// Query results are the device's raw answer tokens (for example
/// `PWR=01`), left unparsed.
pub trait ProjectorControl {
    /// Turn the projector on
    fn power_on(&mut self) -> Result<(), crate::Error>;

    /// Put the projector into standby
    fn power_off(&mut self) -> Result<(), crate::Error>;

    /// Query the current power state
    fn power_status(&mut self) -> Result<String, crate::Error>;

    /// Query the lamp hours counter
    fn lamp_hours(&mut self) -> Result<String, crate::Error>;

    /// Query the active input source
    fn source(&mut self) -> Result<String, crate::Error>;

    /// Switch the active input source
    fn set_source(&mut self, source: &str) -> Result<(), crate::Error>;
}

impl<S: EscVpStream> ProjectorControl for EscVpSession<S> {
    fn power_on(&mut self) -> Result<(), crate::Error> {
        self.execute(commands::POWER_ON)?;
        Ok(())
    }

    fn power_off(&mut self) -> Result<(), crate::Error> {
        self.execute(commands::POWER_OFF)?;
        Ok(())
    }

    fn power_status(&mut self) -> Result<String, crate::Error> {
        self.execute(commands::POWER_QUERY)
    }

    fn lamp_hours(&mut self) -> Result<String, crate::Error> {
        self.execute(commands::LAMP_QUERY)
    }

    fn source(&mut self) -> Result<String, crate::Error> {
        self.execute(commands::SOURCE_QUERY)
    }

    fn set_source(&mut self, source: &str) -> Result<(), crate::Error> {
        self.execute(&format!("{} {}", commands::SOURCE, source))?;
        Ok(())
    }
}
