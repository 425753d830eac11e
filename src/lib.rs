#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use std::io;

use proto::Status;
use thiserror::Error;

pub mod client;
pub mod commands;
pub mod proto;

pub use client::EscVpSession;
pub use client::ProjectorControl;
pub use commands::DEFAULT_PORT;

/// General error that can occur during communication with an ESC/VP.net device
#[derive(Debug, Error)]
pub enum Error {
    /// IO Error
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse the handshake response header
    #[error("Invalid header: {0}")]
    InvalidHeader(#[from] proto::Error),
    /// Stream ended or was closed before a response ended
    #[error("Stream ended before response terminator")]
    UnexpectedEndOfStream,
    /// Device refused the connection request
    #[error("invalid connection status: {}", .0.code())]
    ConnectionStatus(Status),
    /// Device answered a command with ERR
    #[error("error executing command")]
    CommandFailed,
}
