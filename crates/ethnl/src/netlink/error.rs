//! Error types for netlink operations.

use std::io;

/// Result type for netlink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during netlink operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The transport could not be opened or bound.
    #[error("transport unavailable: {source}")]
    TransportUnavailable {
        /// Underlying open/bind failure.
        source: io::Error,
    },

    /// Sending a request failed. Requests are never retried.
    #[error("send failed: {source}")]
    SendFailure {
        /// Underlying send failure.
        source: io::Error,
    },

    /// Kernel returned an error code.
    #[error("kernel error: {message} (errno {errno})")]
    Kernel {
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },

    /// A fixed-size header did not fit in the available bytes.
    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected length.
        expected: usize,
        /// Actual bytes available.
        actual: usize,
    },

    /// A frame or attribute record failed bounds validation.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The control exchange completed without a usable family id.
    #[error("generic netlink family unavailable: {name}")]
    FamilyUnresolved {
        /// The family name that was requested.
        name: String,
    },

    /// A requested attribute was not present in the reply.
    #[error("attribute {id} absent")]
    AttributeAbsent {
        /// Attribute id.
        id: u16,
    },

    /// An attribute payload is too large for the 16-bit record length.
    #[error("attribute {id}: {len} byte payload does not fit in a record")]
    AttributeOverflow {
        /// Attribute id.
        id: u16,
        /// Payload length.
        len: usize,
    },

        /// An attribute payload did not have the expected shape.
    #[error("attribute {id}: expected {expected}, got {len} bytes")]
    AttributeTypeMismatch {
        /// Attribute id.
        id: u16,
        /// Expected payload type.
        expected: &'static str,
        /// Actual payload length.
        len: usize,
    },
}

impl Error {
    /// Create a kernel error from an errno value.
    ///
    /// `errno` is the value carried on the wire, negative for a failure. A
    /// value that cannot be negated is reported as a malformed frame.
    pub fn from_errno(errno: i32) -> Self {
        let Some(errno) = errno.checked_neg() else {
            return Self::MalformedFrame(format!("error code {errno} out of range"));
        };
        let message = io::Error::from_raw_os_error(errno).to_string();
        Self::Kernel { errno, message }
    }

    /// Append the kernel's extended ACK text to a kernel error message.
    pub(crate) fn with_ext_ack(mut self, ext: Option<String>) -> Self {
        if let (Self::Kernel { message, .. }, Some(ext)) = (&mut self, ext) {
            message.push_str(": ");
            message.push_str(&ext);
        }
        self
    }

    /// Check if this error comes from a frame that failed validation.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedFrame(_) | Self::Truncated { .. })
    }

    /// Check if this is a per-field attribute error.
    ///
    /// These are recovered by decoders and never fail an exchange.
    pub fn is_attribute_error(&self) -> bool {
        matches!(
            self,
            Self::AttributeAbsent { .. } | Self::AttributeTypeMismatch { .. }
        )
    }

    /// Check if this is a "not found" error (ENOENT, ENODEV, etc.).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Kernel { errno, .. } => matches!(*errno, libc::ENOENT | libc::ENODEV),
            Self::FamilyUnresolved { .. } => true,
            _ => false,
        }
    }

    /// Check if this is a permission error (EPERM, EACCES).
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Kernel { errno, .. } => matches!(*errno, libc::EPERM | libc::EACCES),
            _ => false,
        }
    }

    /// Get the errno value if this is a kernel error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Kernel { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}
