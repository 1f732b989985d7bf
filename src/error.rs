use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Io,
    Config,
}

impl ErrorKind {
    /// Process exit code, following sysexits.h.
    pub fn code(&self) -> u8 {
        match self {
            ErrorKind::InvalidInput => 65,
            ErrorKind::Io => 74,
            ErrorKind::Config => 78,
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            65 => Ok(ErrorKind::InvalidInput),
            74 => Ok(ErrorKind::Io),
            78 => Ok(ErrorKind::Config),
            value => Err(serde::de::Error::custom(format!("unknown error code {value}"))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DedupError {
    pub msg: String,
    pub kind: ErrorKind,
}

impl fmt::Display for DedupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl error::Error for DedupError {}

impl DedupError {
    pub fn invalid_input<T: std::fmt::Display>(msg: T) -> DedupError {
        DedupError {
            msg: msg.to_string(),
            kind: ErrorKind::InvalidInput,
        }
    }

    pub fn io<T: std::fmt::Display>(msg: T) -> DedupError {
        DedupError {
            msg: msg.to_string(),
            kind: ErrorKind::Io,
        }
    }

    pub fn config<T: std::fmt::Display>(msg: T) -> DedupError {
        DedupError {
            msg: msg.to_string(),
            kind: ErrorKind::Config,
        }
    }
}
