//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::fmt;

/// Type alias for stripes errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring while counting or merging
#[derive(Debug)]
pub enum Error {
    InvalidConfiguration(String),
    IOError(io::Error),
    MalformedRecord { line: usize, reason: String },
    CountOverflow(String),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidConfiguration(ref info) => write!(f, "Invalid configuration: {}", info),
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::MalformedRecord { line, ref reason } => {
                if line == 0 { write!(f, "Malformed stripe record: {}", reason) }
                else { write!(f, "Malformed stripe record on line {}: {}", line, reason) }
            },
            Error::CountOverflow(ref neighbor) =>
                write!(f, "Cooccurrence count for {:?} does not fit in 64 bits", neighbor),
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::InvalidConfiguration(_) => None,
            Error::MalformedRecord { .. } => None,
            Error::CountOverflow(_) => None,
            Error::Other(_) => None,
        }
    }
}

impl Error {
    /// Attach a line number to a record error, leaving everything else alone
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Error::MalformedRecord { reason, .. } => Error::MalformedRecord { line, reason },
            other => other,
        }
    }
}

//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::IOError(err) => err,
            Error::InvalidConfiguration(_) | Error::MalformedRecord { .. } | Error::CountOverflow(_) =>
                io::Error::new(io::ErrorKind::InvalidData, err),
            Error::Other(_) => io::Error::new(io::ErrorKind::Other, err),
        }
    }
}
