use std::error;
use std::fmt;
use std::result;

/// Errors returned by checked container accessors.
///
/// Absent keys in lookups and duplicate inserts into unique containers are not errors; those
/// operations report through their return values instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The container holds no element to return.
    Empty,
    /// A position was at or past the end of a sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// A map lookup found no entry for the key.
    KeyNotFound,
    /// A requested capacity is larger than the container can ever hold.
    CapacityExceeded { requested: usize, max: usize },
}

impl Error {
    /// Returns `true` for every error that reports an out-of-range access: positional indices,
    /// missing map keys and impossible capacities.
    ///
    /// # Examples
    ///
    /// ```
    /// use extended_containers::Error;
    ///
    /// assert!(Error::KeyNotFound.is_out_of_range());
    /// assert!(!Error::Empty.is_out_of_range());
    /// ```
    pub fn is_out_of_range(&self) -> bool {
        match self {
            Error::Empty => false,
            Error::IndexOutOfRange { .. } | Error::KeyNotFound | Error::CapacityExceeded { .. } => {
                true
            },
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "container is empty"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} is out of range for length {}", index, len)
            },
            Error::KeyNotFound => write!(f, "key is not present in the map"),
            Error::CapacityExceeded { requested, max } => write!(
                f,
                "requested capacity {} exceeds the maximum of {}",
                requested, max,
            ),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_is_out_of_range() {
        assert!(!Error::Empty.is_out_of_range());
        assert!(Error::IndexOutOfRange { index: 3, len: 3 }.is_out_of_range());
        assert!(Error::KeyNotFound.is_out_of_range());
        assert!(Error::CapacityExceeded { requested: 10, max: 5 }.is_out_of_range());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::IndexOutOfRange { index: 5, len: 2 }.to_string(),
            "index 5 is out of range for length 2",
        );
        assert_eq!(Error::Empty.to_string(), "container is empty");
    }
}
