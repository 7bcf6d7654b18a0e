use std::io::{self, Write};

use crate::arch::BOOL_SIZE;

/// Everything in the report that comes before the size itself.
pub const REPORT_PREFIX: &str = "The size of a bool on your platform is: ";

/// The report, without a trailing newline.
pub fn bool_size_line() -> String {
    format!("{}{}", REPORT_PREFIX, BOOL_SIZE)
}

/// Write the report to `out` as a single line and flush it.
pub fn write_report<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "{}", bool_size_line())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn line() {
        assert_eq!(
            bool_size_line(),
            format!(
                "The size of a bool on your platform is: {}",
                std::mem::size_of::<bool>()
            )
        );
    }

    #[test]
    fn writes_exactly_one_line() {
        let mut buf = Vec::new();
        write_report(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            format!(
                "The size of a bool on your platform is: {}\n",
                std::mem::size_of::<bool>()
            )
        );
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn io_errors_propagate() {
        let err = write_report(ClosedPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
