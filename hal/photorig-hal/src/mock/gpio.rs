//! Mock output pin

use embedded_hal::digital::{Error, ErrorKind, ErrorType, OutputPin};

use super::{Op, OpLog};

/// Error returned by a failing mock pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Mock output pin
///
/// Records every write as [`Op::Pin`]. A pin built with [`MockPin::failing_after`]
/// accepts a fixed number of writes and then rejects the rest.
#[derive(Debug, Clone)]
pub struct MockPin {
    id: u8,
    high: bool,
    log: OpLog,
    writes_left: Option<usize>,
}

impl MockPin {
    /// Create a working pin with the given id
    pub fn new(id: u8, log: &OpLog) -> Self {
        Self {
            id,
            high: false,
            log: log.clone(),
            writes_left: None,
        }
    }

    /// Create a pin that fails once `writes` writes have succeeded
    pub fn failing_after(id: u8, writes: usize, log: &OpLog) -> Self {
        Self {
            writes_left: Some(writes),
            ..Self::new(id, log)
        }
    }

    /// Pin id used in the log
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Last level written
    pub fn is_high(&self) -> bool {
        self.high
    }

    fn write(&mut self, high: bool) -> Result<(), MockPinError> {
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(MockPinError);
            }
            *left -= 1;
        }
        self.high = high;
        self.log.push(Op::Pin { pin: self.id, high });
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failing_pin() {
        let log = OpLog::new();
        let mut pin = MockPin::failing_after(9, 1, &log);

        assert!(pin.set_high().is_ok());
        assert_eq!(pin.set_low(), Err(MockPinError));
        assert!(pin.is_high());
        assert_eq!(log.pin_writes(), std::vec![(9, true)]);
    }
}
