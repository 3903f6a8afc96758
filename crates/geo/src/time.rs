/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Time(pub f64); // seconds

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn forever() -> Self {
        Self {
            start: Time(f64::NEG_INFINITY),
            end: Time(f64::INFINITY),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    pub fn contains(&self, t: Time) -> bool {
        t.0 >= self.start.0 && t.0 <= self.end.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn forever_contains_everything() {
        let span = TimeSpan::forever();
        assert!(span.contains(Time(-1e12)));
        assert!(span.contains(Time(0.0)));
        assert!(span.contains(Time(1e12)));
    }

    #[test]
    fn contains_is_inclusive() {
        let span = TimeSpan::new(Time(10.0), Time(20.0));
        assert!(span.contains(Time(10.0)));
        assert!(span.contains(Time(20.0)));
        assert!(!span.contains(Time(9.99)));
        assert!(!span.contains(Time(20.01)));
    }

    #[test]
    fn duration_never_negative() {
        let span = TimeSpan::new(Time(5.0), Time(3.0));
        assert_eq!(span.duration(), 0.0);
    }
}
