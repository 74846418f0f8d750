/// The integer sequence `start..end` or `start..=end`.
///
/// Only the bounds are stored; elements are produced on demand by
/// [`RangeValue::iter`], which can be called any number of times. A range
/// whose end lies before its start is empty.
///
/// # Example
/// ```
/// use reckon::interpreter::value::range::RangeValue;
///
/// let range = RangeValue::new(1, 4, true);
/// assert_eq!(range.len(), 4);
/// assert_eq!(range.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
/// assert!(RangeValue::new(5, 1, false).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeValue {
    start:     i64,
    end:       i64,
    inclusive: bool,
}

impl RangeValue {
    /// Creates the range from `start` to `end`.
    #[must_use]
    pub const fn new(start: i64, end: i64, inclusive: bool) -> Self {
        Self { start, end, inclusive }
    }

    /// First element, if the range is not empty.
    #[must_use]
    pub const fn start(self) -> i64 {
        self.start
    }

    /// Exclusive upper bound, never below `start`.
    const fn upper(self) -> i64 {
        let upper = if self.inclusive { self.end.saturating_add(1) } else { self.end };
        if upper < self.start { self.start } else { upper }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(self) -> usize {
        usize::try_from(self.upper().abs_diff(self.start)).unwrap_or(usize::MAX)
    }

    /// Returns `true` if the range has no elements.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.upper() == self.start
    }

    /// Element at `position`, counting from zero.
    #[must_use]
    pub fn get(self, position: usize) -> Option<i64> {
        let offset = i64::try_from(position).ok()?;
        let value = self.start.checked_add(offset)?;
        (value < self.upper()).then_some(value)
    }

    /// Walks the elements in ascending order.
    #[must_use]
    pub const fn iter(self) -> std::ops::Range<i64> {
        self.start..self.upper()
    }
}

impl std::fmt::Display for RangeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = if self.inclusive { "..=" } else { ".." };
        write!(f, "{}{op}{}", self.start, self.end)
    }
}
