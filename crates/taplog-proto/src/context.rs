//! Collaborator interface the emitter reads run state from.

/// Identity and running statistics of the test run being reported.
///
/// The driver owns this state. An emitter only reads it: identity when it
/// formats a test line or location, counters when it numbers a test point
/// and when it writes the final plan.
///
/// Counters must already include the incident being reported when the
/// emitter is told about it.
pub trait RunContext {
    /// Name of the test subject (suite, object or binary under test).
    fn subject_name(&self) -> &str;

    /// Test function currently running, if any.
    fn function_name(&self) -> Option<&str>;

    /// Tag of the current data row, if any.
    fn data_tag(&self) -> Option<&str>;

    /// Tag of the current global data row, if the driver has one.
    fn global_data_tag(&self) -> Option<&str> {
        None
    }

    /// Number of test points counted so far.
    fn total_count(&self) -> usize;

    fn pass_count(&self) -> usize;

    fn fail_count(&self) -> usize;
}
