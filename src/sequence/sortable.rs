//! The record-side contract for sequencing.

/// A record that can be placed by the sequencer.
///
/// Both hints are optional. A record without an [`id`](Sortable::id) can
/// still be sequenced (it receives a synthetic identifier for the
/// duration of the call), and a record without a
/// [`before`](Sortable::before) falls back to following the record that
/// preceded it in the input. An empty string is treated the same as
/// `None` for both hints.
///
/// # Example
///
/// ```
/// use taxis::Sortable;
///
/// struct MenuEntry {
///     id: Option<String>,
///     before: Option<String>,
///     label: String,
/// }
///
/// impl Sortable for MenuEntry {
///     fn id(&self) -> Option<&str> {
///         self.id.as_deref()
///     }
///
///     fn before(&self) -> Option<&str> {
///         self.before.as_deref()
///     }
/// }
///
/// let entry = MenuEntry {
///     id: Some("file".into()),
///     before: None,
///     label: "File".into(),
/// };
/// assert_eq!(entry.id(), Some("file"));
/// assert_eq!(entry.label, "File");
/// ```
pub trait Sortable {
    /// The record's declared identifier, if any.
    fn id(&self) -> Option<&str>;

    /// The identifier of the record that should come before this one, if
    /// any.
    fn before(&self) -> Option<&str>;
}
