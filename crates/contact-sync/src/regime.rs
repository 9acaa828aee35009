//! External id ranges that decide the sync direction.

/// Largest external id mirrored from the directory. Anything above is pushed.
pub const INBOUND_MAX_EXTERNAL_ID: i64 = 100;

/// Which side owns a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRegime {
    /// The contact mirrors the directory user with the same id.
    Inbound,
    /// The contact is pushed to the directory.
    Outbound,
}

impl SyncRegime {
    /// Classify an external id. Missing or non-integer ids have no regime.
    pub fn classify(external_id: Option<&str>) -> Option<Self> {
        let value = parse_external_id(external_id)?;
        if value <= INBOUND_MAX_EXTERNAL_ID {
            Some(SyncRegime::Inbound)
        } else {
            Some(SyncRegime::Outbound)
        }
    }
}

/// Parse a textual external id as an integer.
pub fn parse_external_id(external_id: Option<&str>) -> Option<i64> {
    external_id?.parse().ok()
}
