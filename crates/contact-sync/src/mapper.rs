//! Translation between directory users and local contacts.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use database::{ContactSyncFields, NewContact};
use directory_client::{NewUserPayload, RemoteUser};
use tracing::warn;

/// Sent in place of a blank contact field so the directory never gets an empty value.
pub const UNKNOWN_FIELD_VALUE: &str = "unknown";

/// Build an unsaved contact from a directory user.
///
/// The external id is left unset; the caller decides which id the contact
/// is stored under.
pub fn contact_from_remote(user: &RemoteUser) -> NewContact {
    let mut contact = NewContact {
        email: user.email.clone(),
        phone: user.phone.clone(),
        birth_date: user.birth_date.as_deref().and_then(parse_birth_date),
        ..Default::default()
    };

    if let Some(address) = &user.address {
        contact.mailing_street = address.address.clone();
        contact.mailing_city = address.city.clone();
        contact.mailing_postal_code = address.postal_code.as_ref().map(|code| code.to_string());
        contact.mailing_state = address.state.clone();
        contact.mailing_country = address.country.clone();
    }

    contact
}

/// Build the directory payload for a contact.
pub fn outbound_payload(fields: &ContactSyncFields) -> NewUserPayload {
    NewUserPayload {
        contact_id: fields.id.clone(),
        first_name: or_unknown(fields.first_name.as_deref()),
        last_name: or_unknown(fields.last_name.as_deref()),
        email: or_unknown(fields.email.as_deref()),
        phone: or_unknown(fields.phone.as_deref()),
    }
}

fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => UNKNOWN_FIELD_VALUE.to_string(),
    }
}

/// Parse a directory birth date, logging and returning `None` on bad input.
///
/// Accepts `YYYY-MM-DD` (month and day may be unpadded) and ISO date-times.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }

    warn!("Ignoring unparseable birth date {:?}", raw);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_client::{PostalCode, RemoteAddress};

    fn remote_user(address: Option<RemoteAddress>) -> RemoteUser {
        RemoteUser {
            email: Some("a@b.com".to_string()),
            phone: Some("555".to_string()),
            birth_date: Some("1990-01-01".to_string()),
            address,
        }
    }

    #[test]
    fn test_inbound_full_mapping() {
        let user: RemoteUser = serde_json::from_str(
            r#"{"email":"a@b.com","phone":"555","birthDate":"1990-01-01","address":{"address":"1 Main","city":"X","postalCode":12345,"state":"CA","country":"US"}}"#,
        )
        .unwrap();

        let contact = contact_from_remote(&user);
        assert_eq!(contact.email.as_deref(), Some("a@b.com"));
        assert_eq!(contact.phone.as_deref(), Some("555"));
        assert_eq!(contact.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(contact.mailing_street.as_deref(), Some("1 Main"));
        assert_eq!(contact.mailing_city.as_deref(), Some("X"));
        assert_eq!(contact.mailing_postal_code.as_deref(), Some("12345"));
        assert_eq!(contact.mailing_state.as_deref(), Some("CA"));
        assert_eq!(contact.mailing_country.as_deref(), Some("US"));
        assert!(contact.external_id.is_none());
        assert!(contact.first_name.is_none());
    }

    #[test]
    fn test_inbound_without_address() {
        let contact = contact_from_remote(&remote_user(None));
        assert_eq!(contact.email.as_deref(), Some("a@b.com"));
        assert_eq!(contact.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert!(contact.mailing_street.is_none());
        assert!(contact.mailing_city.is_none());
        assert!(contact.mailing_postal_code.is_none());
        assert!(contact.mailing_state.is_none());
        assert!(contact.mailing_country.is_none());
    }

    #[test]
    fn test_inbound_text_postal_code() {
        let address = RemoteAddress {
            postal_code: Some(PostalCode::Text("02134".to_string())),
            ..Default::default()
        };
        let contact = contact_from_remote(&remote_user(Some(address)));
        assert_eq!(contact.mailing_postal_code.as_deref(), Some("02134"));
    }

    #[test]
    fn test_bad_birth_date_keeps_other_fields() {
        let mut user = remote_user(None);
        user.birth_date = Some("not a date".to_string());

        let contact = contact_from_remote(&user);
        assert!(contact.birth_date.is_none());
        assert_eq!(contact.email.as_deref(), Some("a@b.com"));
        assert_eq!(contact.phone.as_deref(), Some("555"));
    }

    #[test]
    fn test_birth_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1996, 5, 30);
        assert_eq!(parse_birth_date("1996-05-30"), expected);
        assert_eq!(parse_birth_date("1996-5-30"), expected);
        assert_eq!(parse_birth_date("1996-05-30T00:00:00Z"), expected);
        assert_eq!(parse_birth_date("1996-05-30T10:11:12.000"), expected);
        assert_eq!(parse_birth_date("1996-02-30"), None);
        assert_eq!(parse_birth_date(""), None);
    }

    #[test]
    fn test_outbound_defaults_blank_fields() {
        let fields = ContactSyncFields {
            id: "003xx".to_string(),
            first_name: Some("  ".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jd@example.com".to_string()),
            phone: Some("555-0100".to_string()),
        };

        let payload = serde_json::to_value(outbound_payload(&fields)).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "salesforceId": "003xx",
                "firstName": "unknown",
                "lastName": "Doe",
                "email": "jd@example.com",
                "phone": "555-0100"
            })
        );
    }

    #[test]
    fn test_outbound_defaults_missing_fields() {
        let fields = ContactSyncFields {
            id: "c-9".to_string(),
            first_name: None,
            last_name: None,
            email: Some(String::new()),
            phone: None,
        };

        let payload = outbound_payload(&fields);
        assert_eq!(payload.contact_id, "c-9");
        assert_eq!(payload.first_name, UNKNOWN_FIELD_VALUE);
        assert_eq!(payload.last_name, UNKNOWN_FIELD_VALUE);
        assert_eq!(payload.email, UNKNOWN_FIELD_VALUE);
        assert_eq!(payload.phone, UNKNOWN_FIELD_VALUE);
    }
}
