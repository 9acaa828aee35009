//! Wire types exchanged with the remote directory.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A directory user as returned by `GET /users/{id}`.
///
/// Every field is optional and unknown fields are ignored, so a sparse
/// payload still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Raw date text; parsed by the caller so a bad date does not reject the user.
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<RemoteAddress>,
}

/// The nested postal address of a directory user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAddress {
    /// Street line.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<PostalCode>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A postal code sent either as a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostalCode {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostalCode::Text(text) => f.write_str(text),
            PostalCode::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Body of `POST /users/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserPayload {
    /// Local contact id, under the key the directory expects.
    #[serde(rename = "salesforceId")]
    pub contact_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_user_full() {
        let user: RemoteUser = serde_json::from_value(json!({
            "id": 42,
            "firstName": "Ignored",
            "email": "a@b.com",
            "phone": "555",
            "birthDate": "1990-01-01",
            "address": {
                "address": "1 Main",
                "city": "X",
                "postalCode": 12345,
                "state": "CA",
                "country": "US",
                "coordinates": { "lat": 1.0, "lng": 2.0 }
            }
        }))
        .unwrap();

        assert_eq!(user.email.as_deref(), Some("a@b.com"));
        assert_eq!(user.birth_date.as_deref(), Some("1990-01-01"));
        let address = user.address.unwrap();
        assert_eq!(address.postal_code.unwrap().to_string(), "12345");
    }

    #[test]
    fn test_remote_user_sparse() {
        let user: RemoteUser = serde_json::from_value(json!({ "phone": null })).unwrap();
        assert_eq!(user, RemoteUser::default());
    }

    #[test]
    fn test_postal_code_text() {
        let address: RemoteAddress =
            serde_json::from_value(json!({ "postalCode": "02134" })).unwrap();
        assert_eq!(address.postal_code.unwrap().to_string(), "02134");
    }

    #[test]
    fn test_new_user_payload_keys() {
        let payload = NewUserPayload {
            contact_id: "c-1".to_string(),
            first_name: "unknown".to_string(),
            last_name: "Doe".to_string(),
            email: "d@e.com".to_string(),
            phone: "1".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "salesforceId": "c-1",
                "firstName": "unknown",
                "lastName": "Doe",
                "email": "d@e.com",
                "phone": "1"
            })
        );
    }
}
