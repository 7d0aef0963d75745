use serde::{Deserialize, Serialize};

/// Success body shared by every endpoint: `{ "data": ... }`.
/// A missing `data` member decodes to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// Failure body. The service is not required to send one, and `message` is
/// optional even when it does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best-effort decode of a failure body. Anything that is not a JSON
    /// object with a string `message` yields `None`.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn envelope_without_data_decodes_to_none() {
        let envelope: Envelope<Vec<String>> = serde_json::from_str("{}").unwrap();

        assert_eq!(envelope.data, None);
    }

    /// `T` needs no `Default`; the client decodes through a plain
    /// `DeserializeOwned` bound.
    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Option<T> {
        serde_json::from_str::<Envelope<T>>(body).unwrap().data
    }

    #[test]
    fn envelope_decodes_payload_without_default_impl() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Confirmation {
            id: u32,
        }

        assert_eq!(
            decode::<Confirmation>(r#"{"data":{"id":7}}"#),
            Some(Confirmation { id: 7 })
        );
        assert_eq!(decode::<Confirmation>(r#"{"status":"ok"}"#), None);
    }

    #[test]
    fn envelope_with_data_decodes_payload() {
        let envelope: Envelope<Vec<String>> =
            serde_json::from_str(r#"{"data":["catfish","tilapia"]}"#).unwrap();

        assert_eq!(
            envelope.data,
            Some(vec!["catfish".to_string(), "tilapia".to_string()])
        );
    }

    #[test]
    fn message_from_reads_structured_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"message":"Target weight must exceed current weight"}"#),
            Some("Target weight must exceed current weight".to_string())
        );
    }

    #[test]
    fn message_from_ignores_unstructured_bodies() {
        assert_eq!(ErrorBody::message_from(""), None);
        assert_eq!(ErrorBody::message_from("<html>502</html>"), None);
        assert_eq!(ErrorBody::message_from(r#"{"error":"x"}"#), None);
        assert_eq!(ErrorBody::message_from(r#"{"message":""}"#), None);
        assert_eq!(ErrorBody::message_from(r#"{"message":42}"#), None);
    }
}
