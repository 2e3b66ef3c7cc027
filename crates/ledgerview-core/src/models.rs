//! Data models exchanged with the account/transaction gateway

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FailureCause;
use crate::types::{AccountId, TransactionId, TransactionKind};

/// Account as returned by the gateway; never cached beyond one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub name: String,
}

/// A single income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub sum: Decimal,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Options accepted by `open`; `account_id: None` means nothing is selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
}

impl OpenOptions {
    pub fn account(id: impl Into<AccountId>) -> Self {
        Self {
            account_id: Some(id.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.account_id.is_none()
    }
}

/// Tagged success/failure envelope every gateway call resolves to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> GatewayResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Payload of a successful response; a success without data is malformed
    pub fn into_result(self) -> Result<T, FailureCause> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(FailureCause::Malformed),
            (false, _) => Err(FailureCause::rejected(self.error)),
        }
    }

    /// Only the success flag matters
    pub fn into_ack(self) -> Result<(), FailureCause> {
        if self.success {
            Ok(())
        } else {
            Err(FailureCause::rejected(self.error))
        }
    }
}

impl GatewayResponse<()> {
    pub fn ack() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// Display projection of a record, rebuilt on every render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub name: String,
    pub date: String,
    pub sum: String,
}

/// Accepts both "2019-03-10 03:20:41" and "2019-03-10T03:20:41"
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim().trim_end_matches('Z');
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%Y-%m-%d %H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_record_from_json() {
        let record: TransactionRecord = serde_json::from_str(
            r#"{"id":"17","name":"Salary","type":"income","sum":1500.5,"created_at":"2019-03-10 03:20:41"}"#,
        )
        .unwrap();
        assert_eq!(record.kind, TransactionKind::Income);
        assert_eq!(record.sum, Decimal::new(15005, 1));
        assert_eq!(record.created_at.day(), 10);
        assert_eq!(record.created_at.minute(), 20);
    }

    #[test]
    fn test_record_iso_timestamp_and_string_sum() {
        let record: TransactionRecord = serde_json::from_str(
            r#"{"id":"18","name":"Rent","type":"expense","sum":"300","created_at":"2019-03-10T03:20:41"}"#,
        )
        .unwrap();
        assert_eq!(record.kind, TransactionKind::Expense);
        assert_eq!(record.sum, Decimal::new(300, 0));
        assert_eq!(record.created_at.hour(), 3);
    }

    #[test]
    fn test_record_bad_timestamp() {
        let result: Result<TransactionRecord, _> = serde_json::from_str(
            r#"{"id":"1","name":"x","type":"income","sum":1,"created_at":"yesterday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_response_into_result() {
        let ok: GatewayResponse<AccountSummary> =
            serde_json::from_str(r#"{"success":true,"data":{"id":"1","name":"Cash"}}"#).unwrap();
        assert_eq!(ok.into_result().unwrap().name, "Cash");

        let malformed: GatewayResponse<AccountSummary> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(malformed.into_result().unwrap_err(), FailureCause::Malformed);

        let rejected: GatewayResponse<AccountSummary> =
            serde_json::from_str(r#"{"success":false,"error":"no such account"}"#).unwrap();
        assert_eq!(
            rejected.into_result().unwrap_err(),
            FailureCause::Rejected { message: "no such account".to_string() }
        );
    }

    #[test]
    fn test_response_into_ack() {
        let ack: GatewayResponse<()> = serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert!(ack.into_ack().is_ok());
        assert!(GatewayResponse::<()>::failure("locked").into_ack().is_err());
    }

    #[test]
    fn test_open_options() {
        assert!(OpenOptions::default().is_empty());
        let options: OpenOptions = serde_json::from_str("{}").unwrap();
        assert!(options.is_empty());
        assert_eq!(OpenOptions::account("5").account_id, Some(AccountId::new("5")));
    }
}
