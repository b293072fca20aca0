//! Response envelopes returned by the hunter.io endpoints.
//!
//! Every response carries a `data` object; the parameterized endpoints also
//! echo their request back under `meta`. Fields the API documents as nullable
//! are `Option`s, everything else is required so that an unexpected body is
//! reported as [`crate::Error::Json`] rather than silently defaulted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A web page on which an email address was found.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    pub domain: String,
    pub uri: String,
    pub extracted_on: String,
    pub last_seen_on: String,
    pub still_on_page: bool,
}

/// Result of the account endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccountInformation {
    pub data: Account,
}

/// Profile, plan and quota of the account owning the API key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Account {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub plan_name: String,
    pub plan_level: i64,
    pub reset_date: Option<String>,
    pub team_id: Option<i64>,
    #[serde(default)]
    pub calls: Option<Calls>,
}

/// Call quota for the current billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Calls {
    pub used: i64,
    pub available: i64,
}

/// Result of the domain search endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainSearchResult {
    pub data: DomainSearch,
    pub meta: DomainSearchMeta,
}

/// A domain and the email addresses found for it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainSearch {
    pub domain: Option<String>,
    pub disposable: bool,
    pub webmail: bool,
    pub pattern: Option<String>,
    pub organization: Option<String>,
    #[serde(default)]
    pub emails: Vec<DomainEmail>,
}

/// One email address discovered by a domain search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainEmail {
    pub value: String,
    /// `personal` or `generic`.
    #[serde(rename = "type")]
    pub email_type: Option<String>,
    /// Estimated probability, out of 100, that the address is correct.
    pub confidence: i64,
    #[serde(default)]
    pub sources: Vec<Source>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub seniority: Option<String>,
    pub department: Option<String>,
    pub linkedin: Option<Value>,
    pub twitter: Option<String>,
    pub phone_number: Option<Value>,
}

/// Pagination counters and echoed parameters of a domain search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainSearchMeta {
    /// Total number of addresses known for the domain.
    pub results: i64,
    pub limit: i64,
    pub offset: i64,
    pub params: DomainSearchParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainSearchParams {
    pub domain: Option<String>,
    pub company: Option<Value>,
    #[serde(rename = "type")]
    pub email_type: Option<Value>,
    pub offset: Option<i64>,
    pub seniority: Option<Value>,
    pub department: Option<Value>,
}

/// Result of the email finder endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailFinderResult {
    pub data: EmailFinder,
    pub meta: EmailFinderMeta,
}

/// The most likely email address for a person at a company.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailFinder {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Estimated probability, out of 100, that the address is correct.
    pub score: Option<i64>,
    pub domain: Option<String>,
    pub position: Option<String>,
    pub twitter: Option<String>,
    pub linkedin_url: Option<String>,
    pub phone_number: Option<Value>,
    pub company: Option<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailFinderMeta {
    pub params: EmailFinderParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailFinderParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<Value>,
    pub domain: Option<String>,
    pub company: Option<Value>,
}

/// Result of the email verifier endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailVerifierResult {
    pub data: EmailVerification,
    pub meta: EmailVerifierMeta,
}

/// Deliverability checks performed on one address.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailVerification {
    /// Overall verdict, e.g. `deliverable`, `risky` or `undeliverable`.
    pub result: Option<String>,
    pub score: Option<i64>,
    pub email: String,
    /// The address matches hunter's regular expression.
    pub regexp: bool,
    /// The address looks automatically generated.
    pub gibberish: bool,
    pub disposable: bool,
    pub webmail: bool,
    pub mx_records: bool,
    pub smtp_server: bool,
    /// The address does not bounce.
    pub smtp_check: bool,
    /// The server accepts every address, so the SMTP check may be a false
    /// positive.
    pub accept_all: bool,
    /// The server prevented the SMTP check.
    pub block: bool,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailVerifierMeta {
    pub params: EmailVerifierParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailVerifierParams {
    pub email: String,
}

/// Result of the email count endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailCountResult {
    pub data: EmailCount,
    pub meta: EmailCountMeta,
}

/// Aggregate number of addresses known for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmailCount {
    pub total: u64,
    pub personal_emails: u64,
    pub generic_emails: u64,
    pub department: DepartmentCounts,
    pub seniority: SeniorityCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DepartmentCounts {
    pub executive: u64,
    pub it: u64,
    pub finance: u64,
    pub management: u64,
    pub sales: u64,
    pub legal: u64,
    pub support: u64,
    pub hr: u64,
    pub marketing: u64,
    pub communication: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeniorityCounts {
    pub junior: u64,
    pub senior: u64,
    pub executive: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailCountMeta {
    pub params: EmailCountParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailCountParams {
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub email_type: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_email_verifier_response() {
        let body = r#"{
            "data": {
                "result": "deliverable",
                "score": 91,
                "email": "steli@close.io",
                "regexp": true,
                "gibberish": false,
                "disposable": false,
                "webmail": false,
                "mx_records": true,
                "smtp_server": true,
                "smtp_check": true,
                "accept_all": false,
                "block": false,
                "sources": [{
                    "domain": "close.io",
                    "uri": "http://close.io/about",
                    "extracted_on": "2015-01-26",
                    "last_seen_on": "2017-06-21",
                    "still_on_page": true
                }]
            },
            "meta": { "params": { "email": "steli@close.io" } }
        }"#;

        let result: EmailVerifierResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.data.email, "steli@close.io");
        assert_eq!(result.data.score, Some(91));
        assert!(result.data.smtp_check);
        assert_eq!(result.data.sources.len(), 1);
        assert_eq!(result.data.sources[0].domain, "close.io");
    }

    #[test]
    fn decodes_account_without_calls() {
        let body = r#"{
            "data": {
                "first_name": null,
                "last_name": null,
                "email": "ops@example.com",
                "plan_name": "Free",
                "plan_level": 0,
                "reset_date": "2026-11-01",
                "team_id": 42
            }
        }"#;

        let info: AccountInformation = serde_json::from_str(body).unwrap();
        assert_eq!(info.data.plan_name, "Free");
        assert_eq!(info.data.team_id, Some(42));
        assert!(info.data.calls.is_none());
    }

    #[test]
    fn missing_data_is_an_error() {
        let body = r#"{ "meta": { "params": { "email": "a@b.c" } } }"#;
        assert!(serde_json::from_str::<EmailVerifierResult>(body).is_err());
    }

    #[test]
    fn domain_email_type_uses_wire_name() {
        let email = DomainEmail {
            value: "patrick@stripe.com".to_string(),
            email_type: Some("personal".to_string()),
            confidence: 97,
            sources: Vec::new(),
            first_name: Some("Patrick".to_string()),
            last_name: Some("Collison".to_string()),
            position: Some("CEO".to_string()),
            seniority: Some("executive".to_string()),
            department: Some("executive".to_string()),
            linkedin: None,
            twitter: None,
            phone_number: None,
        };
        let json = serde_json::to_value(&email).unwrap();
        assert_eq!(json["type"], "personal");
    }
}
