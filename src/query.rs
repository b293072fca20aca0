//! Typed request parameters for each endpoint.
//!
//! Required parameter combinations (a domain or a company, a full name or a
//! first and last name) are checked when a query is built, so a query that
//! exists is always one the API will accept the shape of.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display, EnumString};

use crate::endpoint::Endpoint;
use crate::models::{
    AccountInformation, DomainSearchResult, EmailCountResult, EmailFinderResult,
    EmailVerifierResult,
};
use crate::{Error, Result};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Query parameters for one request.
///
/// Keys are unique and kept in order so the encoded query is stable. Empty
/// values may be stored but are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Value stored for `key`, empty or not.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of stored parameters, including empty ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameter is stored at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs that will actually be transmitted, in key order.
    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A typed request against one endpoint.
///
/// Implemented by every query type in this module; [`crate::Client::send`]
/// accepts any of them.
pub trait Query {
    /// Endpoint the query is sent to.
    const ENDPOINT: Endpoint;

    /// Envelope the response body decodes into.
    type Output: DeserializeOwned;

    /// Parameters to encode, excluding the API key.
    fn params(&self) -> Params;
}

/// Whether an address belongs to a person or a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EmailType {
    Personal,
    Generic,
}

/// Seniority level used to filter a domain search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Seniority {
    Junior,
    Senior,
    Executive,
}

/// Department used to filter a domain search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Department {
    Executive,
    It,
    Finance,
    Management,
    Sales,
    Legal,
    Support,
    Hr,
    Marketing,
    Communication,
}

/// The organization a query is about: a domain name, a company name, or both.
///
/// Always holds at least one non-blank part. When both are given the API uses
/// the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    domain: Option<String>,
    company: Option<String>,
}

impl Target {
    /// Target a domain name, e.g. `stripe.com`. Fails when it is blank.
    pub fn domain(domain: impl Into<String>) -> Result<Self> {
        Self::from_parts(Some(domain.into()), None)
    }

    /// Target a company name, e.g. `Stripe`. Fails when it is blank.
    pub fn company(company: impl Into<String>) -> Result<Self> {
        Self::from_parts(None, Some(company.into()))
    }

    /// Build a target from optional parts, treating blank strings as absent.
    ///
    /// Fails when neither a domain nor a company is present.
    pub fn from_parts(domain: Option<String>, company: Option<String>) -> Result<Self> {
        let (domain, company) = (non_empty(domain), non_empty(company));
        if domain.is_none() && company.is_none() {
            return Err(Error::InvalidQuery(
                "either a domain or a company is required",
            ));
        }
        Ok(Self { domain, company })
    }

    /// Domain name, if one was given.
    pub fn domain_name(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Company name, if one was given.
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_deref()
    }

    fn write(&self, params: &mut Params) {
        if let Some(domain) = &self.domain {
            params.insert("domain", domain.as_str());
        }
        if let Some(company) = &self.company {
            params.insert("company", company.as_str());
        }
    }
}

/// How the person being looked up is named: first and last name, or a full
/// name. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(NameParts);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameParts {
    FirstLast { first: String, last: String },
    Full(String),
}

impl PersonName {
    /// Fails when either part is blank.
    pub fn first_last(first: impl Into<String>, last: impl Into<String>) -> Result<Self> {
        match (non_empty(Some(first.into())), non_empty(Some(last.into()))) {
            (Some(first), Some(last)) => Ok(Self(NameParts::FirstLast { first, last })),
            _ => Err(Error::InvalidQuery("both a first and a last name are required")),
        }
    }

    /// Fails when `name` is blank.
    pub fn full(name: impl Into<String>) -> Result<Self> {
        non_empty(Some(name.into()))
            .map(|full| Self(NameParts::Full(full)))
            .ok_or(Error::InvalidQuery("a full name is required"))
    }

    /// Build a name from optional parts, treating blank strings as absent.
    ///
    /// A complete first and last name takes precedence over a full name.
    pub fn from_parts(
        first: Option<String>,
        last: Option<String>,
        full: Option<String>,
    ) -> Result<Self> {
        match (non_empty(first), non_empty(last), non_empty(full)) {
            (Some(first), Some(last), _) => Ok(Self(NameParts::FirstLast { first, last })),
            (_, _, Some(full)) => Ok(Self(NameParts::Full(full))),
            _ => Err(Error::InvalidQuery(
                "either a first and last name or a full name is required",
            )),
        }
    }

    fn write(&self, params: &mut Params) {
        match &self.0 {
            NameParts::FirstLast { first, last } => {
                params
                    .insert("first_name", first.as_str())
                    .insert("last_name", last.as_str());
            }
            NameParts::Full(full) => {
                params.insert("full_name", full.as_str());
            }
        }
    }
}

/// Account information. Free, takes no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountQuery;

impl Query for AccountQuery {
    const ENDPOINT: Endpoint = Endpoint::Account;
    type Output = AccountInformation;

    fn params(&self) -> Params {
        Params::new()
    }
}

/// All email addresses found for a domain or company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSearchQuery {
    target: Target,
    limit: Option<u32>,
    offset: Option<u32>,
    email_type: Option<EmailType>,
    seniority: Vec<Seniority>,
    department: Vec<Department>,
}

impl DomainSearchQuery {
    /// Search `target` with no filters.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            limit: None,
            offset: None,
            email_type: None,
            seniority: Vec::new(),
            department: Vec::new(),
        }
    }

    /// Shorthand for `DomainSearchQuery::new(Target::domain(domain)?)`.
    pub fn domain(domain: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Target::domain(domain)?))
    }

    /// Shorthand for `DomainSearchQuery::new(Target::company(company)?)`.
    pub fn company(company: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Target::company(company)?))
    }

    /// Maximum number of addresses to return.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of addresses to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Only return `personal` or `generic` addresses.
    pub fn email_type(mut self, email_type: EmailType) -> Self {
        self.email_type = Some(email_type);
        self
    }

    /// Restrict to people of these seniority levels.
    pub fn seniority(mut self, levels: impl IntoIterator<Item = Seniority>) -> Self {
        self.seniority = levels.into_iter().collect();
        self
    }

    /// Restrict to people working in these departments.
    pub fn department(mut self, departments: impl IntoIterator<Item = Department>) -> Self {
        self.department = departments.into_iter().collect();
        self
    }

    /// The domain or company being searched.
    pub fn target(&self) -> &Target {
        &self.target
    }
}

impl Query for DomainSearchQuery {
    const ENDPOINT: Endpoint = Endpoint::DomainSearch;
    type Output = DomainSearchResult;

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.target.write(&mut params);
        if let Some(limit) = self.limit {
            params.insert("limit", limit.to_string());
        }
        if let Some(offset) = self.offset {
            params.insert("offset", offset.to_string());
        }
        if let Some(email_type) = self.email_type {
            params.insert("type", email_type.to_string());
        }
        params.insert("seniority", join(&self.seniority));
        params.insert("department", join(&self.department));
        params
    }
}

/// The most likely address of one person at a domain or company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFinderQuery {
    target: Target,
    name: PersonName,
}

impl EmailFinderQuery {
    /// Look up `name` at `target`.
    pub fn new(target: Target, name: PersonName) -> Self {
        Self { target, name }
    }
}

impl Query for EmailFinderQuery {
    const ENDPOINT: Endpoint = Endpoint::EmailFinder;
    type Output = EmailFinderResult;

    fn params(&self) -> Params {
        let mut params = Params::new();
        self.target.write(&mut params);
        self.name.write(&mut params);
        params
    }
}

/// Deliverability check of a single address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailVerifierQuery {
    email: String,
}

impl EmailVerifierQuery {
    /// Fails when `email` is not shaped like `local@domain.tld`.
    pub fn new(email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        if !EMAIL_RE.is_match(&email) {
            return Err(Error::InvalidQuery("not a valid email address"));
        }
        Ok(Self { email })
    }

    /// The address to verify.
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Query for EmailVerifierQuery {
    const ENDPOINT: Endpoint = Endpoint::EmailVerifier;
    type Output = EmailVerifierResult;

    fn params(&self) -> Params {
        Params::from([("email", self.email.as_str())])
    }
}

/// Number of addresses known for a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCountQuery {
    domain: String,
    email_type: Option<EmailType>,
}

impl EmailCountQuery {
    /// Fails when `domain` is empty.
    pub fn new(domain: impl Into<String>) -> Result<Self> {
        let domain = domain.into();
        if domain.trim().is_empty() {
            return Err(Error::InvalidQuery("a domain is required"));
        }
        Ok(Self {
            domain,
            email_type: None,
        })
    }

    /// Only count `personal` or `generic` addresses.
    pub fn email_type(mut self, email_type: EmailType) -> Self {
        self.email_type = Some(email_type);
        self
    }
}

impl Query for EmailCountQuery {
    const ENDPOINT: Endpoint = Endpoint::EmailCount;
    type Output = EmailCountResult;

    fn params(&self) -> Params {
        let mut params = Params::from([("domain", self.domain.as_str())]);
        if let Some(email_type) = self.email_type {
            params.insert("type", email_type.to_string());
        }
        params
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn join<T: AsRef<str>>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<&str>>()
        .join(",")
}
