/// The hunter.io v2 endpoints this client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Account profile, plan and quota.
    Account,
    /// Addresses found for a domain or company.
    DomainSearch,
    /// Most likely address of one person.
    EmailFinder,
    /// Deliverability of one address.
    EmailVerifier,
    /// Address counts for a domain.
    EmailCount,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::DomainSearch => "domain-search",
            Self::EmailFinder => "email-finder",
            Self::EmailVerifier => "email-verifier",
            Self::EmailCount => "email-count",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
