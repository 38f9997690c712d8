/// Credential for the MCP endpoint.
///
/// The credential is pre-obtained and injected by the caller; the
/// catalog performs no token acquisition or refresh of its own. The
/// same credential is reused when the catalog reconnects.
#[derive(Clone, Default)]
pub enum CatalogAuth {
    /// No authentication required
    #[default]
    None,
    /// Static bearer token
    Bearer(String),
}

impl std::fmt::Debug for CatalogAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogAuth::None => write!(f, "CatalogAuth::None"),
            CatalogAuth::Bearer(_) => write!(f, "CatalogAuth::Bearer([REDACTED])"),
        }
    }
}

impl CatalogAuth {
    /// Create bearer token auth
    pub fn bearer(token: impl Into<String>) -> Self {
        CatalogAuth::Bearer(token.into())
    }

    /// Check if authentication is configured
    pub fn is_configured(&self) -> bool {
        !matches!(self, CatalogAuth::None)
    }
}
