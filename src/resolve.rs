use std::fmt;

use hickory_resolver::{
    error::{ResolveError, ResolveErrorKind},
    TokioAsyncResolver,
};

const SERVICE: &str = "ssh";
const PROTO: &str = "tcp";

/// Port used when no SRV record advertises one.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// One SRV candidate for a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// Where the SSH client should actually connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveEndpointError {
    #[error("failed to build DNS resolver from system configuration")]
    Config(#[source] ResolveError),
    /// The query failed for a reason other than the record being absent.
    #[error("SRV lookup for {name} failed")]
    Lookup {
        name: String,
        #[source]
        source: ResolveError,
    },
}

/// Discovers SSH endpoints through DNS SRV records.
pub struct SrvResolver {
    inner: TokioAsyncResolver,
}

impl SrvResolver {
    /// Builds a resolver from the system DNS configuration.
    pub fn from_system_conf() -> Result<Self, ResolveEndpointError> {
        let inner =
            TokioAsyncResolver::tokio_from_system_conf().map_err(ResolveEndpointError::Config)?;
        Ok(Self { inner })
    }

    /// Returns every `_ssh._tcp.<hostname>` record, ordered by ascending
    /// priority. Answer order is kept within a priority, so the first entry
    /// is the preferred candidate. An absent record set is an empty list,
    /// not an error.
    pub async fn lookup(&self, hostname: &str) -> Result<Vec<ServiceRecord>, ResolveEndpointError> {
        let name = srv_name(hostname);
        let records = match self.inner.srv_lookup(name.as_str()).await {
            Ok(lookup) => lookup
                .iter()
                .map(|srv| ServiceRecord {
                    priority: srv.priority(),
                    weight: srv.weight(),
                    port: srv.port(),
                    target: srv.target().to_utf8(),
                })
                .collect(),
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Vec::new(),
                _ => return Err(ResolveEndpointError::Lookup { name, source: err }),
            },
        };
        let records = order_records(records);

        if records.is_empty() {
            tracing::debug!("no SRV record found for {hostname}");
        } else {
            tracing::debug!("found {} SRV record(s) for {name}", records.len());
            for (i, record) in records.iter().enumerate() {
                tracing::debug!(
                    "record {i}: {} {} {} {}",
                    record.priority,
                    record.weight,
                    record.port,
                    record.target
                );
            }
        }

        Ok(records)
    }

    /// Resolves the connection target for `hostname`.
    ///
    /// Prefers the target and port of the best SRV record; without one, the
    /// hostname itself and [`DEFAULT_SSH_PORT`] are returned.
    pub async fn resolve(&self, hostname: &str) -> Result<Endpoint, ResolveEndpointError> {
        let records = self.lookup(hostname).await?;
        Ok(select_endpoint(hostname, &records))
    }
}

fn srv_name(hostname: &str) -> String {
    format!("_{SERVICE}._{PROTO}.{hostname}")
}

fn order_records(mut records: Vec<ServiceRecord>) -> Vec<ServiceRecord> {
    // Stable sort, so records sharing a priority stay in answer order.
    // Weighted selection within a priority is left to a future extension.
    records.sort_by_key(|record| record.priority);
    records
}

fn select_endpoint(hostname: &str, records: &[ServiceRecord]) -> Endpoint {
    match records.first() {
        Some(record) => Endpoint {
            // Targets come back fully qualified, trim the root label.
            host: record
                .target
                .strip_suffix('.')
                .unwrap_or(&record.target)
                .to_owned(),
            port: record.port,
        },
        None => Endpoint {
            host: hostname.to_owned(),
            port: DEFAULT_SSH_PORT,
        },
    }
}
