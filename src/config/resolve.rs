//! Turns a parsed [`Document`] into a validated [`Config`].
//!
//! Steps, in order: pick the proxy record (current wins, legacy is migrated
//! only when the current one is absent), pick the backend set (current
//! records when any exist, otherwise the migrated legacy clients), cascade
//! proxy options into every backend, and fail with every collected error
//! if anything fatal was found.

use std::collections::BTreeMap;

use super::legacy::{self, SkippedBackend};
use super::model::{Backend, Config, Document, ProxyConfig, ServerRecord};
use super::validation;
use crate::error::ValidationError;

#[derive(Debug)]
pub struct Resolution {
    pub config: Config,
    /// Legacy backends dropped during migration. The caller decides how to report them.
    pub skipped: Vec<SkippedBackend>,
}

pub fn resolve(document: Document) -> Result<Resolution, Vec<ValidationError>> {
    let Document {
        legacy_proxy,
        legacy_clients,
        proxy,
        servers,
    } = document;

    let mut errors = Vec::new();

    let proxy = proxy.or_else(|| legacy_proxy.as_ref().map(legacy::migrate_proxy));

    let (backends, skipped) = if servers.is_empty() && !legacy_clients.is_empty() {
        let migration = legacy::migrate_clients(&legacy_clients, legacy_proxy.as_ref());
        (migration.backends, migration.skipped)
    } else {
        (parse_servers(&servers, &mut errors), Vec::new())
    };

    let Some(proxy) = proxy else {
        errors.insert(0, validation::missing_proxy());
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let proxy = ProxyConfig::from(proxy);
    let backends = cascade(&proxy, backends);

    Ok(Resolution {
        config: Config { proxy, backends },
        skipped,
    })
}

fn parse_servers(
    servers: &BTreeMap<String, ServerRecord>,
    errors: &mut Vec<ValidationError>,
) -> BTreeMap<String, Backend> {
    let mut backends = BTreeMap::new();
    for (name, record) in servers {
        match record.transport() {
            Ok(transport) => {
                backends.insert(
                    name.clone(),
                    Backend {
                        transport,
                        options: record.options.clone().unwrap_or_default(),
                    },
                );
            }
            Err(err) => errors.push(validation::transport_error(name, record, &err)),
        }
    }
    backends
}

/// Apply the proxy's options as defaults to every backend.
#[must_use]
pub fn cascade(proxy: &ProxyConfig, backends: BTreeMap<String, Backend>) -> BTreeMap<String, Backend> {
    backends
        .into_iter()
        .map(|(name, backend)| {
            let options = backend.options.inherit(&proxy.options);
            (
                name,
                Backend {
                    transport: backend.transport,
                    options,
                },
            )
        })
        .collect()
}
