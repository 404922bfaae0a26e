//! Decode opaque observation payloads into typed per-source entries
//!
//! Every known source schema has one `SourcePayload` variant; anything else
//! is `Unrecognized`. Decoding walks entries one at a time: a bad entry is
//! reported as an `EntryError` and skipped, the rest of the payload is kept.

use crate::config::ExtractorConfig;
use crate::error::EntryError;
use ownergraph_domain::SourceKind;
use serde_json::{Map, Value};

/// One `{path, owners[]}` line of an ownership file
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipFileEntry {
    /// Path pattern the owners apply to
    pub path: String,
    /// Normalized owners (individuals or teams)
    pub owners: Vec<String>,
}

/// One `{resourceName, owner}` cluster resource
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterResourceEntry {
    /// Cluster resource name
    pub resource_name: String,
    /// Normalized owner
    pub owner: String,
}

/// One `{resourceId, tags{}}` cloud resource with a usable owner tag
#[derive(Debug, Clone, PartialEq)]
pub struct CloudResourceEntry {
    /// Cloud resource identifier
    pub resource_id: String,
    /// Normalized owner from the owner tag
    pub owner: String,
}

/// One `{service, team}` monitoring-platform assignment
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredServiceEntry {
    /// Service name
    pub service: String,
    /// Normalized owning team
    pub team: String,
}

/// A payload decoded against its source's schema
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePayload {
    /// Ownership-file entries
    OwnershipFile(Vec<OwnershipFileEntry>),
    /// Cluster-metadata entries
    ClusterMetadata(Vec<ClusterResourceEntry>),
    /// Cloud-tag entries
    CloudTags(Vec<CloudResourceEntry>),
    /// Monitoring-platform entries
    Monitoring(Vec<MonitoredServiceEntry>),
    /// A source the engine has no decoder for
    Unrecognized {
        /// The source identifier as received
        source: String,
    },
}

/// Result of decoding one payload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPayload {
    /// Usable entries
    pub payload: SourcePayload,
    /// Entries (or owners within entries) that were skipped
    pub skipped: Vec<EntryError>,
}

impl SourcePayload {
    /// Decode `payload` according to the schema of `source`
    pub fn decode(source: &str, payload: &Value, config: &ExtractorConfig) -> DecodedPayload {
        let Some(kind) = SourceKind::parse(source) else {
            return DecodedPayload {
                payload: SourcePayload::Unrecognized {
                    source: source.to_string(),
                },
                skipped: Vec::new(),
            };
        };

        let mut skipped = Vec::new();
        let entries = match entries_of(payload) {
            Some(entries) => entries,
            None => {
                skipped.push(EntryError::UnsupportedShape);
                Vec::new()
            }
        };

        let payload = match kind {
            SourceKind::OwnershipFile => SourcePayload::OwnershipFile(collect(
                &entries,
                &mut skipped,
                |index, obj, skipped| decode_ownership_entry(index, obj, config, skipped),
            )),
            SourceKind::ClusterMetadata => SourcePayload::ClusterMetadata(collect(
                &entries,
                &mut skipped,
                |index, obj, _| decode_cluster_entry(index, obj, config),
            )),
            SourceKind::CloudTags => SourcePayload::CloudTags(collect(
                &entries,
                &mut skipped,
                |index, obj, _| decode_cloud_entry(index, obj, config),
            )),
            SourceKind::Monitoring => SourcePayload::Monitoring(collect(
                &entries,
                &mut skipped,
                |index, obj, _| decode_monitoring_entry(index, obj, config),
            )),
        };

        DecodedPayload { payload, skipped }
    }

    /// The known kind, or `None` for unrecognized payloads
    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            SourcePayload::OwnershipFile(_) => Some(SourceKind::OwnershipFile),
            SourcePayload::ClusterMetadata(_) => Some(SourceKind::ClusterMetadata),
            SourcePayload::CloudTags(_) => Some(SourceKind::CloudTags),
            SourcePayload::Monitoring(_) => Some(SourceKind::Monitoring),
            SourcePayload::Unrecognized { .. } => None,
        }
    }

    /// `(owner, resource)` pairs in payload order
    pub fn ownership_pairs(&self) -> Vec<(&str, &str)> {
        match self {
            SourcePayload::OwnershipFile(entries) => entries
                .iter()
                .flat_map(|e| e.owners.iter().map(move |o| (o.as_str(), e.path.as_str())))
                .collect(),
            SourcePayload::ClusterMetadata(entries) => entries
                .iter()
                .map(|e| (e.owner.as_str(), e.resource_name.as_str()))
                .collect(),
            SourcePayload::CloudTags(entries) => entries
                .iter()
                .map(|e| (e.owner.as_str(), e.resource_id.as_str()))
                .collect(),
            SourcePayload::Monitoring(entries) => entries
                .iter()
                .map(|e| (e.team.as_str(), e.service.as_str()))
                .collect(),
            SourcePayload::Unrecognized { .. } => Vec::new(),
        }
    }
}

/// A list payload yields its elements; a lone object is a one-entry list
fn entries_of(payload: &Value) -> Option<Vec<&Value>> {
    match payload {
        Value::Array(items) => Some(items.iter().collect()),
        Value::Object(_) => Some(vec![payload]),
        _ => None,
    }
}

fn collect<T>(
    entries: &[&Value],
    skipped: &mut Vec<EntryError>,
    mut decode: impl FnMut(
        usize,
        &Map<String, Value>,
        &mut Vec<EntryError>,
    ) -> Result<T, EntryError>,
) -> Vec<T> {
    let mut decoded = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            skipped.push(EntryError::NotAnObject { index });
            continue;
        };
        match decode(index, obj, skipped) {
            Ok(value) => decoded.push(value),
            Err(e) => skipped.push(e),
        }
    }
    decoded
}

/// Fetch a required, non-empty string field (trimmed)
fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
    index: usize,
) -> Result<&'a str, EntryError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(EntryError::MissingField { index, field }),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(EntryError::EmptyField { index, field })
        }
        Some(Value::String(s)) => Ok(s.trim()),
        Some(_) => Err(EntryError::WrongType {
            index,
            field,
            expected: "string",
        }),
    }
}

/// Fetch a required owner field and normalize it
fn required_owner(
    obj: &Map<String, Value>,
    field: &'static str,
    index: usize,
    config: &ExtractorConfig,
) -> Result<String, EntryError> {
    let raw = required_str(obj, field, index)?;
    config
        .normalize_owner(raw)
        .ok_or(EntryError::EmptyField { index, field })
}

fn decode_ownership_entry(
    index: usize,
    obj: &Map<String, Value>,
    config: &ExtractorConfig,
    skipped: &mut Vec<EntryError>,
) -> Result<OwnershipFileEntry, EntryError> {
    let path = required_str(obj, "path", index)?.to_string();

    let raw_owners = match obj.get("owners") {
        None | Some(Value::Null) => {
            return Err(EntryError::MissingField { index, field: "owners" })
        }
        Some(Value::Array(owners)) => owners,
        Some(_) => {
            return Err(EntryError::WrongType {
                index,
                field: "owners",
                expected: "array",
            })
        }
    };

    let mut owners = Vec::with_capacity(raw_owners.len());
    for (position, raw) in raw_owners.iter().enumerate() {
        match raw.as_str().and_then(|s| config.normalize_owner(s)) {
            Some(owner) => owners.push(owner),
            None => skipped.push(EntryError::InvalidOwner { index, position }),
        }
    }

    if owners.is_empty() {
        return Err(EntryError::EmptyField { index, field: "owners" });
    }

    Ok(OwnershipFileEntry { path, owners })
}

fn decode_cluster_entry(
    index: usize,
    obj: &Map<String, Value>,
    config: &ExtractorConfig,
) -> Result<ClusterResourceEntry, EntryError> {
    let resource_name = required_str(obj, "resourceName", index)?.to_string();
    let owner = required_owner(obj, "owner", index, config)?;
    Ok(ClusterResourceEntry { resource_name, owner })
}

fn decode_cloud_entry(
    index: usize,
    obj: &Map<String, Value>,
    config: &ExtractorConfig,
) -> Result<CloudResourceEntry, EntryError> {
    let resource_id = required_str(obj, "resourceId", index)?.to_string();
    let key = config.owner_tag_key.as_str();

    let raw_owner = match obj.get("tags") {
        None | Some(Value::Null) => return Err(EntryError::MissingField { index, field: "tags" }),
        Some(Value::Object(tags)) => tags.get(key).and_then(Value::as_str),
        // Cloud APIs commonly list tags as [{"Key": ..., "Value": ...}]
        Some(Value::Array(tags)) => tags.iter().find_map(|tag| {
            let tag = tag.as_object()?;
            if tag.get("Key").and_then(Value::as_str) == Some(key) {
                tag.get("Value").and_then(Value::as_str)
            } else {
                None
            }
        }),
        Some(_) => {
            return Err(EntryError::WrongType {
                index,
                field: "tags",
                expected: "object",
            })
        }
    };

    let owner = raw_owner
        .and_then(|raw| config.normalize_owner(raw))
        .ok_or_else(|| EntryError::MissingOwnerTag {
            index,
            key: key.to_string(),
        })?;

    Ok(CloudResourceEntry { resource_id, owner })
}

fn decode_monitoring_entry(
    index: usize,
    obj: &Map<String, Value>,
    config: &ExtractorConfig,
) -> Result<MonitoredServiceEntry, EntryError> {
    let service = required_str(obj, "service", index)?.to_string();
    let team = required_owner(obj, "team", index, config)?;
    Ok(MonitoredServiceEntry { service, team })
}
