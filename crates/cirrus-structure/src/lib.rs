//! Cirrus Structure
//!
//! Conversion between the provider's configuration attributes and the typed
//! request/response shapes of the cloud API.
//!
//! - *expand*: configuration blocks → API shapes
//! - *flatten*: API shapes → configuration blocks
//!
//! Every function is pure and synchronous. Invalid input is rejected with a
//! [`MapperError`] before any request is issued.

pub mod api;
pub mod attributes;
pub mod document;
pub mod error;
pub mod listener;
pub mod load_balancer;
pub mod network_interface;
pub mod security_group;
pub mod strings;
pub mod tags;

pub use attributes::{decode_block, decode_blocks, encode_blocks};
pub use document::{check_yaml_document, normalize_json_document, normalize_structured_document};
pub use error::{MapperError, Result};
pub use listener::{ListenerBlock, expand_listeners, flatten_listeners};
pub use load_balancer::{
    AccessLogBlock, HealthCheckBlock, PolicyAttributeBlock, expand_health_check, expand_instances,
    expand_policy_attributes, flatten_access_log, flatten_backend_policies, flatten_health_check,
    flatten_instances, flatten_policy_attributes,
};
pub use network_interface::{
    AttachmentBlock, expand_private_ip_addresses, flatten_attachment, flatten_group_identifiers,
    flatten_private_ip_addresses,
};
pub use security_group::{
    Direction, GroupReference, IpPermissionBlock, SecurityGroupRuleBlock,
    expand_ip_permissions, expand_security_group_rule, flatten_ip_permissions,
    flatten_security_group_references,
};
pub use strings::{expand_string_list, sorted_strings};
pub use tags::{expand_tags, flatten_tags};
