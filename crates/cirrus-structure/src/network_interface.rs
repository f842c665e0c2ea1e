//! Network interface addresses, groups and attachments

use crate::api::{
    GroupIdentifier, NetworkInterfaceAttachment, NetworkInterfacePrivateIpAddress,
    PrivateIpAddressSpecification,
};
use serde::{Deserialize, Serialize};

/// `attachment` block of a network interface resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    pub device_index: i32,
    pub attachment_id: String,
}

/// Request the given private addresses; the first one is primary
pub fn expand_private_ip_addresses(ips: &[String]) -> Vec<PrivateIpAddressSpecification> {
    ips.iter()
        .enumerate()
        .map(|(index, ip)| PrivateIpAddressSpecification {
            private_ip_address: ip.clone(),
            primary: index == 0,
        })
        .collect()
}

pub fn flatten_private_ip_addresses(addresses: &[NetworkInterfacePrivateIpAddress]) -> Vec<String> {
    addresses
        .iter()
        .map(|a| a.private_ip_address.clone())
        .collect()
}

/// Group ids of the given identifiers; identifiers without an id are skipped
pub fn flatten_group_identifiers(groups: &[GroupIdentifier]) -> Vec<String> {
    groups.iter().filter_map(|g| g.group_id.clone()).collect()
}

pub fn flatten_attachment(attachment: &NetworkInterfaceAttachment) -> AttachmentBlock {
    AttachmentBlock {
        instance: attachment.instance_id.clone(),
        device_index: attachment.device_index,
        attachment_id: attachment.attachment_id.clone(),
    }
}
