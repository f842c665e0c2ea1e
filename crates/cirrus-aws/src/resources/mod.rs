//! Resource handlers backed by a [`ResolvedSession`]

pub mod vpc_dhcp_options_association;

use crate::session::ResolvedSession;
use cirrus_cloud::ResourceRegistry;

pub use vpc_dhcp_options_association::VpcDhcpOptionsAssociation;

/// Registry of every resource type this provider serves
pub fn registry() -> ResourceRegistry<ResolvedSession> {
    ResourceRegistry::new().with(VpcDhcpOptionsAssociation)
}
