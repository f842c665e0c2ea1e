//! Load balancer listeners

use crate::api::{Listener, ListenerDescription};
use crate::error::{MapperError, Result};
use serde::{Deserialize, Serialize};

/// Protocols that may carry a TLS certificate
const TLS_PROTOCOLS: [&str; 2] = ["https", "ssl"];

/// `listener` block of a load balancer resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListenerBlock {
    pub instance_port: i32,
    pub instance_protocol: String,
    pub lb_port: i32,
    pub lb_protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_certificate_id: Option<String>,
}

fn is_tls_protocol(protocol: &str) -> bool {
    TLS_PROTOCOLS.iter().any(|p| protocol.eq_ignore_ascii_case(p))
}

/// Convert configured listener blocks into API listeners
///
/// A non-empty `ssl_certificate_id` is only accepted when the instance or the
/// balancer side speaks `https`/`ssl`; otherwise the whole conversion fails.
pub fn expand_listeners(configured: &[ListenerBlock]) -> Result<Vec<Listener>> {
    configured.iter().map(expand_listener).collect()
}

fn expand_listener(block: &ListenerBlock) -> Result<Listener> {
    let certificate_id = block
        .ssl_certificate_id
        .as_deref()
        .filter(|id| !id.is_empty());

    if let Some(id) = certificate_id {
        if !is_tls_protocol(&block.instance_protocol) && !is_tls_protocol(&block.lb_protocol) {
            return Err(MapperError::InvalidListenerConfig {
                certificate_id: id.to_string(),
                instance_protocol: block.instance_protocol.clone(),
                lb_protocol: block.lb_protocol.clone(),
            });
        }
    }

    Ok(Listener {
        instance_port: block.instance_port,
        instance_protocol: block.instance_protocol.clone(),
        load_balancer_port: block.lb_port,
        protocol: block.lb_protocol.clone(),
        ssl_certificate_id: certificate_id.map(str::to_string),
    })
}

/// Convert described listeners back into listener blocks
///
/// Protocols are lower-cased; the API reports them upper-case.
pub fn flatten_listeners(list: &[ListenerDescription]) -> Vec<ListenerBlock> {
    list.iter()
        .map(|description| {
            let listener = &description.listener;
            ListenerBlock {
                instance_port: listener.instance_port,
                instance_protocol: listener.instance_protocol.to_lowercase(),
                lb_port: listener.load_balancer_port,
                lb_protocol: listener.protocol.to_lowercase(),
                ssl_certificate_id: listener.ssl_certificate_id.clone(),
            }
        })
        .collect()
}
