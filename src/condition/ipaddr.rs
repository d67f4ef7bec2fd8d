use {
    crate::BuilderError,
    ipnet::IpNet,
    std::{net::IpAddr, str::FromStr},
};

/// IP address operation names.
pub(super) const IP_ADDRESS_DISPLAY_NAMES: [&str; 4] =
    ["IpAddress", "IpAddressIfExists", "NotIpAddress", "NotIpAddressIfExists"];

/// IP address condition values are a single address or a CIDR block.
pub(super) fn validate_ip_address_value(value: &str) -> Result<(), BuilderError> {
    if IpNet::from_str(value).is_ok() || IpAddr::from_str(value).is_ok() {
        Ok(())
    } else {
        Err(BuilderError::InvalidConditionValue(value.to_string()))
    }
}
