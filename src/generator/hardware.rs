use super::HardwareAddrSource;
use crate::Error;

/// The default [`HardwareAddrSource`] that returns the address of the first network interface
/// that has one.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SystemHardwareAddr;

impl HardwareAddrSource for SystemHardwareAddr {
    fn hardware_addr(&self) -> Result<[u8; 6], Error> {
        match mac_address::get_mac_address() {
            Ok(Some(addr)) => Ok(addr.bytes()),
            Ok(None) => Err(Error::HardwareAddressUnavailable(
                "no network interface with a hardware address".to_owned(),
            )),
            Err(err) => Err(Error::HardwareAddressUnavailable(err.to_string())),
        }
    }
}
