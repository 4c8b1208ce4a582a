mod descriptor;

pub use descriptor::{BleProps, CloudProps, DeviceDescriptor, FromProps, HubDeviceInfo, HueProps, Props, SmartThingsProps};
