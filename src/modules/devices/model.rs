pub use aristokrat_models::devices::{
    BulkDeviceStateDto, Device, DeviceFilterParams, DeviceKey, DeviceToggleRequest,
    SeedDevicesResponse, UpdatedCountResponse,
};
