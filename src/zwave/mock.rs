use crate::mock_hub::MockVendor;

/// Z-Wave command class values are written and stored as the same flat object.
#[derive(Debug)]
pub struct ZwaveMockVendor;

impl MockVendor for ZwaveMockVendor {}
